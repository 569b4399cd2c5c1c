use indexmap::IndexMap;

use crate::{
    FieldDefinition, Modifier, Primitive, Snapshot, SnapshotFile, TypeDefinition, Value, ValueType,
};

fn sample() -> Snapshot {
    let mut defaults = IndexMap::new();
    defaults.insert("name".to_string(), Value::from("anonymous"));
    Snapshot {
        version: 1,
        hashcode: "abc".into(),
        files: vec![SnapshotFile {
            id: "f1".into(),
            package_name: "identity".into(),
            path: "identity/user.nex".into(),
            types: vec![TypeDefinition {
                id: "t1".into(),
                name: "User".into(),
                modifier: Modifier::Struct,
                documentation: vec!["A user.".into()],
                annotations: IndexMap::new(),
                defaults,
                base_type: Some("t0".into()),
                fields: vec![FieldDefinition {
                    index: 0,
                    name: "name".into(),
                    documentation: vec![],
                    annotations: IndexMap::new(),
                    default_value: Some(Value::from("anonymous")),
                    value_type: Some(ValueType::Primitive {
                        primitive: Primitive::String,
                        nullable: false,
                        arguments: vec![],
                    }),
                }],
            }],
        }],
    }
}

#[test]
fn json_uses_camel_case_keys() {
    let json = sample().to_json().unwrap();
    assert!(json.contains("\"packageName\":\"identity\""));
    assert!(json.contains("\"baseType\":\"t0\""));
    assert!(json.contains("\"defaultValue\":{\"kind\":\"string\",\"value\":\"anonymous\"}"));
    assert!(json.contains("\"type\":{\"kind\":\"primitive\",\"primitive\":\"string\",\"nullable\":false}"));
}

#[test]
fn json_round_trip() {
    let snapshot = sample();
    let json = snapshot.to_json_pretty().unwrap();
    assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);
}

#[test]
fn custom_value_type_json() {
    let vt = ValueType::Custom {
        object_id: "t0".into(),
        nullable: true,
        import_alias: Some("c".into()),
    };
    let json = serde_json::to_string(&vt).unwrap();
    assert_eq!(
        json,
        r#"{"kind":"custom","objectId":"t0","nullable":true,"importAlias":"c"}"#
    );
}

#[test]
fn lookups() {
    let snapshot = sample();
    let user = snapshot.type_by_id("t1").unwrap();
    assert_eq!(user.name, "User");
    assert!(user.field("name").is_some());
    assert!(snapshot.file("identity/user.nex").unwrap().type_named("User").is_some());
}
