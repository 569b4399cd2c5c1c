use crate::Error;
use crate::diagnostics::Diagnostics;
use crate::scope::ScopeTree;
use crate::test_utils::{AstBuilder, base_type, link_asts, struct_type, summary};

fn object_names<'t>(tree: &'t ScopeTree, ids: &[crate::scope::ObjectId]) -> Vec<&'t str> {
    ids.iter().map(|&id| tree.object(id).name.as_str()).collect()
}

#[test]
fn intermediate_packages_are_created() {
    let mut diagnostics = Diagnostics::new();
    let tree = ScopeTree::build(
        vec![
            AstBuilder::new("api/v1/user.nex").build(),
            AstBuilder::new("root.nex").build(),
        ],
        &mut diagnostics,
    )
    .unwrap();

    let paths: Vec<&str> = tree.package_paths().collect();
    assert_eq!(paths, ["", "api", "api/v1"]);

    let v1 = tree.package(tree.package_by_path("api/v1").unwrap());
    let api = tree.package_by_path("api").unwrap();
    assert_eq!(v1.parent, Some(api));
    assert_eq!(v1.name(), "v1");
    assert_eq!(tree.package(api).children, [v1.id]);
    assert!(tree.package(api).locals.is_empty());
    assert_eq!(tree.package(tree.root()).locals.len(), 1);
    assert!(diagnostics.is_empty());
}

#[test]
fn file_paths_are_normalized() {
    let mut ast = AstBuilder::new("x.nex").build();
    ast.file.path = ".\\common//".to_string();

    let mut diagnostics = Diagnostics::new();
    let tree = ScopeTree::build(vec![ast], &mut diagnostics).unwrap();

    let common = tree.package_by_path("common").unwrap();
    let local = tree.package(common).locals[0];
    assert_eq!(tree.file(local).full_path(), "common/x.nex");
}

#[test]
fn duplicate_file_after_normalization() {
    let mut other = AstBuilder::new("x.nex").build();
    other.file.path = "./a/".to_string();

    let mut diagnostics = Diagnostics::new();
    let err = ScopeTree::build(vec![AstBuilder::new("a/x.nex").build(), other], &mut diagnostics)
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateFile(ref path) if path == "a/x.nex"));
}

#[test]
fn duplicate_names_across_files_of_a_package() {
    let (tree, diagnostics) = link_asts(vec![
        AstBuilder::new("a/one.nex").ty(struct_type("T")).build(),
        AstBuilder::new("a/two.nex")
            .ty(struct_type("U"))
            .ty(struct_type("T"))
            .build(),
    ]);

    insta::assert_snapshot!(summary(&diagnostics), @"AlreadyDefined: `T` is already defined");
    let a = tree.package_by_path("a").unwrap();
    let names: Vec<&str> = tree.package_objects(a).map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["T", "U"]);
}

#[test]
fn local_declarations_shadow_imports() {
    let (tree, _) = link_asts(vec![
        AstBuilder::new("a/a.nex").ty(struct_type("T")).build(),
        AstBuilder::new("c/c.nex")
            .uses_as("a", "x")
            .ty(struct_type("T"))
            .build(),
    ]);
    let c = tree.package(tree.package_by_path("c").unwrap()).locals[0];

    let local = tree.find_object(c, "T", None);
    assert_eq!(local.len(), 1);
    assert_eq!(tree.object(local[0]).local, c);

    let imported = tree.find_object(c, "T", Some("x"));
    assert_eq!(imported.len(), 1);
    assert_ne!(tree.object(imported[0]).local, c);
}

#[test]
fn unaliased_lookup_collects_every_match() {
    let (tree, _) = link_asts(vec![
        AstBuilder::new("a/a.nex").ty(struct_type("T")).build(),
        AstBuilder::new("b/b.nex").ty(struct_type("T")).ty(struct_type("V")).build(),
        AstBuilder::new("c/c.nex").uses("a").uses("b").build(),
    ]);
    let c = tree.package(tree.package_by_path("c").unwrap()).locals[0];

    assert_eq!(object_names(&tree, &tree.find_object(c, "T", None)), ["T", "T"]);
    assert_eq!(object_names(&tree, &tree.find_object(c, "V", None)), ["V"]);
    assert!(tree.find_object(c, "W", None).is_empty());
    // an alias only searches its own imports
    assert!(tree.find_object(c, "T", Some("a")).is_empty());
}

#[test]
fn sibling_files_are_not_visible() {
    let (tree, _) = link_asts(vec![
        AstBuilder::new("a/one.nex").ty(struct_type("T")).build(),
        AstBuilder::new("a/two.nex").build(),
    ]);
    let a = tree.package(tree.package_by_path("a").unwrap());
    let two = a.locals[1];

    assert_eq!(tree.file(two).name, "two.nex");
    assert!(tree.find_object(two, "T", None).is_empty());
    assert!(tree.package_object(a.id, "T").is_some());
}

#[test]
fn visible_names_follow_alias() {
    let (tree, _) = link_asts(vec![
        AstBuilder::new("common/entity.nex").ty(base_type("Entity")).build(),
        AstBuilder::new("other/o.nex").ty(struct_type("Other")).build(),
        AstBuilder::new("c/c.nex")
            .uses("common")
            .uses_as("other", "o")
            .ty(struct_type("Local"))
            .build(),
    ]);
    let c = tree.package(tree.package_by_path("c").unwrap()).locals[0];

    assert_eq!(tree.visible_names(c, None), ["Local", "Entity"]);
    assert_eq!(tree.visible_names(c, Some("o")), ["Other"]);
}

#[test]
fn objects_respect_depth() {
    let (tree, _) = link_asts(vec![
        AstBuilder::new("a.nex").ty(struct_type("Root")).build(),
        AstBuilder::new("x/b.nex").ty(struct_type("X")).build(),
        AstBuilder::new("x/y/c.nex").ty(struct_type("Y")).build(),
    ]);
    let names = |depth| -> Vec<String> {
        tree.objects(tree.root(), depth)
            .into_iter()
            .map(|o| o.name.clone())
            .collect()
    };

    assert_eq!(names(Some(0)), ["Root"]);
    assert_eq!(names(Some(1)), ["Root", "X"]);
    assert_eq!(names(None), ["Root", "X", "Y"]);
}

#[test]
fn canonical_ids_depend_on_package() {
    let (tree, _) = link_asts(vec![
        AstBuilder::new("a/a.nex").ty(struct_type("T")).build(),
        AstBuilder::new("b/b.nex").ty(struct_type("T")).build(),
    ]);

    let ids: Vec<&str> = tree.all_objects().iter().map(|o| o.canonical_id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}
