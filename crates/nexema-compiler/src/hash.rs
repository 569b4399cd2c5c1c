//! Structural hashing for canonical ids.
//!
//! Every input is framed (length-prefixed strings, a tag byte per variant) so
//! that distinct structures never feed the same byte stream to blake3. Map
//! entries are hashed in declaration order; callers sort anything whose order
//! is not part of the schema before it reaches the hasher.

use nexema_core::{Assignment, SnapshotFile, TypeStmt, Value, ValueType, ValueTypeStmt};

pub struct StructuralHasher {
    inner: blake3::Hasher,
}

impl StructuralHasher {
    /// Start a hash in the given domain (`"type"`, `"file"`, `"snapshot"`).
    pub fn new(domain: &str) -> Self {
        let mut hasher = Self {
            inner: blake3::Hasher::new(),
        };
        hasher.str(domain);
        hasher
    }

    pub fn tag(&mut self, tag: u8) -> &mut Self {
        self.inner.update(&[tag]);
        self
    }

    pub fn u64(&mut self, n: u64) -> &mut Self {
        self.inner.update(&n.to_le_bytes());
        self
    }

    pub fn i64(&mut self, n: i64) -> &mut Self {
        self.inner.update(&n.to_le_bytes());
        self
    }

    pub fn bool(&mut self, b: bool) -> &mut Self {
        self.tag(b as u8)
    }

    pub fn str(&mut self, s: &str) -> &mut Self {
        self.u64(s.len() as u64);
        self.inner.update(s.as_bytes());
        self
    }

    pub fn opt_str(&mut self, s: Option<&str>) -> &mut Self {
        match s {
            Some(s) => self.tag(1).str(s),
            None => self.tag(0),
        }
    }

    pub fn strs<'a>(&mut self, items: impl ExactSizeIterator<Item = &'a str>) -> &mut Self {
        self.u64(items.len() as u64);
        for item in items {
            self.str(item);
        }
        self
    }

    pub fn value(&mut self, value: &Value) -> &mut Self {
        match value {
            Value::String(s) => self.tag(0).str(s),
            Value::Int(i) => self.tag(1).i64(*i),
            Value::Float(x) => self.tag(2).u64(x.to_bits()),
            Value::Bool(b) => self.tag(3).bool(*b),
            Value::List(items) => {
                self.tag(4).u64(items.len() as u64);
                for item in items {
                    self.value(item);
                }
                self
            }
            Value::Map(entries) => {
                self.tag(5).u64(entries.len() as u64);
                for (k, v) in entries {
                    self.value(k).value(v);
                }
                self
            }
        }
    }

    pub fn entries<'a>(
        &mut self,
        entries: impl ExactSizeIterator<Item = (&'a str, &'a Value)>,
    ) -> &mut Self {
        self.u64(entries.len() as u64);
        for (key, value) in entries {
            self.str(key).value(value);
        }
        self
    }

    /// Lowercase hex digest.
    pub fn finish(&self) -> String {
        self.inner.finalize().to_hex().to_string()
    }
}

/// Canonical id of a type declaration in `package_path`.
///
/// Covers the name, modifier, base reference, fields (with their effective
/// indexes and declared value types), defaults and annotations. Documentation
/// does not participate.
pub fn type_id(package_path: &str, decl: &TypeStmt) -> String {
    let mut h = StructuralHasher::new("type");
    h.str(package_path)
        .str(&decl.name.name)
        .str(decl.modifier.as_str());

    match &decl.base_type {
        Some(base) => h.tag(1).str(&base.name).opt_str(base.alias()),
        None => h.tag(0),
    };

    h.u64(decl.fields.len() as u64);
    for (field, index) in decl.fields.iter().zip(decl.field_indexes()) {
        match index {
            Some(index) => h.tag(1).i64(index),
            None => h.tag(0),
        };
        h.str(&field.name.name);
        match &field.value_type {
            Some(vt) => {
                h.tag(1);
                value_type_stmt(&mut h, vt);
            }
            None => {
                h.tag(0);
            }
        }
        assignments(&mut h, &field.annotations);
    }

    assignments(&mut h, &decl.defaults);
    assignments(&mut h, &decl.annotations);
    h.finish()
}

fn value_type_stmt(h: &mut StructuralHasher, vt: &ValueTypeStmt) {
    h.str(&vt.ident.name)
        .opt_str(vt.ident.alias())
        .bool(vt.nullable)
        .u64(vt.args.len() as u64);
    for arg in &vt.args {
        value_type_stmt(h, arg);
    }
}

fn assignments(h: &mut StructuralHasher, items: &[Assignment]) {
    h.entries(items.iter().map(|a| (a.key.as_str(), &a.value)));
}

/// Canonical id of an assembled snapshot file. `file.id` itself is ignored.
pub fn file_id(file: &SnapshotFile) -> String {
    let mut h = StructuralHasher::new("file");
    h.str(&file.package_name)
        .str(&file.path)
        .u64(file.types.len() as u64);
    for ty in &file.types {
        h.str(&ty.id)
            .str(&ty.name)
            .str(ty.modifier.as_str())
            .strs(ty.documentation.iter().map(String::as_str))
            .entries(ty.annotations.iter().map(|(k, v)| (k.as_str(), v)))
            .entries(ty.defaults.iter().map(|(k, v)| (k.as_str(), v)))
            .opt_str(ty.base_type.as_deref())
            .u64(ty.fields.len() as u64);
        for field in &ty.fields {
            h.i64(field.index)
                .str(&field.name)
                .strs(field.documentation.iter().map(String::as_str))
                .entries(field.annotations.iter().map(|(k, v)| (k.as_str(), v)));
            match &field.default_value {
                Some(value) => h.tag(1).value(value),
                None => h.tag(0),
            };
            match &field.value_type {
                Some(vt) => {
                    h.tag(1);
                    value_type(&mut h, vt);
                }
                None => {
                    h.tag(0);
                }
            }
        }
    }
    h.finish()
}

fn value_type(h: &mut StructuralHasher, vt: &ValueType) {
    match vt {
        ValueType::Primitive {
            primitive,
            nullable,
            arguments,
        } => {
            h.tag(0)
                .str(primitive.as_str())
                .bool(*nullable)
                .u64(arguments.len() as u64);
            for arg in arguments {
                value_type(h, arg);
            }
        }
        ValueType::Custom {
            object_id,
            nullable,
            import_alias,
        } => {
            h.tag(1)
                .str(object_id)
                .bool(*nullable)
                .opt_str(import_alias.as_deref());
        }
    }
}

/// Snapshot fingerprint over file ids, independent of their order.
pub fn snapshot_hashcode<'a>(file_ids: impl IntoIterator<Item = &'a str>) -> String {
    let mut ids: Vec<&str> = file_ids.into_iter().collect();
    ids.sort_unstable();
    let mut h = StructuralHasher::new("snapshot");
    h.strs(ids.into_iter());
    h.finish()
}
