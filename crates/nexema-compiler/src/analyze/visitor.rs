//! Declaration visitor.
//!
//! Implement `Visitor` and override the `visit_*` methods you need. Call the
//! matching `walk_*` inside an override to keep descending.
//!
//! ```ignore
//! impl<'a> Visitor<'a> for ListArguments<'_, 'a> {
//!     fn visit_value_type(&mut self, vt: &'a ValueTypeStmt) {
//!         // pre-order logic
//!         walk_value_type(self, vt);
//!     }
//! }
//! ```

use nexema_core::{FieldStmt, TypeStmt, ValueTypeStmt};

pub trait Visitor<'a>: Sized {
    fn visit_type(&mut self, decl: &'a TypeStmt) {
        walk_type(self, decl);
    }

    fn visit_field(&mut self, field: &'a FieldStmt) {
        walk_field(self, field);
    }

    fn visit_value_type(&mut self, vt: &'a ValueTypeStmt) {
        walk_value_type(self, vt);
    }
}

pub fn walk_type<'a, V: Visitor<'a>>(visitor: &mut V, decl: &'a TypeStmt) {
    for field in &decl.fields {
        visitor.visit_field(field);
    }
}

pub fn walk_field<'a, V: Visitor<'a>>(visitor: &mut V, field: &'a FieldStmt) {
    if let Some(vt) = &field.value_type {
        visitor.visit_value_type(vt);
    }
}

pub fn walk_value_type<'a, V: Visitor<'a>>(visitor: &mut V, vt: &'a ValueTypeStmt) {
    for arg in &vt.args {
        visitor.visit_value_type(arg);
    }
}
