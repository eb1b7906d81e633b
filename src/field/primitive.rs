use super::FieldStrategy;
use crate::schema::{Literal, PrimitiveType, StructSpec};
use crate::writer::CodeWriter;

/// A scalar field stored inline in the message: read by value (or by slice for
/// strings and bytes), replaced in place by its setter.
#[derive(Debug, Clone)]
pub struct PrimitiveField {
    pub ty: PrimitiveType,
    pub default: Literal,
    pub test: Literal,
}

impl PrimitiveField {
    pub fn new(ty: PrimitiveType, default: Literal, test: Literal) -> Self {
        PrimitiveField { ty, default, test }
    }
}

impl FieldStrategy for PrimitiveField {
    fn emit_accessors(&self, w: &mut CodeWriter, parent: &StructSpec, field: &str) {
        let borrow = if self.ty.is_copy() { "" } else { "&" };
        w.doc(format!(
            "Returns the {field} associated with this {}.",
            parent.name
        ));
        w.open(format!(
            "pub fn {field}(&self) -> {} {{",
            self.ty.getter_type()
        ));
        w.line(format!("{borrow}self.orig.{field}"));
        w.close("}");
        w.blank();

        w.doc(format!(
            "Replaces the {field} associated with this {}.",
            parent.name
        ));
        w.open(format!(
            "pub fn set_{field}(&mut self, v: {}) {{",
            self.ty.setter_type()
        ));
        w.line(format!("self.orig.{field} = {};", self.ty.store_expr("v")));
        w.close("}");
        w.blank();
    }

    fn emit_copy(&self, w: &mut CodeWriter, field: &str) {
        if self.ty.is_copy() {
            w.line(format!("dest.{field} = src.{field};"));
        } else {
            w.line(format!("dest.{field}.clone_from(&src.{field});"));
        }
    }

    fn accessor_names(&self, field: &str) -> Vec<String> {
        vec![field.to_string(), format!("set_{field}")]
    }

    fn default_value(&self) -> String {
        self.ty.render(&self.default)
    }

    fn test_value(&self) -> String {
        self.ty.render(&self.test)
    }

    fn fill_statement(&self, target: &str, field: &str) -> String {
        format!("{target}.set_{field}({});", self.test_value())
    }
}
