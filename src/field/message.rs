use super::FieldStrategy;
use crate::schema::{snake, StructSpec};
use crate::writer::CodeWriter;

/// A nested message stored inline; the accessor returns a wrapper viewing it.
#[derive(Debug, Clone)]
pub struct MessageField {
    pub struct_name: String,
}

impl MessageField {
    pub fn new(struct_name: impl Into<String>) -> Self {
        MessageField {
            struct_name: struct_name.into(),
        }
    }
}

impl FieldStrategy for MessageField {
    fn emit_accessors(&self, w: &mut CodeWriter, parent: &StructSpec, field: &str) {
        w.doc(format!(
            "Returns the {field} associated with this {}.",
            parent.name
        ));
        w.open(format!(
            "pub fn {field}(&mut self) -> {}<'_> {{",
            self.struct_name
        ));
        w.line(format!(
            "{}::from_orig(&mut self.orig.{field})",
            self.struct_name
        ));
        w.close("}");
        w.blank();
    }

    fn emit_copy(&self, w: &mut CodeWriter, field: &str) {
        w.line(format!("Wrap::copy_orig(&mut dest.{field}, &src.{field});"));
    }

    fn accessor_names(&self, field: &str) -> Vec<String> {
        vec![field.to_string()]
    }

    fn default_value(&self) -> String {
        format!("{}::new()", self.struct_name)
    }

    fn test_value(&self) -> String {
        format!("generate_test_{}()", snake(&self.struct_name))
    }

    fn fill_statement(&self, target: &str, field: &str) -> String {
        format!(
            "fill_test_{}(&mut {target}.{field}());",
            snake(&self.struct_name)
        )
    }
}
