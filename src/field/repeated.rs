use super::FieldStrategy;
use crate::schema::{snake, StructSpec};
use crate::writer::CodeWriter;

/// A repeated message; the accessor returns the element type's `<Name>Slice` view.
#[derive(Debug, Clone)]
pub struct RepeatedField {
    pub struct_name: String,
}

impl RepeatedField {
    pub fn new(struct_name: impl Into<String>) -> Self {
        RepeatedField {
            struct_name: struct_name.into(),
        }
    }

    fn slice_name(&self) -> String {
        format!("{}Slice", self.struct_name)
    }
}

impl FieldStrategy for RepeatedField {
    fn emit_accessors(&self, w: &mut CodeWriter, parent: &StructSpec, field: &str) {
        let slice = self.slice_name();
        w.doc(format!(
            "Returns the {field} associated with this {}.",
            parent.name
        ));
        w.open(format!("pub fn {field}(&mut self) -> {slice}<'_> {{"));
        w.line(format!("{slice}::from_orig(&mut self.orig.{field})"));
        w.close("}");
        w.blank();
    }

    fn emit_copy(&self, w: &mut CodeWriter, field: &str) {
        w.line(format!("Slice::copy_orig(&mut dest.{field}, &src.{field});"));
    }

    fn accessor_names(&self, field: &str) -> Vec<String> {
        vec![field.to_string()]
    }

    fn default_value(&self) -> String {
        format!("{}::new()", self.slice_name())
    }

    fn test_value(&self) -> String {
        format!("generate_test_{}_slice()", snake(&self.struct_name))
    }

    fn fill_statement(&self, target: &str, field: &str) -> String {
        format!(
            "fill_test_{}_slice(&mut {target}.{field}());",
            snake(&self.struct_name)
        )
    }
}
