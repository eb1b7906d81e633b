use super::FieldStrategy;
use crate::schema::StructSpec;
use crate::writer::CodeWriter;

/// Attributes: an ordered key/value list viewed through the runtime `Map`.
#[derive(Debug, Clone, Default)]
pub struct MapField;

impl FieldStrategy for MapField {
    fn emit_accessors(&self, w: &mut CodeWriter, parent: &StructSpec, field: &str) {
        w.doc(format!(
            "Returns the {field} associated with this {}.",
            parent.name
        ));
        w.open(format!("pub fn {field}(&mut self) -> Map<'_> {{"));
        w.line(format!("Map::from_orig(&mut self.orig.{field})"));
        w.close("}");
        w.blank();
    }

    fn emit_copy(&self, w: &mut CodeWriter, field: &str) {
        w.line(format!("Map::copy_orig(&mut dest.{field}, &src.{field});"));
    }

    fn accessor_names(&self, field: &str) -> Vec<String> {
        vec![field.to_string()]
    }

    fn default_value(&self) -> String {
        "Map::new()".to_string()
    }

    fn test_value(&self) -> String {
        "generate_test_map()".to_string()
    }

    fn fill_statement(&self, target: &str, field: &str) -> String {
        format!("fill_test_map(&mut {target}.{field}());")
    }
}
