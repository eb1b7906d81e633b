use super::FieldStrategy;
use crate::schema::StructSpec;
use crate::writer::CodeWriter;

/// A proto enum stored as `i32`, exposed through a hand-written newtype
/// `type_name(pub i32)` that lives next to the generated code.
#[derive(Debug, Clone)]
pub struct EnumField {
    pub type_name: String,
    pub default: i32,
    pub test: i32,
}

impl EnumField {
    pub fn new(type_name: impl Into<String>, default: i32, test: i32) -> Self {
        EnumField {
            type_name: type_name.into(),
            default,
            test,
        }
    }

    fn value(&self, v: i32) -> String {
        format!("{}({v})", self.type_name)
    }
}

impl FieldStrategy for EnumField {
    fn emit_accessors(&self, w: &mut CodeWriter, parent: &StructSpec, field: &str) {
        let ty = &self.type_name;
        w.doc(format!("Returns the {field} associated with this {}.", parent.name));
        w.open(format!("pub fn {field}(&self) -> {ty} {{"));
        w.line(format!("{ty}(self.orig.{field})"));
        w.close("}");
        w.blank();

        w.doc(format!("Replaces the {field} associated with this {}.", parent.name));
        w.open(format!("pub fn set_{field}(&mut self, v: {ty}) {{"));
        w.line(format!("self.orig.{field} = v.0;"));
        w.close("}");
        w.blank();
    }

    fn emit_copy(&self, w: &mut CodeWriter, field: &str) {
        w.line(format!("dest.{field} = src.{field};"));
    }

    fn accessor_names(&self, field: &str) -> Vec<String> {
        vec![field.to_string(), format!("set_{field}")]
    }

    fn default_value(&self) -> String {
        self.value(self.default)
    }

    fn test_value(&self) -> String {
        self.value(self.test)
    }

    fn fill_statement(&self, target: &str, field: &str) -> String {
        format!("{target}.set_{field}({});", self.test_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StructSpec {
        StructSpec {
            name: "LogRecord".into(),
            description: Vec::new(),
            orig_full_name: "otlplogs::LogRecord".into(),
            fields: Vec::new(),
        }
    }

    #[test]
    fn accessors_wrap_and_unwrap_the_newtype() {
        let f = EnumField::new("SeverityNumber", 0, 9);
        let mut w = CodeWriter::new();
        f.emit_accessors(&mut w, &record(), "severity_number");
        let out = w.finish();
        assert!(out.contains(
            "pub fn severity_number(&self) -> SeverityNumber {\n    SeverityNumber(self.orig.severity_number)\n}"
        ));
        assert!(out.contains(
            "pub fn set_severity_number(&mut self, v: SeverityNumber) {\n    self.orig.severity_number = v.0;\n}"
        ));
    }

    #[test]
    fn values_render_as_newtype_constructors() {
        let f = EnumField::new("SeverityNumber", 0, 9);
        assert_eq!(f.default_value(), "SeverityNumber(0)");
        assert_eq!(
            f.fill_statement("tv", "severity_number"),
            "tv.set_severity_number(SeverityNumber(9));"
        );
        let mut w = CodeWriter::new();
        f.emit_copy(&mut w, "severity_number");
        assert_eq!(w.finish(), "dest.severity_number = src.severity_number;\n");
    }
}
