use super::{emit_default_and_fill_test, FieldStrategy};
use crate::schema::{pascal, snake, Literal, PrimitiveType, StructSpec};
use crate::writer::CodeWriter;

/// A prost oneof: at most one of several variants is set at a time.
///
/// The generator emits a `<type_name>` enum naming the variants (plus `Empty`),
/// a `<field>_type()` discriminator, and per-variant accessors. Primitive variants
/// read as their zero value when another variant is set; message variants return
/// `None` instead.
#[derive(Debug, Clone)]
pub struct OneOfField {
    /// Name of the generated discriminator enum.
    pub type_name: String,
    /// Path of the prost oneof enum, e.g. `otlpcommon::any_value::Value`.
    pub orig_enum: String,
    pub variants: Vec<OneOfVariant>,
}

#[derive(Debug, Clone)]
pub struct OneOfVariant {
    /// Accessor name; the discriminator variant is its PascalCase form.
    pub name: String,
    /// Variant name in the prost oneof enum.
    pub orig_variant: String,
    pub kind: VariantKind,
}

#[derive(Debug, Clone)]
pub enum VariantKind {
    Primitive { ty: PrimitiveType, test: Literal },
    Message(String),
}

impl OneOfVariant {
    fn type_variant(&self) -> String {
        pascal(&self.name)
    }
}

impl OneOfField {
    fn orig_path(&self, v: &OneOfVariant) -> String {
        format!("{}::{}", self.orig_enum, v.orig_variant)
    }

    fn emit_variant_accessors(&self, w: &mut CodeWriter, field: &str, v: &OneOfVariant) {
        let path = self.orig_path(v);
        match &v.kind {
            VariantKind::Primitive { ty, .. } => {
                w.doc(format!(
                    "Returns the {} held by {field}, or the zero value when another variant is set.",
                    v.name
                ));
                w.open(format!("pub fn {}(&self) -> {} {{", v.name, ty.getter_type()));
                w.open(format!("match &self.orig.{field} {{"));
                w.line(format!("Some({path}(v)) => {},", ty.read_expr("v")));
                w.line("_ => Default::default(),");
                w.close("}");
                w.close("}");
                w.blank();

                w.doc(format!("Replaces {field} with the given {}.", v.name));
                w.open(format!(
                    "pub fn set_{}(&mut self, v: {}) {{",
                    v.name,
                    ty.setter_type()
                ));
                w.line(format!(
                    "self.orig.{field} = Some({path}({}));",
                    ty.store_expr("v")
                ));
                w.close("}");
                w.blank();
            }
            VariantKind::Message(struct_name) => {
                w.doc(format!(
                    "Returns the {} held by {field}, or `None` when another variant is set.",
                    v.name
                ));
                w.open(format!(
                    "pub fn {}(&mut self) -> Option<{struct_name}<'_>> {{",
                    v.name
                ));
                w.open(format!("match &mut self.orig.{field} {{"));
                w.line(format!("Some({path}(v)) => Some({struct_name}::from_orig(v)),"));
                w.line("_ => None,");
                w.close("}");
                w.close("}");
                w.blank();

                w.doc(format!(
                    "Replaces {field} with an empty {} and returns it.",
                    v.name
                ));
                w.open(format!(
                    "pub fn set_empty_{}(&mut self) -> {struct_name}<'_> {{",
                    v.name
                ));
                w.open(format!(
                    "match self.orig.{field}.insert({path}(Default::default())) {{"
                ));
                w.line(format!("{path}(v) => {struct_name}::from_orig(v),"));
                if self.variants.len() > 1 {
                    w.line("_ => unreachable!(\"variant was just assigned\"),");
                }
                w.close("}");
                w.close("}");
                w.blank();
            }
        }
    }

    fn variant_fill(&self, target: &str, v: &OneOfVariant) -> String {
        match &v.kind {
            VariantKind::Primitive { ty, test } => {
                format!("{target}.set_{}({});", v.name, ty.render(test))
            }
            VariantKind::Message(struct_name) => format!(
                "fill_test_{}(&mut {target}.set_empty_{}());",
                snake(struct_name),
                v.name
            ),
        }
    }
}

impl FieldStrategy for OneOfField {
    fn emit_types(&self, w: &mut CodeWriter, parent: &StructSpec, field: &str) {
        let ty = &self.type_name;
        w.doc(format!(
            "{ty} identifies which variant {}.{field} currently holds.",
            parent.name
        ));
        w.line("#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]");
        w.open(format!("pub enum {ty} {{"));
        w.line("Empty,");
        for v in &self.variants {
            w.line(format!("{},", v.type_variant()));
        }
        w.close("}");
        w.blank();

        w.open(format!("impl {ty} {{"));
        w.open("pub fn as_str(&self) -> &'static str {");
        w.open("match self {");
        w.line(format!("{ty}::Empty => \"Empty\","));
        for v in &self.variants {
            let name = v.type_variant();
            w.line(format!("{ty}::{name} => \"{name}\","));
        }
        w.close("}");
        w.close("}");
        w.close("}");
        w.blank();

        w.open(format!("impl std::fmt::Display for {ty} {{"));
        w.open("fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {");
        w.line("f.write_str(self.as_str())");
        w.close("}");
        w.close("}");
        w.blank();
    }

    fn emit_accessors(&self, w: &mut CodeWriter, _parent: &StructSpec, field: &str) {
        let ty = &self.type_name;
        w.doc(format!("Returns the type of the value held by {field}."));
        w.open(format!("pub fn {field}_type(&self) -> {ty} {{"));
        w.open(format!("match &self.orig.{field} {{"));
        w.line(format!("None => {ty}::Empty,"));
        for v in &self.variants {
            w.line(format!(
                "Some({}(_)) => {ty}::{},",
                self.orig_path(v),
                v.type_variant()
            ));
        }
        w.close("}");
        w.close("}");
        w.blank();
        for v in &self.variants {
            self.emit_variant_accessors(w, field, v);
        }
    }

    fn emit_copy(&self, w: &mut CodeWriter, field: &str) {
        w.open(format!("dest.{field} = match &src.{field} {{"));
        w.line("None => None,");
        for v in &self.variants {
            let path = self.orig_path(v);
            match &v.kind {
                VariantKind::Primitive { ty, .. } => {
                    let value = if ty.is_copy() { "*v" } else { "v.clone()" };
                    w.line(format!("Some({path}(v)) => Some({path}({value})),"));
                }
                VariantKind::Message(_) => {
                    w.open(format!("Some({path}(v)) => {{"));
                    w.line("let mut copy = Default::default();");
                    w.line("Wrap::copy_orig(&mut copy, v);");
                    w.line(format!("Some({path}(copy))"));
                    w.close("}");
                }
            }
        }
        w.close("};");
    }

    fn accessor_names(&self, field: &str) -> Vec<String> {
        let mut names = vec![format!("{field}_type")];
        for v in &self.variants {
            names.push(v.name.clone());
            match v.kind {
                VariantKind::Primitive { .. } => names.push(format!("set_{}", v.name)),
                VariantKind::Message(_) => names.push(format!("set_empty_{}", v.name)),
            }
        }
        names
    }

    fn getter(&self, field: &str) -> String {
        format!("{field}_type")
    }

    fn default_value(&self) -> String {
        format!("{}::Empty", self.type_name)
    }

    fn test_value(&self) -> String {
        match self.variants.first() {
            Some(v) => format!("{}::{}", self.type_name, v.type_variant()),
            None => self.default_value(),
        }
    }

    fn fill_statement(&self, target: &str, _field: &str) -> String {
        match self.variants.first() {
            Some(v) => self.variant_fill(target, v),
            None => String::new(),
        }
    }

    fn emit_tests(&self, w: &mut CodeWriter, parent: &StructSpec, field: &str) {
        emit_default_and_fill_test(self, w, parent, field);
        for v in &self.variants {
            w.line("#[test]");
            w.open(format!(
                "fn test_{}_{}_{}() {{",
                parent.snake_name(),
                field,
                v.name
            ));
            w.line(format!("let mut ms = {}::new();", parent.name));
            match &v.kind {
                VariantKind::Primitive { ty, test } => {
                    w.line(format!("assert_eq!({}, ms.{}());", ty.render(&ty.zero()), v.name));
                    w.line(self.variant_fill("ms", v));
                    w.line(format!(
                        "assert_eq!({}::{}, ms.{field}_type());",
                        self.type_name,
                        v.type_variant()
                    ));
                    w.line(format!("assert_eq!({}, ms.{}());", ty.render(test), v.name));
                }
                VariantKind::Message(struct_name) => {
                    w.line(format!("assert!(ms.{}().is_none());", v.name));
                    w.line(self.variant_fill("ms", v));
                    w.line(format!(
                        "assert_eq!({}::{}, ms.{field}_type());",
                        self.type_name,
                        v.type_variant()
                    ));
                    w.line(format!(
                        "assert_eq!(generate_test_{}(), ms.{}().expect(\"variant is set\"));",
                        snake(struct_name),
                        v.name
                    ));
                }
            }
            w.close("}");
            w.blank();
        }
    }
}
