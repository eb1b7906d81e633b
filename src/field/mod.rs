//! Field kind strategies.
//!
//! Each kind of [`FieldSpec`](crate::schema::FieldSpec) owns one strategy object that
//! knows how to emit the field's accessors, its deep-copy statement, its default and
//! test values, and the statement that fills it with test data. The generator only
//! ever talks to [`FieldStrategy`]; it never matches on the kind.

mod enumeration;
mod mapping;
mod message;
mod oneof;
mod primitive;
mod repeated;

pub use enumeration::EnumField;
pub use mapping::MapField;
pub use message::MessageField;
pub use oneof::{OneOfField, OneOfVariant, VariantKind};
pub use primitive::PrimitiveField;
pub use repeated::RepeatedField;

use crate::schema::StructSpec;
use crate::writer::CodeWriter;

/// Code emission for one field kind.
///
/// `field` is always the field name as declared in the schema. Wrapper methods are
/// emitted inside `impl<'a> Struct<'a>`, where the underlying message is reachable as
/// `self.orig`. Copy statements run inside `Wrap::copy_orig(dest, src)`.
pub trait FieldStrategy: std::fmt::Debug {
    /// File-level items the field needs (emitted before its struct).
    fn emit_types(&self, _w: &mut CodeWriter, _parent: &StructSpec, _field: &str) {}

    /// Accessor and mutator methods.
    fn emit_accessors(&self, w: &mut CodeWriter, parent: &StructSpec, field: &str);

    /// Statements assigning `src.<field>` into `dest.<field>` without sharing
    /// mutable substructure.
    fn emit_copy(&self, w: &mut CodeWriter, field: &str);

    /// Method names the field adds to the wrapper, used to detect collisions.
    fn accessor_names(&self, field: &str) -> Vec<String>;

    /// Name of the method whose result is compared in the default/test checks.
    fn getter(&self, field: &str) -> String {
        field.to_string()
    }

    /// Expression equal to what [`Self::getter`] returns on a fresh instance.
    fn default_value(&self) -> String;

    /// Expression equal to what [`Self::getter`] returns after [`Self::fill_statement`].
    fn test_value(&self) -> String;

    /// Statement assigning the test value to the field of the wrapper `target`.
    fn fill_statement(&self, target: &str, field: &str) -> String;

    /// Unit tests for the field.
    fn emit_tests(&self, w: &mut CodeWriter, parent: &StructSpec, field: &str) {
        emit_default_and_fill_test(self, w, parent, field);
    }
}

/// The shared "fresh instance holds the default, filled instance holds the test value"
/// check every kind emits.
pub(crate) fn emit_default_and_fill_test<S: FieldStrategy + ?Sized>(
    strategy: &S,
    w: &mut CodeWriter,
    parent: &StructSpec,
    field: &str,
) {
    let getter = strategy.getter(field);
    w.line("#[test]");
    w.open(format!("fn test_{}_{}() {{", parent.snake_name(), field));
    w.line(format!("let mut ms = {}::new();", parent.name));
    w.line(format!("assert_eq!({}, ms.{getter}());", strategy.default_value()));
    w.line(strategy.fill_statement("ms", field));
    w.line(format!("assert_eq!({}, ms.{getter}());", strategy.test_value()));
    w.close("}");
    w.blank();
}
