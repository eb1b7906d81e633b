//! Schema model: the declarative description of bindable types the generator consumes.
//!
//! A [`FileSpec`] is one generated output unit. It owns an ordered list of
//! [`StructSpec`]s, each of which owns an ordered list of [`FieldSpec`]s. Order is
//! significant everywhere: it drives emission order, so generated code diffs stay
//! stable when the schema changes.

use std::fmt;

use convert_case::{Case, Casing};

pub use crate::field::{
    EnumField, FieldStrategy, MapField, MessageField, OneOfField, OneOfVariant, PrimitiveField,
    RepeatedField, VariantKind,
};

/// Root entity: one generated wrapper file plus one generated test file.
#[derive(Debug, Clone)]
pub struct FileSpec {
    /// Base name of the output files (`generated_<name>.rs`).
    pub name: String,
    /// Module path the output belongs to, relative to the output root (e.g. `pcommon`).
    pub module: String,
    /// `use` paths emitted at the top of the wrapper file.
    pub imports: Vec<String>,
    /// `use` paths emitted at the top of the test file.
    pub test_imports: Vec<String>,
    pub structs: Vec<StructSpec>,
}

impl FileSpec {
    pub fn wrapper_file_name(&self) -> String {
        format!("generated_{}.rs", self.name)
    }

    pub fn test_file_name(&self) -> String {
        format!("generated_{}_test.rs", self.name)
    }

    pub fn get_struct(&self, name: &str) -> Option<&StructSpec> {
        self.structs.iter().find(|s| s.name == name)
    }
}

/// A wrapper type over one message of the underlying tree.
#[derive(Debug, Clone)]
pub struct StructSpec {
    pub name: String,
    /// Doc comment lines, without the leading `///`.
    pub description: Vec<String>,
    /// Path of the wrapped message as seen from the generated file (e.g. `otlplogs::LogRecord`).
    pub orig_full_name: String,
    pub fields: Vec<FieldSpec>,
}

impl StructSpec {
    /// `LogRecord` → `log_record`; used for fixture function names.
    pub fn snake_name(&self) -> String {
        snake(&self.name)
    }

    pub fn slice_name(&self) -> String {
        format!("{}Slice", self.name)
    }
}

/// One field of a [`StructSpec`]. The kind carries its strategy, resolved when the
/// spec is built, so nothing downstream inspects kinds dynamically.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        FieldSpec {
            name: name.into(),
            kind,
        }
    }

    pub fn strategy(&self) -> &dyn FieldStrategy {
        self.kind.strategy()
    }
}

/// The closed set of field kinds.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Primitive(PrimitiveField),
    Enum(EnumField),
    MessageValue(MessageField),
    RepeatedMessage(RepeatedField),
    KVMapping(MapField),
    OneOf(OneOfField),
}

impl FieldKind {
    pub fn strategy(&self) -> &dyn FieldStrategy {
        match self {
            FieldKind::Primitive(f) => f,
            FieldKind::Enum(f) => f,
            FieldKind::MessageValue(f) => f,
            FieldKind::RepeatedMessage(f) => f,
            FieldKind::KVMapping(f) => f,
            FieldKind::OneOf(f) => f,
        }
    }

    /// Keyword used for this kind in the schema DSL.
    pub fn keyword(&self) -> &'static str {
        match self {
            FieldKind::Primitive(f) => f.ty.keyword(),
            FieldKind::Enum(_) => "enum",
            FieldKind::MessageValue(_) => "message",
            FieldKind::RepeatedMessage(_) => "repeated",
            FieldKind::KVMapping(_) => "map",
            FieldKind::OneOf(_) => "oneof",
        }
    }

    /// Names of the structs this field refers to, in declaration order.
    pub fn referenced_structs(&self) -> Vec<&str> {
        match self {
            FieldKind::MessageValue(f) => vec![f.struct_name.as_str()],
            FieldKind::RepeatedMessage(f) => vec![f.struct_name.as_str()],
            FieldKind::OneOf(f) => f
                .variants
                .iter()
                .filter_map(|v| match &v.kind {
                    VariantKind::Message(name) => Some(name.as_str()),
                    VariantKind::Primitive { .. } => None,
                })
                .collect(),
            FieldKind::Primitive(_) | FieldKind::Enum(_) | FieldKind::KVMapping(_) => Vec::new(),
        }
    }
}

/// Scalar storage types a primitive field can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Bool,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Double,
    String,
    Bytes,
}

impl PrimitiveType {
    pub fn from_keyword(s: &str) -> Option<Self> {
        Some(match s {
            "bool" => PrimitiveType::Bool,
            "int32" => PrimitiveType::Int32,
            "int64" => PrimitiveType::Int64,
            "uint32" => PrimitiveType::Uint32,
            "uint64" => PrimitiveType::Uint64,
            "double" => PrimitiveType::Double,
            "string" => PrimitiveType::String,
            "bytes" => PrimitiveType::Bytes,
            _ => return None,
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::Uint32 => "uint32",
            PrimitiveType::Uint64 => "uint64",
            PrimitiveType::Double => "double",
            PrimitiveType::String => "string",
            PrimitiveType::Bytes => "bytes",
        }
    }

    /// Rust type returned by the getter.
    pub fn getter_type(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Int32 => "i32",
            PrimitiveType::Int64 => "i64",
            PrimitiveType::Uint32 => "u32",
            PrimitiveType::Uint64 => "u64",
            PrimitiveType::Double => "f64",
            PrimitiveType::String => "&str",
            PrimitiveType::Bytes => "&[u8]",
        }
    }

    /// Rust type accepted by the setter.
    pub fn setter_type(self) -> &'static str {
        match self {
            PrimitiveType::String => "impl Into<String>",
            PrimitiveType::Bytes => "&[u8]",
            other => other.getter_type(),
        }
    }

    pub fn is_copy(self) -> bool {
        !matches!(self, PrimitiveType::String | PrimitiveType::Bytes)
    }

    /// Expression turning a reference `var` to the stored value into the getter type.
    pub fn read_expr(self, var: &str) -> String {
        match self {
            PrimitiveType::String => format!("{var}.as_str()"),
            PrimitiveType::Bytes => format!("{var}.as_slice()"),
            _ => format!("*{var}"),
        }
    }

    /// Expression turning the setter argument `var` into the stored value.
    pub fn store_expr(self, var: &str) -> String {
        match self {
            PrimitiveType::String => format!("{var}.into()"),
            PrimitiveType::Bytes => format!("{var}.to_vec()"),
            _ => var.to_string(),
        }
    }

    pub fn zero(self) -> Literal {
        match self {
            PrimitiveType::Bool => Literal::Bool(false),
            PrimitiveType::Int32 | PrimitiveType::Int64 | PrimitiveType::Uint32 | PrimitiveType::Uint64 => {
                Literal::Int(0)
            }
            PrimitiveType::Double => Literal::Float("0.0".to_string()),
            PrimitiveType::String => Literal::String(String::new()),
            PrimitiveType::Bytes => Literal::Bytes(Vec::new()),
        }
    }

    /// Checks that `lit` can be stored in this type.
    pub fn accepts(self, lit: &Literal) -> bool {
        match (self, lit) {
            (PrimitiveType::Bool, Literal::Bool(_)) => true,
            (PrimitiveType::Int32, Literal::Int(v)) => i32::try_from(*v).is_ok(),
            (PrimitiveType::Int64, Literal::Int(_)) => true,
            (PrimitiveType::Uint32, Literal::Int(v)) => u32::try_from(*v).is_ok(),
            (PrimitiveType::Uint64, Literal::Int(v)) => *v >= 0,
            (PrimitiveType::Double, Literal::Int(_) | Literal::Float(_)) => true,
            (PrimitiveType::String, Literal::String(s)) => has_valid_escapes(s),
            (PrimitiveType::Bytes, Literal::Bytes(_)) => true,
            _ => false,
        }
    }

    /// Renders `lit` as Rust source for this type. Callers check [`Self::accepts`] first.
    pub fn render(self, lit: &Literal) -> String {
        match (self, lit) {
            (PrimitiveType::Double, Literal::Int(v)) => format!("{v}.0"),
            _ => lit.to_string(),
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A literal default or test value as written in the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    /// Kept as written so rendering is exact.
    Float(String),
    /// Kept with its escapes, which Rust string literals share.
    String(String),
    Bytes(Vec<u8>),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Float(s) => f.write_str(s),
            Literal::String(s) => write!(f, "\"{s}\""),
            Literal::Bytes(bytes) => {
                f.write_str("b\"")?;
                for b in bytes {
                    write!(f, "\\x{b:02x}")?;
                }
                f.write_str("\"")
            }
        }
    }
}

/// Checks that every backslash escape in `raw` is one a Rust string literal accepts.
/// String literals are emitted as written, so anything else would not compile.
fn has_valid_escapes(raw: &str) -> bool {
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            continue;
        }
        match chars.next() {
            Some('n' | 'r' | 't' | '\\' | '0' | '\'' | '"') => {}
            Some('x') => {
                let hi = chars.next().and_then(|c| c.to_digit(16));
                let lo = chars.next().and_then(|c| c.to_digit(16));
                // \x only covers ASCII in string literals.
                if !matches!((hi, lo), (Some(h), Some(_)) if h <= 7) {
                    return false;
                }
            }
            Some('u') => {
                if chars.next() != Some('{') {
                    return false;
                }
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) if c.is_ascii_hexdigit() && digits.len() < 6 => digits.push(c),
                        _ => return false,
                    }
                }
                let valid = u32::from_str_radix(&digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .is_some();
                if !valid {
                    return false;
                }
            }
            _ => return false,
        }
    }
    true
}

/// `ResourceLogs` → `resource_logs`.
pub fn snake(name: &str) -> String {
    name.to_case(Case::Snake)
}

/// `kv_list` → `KvList`.
pub fn pascal(name: &str) -> String {
    name.to_case(Case::Pascal)
}
