//! Generation-time configuration errors. Every variant aborts the generation run.

/// Location strings have the form `Struct.field` (or `Struct` / the file name).
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Parse: {0}")]
    Parse(String),
    #[error("{location}: unknown field kind `{kind}`")]
    UnknownKind { location: String, kind: String },
    #[error("{location}: `{kind}` takes {expected} argument(s), found {found}")]
    Arity {
        location: String,
        kind: String,
        expected: usize,
        found: usize,
    },
    #[error("{location}: invalid {ty} literal `{literal}`")]
    InvalidLiteral {
        location: String,
        ty: String,
        literal: String,
    },
    #[error("{location}: primitive field needs a test value")]
    MissingTestValue { location: String },
    #[error("{location}: only primitive fields take default/test values")]
    UnexpectedLiteral { location: String },
    #[error("{location}: only oneof fields take a variant body")]
    UnexpectedBody { location: String },
    #[error("{location}: oneof declares no variants")]
    EmptyOneOf { location: String },
    #[error("{location}: duplicate name `{name}`")]
    Duplicate { location: String, name: String },
    #[error("{location}: `{name}` is reserved")]
    Reserved { location: String, name: String },
    #[error("{location}: unknown struct `{name}`")]
    UnknownStruct { location: String, name: String },
    #[error("file `{0}` declares no module")]
    MissingModule(String),
}
