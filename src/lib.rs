//! # pdatagen: schema-driven bindings for OTLP message trees
//!
//! A DSL for describing wrapper types over prost-generated OTLP messages, with a
//! PEST grammar, validation, and a generator that emits the wrapper source and its
//! unit tests.
//!
//! ## Schema structure
//!
//! - **File**: one output unit (`generated_<name>.rs` + `generated_<name>_test.rs`)
//!   with a module path, `use` imports and test-only imports
//! - **Struct**: a wrapper over one message, named by its path (`wraps otlplogs::LogRecord`)
//! - **Field**: one accessor group; its kind picks the emission strategy
//!
//! ## Field kinds
//!
//! - Primitive: `bool`, `int32`, `int64`, `uint32`, `uint64`, `double`, `string`, `bytes`,
//!   with an optional `= default` and a required `test` value
//! - `enum T`: an `int32` proto enum read and written as the newtype `T(pub i32)`,
//!   which the target module provides
//! - `message S`: nested message, accessed through `S`'s wrapper
//! - `repeated S`: sequence of messages, accessed through `SSlice`
//! - `map`: ordered key/value attributes, accessed through `Map`
//! - `oneof Type path::to::Enum { ... }`: exclusive variants with a discriminator enum
//!
//! ## Example schema
//!
//! ```text
//! file logs {
//!     module "plog";
//!     imports { "crate::internal::{Map, Orig, Slice, Wrap}"; }
//!
//!     /// LogRecord is an experimental type.
//!     struct LogRecord wraps otlplogs::LogRecord {
//!         severity_text: string test "INFO";
//!         flags: uint32 test 1;
//!         body: message AnyValue;
//!         attributes: map;
//!     }
//! }
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use pdatagen::{parse, Generator};
//!
//! let file = parse(&std::fs::read_to_string("schema/logs.pdata")?)?;
//! let generated = Generator::default().generate_all(&[file])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod field;
pub mod generator;
pub mod parser;
pub mod schema;
pub mod validate;
pub mod writer;

pub use error::SchemaError;
pub use generator::{GenerateOptions, GeneratedFile, Generator};
pub use parser::parse;
pub use schema::{FieldKind, FieldSpec, FileSpec, Literal, PrimitiveType, StructSpec};
pub use validate::{validate_file, validate_files};
