//! Types shared by every signal: resources, instrumentation scopes and attribute values.

pub use crate::internal::{Map, Slice};

include!(concat!(env!("OUT_DIR"), "/generated_common.rs"));
