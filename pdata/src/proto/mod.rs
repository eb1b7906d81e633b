//! The underlying OTLP message tree (logs subset), encoded and decoded by `prost`.
//!
//! Message fields that OTLP declares non-nullable are `required`, so they are stored
//! inline instead of behind an `Option` and are always present on the wire.

pub mod collector;
pub mod common;
pub mod logs;
pub mod resource;

pub use collector as otlpcollectorlogs;
pub use common as otlpcommon;
pub use logs as otlplogs;
pub use resource as otlpresource;
