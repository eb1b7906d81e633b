//! # pdata: wrapper types over OTLP logs messages
//!
//! The message tree lives in [`proto`] as plain `prost` structs. Every type in
//! [`pcommon`], [`plog`] and [`plogotlp`] is a thin view over one node of that tree:
//! views built with `new()` own a fresh node, views returned by accessors borrow the
//! node in place, so writes through them land in the tree.
//!
//! Most wrappers are generated by `build.rs` from the schemas under `schema/`; the
//! roots ([`plog::Logs`], [`plogotlp::ExportRequest`], [`plogotlp::ExportResponse`])
//! are written by hand.
//!
//! ```
//! use pdata::plog::Logs;
//!
//! let mut logs = Logs::new();
//! let mut rls = logs.resource_logs();
//! let mut rl = rls.append_empty();
//! rl.resource().attributes().put_str("service.name", "checkout");
//! let mut sls = rl.scope_logs();
//! sls.append_empty().log_records().append_empty().set_severity_text("INFO");
//! assert_eq!(1, logs.log_record_count());
//! ```

pub mod error;
mod internal;
pub mod pcommon;
pub mod plog;
pub mod plogotlp;
pub mod proto;
pub mod wire;

pub use error::Error;
pub use internal::{Orig, Wrap};
