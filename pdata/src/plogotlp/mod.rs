//! OTLP export request/response envelopes for logs.

mod request;
mod response;

pub use request::ExportRequest;
pub use response::ExportResponse;

include!(concat!(env!("OUT_DIR"), "/generated_logs_otlp.rs"));
