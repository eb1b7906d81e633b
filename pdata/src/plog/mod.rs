//! Logs: the resource → scope → log record hierarchy.

mod logs;
mod severity;

pub use logs::Logs;
pub use severity::SeverityNumber;

include!(concat!(env!("OUT_DIR"), "/generated_logs.rs"));

#[cfg(test)]
#[allow(dead_code, unused_imports)]
pub(crate) mod generated_tests {
    include!(concat!(env!("OUT_DIR"), "/generated_logs_test.rs"));
}
