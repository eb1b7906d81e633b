use prost::Message;

use super::ResourceLogsSlice;
use crate::error::Error;
use crate::proto::otlpcollectorlogs::ExportLogsServiceRequest;

/// Top-level owner of a logs tree.
///
/// Everything below it is reached through borrowed views, so the tree is only ever
/// mutated through one path at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Logs {
    orig: ExportLogsServiceRequest,
}

impl Logs {
    pub fn new() -> Self {
        Logs::default()
    }

    pub fn from_orig(orig: ExportLogsServiceRequest) -> Self {
        Logs { orig }
    }

    pub fn orig(&self) -> &ExportLogsServiceRequest {
        &self.orig
    }

    pub fn into_orig(self) -> ExportLogsServiceRequest {
        self.orig
    }

    pub fn resource_logs(&mut self) -> ResourceLogsSlice<'_> {
        ResourceLogsSlice::from_orig(&mut self.orig.resource_logs)
    }

    /// Total number of log records across all resources and scopes. Walks the whole
    /// tree on every call.
    pub fn log_record_count(&self) -> usize {
        self.orig
            .resource_logs
            .iter()
            .flat_map(|rl| rl.scope_logs.iter())
            .map(|sl| sl.log_records.len())
            .sum()
    }

    /// Moves the whole tree into `dest` and leaves this instance empty.
    pub fn move_to(&mut self, dest: &mut Logs) {
        dest.orig = std::mem::take(&mut self.orig);
    }

    /// Overwrites `dest` with a deep copy of this tree.
    pub fn copy_to(&self, dest: &mut Logs) {
        ResourceLogsSlice::copy_orig(&mut dest.orig.resource_logs, &self.orig.resource_logs);
    }

    /// Size in bytes of the protobuf encoding.
    pub fn proto_size(&self) -> usize {
        self.orig.encoded_len()
    }

    pub fn marshal_proto(&self) -> Vec<u8> {
        self.orig.encode_to_vec()
    }

    pub fn unmarshal_proto(buf: &[u8]) -> Result<Logs, Error> {
        Ok(Logs {
            orig: ExportLogsServiceRequest::decode(buf)?,
        })
    }
}
