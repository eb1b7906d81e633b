use prost::Message;

use crate::error::Error;
use crate::plog::Logs;
use crate::proto::otlpcollectorlogs::ExportLogsServiceRequest;

/// Request sent to a logs export endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRequest {
    logs: Logs,
}

impl ExportRequest {
    pub fn new() -> Self {
        ExportRequest::default()
    }

    pub fn from_logs(logs: Logs) -> Self {
        ExportRequest { logs }
    }

    pub fn logs(&self) -> &Logs {
        &self.logs
    }

    pub fn logs_mut(&mut self) -> &mut Logs {
        &mut self.logs
    }

    pub fn into_logs(self) -> Logs {
        self.logs
    }

    pub fn marshal_proto(&self) -> Vec<u8> {
        self.logs.orig().encode_to_vec()
    }

    pub fn unmarshal_proto(buf: &[u8]) -> Result<Self, Error> {
        let orig = ExportLogsServiceRequest::decode(buf)?;
        Ok(ExportRequest {
            logs: Logs::from_orig(orig),
        })
    }
}
