use prost::Message;

use super::ExportPartialSuccess;
use crate::error::Error;
use crate::proto::otlpcollectorlogs::ExportLogsServiceResponse;

/// Response returned by a logs export endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportResponse {
    orig: ExportLogsServiceResponse,
}

impl ExportResponse {
    pub fn new() -> Self {
        ExportResponse::default()
    }

    pub fn partial_success(&mut self) -> ExportPartialSuccess<'_> {
        ExportPartialSuccess::from_orig(&mut self.orig.partial_success)
    }

    pub fn marshal_proto(&self) -> Vec<u8> {
        self.orig.encode_to_vec()
    }

    pub fn unmarshal_proto(buf: &[u8]) -> Result<Self, Error> {
        Ok(ExportResponse {
            orig: ExportLogsServiceResponse::decode(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plogotlp::generated_tests::{fill_test_export_partial_success, generate_test_export_partial_success};

    #[test]
    fn partial_success_round_trips() {
        let mut resp = ExportResponse::new();
        assert_eq!(0, resp.partial_success().rejected_log_records());
        fill_test_export_partial_success(&mut resp.partial_success());
        assert_eq!(13, resp.partial_success().rejected_log_records());
        assert_eq!("error message", resp.partial_success().error_message());

        let mut decoded = ExportResponse::unmarshal_proto(&resp.marshal_proto()).expect("decode");
        assert_eq!(generate_test_export_partial_success(), decoded.partial_success());
    }
}
