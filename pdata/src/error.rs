//! Runtime errors: decoding bytes into the message tree.

use crate::wire::WireError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Decode: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("Wire: {0}")]
    Wire(#[from] WireError),
}
