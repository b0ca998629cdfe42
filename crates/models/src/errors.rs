use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("encode error: {0}")]
    Encode(String),
    #[error("decode error for document {id}: {reason}")]
    Decode { id: String, reason: String },
}
