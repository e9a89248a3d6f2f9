use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AbiError {
    #[error("Invalid base64 return data: {0}")]
    InvalidBase64(String),

    #[error("Unexpected end of input at {pos}, need {need} bytes")]
    UnexpectedEof { pos: usize, need: usize },

    #[error("Value does not fit into {0}")]
    Overflow(&'static str),

    #[error("Trailing bytes after decoding: {0}")]
    TrailingBytes(usize),
}
