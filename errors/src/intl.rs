use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum IntlErrors {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Fail to parse str: {0}, error: {1}")]
    BigDecimalParseError(String, String),

    #[error("Invalid hex argument: {0}")]
    InvalidHex(String),
}
