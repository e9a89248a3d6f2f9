use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AddressError {
    #[error("Invalid bech32 address: {0}")]
    InvalidBech32(String),

    #[error("Invalid HRP: {0}")]
    InvalidHRP(String),

    #[error("Invalid address length: {0}")]
    InvalidLength(usize),

    #[error("Invalid hex Address")]
    InvalidHex,
}
