use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PositionError {
    #[error("Malformed position field `{field}`, expected {expected}")]
    MalformedPosition { field: String, expected: &'static str },
}
