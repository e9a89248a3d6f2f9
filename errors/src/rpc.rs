use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RpcError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid JSON response: parse: {0}")]
    InvalidJson(String),

    #[error("Network is down")]
    NetworkDown,

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Http state: {0}, message {1}")]
    HttpError(u16, String),

    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    #[error("GraphQL endpoint is not configured")]
    GraphQlNotConfigured,
}
