use crate::{abi::AbiError, address::AddressError, position::PositionError, rpc::RpcError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum NetworkErrors {
    #[error("Query failed: {0}")]
    QueryFailed(RpcError),

    #[error("Query malformed: {0}")]
    QueryMalformed(String),

    #[error("Position error: {0}")]
    Position(PositionError),

    #[error("Address Error: {0}")]
    AddressError(AddressError),

    #[error("Invalid deployment config: {0}")]
    InvalidDeployment(String),
}

impl From<RpcError> for NetworkErrors {
    fn from(error: RpcError) -> Self {
        match error {
            RpcError::InvalidJson(msg) => NetworkErrors::QueryMalformed(msg),
            RpcError::GraphQl(msg) => NetworkErrors::QueryMalformed(msg),
            other => NetworkErrors::QueryFailed(other),
        }
    }
}

impl From<AbiError> for NetworkErrors {
    fn from(error: AbiError) -> Self {
        NetworkErrors::QueryMalformed(error.to_string())
    }
}

impl From<PositionError> for NetworkErrors {
    fn from(error: PositionError) -> Self {
        NetworkErrors::Position(error)
    }
}

impl From<AddressError> for NetworkErrors {
    fn from(error: AddressError) -> Self {
        NetworkErrors::AddressError(error)
    }
}
