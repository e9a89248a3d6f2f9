use crate::network::NetworkErrors;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum BackgroundError {
    #[error("Fail, network error: {0}")]
    NetworkErrors(NetworkErrors),

    #[error("Worker error: {0}")]
    WorkerError(String),

    #[error("View is unmounted")]
    Unmounted,
}

impl From<NetworkErrors> for BackgroundError {
    fn from(error: NetworkErrors) -> Self {
        BackgroundError::NetworkErrors(error)
    }
}
