use crate::{address::AddressError, intl::IntlErrors};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum TransactionErrors {
    #[error("Invalid amount: {0}")]
    InvalidAmount(IntlErrors),

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: String, available: String },

    #[error("Insufficient stake: requested {requested}, staked {available}")]
    InsufficientStake { requested: String, available: String },

    #[error("Nothing selected")]
    EmptySelection,

    #[error("Nonce {0} is not staked")]
    NotStaked(u64),

    #[error("Lock {0} not found")]
    LockNotFound(u64),

    #[error("Lock {id} is locked until {unlock_timestamp}")]
    StillLocked { id: u64, unlock_timestamp: u64 },

    #[error("Invalid ticket count: {0}")]
    InvalidTicketCount(String),

    #[error("Lottery deadline must be in the future")]
    InvalidDeadline,

    #[error("Lottery is closed")]
    LotteryClosed,

    #[error("Contract address unknown: {0}")]
    UnknownContract(String),

    #[error("Lottery is not ready to draw")]
    LotteryNotDrawable,

    #[error("Lottery still running, draw it before creating another")]
    LotteryInProgress,

    #[error("Rewards are below the claim threshold")]
    NothingToClaim,

    #[error("Position does not match product: {0}")]
    ProductMismatch(String),

    #[error("address error: {0}")]
    AddressError(AddressError),

    #[error("A {0} transaction is already pending")]
    AlreadyPending(String),

    #[error("Transaction rejected: {0}")]
    TransactionRejected(String),
}

impl From<IntlErrors> for TransactionErrors {
    fn from(error: IntlErrors) -> Self {
        TransactionErrors::InvalidAmount(error)
    }
}

impl From<AddressError> for TransactionErrors {
    fn from(error: AddressError) -> Self {
        TransactionErrors::AddressError(error)
    }
}
