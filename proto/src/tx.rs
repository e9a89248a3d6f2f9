use crate::{address::Address, product::Product};
use intl::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn is_resolved(&self) -> bool {
        matches!(self, TransactionStatus::Success | TransactionStatus::Failed)
    }
}

/// Toast messages the signer shows while the transaction is in flight.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMetadata {
    pub processing_message: String,
    pub error_message: String,
    pub success_message: String,
}

impl TransactionMetadata {
    pub fn new(processing: &str, error: &str, success: &str) -> Self {
        Self {
            processing_message: processing.to_string(),
            error_message: error.to_string(),
            success_message: success.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakingAction {
    StakeNfts { nonces: Vec<u64> },
    UnstakeNfts { nonces: Vec<u64> },
    StakeTokens { product: Product, amount: BigUint },
    UnstakeTokens { amount: BigUint },
    UnstakeLocked { id: u64 },
    ClaimRewards { product: Product },
    BuyTickets { count: u64, cost: BigUint },
    CreateLottery { deadline: u64 },
    DrawWinner,
    DepositRewards { amount: BigUint },
    SetTokensPerDay { amount: BigUint },
}

impl StakingAction {
    /// Stable key used to refuse a second submission of the same action
    /// against the same contract while the first is pending.
    pub fn kind(&self) -> &'static str {
        match self {
            StakingAction::StakeNfts { .. } => "stake_nfts",
            StakingAction::UnstakeNfts { .. } => "unstake_nfts",
            StakingAction::StakeTokens { .. } => "stake_tokens",
            StakingAction::UnstakeTokens { .. } => "unstake_tokens",
            StakingAction::UnstakeLocked { .. } => "unstake_locked",
            StakingAction::ClaimRewards { .. } => "claim_rewards",
            StakingAction::BuyTickets { .. } => "buy_tickets",
            StakingAction::CreateLottery { .. } => "create_lottery",
            StakingAction::DrawWinner => "draw_winner",
            StakingAction::DepositRewards { .. } => "deposit_rewards",
            StakingAction::SetTokensPerDay { .. } => "set_tokens_per_day",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub action: StakingAction,
    pub receiver: Address,
    pub value: BigUint,
    pub data: String,
    pub gas_limit: u64,
    pub metadata: TransactionMetadata,
}

impl TransactionRequest {
    /// Shape the external signer accepts.
    pub fn to_json(&self) -> Value {
        json!({
            "value": self.value.to_string(),
            "data": self.data,
            "receiver": self.receiver.to_string(),
            "gasLimit": self.gas_limit,
        })
    }
}
