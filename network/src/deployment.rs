use bigdecimal::Zero;
use config::{
    contracts::{
        AGGREGATE_ROOT, LOCKED_TOKEN_STAKING_CONTRACT, NFT_COLLECTION, NFT_STAKING_CONTRACT,
        TOKEN_STAKING_CONTRACT,
    },
    gas, MIN_CLAIM_TOKENS, POLL_INTERVAL_SECS,
};
use errors::network::NetworkErrors;
use intl::BigUint;
use proto::{address::Address, product::Product};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use token::ft::Token;

use crate::{earnings, stake::RewardQuote, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasFormula {
    pub base: u64,
    #[serde(default)]
    pub per_item: u64,
}

impl GasFormula {
    pub const fn fixed(gas: u64) -> Self {
        Self {
            base: gas,
            per_item: 0,
        }
    }

    pub const fn scaled(base: u64, per_item: u64) -> Self {
        Self { base, per_item }
    }

    pub fn limit(&self, items: usize, cap: u64) -> u64 {
        self.per_item
            .saturating_mul(items as u64)
            .saturating_add(self.base)
            .min(cap)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPolicy {
    pub max: u64,
    pub nft_stake: GasFormula,
    pub nft_unstake: GasFormula,
    pub nft_claim: GasFormula,
    pub token_stake: GasFormula,
    pub token_unstake: GasFormula,
    pub token_claim: GasFormula,
    pub locked_unstake: GasFormula,
    pub buy_tickets: GasFormula,
    pub create_lottery: GasFormula,
    pub draw_winner: GasFormula,
    pub deposit_rewards: GasFormula,
    pub set_tokens_per_day: GasFormula,
}

impl Default for GasPolicy {
    fn default() -> Self {
        Self {
            max: gas::MAX_GAS_LIMIT,
            nft_stake: GasFormula::scaled(gas::NFT_STAKE_BASE, gas::NFT_STAKE_PER_ITEM),
            nft_unstake: GasFormula::scaled(gas::NFT_UNSTAKE_BASE, gas::NFT_UNSTAKE_PER_ITEM),
            nft_claim: GasFormula::scaled(gas::NFT_CLAIM_BASE, gas::NFT_CLAIM_PER_ITEM),
            token_stake: GasFormula::fixed(gas::TOKEN_STAKE),
            token_unstake: GasFormula::fixed(gas::TOKEN_UNSTAKE),
            token_claim: GasFormula::fixed(gas::TOKEN_CLAIM),
            locked_unstake: GasFormula::fixed(gas::LOCKED_UNSTAKE),
            buy_tickets: GasFormula::fixed(gas::BUY_TICKETS),
            create_lottery: GasFormula::fixed(gas::CREATE_LOTTERY),
            draw_winner: GasFormula::fixed(gas::DRAW_WINNER),
            deposit_rewards: GasFormula::fixed(gas::DEPOSIT_REWARDS),
            set_tokens_per_day: GasFormula::fixed(gas::SET_TOKENS_PER_DAY),
        }
    }
}

impl GasPolicy {
    pub fn limit(&self, formula: GasFormula, items: usize) -> u64 {
        formula.limit(items, self.max)
    }
}

/// How the minimum applies across products before claiming is offered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClaimMode {
    /// The sum and at least one single product exceed the minimum.
    #[default]
    TotalAndAnyProduct,
    TotalOnly,
    AnyProduct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPolicy {
    /// Whole reward tokens.
    pub minimum_tokens: u64,
    #[serde(default)]
    pub mode: ClaimMode,
}

impl Default for ClaimPolicy {
    fn default() -> Self {
        Self {
            minimum_tokens: MIN_CLAIM_TOKENS,
            mode: ClaimMode::default(),
        }
    }
}

impl ClaimPolicy {
    pub fn threshold(&self, reward_token: &Token) -> BigUint {
        reward_token.whole(self.minimum_tokens)
    }

    pub fn is_met(&self, rewards: &[BigUint], threshold: &BigUint) -> bool {
        match self.mode {
            ClaimMode::TotalAndAnyProduct => earnings::claim_eligible(rewards, threshold),
            ClaimMode::TotalOnly => earnings::total_rewards(rewards) > *threshold,
            ClaimMode::AnyProduct => rewards.iter().any(|r| r > threshold),
        }
    }

    /// Products a claim-all batch covers. Under `TotalOnly` the minimum binds
    /// the sum, so every product with a pending reward is claimed.
    pub fn claimable(&self, quotes: &[RewardQuote], threshold: &BigUint) -> Vec<Product> {
        match self.mode {
            ClaimMode::TotalOnly => quotes
                .iter()
                .filter(|q| !q.amount().is_zero())
                .map(|q| q.product())
                .collect(),
            ClaimMode::TotalAndAnyProduct | ClaimMode::AnyProduct => {
                earnings::claimable_products(quotes, threshold)
            }
        }
    }
}

/// Static description of one staking dApp deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub nft_staking: Address,
    pub token_staking: Address,
    pub locked_staking: Address,
    /// Discovered from the aggregate when absent.
    #[serde(default)]
    pub lottery: Option<Address>,
    pub collection: String,
    pub staking_token: Token,
    pub reward_token: Token,
    pub aggregate_root: String,
    #[serde(default)]
    pub claim_policy: ClaimPolicy,
    #[serde(default)]
    pub gas: GasPolicy,
    pub poll_interval_secs: u64,
}

impl Default for Deployment {
    fn default() -> Self {
        let contract = |addr: &str| Address::from_bech32(addr).unwrap_or(Address::ZERO);

        Self {
            nft_staking: contract(NFT_STAKING_CONTRACT),
            token_staking: contract(TOKEN_STAKING_CONTRACT),
            locked_staking: contract(LOCKED_TOKEN_STAKING_CONTRACT),
            lottery: None,
            collection: NFT_COLLECTION.to_string(),
            staking_token: Token::staking(),
            reward_token: Token::reward(),
            aggregate_root: AGGREGATE_ROOT.to_string(),
            claim_policy: ClaimPolicy::default(),
            gas: GasPolicy::default(),
            poll_interval_secs: POLL_INTERVAL_SECS,
        }
    }
}

impl Deployment {
    pub fn from_json(json: &str) -> Result<Self> {
        let deployment: Self = serde_json::from_str(json)
            .map_err(|e| NetworkErrors::InvalidDeployment(e.to_string()))?;
        deployment.validate()?;

        Ok(deployment)
    }

    pub fn validate(&self) -> Result<()> {
        for product in Product::ALL {
            if !self.contract(product).is_smart_contract() {
                return Err(NetworkErrors::InvalidDeployment(format!(
                    "{} address is not a contract",
                    product
                )));
            }
        }

        for token in [&self.staking_token, &self.reward_token] {
            if token.decimals_to_display > token.decimals {
                return Err(NetworkErrors::InvalidDeployment(format!(
                    "{} displays more digits than it has",
                    token.identifier
                )));
            }
        }

        if self.poll_interval_secs == 0 {
            return Err(NetworkErrors::InvalidDeployment(
                "poll interval must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn contract(&self, product: Product) -> Address {
        match product {
            Product::Nft => self.nft_staking,
            Product::Token => self.token_staking,
            Product::LockedToken => self.locked_staking,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn claim_threshold(&self) -> BigUint {
        self.claim_policy.threshold(&self.reward_token)
    }

    /// One of the two tokens this deployment knows, by identifier.
    pub fn token(&self, identifier: &str) -> Option<&Token> {
        [&self.reward_token, &self.staking_token]
            .into_iter()
            .find(|t| t.identifier == identifier)
    }
}
