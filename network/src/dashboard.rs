use async_trait::async_trait;
use errors::network::NetworkErrors;
use intl::BigUint;
use proto::{address::Address, product::Product};
use rpc::common::NetworkConfigTrait;
use serde_json::Value;
use tracing::warn;

use crate::{
    deployment::ClaimPolicy,
    earnings::{self, ProductRates},
    lottery::{normalize_lottery, LotteryState},
    provider::NetworkProvider,
    reader::StakingReader,
    stake::{RewardQuote, StakingPosition},
    stake_parse::{normalize, normalize_rates, normalize_rewards},
    Result,
};

/// One part of the dashboard. A failed section does not hide the others.
pub type Section<T> = std::result::Result<T, NetworkErrors>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSection {
    pub position: StakingPosition,
    pub reward: RewardQuote,
}

impl ProductSection {
    fn empty(product: Product) -> Self {
        Self {
            position: StakingPosition::empty(product),
            reward: RewardQuote::new(product, BigUint::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub nft: Section<ProductSection>,
    pub token: Section<ProductSection>,
    pub locked: Section<ProductSection>,
    pub rates: Section<ProductRates>,
    pub lottery: Section<Option<LotteryState>>,
    /// Reward token price in USD, `None` while the pair is not listed.
    pub token_price: Section<Option<f64>>,
}

fn price_section(raw: &Value) -> Section<Option<f64>> {
    match raw {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        other => Err(NetworkErrors::QueryMalformed(format!(
            "tokenPrice: expected number, got {}",
            other
        ))),
    }
}

fn product_section(aggregate: &Value, product: Product) -> Section<ProductSection> {
    let raw = &aggregate[product.graphql_field()];

    match (normalize(raw, product)?, normalize_rewards(raw, product)?) {
        (Some(position), Some(reward)) => Ok(ProductSection { position, reward }),
        _ => Ok(ProductSection::empty(product)),
    }
}

impl DashboardSnapshot {
    /// Splits an aggregate response into independently normalized sections.
    pub fn from_aggregate(aggregate: &Value) -> Self {
        let rates = normalize_rates(
            &aggregate[Product::Nft.graphql_field()],
            &aggregate[Product::Token.graphql_field()],
            &aggregate[Product::LockedToken.graphql_field()],
        )
        .map_err(NetworkErrors::from);

        Self {
            nft: product_section(aggregate, Product::Nft),
            token: product_section(aggregate, Product::Token),
            locked: product_section(aggregate, Product::LockedToken),
            rates,
            lottery: normalize_lottery(&aggregate["lottery"]).map_err(NetworkErrors::from),
            token_price: price_section(&aggregate["tokenPrice"]),
        }
    }

    pub fn section(&self, product: Product) -> &Section<ProductSection> {
        match product {
            Product::Nft => &self.nft,
            Product::Token => &self.token,
            Product::LockedToken => &self.locked,
        }
    }

    pub fn errors(&self) -> Vec<(&'static str, &NetworkErrors)> {
        let mut errors = Vec::new();

        for product in Product::ALL {
            if let Err(e) = self.section(product) {
                errors.push((product.graphql_field(), e));
            }
        }
        if let Err(e) = &self.rates {
            errors.push(("rates", e));
        }
        if let Err(e) = &self.lottery {
            errors.push(("lottery", e));
        }
        if let Err(e) = &self.token_price {
            errors.push(("tokenPrice", e));
        }

        errors
    }

    pub fn quotes(&self) -> Vec<RewardQuote> {
        Product::ALL
            .iter()
            .filter_map(|p| self.section(*p).as_ref().ok())
            .map(|s| s.reward.clone())
            .collect()
    }

    pub fn total_rewards(&self) -> BigUint {
        self.quotes().iter().map(|q| q.amount()).sum()
    }

    pub fn staked_nfts(&self) -> usize {
        self.nft.as_ref().map(|s| s.position.nft_count()).unwrap_or_default()
    }

    pub fn staked_tokens(&self) -> BigUint {
        self.token
            .as_ref()
            .map(|s| s.position.staked_amount())
            .unwrap_or_default()
    }

    pub fn total_locked(&self) -> BigUint {
        self.locked
            .as_ref()
            .map(|s| s.position.staked_amount())
            .unwrap_or_default()
    }

    /// `None` while the rates are unknown; failed positions count as empty.
    pub fn daily_earnings(&self) -> Option<BigUint> {
        let rates = self.rates.as_ref().ok()?;
        let position = |product: Product| {
            self.section(product)
                .as_ref()
                .map(|s| s.position.clone())
                .unwrap_or_else(|_| StakingPosition::empty(product))
        };

        Some(earnings::daily_earnings(
            &position(Product::Nft),
            &position(Product::Token),
            &position(Product::LockedToken),
            rates,
        ))
    }

    pub fn claim_eligible(&self, policy: &ClaimPolicy, threshold: &BigUint) -> bool {
        let amounts: Vec<BigUint> = self.quotes().iter().map(|q| q.amount().clone()).collect();

        policy.is_met(&amounts, threshold)
    }

    /// A resolved transaction invalidates every reward read so far.
    pub fn mark_stale(&mut self) {
        for section in [&mut self.nft, &mut self.token, &mut self.locked] {
            if let Ok(section) = section {
                section.reward.mark_stale();
            }
        }
    }

    pub fn is_stale(&self) -> bool {
        self.quotes().iter().any(|q| q.is_stale())
    }
}

#[async_trait]
pub trait StakingDashboard {
    async fn fetch_dashboard(&self, user: &Address) -> Result<DashboardSnapshot>;
}

impl NetworkProvider {
    async fn direct_section(&self, product: Product, user: &Address) -> Section<ProductSection> {
        let (position, reward) = tokio::try_join!(
            self.fetch_position(product, user),
            self.fetch_reward(product, user)
        )?;

        Ok(ProductSection { position, reward })
    }
}

#[async_trait]
impl StakingDashboard for NetworkProvider {
    /// Reads the aggregate in one GraphQL round trip when an endpoint is
    /// configured, otherwise queries the contracts directly.
    async fn fetch_dashboard(&self, user: &Address) -> Result<DashboardSnapshot> {
        let snapshot = if self.config().graphql_url().is_some() {
            let aggregate = self.get_aggregate(user).await?;
            DashboardSnapshot::from_aggregate(&aggregate)
        } else {
            let reward_token = &self.deployment.reward_token.identifier;
            let (nft, token, locked, rates, price) = tokio::join!(
                self.direct_section(Product::Nft, user),
                self.direct_section(Product::Token, user),
                self.direct_section(Product::LockedToken, user),
                self.fetch_rates(),
                self.get_token_price(reward_token),
            );

            DashboardSnapshot {
                nft,
                token,
                locked,
                rates,
                lottery: Ok(None),
                token_price: price.map(Some),
            }
        };

        for (section, error) in snapshot.errors() {
            warn!(target: "reader", %user, section, %error, "dashboard section failed");
        }

        Ok(snapshot)
    }
}
