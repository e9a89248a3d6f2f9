use bigdecimal::{num_bigint::BigInt, BigDecimal};
use intl::BigUint;
use proto::product::Product;

use crate::stake::{RewardQuote, StakingPosition};

/// `100 (percent) * 365 (days)`.
const APR_DAILY_DIVISOR: u32 = 36_500;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProductRates {
    /// Chain units paid per staked NFT and day.
    pub tokens_per_day: BigUint,
    /// Percent, may carry a fraction (`36.5`).
    pub token_apr: BigDecimal,
    pub locked_apr: BigDecimal,
    pub lock_days: u64,
}

fn to_decimal(amount: &BigUint) -> BigDecimal {
    BigDecimal::from(BigInt::from(amount.clone()))
}

fn apr_per_day(apr: &BigDecimal, staked: &BigUint) -> BigDecimal {
    apr.clone() * to_decimal(staked) / BigDecimal::from(APR_DAILY_DIVISOR)
}

/// Expected rewards per day across the three products, in chain units.
///
/// Each term is computed exactly, the sum is truncated toward zero once.
pub fn daily_earnings(
    nft: &StakingPosition,
    token: &StakingPosition,
    locked: &StakingPosition,
    rates: &ProductRates,
) -> BigUint {
    let nft_part = to_decimal(&(&rates.tokens_per_day * BigUint::from(nft.nft_count())));
    let token_part = apr_per_day(&rates.token_apr, &token.staked_amount());
    let locked_part = apr_per_day(&rates.locked_apr, &locked.staked_amount());

    let (int_val, _) = (nft_part + token_part + locked_part)
        .with_scale(0)
        .into_bigint_and_exponent();

    int_val.to_biguint().unwrap_or_default()
}

pub fn total_rewards(rewards: &[BigUint]) -> BigUint {
    rewards.iter().sum()
}

/// The sum of all rewards and at least one single reward strictly exceed
/// `threshold`.
pub fn claim_eligible(rewards: &[BigUint], threshold: &BigUint) -> bool {
    total_rewards(rewards) > *threshold && rewards.iter().any(|r| r > threshold)
}

/// Products whose pending reward alone strictly exceeds `threshold`.
pub fn claimable_products(quotes: &[RewardQuote], threshold: &BigUint) -> Vec<Product> {
    quotes
        .iter()
        .filter(|q| q.amount() > threshold)
        .map(|q| q.product())
        .collect()
}

/// Percent chance to win, `0` while no tickets exist.
pub fn win_probability(user_tickets: u64, total_tickets: u64) -> f64 {
    if total_tickets == 0 {
        return 0.0;
    }

    (user_tickets as f64 * 100.0) / total_tickets as f64
}
