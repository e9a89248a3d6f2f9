//! Turns raw product responses into [`StakingPosition`]s.
//!
//! Input is the JSON shape of one product object of the aggregate
//! (`stakingNft`, `stakingToken`, `stakingTokenLocked`). Direct contract reads
//! are converted into the same shape by the reader, so both sources share this
//! module.
//!
//! Missing or `null` fields read as the zero value of the product: an account
//! that never staked shows up as "not staked". A field that is present with
//! the wrong shape is a [`PositionError::MalformedPosition`].

use bigdecimal::BigDecimal;
use errors::position::PositionError;
use intl::{wei::parse_chain_units, BigUint};
use proto::product::Product;
use serde_json::Value;
use std::str::FromStr;

use crate::{
    earnings::ProductRates,
    stake::{LockEntry, NftStake, RewardQuote, StakingPosition, TokenStake},
};

pub type Result<T> = std::result::Result<T, PositionError>;

pub const USER_STAKING: &str = "userStaking";
pub const REWARDS_FOR_USER: &str = "rewardsForUser";
pub const TOKENS_PER_DAY: &str = "tokensPerDay";
pub const APR: &str = "apr";
pub const LOCK_DAYS: &str = "lockDays";

pub const NONCE: &str = "nonce";
pub const ID: &str = "id";
pub const STAKED_AMOUNT: &str = "staked_amount";
pub const STAKED_EPOCH: &str = "staked_epoch";
pub const LAST_CLAIMED: &str = "last_claimed_timestamp";
pub const UNLOCK_TIMESTAMP: &str = "unlock_timestamp";

fn malformed(field: impl Into<String>, expected: &'static str) -> PositionError {
    PositionError::MalformedPosition {
        field: field.into(),
        expected,
    }
}

/// `None` for absent and `null` fields alike.
pub(crate) fn field<'a>(raw: &'a Value, name: &str) -> Option<&'a Value> {
    raw.get(name).filter(|v| !v.is_null())
}

pub(crate) fn parse_u64(value: Option<&Value>, name: &str) -> Result<u64> {
    match value {
        None => Ok(0),
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| malformed(name, "unsigned integer")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| malformed(name, "unsigned integer")),
        Some(_) => Err(malformed(name, "unsigned integer")),
    }
}

pub(crate) fn parse_biguint(value: Option<&Value>, name: &str) -> Result<BigUint> {
    match value {
        None => Ok(BigUint::default()),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(BigUint::from)
            .ok_or_else(|| malformed(name, "non-negative integer")),
        Some(Value::String(s)) => {
            parse_chain_units(s).map_err(|_| malformed(name, "non-negative integer"))
        }
        Some(_) => Err(malformed(name, "non-negative integer")),
    }
}

pub(crate) fn parse_decimal(value: Option<&Value>, name: &str) -> Result<BigDecimal> {
    let text = match value {
        None => return Ok(BigDecimal::default()),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => return Err(malformed(name, "decimal number")),
    };
    let decimal = BigDecimal::from_str(&text).map_err(|_| malformed(name, "decimal number"))?;

    if decimal < BigDecimal::default() {
        return Err(malformed(name, "non-negative decimal"));
    }

    Ok(decimal)
}

pub(crate) fn parse_u64_list(value: Option<&Value>, name: &str) -> Result<Vec<u64>> {
    list(value, name)?
        .iter()
        .enumerate()
        .map(|(i, item)| parse_u64(Some(item), &format!("{}[{}]", name, i)))
        .collect()
}

fn list<'a>(value: Option<&'a Value>, name: &str) -> Result<&'a [Value]> {
    match value {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(malformed(name, "list")),
    }
}

fn object<'a>(value: &'a Value, name: &str) -> Result<&'a Value> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(malformed(name, "object"))
    }
}

fn nft_stake(item: &Value, path: &str) -> Result<NftStake> {
    let item = object(item, path)?;
    let at = |f: &str| format!("{}.{}", path, f);

    Ok(NftStake::new(
        parse_u64(field(item, NONCE), &at(NONCE))?,
        parse_u64(field(item, STAKED_EPOCH), &at(STAKED_EPOCH))?,
        parse_u64(field(item, LAST_CLAIMED), &at(LAST_CLAIMED))?,
    ))
}

fn token_stake(item: &Value, path: &str) -> Result<TokenStake> {
    let item = object(item, path)?;
    let at = |f: &str| format!("{}.{}", path, f);

    Ok(TokenStake::new(
        parse_biguint(field(item, STAKED_AMOUNT), &at(STAKED_AMOUNT))?,
        parse_u64(field(item, STAKED_EPOCH), &at(STAKED_EPOCH))?,
        parse_u64(field(item, LAST_CLAIMED), &at(LAST_CLAIMED))?,
    ))
}

fn lock_entry(item: &Value, path: &str) -> Result<LockEntry> {
    let item = object(item, path)?;
    let at = |f: &str| format!("{}.{}", path, f);

    Ok(LockEntry::new(
        parse_u64(field(item, ID), &at(ID))?,
        parse_biguint(field(item, STAKED_AMOUNT), &at(STAKED_AMOUNT))?,
        parse_u64(field(item, STAKED_EPOCH), &at(STAKED_EPOCH))?,
        parse_u64(field(item, LAST_CLAIMED), &at(LAST_CLAIMED))?,
        parse_u64(field(item, UNLOCK_TIMESTAMP), &at(UNLOCK_TIMESTAMP))?,
    ))
}

/// `Ok(None)` when the product object itself is missing.
pub fn normalize(raw: &Value, product: Product) -> Result<Option<StakingPosition>> {
    if raw.is_null() {
        return Ok(None);
    }

    let raw = object(raw, product.graphql_field())?;
    let staking = field(raw, USER_STAKING);
    let item_path = |i: usize| format!("{}[{}]", USER_STAKING, i);

    let position = match product {
        Product::Nft => {
            let stakes = list(staking, USER_STAKING)?
                .iter()
                .enumerate()
                .map(|(i, item)| nft_stake(item, &item_path(i)))
                .collect::<Result<Vec<_>>>()?;

            StakingPosition::Nft(stakes)
        }
        Product::Token => match staking {
            None => StakingPosition::empty(product),
            Some(item) => StakingPosition::Fungible(token_stake(item, USER_STAKING)?),
        },
        Product::LockedToken => {
            let entries = list(staking, USER_STAKING)?
                .iter()
                .enumerate()
                .map(|(i, item)| lock_entry(item, &item_path(i)))
                .collect::<Result<Vec<_>>>()?;

            StakingPosition::locked(entries)
        }
    };

    Ok(Some(position))
}

pub fn normalize_rewards(raw: &Value, product: Product) -> Result<Option<RewardQuote>> {
    if raw.is_null() {
        return Ok(None);
    }

    let raw = object(raw, product.graphql_field())?;
    let amount = parse_biguint(field(raw, REWARDS_FOR_USER), REWARDS_FOR_USER)?;

    Ok(Some(RewardQuote::new(product, amount)))
}

/// Rates of all three products; missing products contribute zero rates.
pub fn normalize_rates(nft: &Value, token: &Value, locked: &Value) -> Result<ProductRates> {
    Ok(ProductRates {
        tokens_per_day: parse_biguint(field(nft, TOKENS_PER_DAY), TOKENS_PER_DAY)?,
        token_apr: parse_decimal(field(token, APR), APR)?,
        locked_apr: parse_decimal(field(locked, APR), APR)?,
        lock_days: parse_u64(field(locked, LOCK_DAYS), LOCK_DAYS)?,
    })
}
