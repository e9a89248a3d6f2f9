use bigdecimal::{
    BigDecimal,
    num_bigint::{BigInt, BigUint},
};
use errors::intl::IntlErrors;

type Result<T> = std::result::Result<T, IntlErrors>;

/// Scales a human decimal numeral (`"12.5"`) into integer chain units.
///
/// Accepts leading zeros and trailing fractional zeros beyond `decimals`.
/// Signs, exponents and any non-zero digit past `decimals` are rejected.
pub fn to_chain_amount(value: &str, decimals: u8) -> Result<BigUint> {
    let value = value.trim();
    let (int_part, frac_part) = value.split_once('.').unwrap_or((value, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    if (int_part.is_empty() && frac_part.is_empty()) || !is_digits(int_part) || !is_digits(frac_part)
    {
        return Err(IntlErrors::InvalidAmount(value.to_string()));
    }

    let decimals = decimals as usize;
    let (kept, excess) = if frac_part.len() > decimals {
        frac_part.split_at(decimals)
    } else {
        (frac_part, "")
    };

    if excess.bytes().any(|b| b != b'0') {
        return Err(IntlErrors::InvalidAmount(value.to_string()));
    }

    let mut digits = String::with_capacity(int_part.len() + decimals + 1);
    digits.push_str(int_part);
    digits.push_str(kept);
    digits.extend(std::iter::repeat_n('0', decimals - kept.len()));

    if digits.is_empty() {
        return Ok(BigUint::default());
    }

    BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| IntlErrors::InvalidAmount(value.to_string()))
}

/// Renders chain units as a decimal string cut (toward zero) at `precision`
/// fractional digits, without trailing zeros.
pub fn to_display_amount(value: &BigUint, decimals: u8, precision: u8) -> String {
    let big_decimal = BigDecimal::new(BigInt::from(value.clone()), decimals as i64);
    let precision = precision.min(decimals) as i64;

    big_decimal
        .with_scale(precision)
        .normalized()
        .to_plain_string()
}

/// Parses an integer already expressed in chain units, as returned by APIs.
pub fn parse_chain_units(value: &str) -> Result<BigUint> {
    let trimmed = value.trim();

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IntlErrors::BigDecimalParseError(
            value.to_string(),
            "not a non-negative integer".to_string(),
        ));
    }

    BigUint::parse_bytes(trimmed.as_bytes(), 10).ok_or_else(|| {
        IntlErrors::BigDecimalParseError(value.to_string(), "overflow".to_string())
    })
}

/// `units * 10^decimals`, used for whole-token thresholds.
pub fn whole_tokens(units: u64, decimals: u8) -> BigUint {
    BigUint::from(units) * BigUint::from(10u8).pow(decimals as u32)
}
