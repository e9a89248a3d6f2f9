use bigdecimal::{Zero, num_bigint::BigUint};
use errors::intl::IntlErrors;

/// Byte-aligned hex of an integer argument (`5` -> `"05"`, `0` -> `"00"`).
pub fn encode_argument(value: &BigUint) -> String {
    let hex = value.to_str_radix(16);

    if hex.len() % 2 == 1 {
        format!("0{}", hex)
    } else {
        hex
    }
}

pub fn encode_u64_argument(value: u64) -> String {
    encode_argument(&BigUint::from(value))
}

pub fn encode_utf8_to_hex(text: &str) -> String {
    ::hex::encode(text.as_bytes())
}

pub fn decode_argument(arg: &str) -> Result<BigUint, IntlErrors> {
    if arg.is_empty() {
        return Ok(BigUint::zero());
    }

    BigUint::parse_bytes(arg.as_bytes(), 16).ok_or_else(|| IntlErrors::InvalidHex(arg.to_string()))
}
