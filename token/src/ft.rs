use crate::Result;
use intl::{
    number::format_amount,
    wei::{to_chain_amount, to_display_amount, whole_tokens},
    BigUint,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub name: String,
    pub symbol: String,
    pub identifier: String,
    pub decimals: u8,
    pub decimals_to_display: u8,
}

impl Token {
    pub fn staking() -> Self {
        Token {
            name: "CucumberX".to_string(),
            symbol: "CUMB".to_string(),
            identifier: "XCUMB-da0e35".to_string(),
            decimals: 18,
            decimals_to_display: 4,
        }
    }

    pub fn reward() -> Self {
        Token {
            name: "CucumberX".to_string(),
            symbol: "CUMB".to_string(),
            identifier: "DEFRA-3961e1".to_string(),
            decimals: 12,
            decimals_to_display: 2,
        }
    }

    pub fn to_chain(&self, amount: &str) -> Result<BigUint> {
        to_chain_amount(amount, self.decimals)
    }

    pub fn to_display(&self, amount: &BigUint) -> String {
        to_display_amount(amount, self.decimals, self.decimals_to_display)
    }

    pub fn format(&self, amount: &BigUint, locale: &str) -> String {
        format_amount(
            amount,
            self.decimals,
            self.decimals_to_display,
            locale,
            &self.symbol,
        )
    }

    pub fn whole(&self, units: u64) -> BigUint {
        whole_tokens(units, self.decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_token_amounts() {
        let token = Token::reward();
        let amount = token.to_chain("1.5").unwrap();

        assert_eq!(amount, BigUint::from(1_500_000_000_000u64));
        assert_eq!(token.to_display(&amount), "1.5");
        assert_eq!(token.format(&amount, "en"), "1.5 CUMB");
        assert_eq!(token.whole(10), BigUint::from(10_000_000_000_000u64));
    }

    #[test]
    fn test_display_uses_token_precision() {
        let token = Token::staking();
        let amount = token.to_chain("2.123456").unwrap();

        assert_eq!(token.to_display(&amount), "2.1234");
    }

    #[test]
    fn test_serde_camel_case() {
        let token = Token::staking();
        let json = serde_json::to_value(&token).unwrap();

        assert_eq!(json["decimalsToDisplay"], 4);
        assert_eq!(json["identifier"], "XCUMB-da0e35");

        let back: Token = serde_json::from_value(json).unwrap();
        assert_eq!(back, token);
    }
}
