use serde::{Deserialize, Serialize};

/// The three staking products a deployment runs side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Product {
    Nft,
    Token,
    LockedToken,
}

impl Product {
    pub const ALL: [Product; 3] = [Product::Nft, Product::Token, Product::LockedToken];

    /// Field name of the product inside the GraphQL aggregate.
    pub fn graphql_field(&self) -> &'static str {
        match self {
            Product::Nft => "stakingNft",
            Product::Token => "stakingToken",
            Product::LockedToken => "stakingTokenLocked",
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Product::Nft => write!(f, "NFT staking"),
            Product::Token => write!(f, "token staking"),
            Product::LockedToken => write!(f, "locked token staking"),
        }
    }
}
