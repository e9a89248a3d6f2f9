pub const NFT_STAKING_CONTRACT: &str =
    "erd1qqqqqqqqqqqqqpgq7ymsl3yn70z9863l02g6j8ttlewyungc4jws5cas66";
pub const TOKEN_STAKING_CONTRACT: &str =
    "erd1qqqqqqqqqqqqqpgqnx25cpxhurers4enwqtg3jgcfy8qcrnt4jws5g278q";
pub const LOCKED_TOKEN_STAKING_CONTRACT: &str =
    "erd1qqqqqqqqqqqqqpgqk4pp8f5742f2w5nrz0zynnmwe0utp2gcdn3qhgh4xr";
pub const NFT_COLLECTION: &str = "GIANT-1ed993";

pub const AGGREGATE_ROOT: &str = "cucumberx";

pub mod endpoints {
    pub const STAKE: &str = "stake";
    pub const STAKE_MULTIPLE: &str = "stake_multiple";
    pub const UNSTAKE: &str = "unstake";
    pub const UNSTAKE_MULTIPLE: &str = "unstake_multiple";
    pub const CLAIM_REWARDS: &str = "claim_rewards";
    pub const BUY_TICKETS: &str = "buy_tickets";
    pub const START_LOTTERY: &str = "start_lottery";
    pub const DRAW_WINNER: &str = "draw_winner";
    pub const DEPOSIT_REWARDS: &str = "deposit_rewards";
    pub const SET_TOKENS_PER_DAY: &str = "set_tokens_per_day";

    pub const ESDT_TRANSFER: &str = "ESDTTransfer";
    pub const MULTI_ESDT_NFT_TRANSFER: &str = "MultiESDTNFTTransfer";
}
