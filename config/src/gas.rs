pub const MAX_GAS_LIMIT: u64 = 600_000_000;

pub const NFT_STAKE_BASE: u64 = 3_500_000;
pub const NFT_STAKE_PER_ITEM: u64 = 3_500_000;
pub const NFT_UNSTAKE_BASE: u64 = 10_000_000;
pub const NFT_UNSTAKE_PER_ITEM: u64 = 10_000_000;
pub const NFT_CLAIM_BASE: u64 = 10_000_000;
pub const NFT_CLAIM_PER_ITEM: u64 = 7_000_000;

pub const TOKEN_STAKE: u64 = 10_000_000;
pub const TOKEN_UNSTAKE: u64 = 25_000_000;
pub const TOKEN_CLAIM: u64 = 20_000_000;
pub const LOCKED_UNSTAKE: u64 = 10_000_000;

pub const BUY_TICKETS: u64 = 50_000_000;
pub const CREATE_LOTTERY: u64 = 20_000_000;
pub const DRAW_WINNER: u64 = 15_000_000;
pub const DEPOSIT_REWARDS: u64 = 10_000_000;
pub const SET_TOKENS_PER_DAY: u64 = 10_000_000;
