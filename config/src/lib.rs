pub const MAIN_API_URL: &str = "https://api.multiversx.com";
pub const CHAIN_ID: &str = "1";
pub const NETWORK_NAME: &str = "MultiversX Mainnet";

pub const API_TIMEOUT_MS: u64 = 6_000;
pub const POLL_INTERVAL_SECS: u64 = 6;

/// Whole reward tokens a product has to exceed before claiming is offered.
pub const MIN_CLAIM_TOKENS: u64 = 10;

pub const NATIVE_DECIMALS: u8 = 18;
pub const CREATE_LOTTERY_FEE: u64 = 1;

pub mod address;
pub mod contracts;
pub mod gas;
