pub const HRP_ERD: &str = "erd";
pub const PUBKEY_LEN: usize = 32;
