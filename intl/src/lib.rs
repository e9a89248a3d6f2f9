pub mod hex;
pub mod number;
pub mod wei;

pub use bigdecimal::num_bigint::BigUint;
