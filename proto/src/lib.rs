pub mod abi;
pub mod address;
pub mod payload;
pub mod product;
pub mod tx;

pub use intl::BigUint;
