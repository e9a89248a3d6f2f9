pub mod dashboard;
pub mod deployment;
pub mod earnings;
pub mod lottery;
pub mod provider;
pub mod reader;
pub mod stake;
pub mod stake_parse;
pub mod tx_builder;

pub type Result<T> = std::result::Result<T, errors::network::NetworkErrors>;
