pub mod common;
pub mod interfaces;
pub mod methods;
pub mod network_config;
pub mod provider;
