pub mod abi;
pub mod address;
pub mod background;
pub mod intl;
pub mod network;
pub mod position;
pub mod rpc;
pub mod tx;
