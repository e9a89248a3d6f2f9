use rpc::{network_config::NetworkConfig, provider::RpcProvider};

use crate::deployment::Deployment;

pub struct NetworkProvider {
    pub deployment: Deployment,
    rpc: RpcProvider<NetworkConfig>,
}

impl NetworkProvider {
    pub fn new(config: NetworkConfig, deployment: Deployment) -> Self {
        Self {
            deployment,
            rpc: RpcProvider::new(config),
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.rpc.network
    }

    pub fn rpc(&self) -> &RpcProvider<NetworkConfig> {
        &self.rpc
    }
}

impl Default for NetworkProvider {
    fn default() -> Self {
        Self::new(NetworkConfig::default(), Deployment::default())
    }
}
