use async_trait::async_trait;
use errors::rpc::RpcError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{fmt::Debug, time::Duration};

pub type Result<T> = std::result::Result<T, RpcError>;

pub trait RpcMethod: std::fmt::Display {
    fn as_str(&self) -> &'static str;
}

pub trait NetworkConfigTrait {
    fn nodes(&self) -> &[String];
    fn default_node(&self) -> &str;
    fn graphql_url(&self) -> Option<&str>;
    fn timeout(&self) -> Duration;
}

/// REST gateway reads. Every call walks the node list until one answers.
#[async_trait]
pub trait GatewayRpc {
    fn get_nodes(&self) -> &[String];

    async fn get<SR>(&self, path: &str) -> Result<SR>
    where
        SR: DeserializeOwned + Debug + Send;

    async fn post<SR>(&self, path: &str, body: &Value) -> Result<SR>
    where
        SR: DeserializeOwned + Debug + Send;
}

#[async_trait]
pub trait GraphQlRpc {
    async fn query<SR>(&self, query: &str, variables: Value) -> Result<SR>
    where
        SR: DeserializeOwned + Debug + Send;
}
