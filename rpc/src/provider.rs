use async_trait::async_trait;
use errors::rpc::RpcError;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{fmt::Debug, time::Duration};
use tracing::{debug, warn};

use crate::common::{GatewayRpc, GraphQlRpc, NetworkConfigTrait, Result};
use crate::interfaces::{GraphQlRequest, GraphQlResponse};

pub struct RpcProvider<N>
where
    N: NetworkConfigTrait,
{
    pub network: N,
    client: Client,
}

impl<N> RpcProvider<N>
where
    N: NetworkConfigTrait,
{
    pub fn new(network: N) -> Self {
        let client = build_client(network.timeout());

        Self { network, client }
    }

    fn join(node: &str, path: &str) -> String {
        format!(
            "{}/{}",
            node.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn map_send_error(e: reqwest::Error) -> RpcError {
        if e.is_timeout() {
            RpcError::Timeout(e.to_string())
        } else {
            RpcError::BadRequest(e.to_string())
        }
    }

    /// One request against one node. The bool tells whether another node
    /// may answer differently.
    async fn send_once<SR>(
        &self,
        url: &str,
        method: Method,
        body: Option<&Value>,
    ) -> std::result::Result<SR, (RpcError, bool)>
    where
        SR: DeserializeOwned + Debug + Send,
    {
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req
            .send()
            .await
            .map_err(|e| (Self::map_send_error(e), true))?;
        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| (Self::map_send_error(e), true))?;

        if !status.is_success() {
            let retry = status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
            return Err((RpcError::HttpError(status.as_u16(), text), retry));
        }

        serde_json::from_str(&text).map_err(|e| (RpcError::InvalidJson(e.to_string()), true))
    }

    async fn request<SR>(&self, method: Method, path: &str, body: Option<&Value>) -> Result<SR>
    where
        SR: DeserializeOwned + Debug + Send,
    {
        let mut error = RpcError::NetworkDown;

        for node in self.network.nodes() {
            let url = Self::join(node, path);

            match self.send_once(&url, method.clone(), body).await {
                Ok(res) => {
                    debug!(target: "rpc", %url, "request served");
                    return Ok(res);
                }
                Err((e, retry)) => {
                    warn!(target: "rpc", %url, error = %e, "node request failed");
                    error = e;

                    if !retry {
                        break;
                    }
                }
            }
        }

        Err(error)
    }
}

#[async_trait]
impl<N> GatewayRpc for RpcProvider<N>
where
    N: NetworkConfigTrait + Send + Sync,
{
    fn get_nodes(&self) -> &[String] {
        self.network.nodes()
    }

    async fn get<SR>(&self, path: &str) -> Result<SR>
    where
        SR: DeserializeOwned + Debug + Send,
    {
        self.request(Method::GET, path, None).await
    }

    async fn post<SR>(&self, path: &str, body: &Value) -> Result<SR>
    where
        SR: DeserializeOwned + Debug + Send,
    {
        self.request(Method::POST, path, Some(body)).await
    }
}

#[async_trait]
impl<N> GraphQlRpc for RpcProvider<N>
where
    N: NetworkConfigTrait + Send + Sync,
{
    async fn query<SR>(&self, query: &str, variables: Value) -> Result<SR>
    where
        SR: DeserializeOwned + Debug + Send,
    {
        let url = self
            .network
            .graphql_url()
            .ok_or(RpcError::GraphQlNotConfigured)?;
        let payload = serde_json::to_value(GraphQlRequest { query, variables })
            .map_err(|e| RpcError::BadRequest(e.to_string()))?;
        let res: GraphQlResponse<SR> = self
            .send_once(url, Method::POST, Some(&payload))
            .await
            .map_err(|(e, _)| e)?;

        if let Some(errors) = res.errors.filter(|errors| !errors.is_empty()) {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            warn!(target: "rpc", %url, %message, "graphql query rejected");

            return Err(RpcError::GraphQl(message));
        }

        res.data
            .ok_or_else(|| RpcError::GraphQl("response has no data".to_string()))
    }
}

/// A client without the request timeout still works, so a builder failure
/// falls back to it loudly.
fn build_client(timeout: Duration) -> Client {
    match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(
                target: "rpc",
                timeout_ms = timeout.as_millis() as u64,
                error = %e,
                "client builder failed, requests run without timeout"
            );
            Client::new()
        }
    }
}

#[cfg(test)]
mod tests_provider {
    use super::*;
    use crate::interfaces::{TokenBalanceRes, VmQueryResponse};
    use crate::network_config::NetworkConfig;
    use serde_json::json;

    fn provider(urls: Vec<String>) -> RpcProvider<NetworkConfig> {
        RpcProvider::new(NetworkConfig::new("test", "D", urls).with_timeout(2_000))
    }

    #[tokio::test]
    async fn test_get_token_balance() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/accounts/erd1alice/tokens/XCUMB-da0e35")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"identifier":"XCUMB-da0e35","balance":"1000000000000000000"}"#)
            .create_async()
            .await;

        let rpc = provider(vec![server.url()]);
        let res: TokenBalanceRes = rpc
            .get("accounts/erd1alice/tokens/XCUMB-da0e35")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(res.balance, "1000000000000000000");
    }

    #[tokio::test]
    async fn test_custom_timeout_client_serves_requests() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/network/config")
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let rpc = RpcProvider::new(NetworkConfig::new("test", "D", vec![server.url()]).with_timeout(250));
        assert_eq!(rpc.network.timeout(), Duration::from_millis(250));

        let res: Value = rpc.get("network/config").await.unwrap();
        assert_eq!(res, json!({"ok": true}));
        mock.assert_async().await;

        let client = build_client(Duration::from_millis(1));
        assert!(client.get(server.url()).build().is_ok());
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let mut first = mockito::Server::new_async().await;
        let mut second = mockito::Server::new_async().await;
        let missing = first
            .mock("GET", "/accounts/erd1bob/tokens/XCUMB-da0e35")
            .with_status(404)
            .with_body(r#"{"message":"Token not found"}"#)
            .create_async()
            .await;
        let untouched = second
            .mock("GET", "/accounts/erd1bob/tokens/XCUMB-da0e35")
            .expect(0)
            .create_async()
            .await;

        let rpc = provider(vec![first.url(), second.url()]);
        let err = rpc
            .get::<TokenBalanceRes>("accounts/erd1bob/tokens/XCUMB-da0e35")
            .await
            .unwrap_err();

        missing.assert_async().await;
        untouched.assert_async().await;
        assert!(matches!(err, RpcError::HttpError(404, _)));
    }

    #[tokio::test]
    async fn test_fallback_to_next_node() {
        let mut broken = mockito::Server::new_async().await;
        let mut healthy = mockito::Server::new_async().await;
        broken
            .mock("POST", "/query")
            .with_status(502)
            .create_async()
            .await;
        healthy
            .mock("POST", "/query")
            .with_status(200)
            .with_body(r#"{"returnData":["AQ=="],"returnCode":"ok","returnMessage":""}"#)
            .create_async()
            .await;

        let rpc = provider(vec![broken.url(), healthy.url()]);
        let res: VmQueryResponse = rpc
            .post("query", &json!({"scAddress": "erd1qq", "funcName": "getApr", "args": []}))
            .await
            .unwrap();

        assert!(res.is_ok());
        assert_eq!(res.values(), vec!["AQ=="]);
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/mex/tokens/DEFRA-3961e1")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let rpc = provider(vec![server.url()]);
        let err = rpc
            .get::<Value>("mex/tokens/DEFRA-3961e1")
            .await
            .unwrap_err();

        assert!(matches!(err, RpcError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn test_no_nodes() {
        let rpc = provider(vec![]);
        let err = rpc.get::<Value>("anything").await.unwrap_err();

        assert_eq!(err, RpcError::NetworkDown);
    }

    #[tokio::test]
    async fn test_graphql_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_body(mockito::Matcher::PartialJson(
                json!({"variables": {"address": "erd1alice"}}),
            ))
            .with_status(200)
            .with_body(r#"{"data":{"cucumberx":{"lottery":null}}}"#)
            .create_async()
            .await;

        let config = NetworkConfig::new("test", "D", vec![server.url()])
            .with_graphql(format!("{}/graphql", server.url()));
        let rpc = RpcProvider::new(config);
        let data: Value = rpc
            .query("query { cucumberx { lottery } }", json!({"address": "erd1alice"}))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(data["cucumberx"]["lottery"].is_null());
    }

    #[tokio::test]
    async fn test_graphql_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(r#"{"data":null,"errors":[{"message":"bad field"},{"message":"oops"}]}"#)
            .create_async()
            .await;

        let config = NetworkConfig::new("test", "D", vec![server.url()])
            .with_graphql(format!("{}/graphql", server.url()));
        let rpc = RpcProvider::new(config);
        let err = rpc.query::<Value>("{ x }", json!({})).await.unwrap_err();

        assert_eq!(err, RpcError::GraphQl("bad field; oops".to_string()));
    }

    #[tokio::test]
    async fn test_graphql_not_configured() {
        let rpc = provider(vec!["http://localhost".to_string()]);
        let err = rpc.query::<Value>("{ x }", json!({})).await.unwrap_err();

        assert_eq!(err, RpcError::GraphQlNotConfigured);
    }
}
