use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VmQueryRequest {
    pub sc_address: String,
    pub func_name: String,
    pub args: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VmQueryResponse {
    #[serde(default)]
    pub return_data: Option<Vec<Option<String>>>,
    pub return_code: String,
    #[serde(default)]
    pub return_message: Option<String>,
}

impl VmQueryResponse {
    pub const OK: &'static str = "ok";

    pub fn is_ok(&self) -> bool {
        self.return_code == Self::OK
    }

    /// Returned values; `null` entries are empty (zero) values.
    pub fn values(&self) -> Vec<&str> {
        self.return_data
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|v| v.as_deref().unwrap_or_default())
            .collect()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TokenBalanceRes {
    pub balance: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MexTokenRes {
    pub price: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NftMedia {
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NftRes {
    pub identifier: String,
    pub collection: String,
    pub nonce: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub media: Vec<NftMedia>,
}

#[derive(Debug, Serialize, Clone)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}
