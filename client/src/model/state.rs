use serde::{Deserialize, Serialize};

pub const GET_LATEST_SYSTEM_STATE: &str = "suix_getLatestSuiSystemState";

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'a str,
    pub id: u64,
    pub method: &'a str,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(method: &'a str) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    pub jsonrpc: Option<String>,
    pub id: Option<u64>,
    pub result: Option<T>,
    pub error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
}
