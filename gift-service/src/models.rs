use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub client_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestForm {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub client_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LandingParams {
    pub client_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
}
