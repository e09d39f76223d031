use serde::{Deserialize, Serialize};

pub const MIME_JSON: &str = "application/json";

#[derive(Debug, Serialize, Deserialize)]
pub struct CommonResponse {
    pub code: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
