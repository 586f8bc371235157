use serde::Serialize;

/// Standardized error envelope returned by every endpoint.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            fields: serde_json::json!({ "message": message }),
        }
    }
}
