use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

impl ApiGatewayResponse {
    /// Parses `body` back into JSON; used by callers that inspect results.
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

pub fn success_response(status_code: u16, payload: impl Serialize) -> ApiGatewayResponse {
    match serde_json::to_string(&payload) {
        Ok(body) => ApiGatewayResponse {
            status_code,
            headers: json_headers(),
            body,
        },
        Err(error) => error_response(
            500,
            json!({
                "error": "serialization_error",
                "message": error.to_string(),
            }),
        ),
    }
}

pub fn error_response(status_code: u16, payload: Value) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json_headers(),
        body: payload.to_string(),
    }
}

/// The 500 reply every failed pipeline invocation returns.
pub fn failure_response(
    error: &str,
    kind: &str,
    message: impl Into<String>,
) -> ApiGatewayResponse {
    error_response(
        500,
        json!({
            "error": error,
            "kind": kind,
            "message": message.into(),
        }),
    )
}

fn json_headers() -> Value {
    json!({"Content-Type": "application/json"})
}
