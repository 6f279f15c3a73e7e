use serde::{Deserialize, Serialize};

pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GreetingResponse {
    pub status_code: u16,
    pub message: String,
}

/// Builds the hello-lambda reply; absent labels degrade to `"unknown"`.
pub fn greet(environment: Option<&str>, animal: Option<&str>) -> GreetingResponse {
    let environment = environment.unwrap_or(UNKNOWN);
    let animal = animal.unwrap_or(UNKNOWN);
    GreetingResponse {
        status_code: 200,
        message: format!("Hello, World! Running in {environment} environment with {animal}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greets_with_configured_labels() {
        let response = greet(Some("prod"), Some("dog"));
        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.message,
            "Hello, World! Running in prod environment with dog"
        );
    }

    #[test]
    fn missing_labels_fall_back_to_unknown() {
        let response = greet(None, None);
        assert_eq!(
            response.message,
            "Hello, World! Running in unknown environment with unknown"
        );
    }
}
