use energy_core::greeting::{greet, GreetingResponse};
use tracing::info;

use crate::config::GreetingConfig;

/// The trigger payload is ignored; only configuration shapes the reply.
pub fn handle_greeting_event(config: &GreetingConfig) -> GreetingResponse {
    let response = greet(config.environment.as_deref(), config.animal.as_deref());
    info!(
        component = "greeting_handler",
        event = "greeting_returned",
        stack_name = config.stack_name.as_deref().unwrap_or(energy_core::greeting::UNKNOWN),
        message = %response.message,
    );
    response
}
