use energy_core::greeting::GreetingResponse;
use energy_lambda::config::GreetingConfig;
use energy_lambda::handlers::greeting::handle_greeting_event;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(_event: LambdaEvent<Value>) -> Result<GreetingResponse, Error> {
    Ok(handle_greeting_event(&GreetingConfig::from_env()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    energy_lambda::logging::init();
    lambda_runtime::run(service_fn(handle_request)).await
}
