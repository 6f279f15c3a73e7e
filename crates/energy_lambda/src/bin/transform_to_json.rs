use energy_lambda::adapters::aws::S3ObjectStore;
use energy_lambda::config::TransformConfig;
use energy_lambda::errors::TransformError;
use energy_lambda::handlers::transform::{handle_transform_event, transform_failure_response};
use energy_lambda::response::ApiGatewayResponse;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    store: &S3ObjectStore,
) -> Result<ApiGatewayResponse, Error> {
    let response = match TransformConfig::from_env() {
        Ok(config) => handle_transform_event(&event.payload, &config, store),
        Err(error) => transform_failure_response(&TransformError::from(error)),
    };
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    energy_lambda::logging::init();

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = S3ObjectStore::new(aws_sdk_s3::Client::new(&aws_config));

    lambda_runtime::run(service_fn(|event| handle_request(event, &store))).await
}
