use chrono::Utc;
use energy_lambda::adapters::aws::{DynamoSummaryStore, S3ObjectStore, SnsSummaryNotifier};
use energy_lambda::config::CalculateConfig;
use energy_lambda::errors::CalculateError;
use energy_lambda::handlers::calculate::{
    calculate_failure_response, handle_calculate_event, CalculateAdapters,
};
use energy_lambda::response::ApiGatewayResponse;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct RuntimeDependencies {
    objects: S3ObjectStore,
    summaries: DynamoSummaryStore,
    notifier: SnsSummaryNotifier,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<ApiGatewayResponse, Error> {
    let config = match CalculateConfig::from_env() {
        Ok(value) => value,
        Err(error) => return Ok(calculate_failure_response(&CalculateError::from(error))),
    };

    let timestamp = Utc::now().to_rfc3339();
    let adapters = CalculateAdapters {
        objects: &deps.objects,
        summaries: &deps.summaries,
        notifier: &deps.notifier,
    };
    Ok(handle_calculate_event(
        &event.payload,
        &config,
        &timestamp,
        &adapters,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    energy_lambda::logging::init();

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        objects: S3ObjectStore::new(aws_sdk_s3::Client::new(&aws_config)),
        summaries: DynamoSummaryStore::new(aws_sdk_dynamodb::Client::new(&aws_config)),
        notifier: SnsSummaryNotifier::new(aws_sdk_sns::Client::new(&aws_config)),
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &deps))).await
}
