use energy_core::item::{notification_text, SummaryItem, SummaryReport};
use energy_core::keys::is_json_key;
use energy_core::{summarize, EnergyReading, EnergySummary};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::adapters::notifier::SummaryNotifier;
use crate::adapters::object_store::ObjectStore;
use crate::adapters::summary_store::SummaryStore;
use crate::config::CalculateConfig;
use crate::errors::CalculateError;
use crate::events::{calculate_input, CalculateInput, ObjectRef};
use crate::response::{failure_response, success_response, ApiGatewayResponse};

const COMPONENT: &str = "calculate_handler";
const FAILURE_LABEL: &str = "Internal server error";
pub const NOTIFICATION_SUBJECT: &str = "Home Energy Coach summary";

/// The collaborators the calculate function talks to.
pub struct CalculateAdapters<'a> {
    pub objects: &'a dyn ObjectStore,
    pub summaries: &'a dyn SummaryStore,
    pub notifier: &'a dyn SummaryNotifier,
}

/// Resolves the batch, summarizes it, persists the summary row, then
/// notifies. Nothing is written unless the summary succeeds.
pub fn calculate_summary(
    event: &Value,
    config: &CalculateConfig,
    timestamp: &str,
    adapters: &CalculateAdapters<'_>,
) -> Result<EnergySummary, CalculateError> {
    let readings = match calculate_input(event)? {
        CalculateInput::Inline(readings) => readings,
        CalculateInput::Objects(refs) => read_batch(&refs, adapters.objects)?,
    };

    let summary = summarize(readings)?;
    let item = SummaryItem::new(&summary, timestamp)?;

    adapters
        .summaries
        .put_summary(&config.table_name, &item)
        .map_err(|message| CalculateError::Persistence {
            table_name: config.table_name.clone(),
            message,
        })?;
    info!(
        component = COMPONENT,
        event = "summary_persisted",
        table_name = %config.table_name,
        record_count = summary.batch_size(),
        total_kwh = summary.total_kwh,
        timestamp,
    );

    match &config.summary_topic_arn {
        Some(topic_arn) => {
            adapters
                .notifier
                .publish(
                    topic_arn,
                    NOTIFICATION_SUBJECT,
                    &notification_text(&summary, timestamp),
                )
                .map_err(CalculateError::Notification)?;
            info!(
                component = COMPONENT,
                event = "summary_published",
                topic_arn = %topic_arn,
            );
        }
        None => warn!(
            component = COMPONENT,
            event = "summary_notification_skipped",
            reason = "no summary topic configured",
        ),
    }

    Ok(summary)
}

fn read_batch(
    refs: &[ObjectRef],
    objects: &dyn ObjectStore,
) -> Result<Vec<EnergyReading>, CalculateError> {
    let mut readings = Vec::new();
    for object in refs {
        if !is_json_key(&object.key) {
            info!(
                component = COMPONENT,
                event = "object_skipped",
                bucket = %object.bucket,
                key = %object.key,
                reason = "not a json object",
            );
            continue;
        }

        let bytes = objects
            .read_object(&object.bucket, &object.key)
            .map_err(|message| CalculateError::Read {
                bucket: object.bucket.clone(),
                key: object.key.clone(),
                message,
            })?;
        let batch: Vec<EnergyReading> =
            serde_json::from_slice(&bytes).map_err(|source| CalculateError::Parse {
                bucket: object.bucket.clone(),
                key: object.key.clone(),
                source,
            })?;
        readings.extend(batch);
    }
    Ok(readings)
}

pub fn handle_calculate_event(
    event: &Value,
    config: &CalculateConfig,
    timestamp: &str,
    adapters: &CalculateAdapters<'_>,
) -> ApiGatewayResponse {
    match calculate_summary(event, config, timestamp, adapters) {
        Ok(summary) => success_response(200, SummaryReport::new(&summary, timestamp)),
        Err(error) => calculate_failure_response(&error),
    }
}

pub fn calculate_failure_response(error: &CalculateError) -> ApiGatewayResponse {
    error!(
        component = COMPONENT,
        event = "calculation_failed",
        error_kind = error.kind(),
        error = %error,
    );
    failure_response(FAILURE_LABEL, error.kind(), error.to_string())
}
