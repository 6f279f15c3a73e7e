use std::time::Instant;

use energy_core::keys::{is_csv_key, json_object_key};
use energy_core::{parse_readings, readings_to_json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::adapters::object_store::ObjectStore;
use crate::config::TransformConfig;
use crate::errors::TransformError;
use crate::events::{object_refs, EventError, ObjectRef};
use crate::response::{failure_response, success_response, ApiGatewayResponse};

const COMPONENT: &str = "transform_handler";
const FAILURE_LABEL: &str = "CSV transformation error";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransformSuccess {
    pub message: String,
    #[serde(rename = "sourceFile")]
    pub source_file: String,
    #[serde(rename = "outputFile")]
    pub output_file: String,
    #[serde(rename = "recordCount")]
    pub record_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformOutcome {
    Skipped { key: String },
    Transformed(TransformSuccess),
}

/// Converts the uploaded CSV object named by the event into a JSON object
/// in the transformed bucket.
///
/// Only the first referenced object is processed.
pub fn transform_object(
    event: &Value,
    config: &TransformConfig,
    store: &impl ObjectStore,
) -> Result<TransformOutcome, TransformError> {
    let source = object_refs(event)?
        .into_iter()
        .next()
        .ok_or(EventError::NoObjects)?;

    if !is_csv_key(&source.key) {
        info!(
            component = COMPONENT,
            event = "object_skipped",
            bucket = %source.bucket,
            key = %source.key,
            reason = "not a csv object",
        );
        return Ok(TransformOutcome::Skipped { key: source.key });
    }

    let csv_text = read_csv_text(&source, store)?;
    let readings = parse_readings(&csv_text)?;
    let body = readings_to_json(&readings)?;

    let output_key = json_object_key(&source.key);
    store
        .write_object(
            &config.transformed_bucket,
            &output_key,
            body.as_bytes(),
            JSON_CONTENT_TYPE,
        )
        .map_err(|message| TransformError::Write {
            bucket: config.transformed_bucket.clone(),
            key: output_key.clone(),
            message,
        })?;

    Ok(TransformOutcome::Transformed(TransformSuccess {
        message: "CSV to JSON transformation completed successfully".to_string(),
        source_file: source.key,
        output_file: output_key,
        record_count: readings.len(),
    }))
}

fn read_csv_text(source: &ObjectRef, store: &impl ObjectStore) -> Result<String, TransformError> {
    let bytes = store
        .read_object(&source.bucket, &source.key)
        .map_err(|message| TransformError::Read {
            bucket: source.bucket.clone(),
            key: source.key.clone(),
            message,
        })?;
    String::from_utf8(bytes).map_err(|_| TransformError::NotUtf8 {
        bucket: source.bucket.clone(),
        key: source.key.clone(),
    })
}

pub fn handle_transform_event(
    event: &Value,
    config: &TransformConfig,
    store: &impl ObjectStore,
) -> ApiGatewayResponse {
    let started_at = Instant::now();
    match transform_object(event, config, store) {
        Ok(TransformOutcome::Skipped { .. }) => {
            success_response(200, json!({"message": "Skipped non-CSV file"}))
        }
        Ok(TransformOutcome::Transformed(success)) => {
            let duration_ms = started_at.elapsed().as_millis() as u64;
            info!(
                component = COMPONENT,
                event = "object_transformed",
                source_key = %success.source_file,
                output_key = %success.output_file,
                record_count = success.record_count,
                duration_ms,
            );
            success_response(200, success)
        }
        Err(error) => transform_failure_response(&error),
    }
}

pub fn transform_failure_response(error: &TransformError) -> ApiGatewayResponse {
    error!(
        component = COMPONENT,
        event = "transform_failed",
        error_kind = error.kind(),
        error = %error,
    );
    failure_response(FAILURE_LABEL, error.kind(), error.to_string())
}
