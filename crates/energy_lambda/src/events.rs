//! Decoding of the trigger envelopes the pipeline functions receive.
//!
//! Three shapes reach the handlers: S3 object-created notifications, the
//! same notifications wrapped in an SNS message, and direct invocations
//! carrying readings inline under `body` or `data`.

use energy_core::EnergyReading;
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalculateInput {
    Inline(Vec<EnergyReading>),
    Objects(Vec<ObjectRef>),
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("event payload must be a JSON object")]
    NotAnObject,
    #[error("event must include a Records array")]
    MissingRecords,
    #[error("record {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
    #[error("event does not reference any stored object")]
    NoObjects,
    #[error("malformed readings payload: {0}")]
    MalformedReadings(#[source] serde_json::Error),
    #[error("request body must be a JSON string or array of readings")]
    UnsupportedBody,
}

/// Collects every object reference carried by an S3 or SNS-wrapped S3 event.
pub fn object_refs(event: &Value) -> Result<Vec<ObjectRef>, EventError> {
    if !event.is_object() {
        return Err(EventError::NotAnObject);
    }

    let mut refs = Vec::new();
    collect_object_refs(event, &mut refs)?;
    if refs.is_empty() {
        return Err(EventError::NoObjects);
    }
    Ok(refs)
}

fn collect_object_refs(event: &Value, refs: &mut Vec<ObjectRef>) -> Result<(), EventError> {
    let records = event
        .get("Records")
        .and_then(Value::as_array)
        .ok_or(EventError::MissingRecords)?;

    for (index, record) in records.iter().enumerate() {
        if let Some(s3) = record.get("s3") {
            refs.push(s3_object_ref(s3).map_err(|reason| EventError::MalformedRecord {
                index,
                reason,
            })?);
        } else if let Some(sns) = record.get("Sns") {
            let message = sns
                .get("Message")
                .and_then(Value::as_str)
                .ok_or_else(|| EventError::MalformedRecord {
                    index,
                    reason: "SNS record Message must be a string".to_string(),
                })?;
            let inner: Value =
                serde_json::from_str(message).map_err(|error| EventError::MalformedRecord {
                    index,
                    reason: format!("SNS message is not JSON: {error}"),
                })?;
            // S3 sends a one-off s3:TestEvent without Records when a
            // notification target is first configured.
            if inner.get("Records").is_some() {
                collect_object_refs(&inner, refs)?;
            }
        } else {
            return Err(EventError::MalformedRecord {
                index,
                reason: "record is neither an S3 nor an SNS notification".to_string(),
            });
        }
    }

    Ok(())
}

fn s3_object_ref(s3: &Value) -> Result<ObjectRef, String> {
    let bucket = s3
        .pointer("/bucket/name")
        .and_then(Value::as_str)
        .ok_or("S3 record must include bucket.name")?;
    let key = s3
        .pointer("/object/key")
        .and_then(Value::as_str)
        .ok_or("S3 record must include object.key")?;
    Ok(ObjectRef {
        bucket: bucket.to_string(),
        key: decode_object_key(key)?,
    })
}

/// S3 notifications carry keys form-encoded: spaces arrive as `+`, other
/// reserved bytes as `%XX`.
fn decode_object_key(raw: &str) -> Result<String, String> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|key| key.into_owned())
        .map_err(|_| format!("object key '{raw}' does not decode to UTF-8"))
}

/// Resolves where the calculate function gets its batch from.
///
/// An inline `body` wins, then S3 `Records`, then an inline `data` array.
/// An event with none of these yields an empty inline batch.
pub fn calculate_input(event: &Value) -> Result<CalculateInput, EventError> {
    let Some(object) = event.as_object() else {
        return Err(EventError::NotAnObject);
    };

    if let Some(body) = object.get("body") {
        return match body {
            Value::String(text) => serde_json::from_str(text)
                .map(CalculateInput::Inline)
                .map_err(EventError::MalformedReadings),
            Value::Array(_) => readings_from_value(body).map(CalculateInput::Inline),
            _ => Err(EventError::UnsupportedBody),
        };
    }

    if object.contains_key("Records") {
        return object_refs(event).map(CalculateInput::Objects);
    }

    match object.get("data") {
        Some(data) => readings_from_value(data).map(CalculateInput::Inline),
        None => Ok(CalculateInput::Inline(Vec::new())),
    }
}

fn readings_from_value(value: &Value) -> Result<Vec<EnergyReading>, EventError> {
    Vec::<EnergyReading>::deserialize(value).map_err(EventError::MalformedReadings)
}
