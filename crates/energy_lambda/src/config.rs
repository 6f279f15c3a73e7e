//! Handler configuration resolved from the function's environment variables.
//!
//! Every config type can also be built from an arbitrary lookup so tests do
//! not have to mutate the process environment.

use thiserror::Error;

pub use energy_core::env_vars::{
    ANIMAL as ANIMAL_VAR, ENVIRONMENT as ENVIRONMENT_VAR, STACK_NAME as STACK_NAME_VAR,
    SUMMARY_TOPIC as SUMMARY_TOPIC_VAR, TABLE_NAME as TABLE_NAME_VAR,
    TRANSFORMED_BUCKET as TRANSFORMED_BUCKET_VAR,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    non_empty(lookup, name).ok_or(ConfigError::Missing(name))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GreetingConfig {
    pub environment: Option<String>,
    pub stack_name: Option<String>,
    pub animal: Option<String>,
}

impl GreetingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            environment: non_empty(&lookup, ENVIRONMENT_VAR),
            stack_name: non_empty(&lookup, STACK_NAME_VAR),
            animal: non_empty(&lookup, ANIMAL_VAR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    pub transformed_bucket: String,
}

impl TransformConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            transformed_bucket: required(&lookup, TRANSFORMED_BUCKET_VAR)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculateConfig {
    pub table_name: String,
    /// Summary notifications are skipped when no topic is configured.
    pub summary_topic_arn: Option<String>,
}

impl CalculateConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            table_name: required(&lookup, TABLE_NAME_VAR)?,
            summary_topic_arn: non_empty(&lookup, SUMMARY_TOPIC_VAR),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| values.get(name).cloned()
    }

    #[test]
    fn greeting_config_treats_blank_values_as_absent() {
        let config = GreetingConfig::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "prod"),
            ("ANIMAL", "  "),
        ]));

        assert_eq!(config.environment.as_deref(), Some("prod"));
        assert_eq!(config.animal, None);
        assert_eq!(config.stack_name, None);
    }

    #[test]
    fn transform_config_requires_target_bucket() {
        let error = TransformConfig::from_lookup(lookup_from(&[])).expect_err("should fail");
        assert_eq!(error, ConfigError::Missing("TRANSFORMED_BUCKET"));
        assert_eq!(error.to_string(), "TRANSFORMED_BUCKET must be configured");
    }

    #[test]
    fn calculate_config_topic_is_optional() {
        let config = CalculateConfig::from_lookup(lookup_from(&[(
            "CALCULATED_ENERGY_TABLE_NAME",
            "energy-table",
        )]))
        .expect("config should resolve");

        assert_eq!(config.table_name, "energy-table");
        assert_eq!(config.summary_topic_arn, None);
    }

    #[test]
    fn calculate_config_requires_table_name() {
        let error = CalculateConfig::from_lookup(lookup_from(&[(
            "SNS_TOPIC_CALCULATOR_SUMMARY",
            "arn:aws:sns:us-east-1:123456789012:summary",
        )]))
        .expect_err("should fail");
        assert_eq!(error, ConfigError::Missing("CALCULATED_ENERGY_TABLE_NAME"));
    }
}
