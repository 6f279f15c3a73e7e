//! Validated deployment inputs. Everything here is checked once at the synth
//! entry point; stacks only ever see the typed values.

use std::fmt;

use crate::error::SynthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeploymentEnv {
    Test,
    Prod,
}

impl DeploymentEnv {
    pub const ALL: [DeploymentEnv; 2] = [DeploymentEnv::Test, DeploymentEnv::Prod];

    /// Resolves the `env` context value. Absent means `test`.
    pub fn from_context(value: Option<&str>) -> Result<Self, SynthError> {
        match value {
            None => Ok(Self::Test),
            Some("test") => Ok(Self::Test),
            Some("prod") => Ok(Self::Prod),
            Some(other) => Err(SynthError::InvalidEnvironment(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Prod => "prod",
        }
    }

    pub fn settings(self) -> EnvSettings {
        match self {
            Self::Test => EnvSettings { animal: "cat" },
            Self::Prod => EnvSettings { animal: "dog" },
        }
    }
}

impl fmt::Display for DeploymentEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-environment labels injected into the greeting function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvSettings {
    pub animal: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(value: &str) -> Result<Self, SynthError> {
        let value = value.trim();
        let invalid = |reason| SynthError::InvalidEmail {
            value: value.to_string(),
            reason,
        };

        let (local, domain) = value.split_once('@').ok_or_else(|| invalid("missing '@'"))?;
        if domain.contains('@') {
            return Err(invalid("more than one '@'"));
        }
        if local.is_empty() {
            return Err(invalid("empty local part"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(invalid("contains whitespace"));
        }
        let dotted: Vec<&str> = domain.split('.').collect();
        if dotted.len() < 2 || dotted.iter().any(|label| label.is_empty()) {
            return Err(invalid("domain must contain a dot between non-empty labels"));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_environment_defaults_to_test() {
        assert_eq!(DeploymentEnv::from_context(None).ok(), Some(DeploymentEnv::Test));
        assert_eq!(
            DeploymentEnv::from_context(Some("prod")).ok(),
            Some(DeploymentEnv::Prod)
        );
    }

    #[test]
    fn unknown_environment_names_the_allowed_set() {
        for value in ["staging", "PROD", ""] {
            let error = DeploymentEnv::from_context(Some(value)).expect_err("should reject");
            assert_eq!(
                error.to_string(),
                format!("Environment must be one of ['test', 'prod'], got: {value}")
            );
        }
    }

    #[test]
    fn settings_pick_the_environment_animal() {
        assert_eq!(DeploymentEnv::Test.settings().animal, "cat");
        assert_eq!(DeploymentEnv::Prod.settings().animal, "dog");
    }

    #[test]
    fn email_addresses_are_validated() {
        assert_eq!(
            EmailAddress::parse(" admin@example.com ")
                .expect("valid address")
                .as_str(),
            "admin@example.com"
        );
        for bad in [
            "admin",
            "@example.com",
            "a@b@example.com",
            "admin@localhost",
            "admin@example.",
            "ad min@example.com",
        ] {
            assert!(
                matches!(EmailAddress::parse(bad), Err(SynthError::InvalidEmail { .. })),
                "{bad} should be rejected"
            );
        }
    }
}
