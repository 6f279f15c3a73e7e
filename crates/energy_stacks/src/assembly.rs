//! Writes synthesized stacks to disk as a cloud assembly directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::SynthError;
use crate::stack::Stack;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const MANIFEST_VERSION: &str = "1";
pub const STACK_ARTIFACT_TYPE: &str = "aws:cloudformation:stack";
pub const ACCOUNT_VAR: &str = "CDK_DEFAULT_ACCOUNT";
pub const REGION_VAR: &str = "CDK_DEFAULT_REGION";

const UNKNOWN_ACCOUNT: &str = "unknown-account";
const UNKNOWN_REGION: &str = "unknown-region";

/// Account and region the assembly is deployed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsTarget {
    pub account: String,
    pub region: String,
}

impl AwsTarget {
    pub fn new(account: Option<String>, region: Option<String>) -> Self {
        Self {
            account: account
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_ACCOUNT.to_string()),
            region: region
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_REGION.to_string()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var(ACCOUNT_VAR).ok(), std::env::var(REGION_VAR).ok())
    }

    pub fn environment(&self) -> String {
        format!("aws://{}/{}", self.account, self.region)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssemblyManifest {
    pub version: String,
    pub artifacts: BTreeMap<String, StackArtifact>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StackArtifact {
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub environment: String,
    #[serde(rename = "templateFile")]
    pub template_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "templateSha256")]
    pub template_sha256: String,
}

pub fn template_file_name(stack: &Stack) -> String {
    format!("{}.template.json", stack.name())
}

/// Pretty JSON with a trailing newline.
pub fn render_template(stack: &Stack) -> Result<String, SynthError> {
    let mut rendered = serde_json::to_string_pretty(&stack.to_template())?;
    rendered.push('\n');
    Ok(rendered)
}

pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Writes `<StackName>.template.json` for every stack plus `manifest.json`.
/// The output depends only on the inputs.
pub fn write_assembly(
    out_dir: &Path,
    stacks: &[Stack],
    target: &AwsTarget,
) -> Result<AssemblyManifest, SynthError> {
    fs::create_dir_all(out_dir).map_err(|source| SynthError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut artifacts = BTreeMap::new();
    for stack in stacks {
        let file_name = template_file_name(stack);
        let rendered = render_template(stack)?;
        write_file(&out_dir.join(&file_name), rendered.as_bytes())?;

        artifacts.insert(
            stack.name().to_string(),
            StackArtifact {
                artifact_type: STACK_ARTIFACT_TYPE.to_string(),
                environment: target.environment(),
                template_file: file_name,
                description: stack.description().map(str::to_string),
                template_sha256: fingerprint(rendered.as_bytes()),
            },
        );
    }

    let manifest = AssemblyManifest {
        version: MANIFEST_VERSION.to_string(),
        artifacts,
    };
    let mut rendered = serde_json::to_string_pretty(&manifest)?;
    rendered.push('\n');
    write_file(&out_dir.join(MANIFEST_FILE), rendered.as_bytes())?;

    Ok(manifest)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), SynthError> {
    fs::write(path, bytes).map_err(|source| SynthError::Io {
        path: path.to_path_buf(),
        source,
    })
}
