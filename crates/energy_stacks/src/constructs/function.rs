use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::constructs::iam::service_role;
use crate::error::SynthError;
use crate::intrinsics::{get_att, reference, sub, ACCOUNT_ID};
use crate::stack::Stack;
use crate::template::Resource;

pub const RUNTIME: &str = "provided.al2023";
pub const HANDLER: &str = "bootstrap";
/// Bucket the packaged `<asset>.zip` archives are uploaded to before deploy.
pub const ASSET_BUCKET: &str = "energy-coach-assets-${AWS::AccountId}-${AWS::Region}";

const DEFAULT_MEMORY_MB: u32 = 128;
const DEFAULT_TIMEOUT_SECONDS: u32 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionProps {
    pub function_name: String,
    pub description: Option<String>,
    /// Name of the packaged binary; the archive key is `<asset>.zip`.
    pub asset: String,
    pub environment: BTreeMap<String, Value>,
    pub memory_size_mb: u32,
    pub timeout_seconds: u32,
}

impl FunctionProps {
    pub fn new(function_name: impl Into<String>, asset: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            description: None,
            asset: asset.into(),
            environment: BTreeMap::new(),
            memory_size_mb: DEFAULT_MEMORY_MB,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.environment.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionHandle {
    pub logical_id: String,
    pub role_logical_id: String,
}

impl FunctionHandle {
    pub fn arn(&self) -> Value {
        get_att(&self.logical_id, "Arn")
    }

    pub fn name_ref(&self) -> Value {
        reference(&self.logical_id)
    }
}

/// Declares the function plus its `<id>ServiceRole` execution role.
pub fn declare_function(
    stack: &mut Stack,
    logical_id: &str,
    props: FunctionProps,
) -> Result<FunctionHandle, SynthError> {
    let role_logical_id = format!("{logical_id}ServiceRole");
    stack.add_resource(role_logical_id.clone(), service_role("lambda.amazonaws.com"))?;

    let mut properties = json!({
        "FunctionName": props.function_name,
        "Runtime": RUNTIME,
        "Handler": HANDLER,
        "Code": {
            "S3Bucket": sub(ASSET_BUCKET),
            "S3Key": format!("{}.zip", props.asset),
        },
        "Role": get_att(&role_logical_id, "Arn"),
        "MemorySize": props.memory_size_mb,
        "Timeout": props.timeout_seconds,
    });
    if let Some(description) = props.description {
        properties["Description"] = json!(description);
    }
    if !props.environment.is_empty() {
        properties["Environment"] = json!({ "Variables": props.environment });
    }

    stack.add_resource(
        logical_id,
        Resource::new("AWS::Lambda::Function", properties).depends_on(role_logical_id.clone()),
    )?;

    Ok(FunctionHandle {
        logical_id: logical_id.to_string(),
        role_logical_id,
    })
}

/// Lets `principal` invoke the function, scoped to `source_arn` in this account.
pub fn allow_invoke(
    stack: &mut Stack,
    permission_id: &str,
    function: &FunctionHandle,
    principal: &str,
    source_arn: Value,
) -> Result<(), SynthError> {
    stack.add_resource(
        permission_id,
        Resource::new(
            "AWS::Lambda::Permission",
            json!({
                "Action": "lambda:InvokeFunction",
                "FunctionName": function.arn(),
                "Principal": principal,
                "SourceAccount": reference(ACCOUNT_ID),
                "SourceArn": source_arn,
            }),
        ),
    )
}
