use serde::Serialize;
use serde_json::{json, Value};

use crate::constructs::function::FunctionHandle;
use crate::error::SynthError;
use crate::intrinsics::{join, reference, PARTITION};
use crate::stack::Stack;
use crate::template::Resource;

pub const POLICY_VERSION: &str = "2012-10-17";
pub const LAMBDA_BASIC_EXECUTION_POLICY: &str = "service-role/AWSLambdaBasicExecutionRole";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PolicyStatement {
    #[serde(rename = "Effect")]
    effect: &'static str,
    #[serde(rename = "Action")]
    actions: Vec<&'static str>,
    #[serde(rename = "Resource")]
    resources: Vec<Value>,
}

impl PolicyStatement {
    pub fn allow(actions: &[&'static str], resources: Vec<Value>) -> Self {
        Self {
            effect: "Allow",
            actions: actions.to_vec(),
            resources,
        }
    }
}

/// Execution role assumable by the given service principal, with basic
/// CloudWatch Logs access attached.
pub fn service_role(principal: &str) -> Resource {
    Resource::new(
        "AWS::IAM::Role",
        json!({
            "AssumeRolePolicyDocument": {
                "Version": POLICY_VERSION,
                "Statement": [{
                    "Effect": "Allow",
                    "Principal": {"Service": principal},
                    "Action": "sts:AssumeRole"
                }]
            },
            "ManagedPolicyArns": [
                join("", [
                    json!("arn:"),
                    reference(PARTITION),
                    json!(format!(":iam::aws:policy/{LAMBDA_BASIC_EXECUTION_POLICY}")),
                ])
            ]
        }),
    )
}

pub fn default_policy_id(grantee: &FunctionHandle) -> String {
    format!("{}DefaultPolicy", grantee.role_logical_id)
}

/// Appends `statement` to the grantee role's inline default policy,
/// creating the policy on first use. The function waits on the policy so
/// it never starts without its permissions.
pub fn grant(
    stack: &mut Stack,
    grantee: &FunctionHandle,
    statement: PolicyStatement,
) -> Result<(), SynthError> {
    let policy_id = default_policy_id(grantee);
    if !stack.contains(&policy_id) {
        stack.add_resource(
            policy_id.clone(),
            Resource::new(
                "AWS::IAM::Policy",
                json!({
                    "PolicyName": policy_id,
                    "Roles": [reference(&grantee.role_logical_id)],
                    "PolicyDocument": {"Version": POLICY_VERSION, "Statement": []}
                }),
            ),
        )?;
        stack
            .resource_mut(&grantee.logical_id)?
            .add_dependency(policy_id.clone());
    }

    let statement = serde_json::to_value(statement)?;
    let policy = stack.resource_mut(&policy_id)?;
    let statements = &mut policy.property_mut("PolicyDocument")["Statement"];
    match statements {
        Value::Array(items) => items.push(statement),
        other => *other = Value::Array(vec![statement]),
    }
    Ok(())
}
