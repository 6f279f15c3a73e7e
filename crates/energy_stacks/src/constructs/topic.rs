use serde_json::{json, Value};

use crate::config::EmailAddress;
use crate::constructs::function::{allow_invoke, FunctionHandle};
use crate::constructs::iam::{grant, PolicyStatement, POLICY_VERSION};
use crate::error::SynthError;
use crate::intrinsics::{get_att, reference, ACCOUNT_ID};
use crate::stack::Stack;
use crate::template::Resource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicProps {
    pub topic_name: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicHandle {
    pub logical_id: String,
}

impl TopicHandle {
    /// `Ref` of a topic yields its ARN.
    pub fn arn(&self) -> Value {
        reference(&self.logical_id)
    }

    pub fn name(&self) -> Value {
        get_att(&self.logical_id, "TopicName")
    }

    pub fn policy_id(&self) -> String {
        format!("{}Policy", self.logical_id)
    }

    pub fn subscribe_email(
        &self,
        stack: &mut Stack,
        email: &EmailAddress,
    ) -> Result<(), SynthError> {
        stack.add_resource(
            format!("{}EmailSubscription", self.logical_id),
            Resource::new(
                "AWS::SNS::Subscription",
                json!({
                    "Protocol": "email",
                    "Endpoint": email.as_str(),
                    "TopicArn": self.arn(),
                }),
            ),
        )
    }

    /// Delivers every message on the topic to `function`.
    pub fn subscribe_function(
        &self,
        stack: &mut Stack,
        function: &FunctionHandle,
    ) -> Result<(), SynthError> {
        let prefix = format!("{}{}", function.logical_id, self.logical_id);
        allow_invoke(
            stack,
            &format!("{prefix}Permission"),
            function,
            "sns.amazonaws.com",
            self.arn(),
        )?;
        stack.add_resource(
            format!("{prefix}Subscription"),
            Resource::new(
                "AWS::SNS::Subscription",
                json!({
                    "Protocol": "lambda",
                    "Endpoint": function.arn(),
                    "TopicArn": self.arn(),
                }),
            ),
        )
    }

    pub fn grant_publish(
        &self,
        stack: &mut Stack,
        grantee: &FunctionHandle,
    ) -> Result<(), SynthError> {
        grant(
            stack,
            grantee,
            PolicyStatement::allow(&["sns:Publish"], vec![self.arn()]),
        )
    }

    /// Lets an AWS service principal publish, scoped to `source_arn`.
    /// Returns the topic policy's logical id so callers can depend on it.
    pub fn allow_service_publish(
        &self,
        stack: &mut Stack,
        service: &str,
        source_arn: Value,
    ) -> Result<String, SynthError> {
        let statement = json!({
            "Effect": "Allow",
            "Principal": {"Service": service},
            "Action": "sns:Publish",
            "Resource": self.arn(),
            "Condition": {
                "ArnLike": {"aws:SourceArn": source_arn},
                "StringEquals": {"aws:SourceAccount": reference(ACCOUNT_ID)},
            },
        });

        let policy_id = self.policy_id();
        if !stack.contains(&policy_id) {
            stack.add_resource(
                policy_id.clone(),
                Resource::new(
                    "AWS::SNS::TopicPolicy",
                    json!({
                        "Topics": [self.arn()],
                        "PolicyDocument": {"Version": POLICY_VERSION, "Statement": []},
                    }),
                ),
            )?;
        }
        let policy = stack.resource_mut(&policy_id)?;
        match &mut policy.property_mut("PolicyDocument")["Statement"] {
            Value::Array(statements) => statements.push(statement),
            other => *other = Value::Array(vec![statement]),
        }
        Ok(policy_id)
    }
}

pub fn declare_topic(
    stack: &mut Stack,
    logical_id: &str,
    props: TopicProps,
) -> Result<TopicHandle, SynthError> {
    let mut properties = json!({ "TopicName": props.topic_name });
    if let Some(display_name) = props.display_name {
        properties["DisplayName"] = json!(display_name);
    }
    stack.add_resource(logical_id, Resource::new("AWS::SNS::Topic", properties))?;
    Ok(TopicHandle {
        logical_id: logical_id.to_string(),
    })
}
