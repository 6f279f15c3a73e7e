use serde_json::{json, Value};

use crate::constructs::function::{allow_invoke, FunctionHandle};
use crate::constructs::iam::{grant, PolicyStatement};
use crate::constructs::topic::TopicHandle;
use crate::error::SynthError;
use crate::intrinsics::{get_att, global_arn, join, reference};
use crate::stack::Stack;
use crate::template::{RemovalPolicy, Resource};

pub const AUTO_DELETE_TAG: &str = "aws-cdk:auto-delete-objects";
pub const OBJECT_CREATED: &str = "s3:ObjectCreated:*";

const READ_ACTIONS: &[&str] = &["s3:GetObject*", "s3:GetBucket*", "s3:List*"];
const WRITE_ACTIONS: &[&str] = &[
    "s3:PutObject",
    "s3:PutObjectLegalHold",
    "s3:PutObjectRetention",
    "s3:PutObjectTagging",
    "s3:PutObjectVersionTagging",
    "s3:Abort*",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketProps {
    pub bucket_name: Option<String>,
    pub versioned: bool,
    pub expiration_days: Option<u32>,
    pub removal_policy: RemovalPolicy,
    pub auto_delete_objects: bool,
}

impl Default for BucketProps {
    fn default() -> Self {
        Self {
            bucket_name: None,
            versioned: false,
            expiration_days: None,
            removal_policy: RemovalPolicy::Retain,
            auto_delete_objects: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketHandle {
    pub logical_id: String,
    pub bucket_name: Option<String>,
}

pub enum NotificationTarget<'a> {
    Topic(&'a TopicHandle),
    Function(&'a FunctionHandle),
}

impl BucketHandle {
    pub fn name_ref(&self) -> Value {
        reference(&self.logical_id)
    }

    /// Named buckets resolve to a literal ARN so policies and permissions
    /// that mention them never create a dependency back onto the bucket.
    pub fn arn(&self) -> Value {
        match &self.bucket_name {
            Some(name) => global_arn("s3", name),
            None => get_att(&self.logical_id, "Arn"),
        }
    }

    pub fn objects_arn(&self) -> Value {
        join("", [self.arn(), json!("/*")])
    }

    pub fn grant_read(&self, stack: &mut Stack, grantee: &FunctionHandle) -> Result<(), SynthError> {
        grant(
            stack,
            grantee,
            PolicyStatement::allow(READ_ACTIONS, vec![self.arn(), self.objects_arn()]),
        )
    }

    pub fn grant_write(
        &self,
        stack: &mut Stack,
        grantee: &FunctionHandle,
    ) -> Result<(), SynthError> {
        grant(
            stack,
            grantee,
            PolicyStatement::allow(WRITE_ACTIONS, vec![self.arn(), self.objects_arn()]),
        )
    }

    /// Routes object-created events whose key ends in `suffix` to `target`,
    /// declaring the permission the target needs to accept them.
    pub fn notify_on_object_created(
        &self,
        stack: &mut Stack,
        target: NotificationTarget<'_>,
        suffix: &str,
    ) -> Result<(), SynthError> {
        let Some(bucket_name) = &self.bucket_name else {
            return Err(SynthError::UnnamedNotificationSource {
                logical_id: self.logical_id.clone(),
            });
        };
        let source_arn = global_arn("s3", bucket_name);

        let (section, destination_key, destination, prerequisite) = match target {
            NotificationTarget::Topic(topic) => {
                let policy_id = topic.allow_service_publish(stack, "s3.amazonaws.com", source_arn)?;
                ("TopicConfigurations", "Topic", topic.arn(), policy_id)
            }
            NotificationTarget::Function(function) => {
                let permission_id = format!("{}{}Permission", self.logical_id, function.logical_id);
                allow_invoke(stack, &permission_id, function, "s3.amazonaws.com", source_arn)?;
                ("LambdaConfigurations", "Function", function.arn(), permission_id)
            }
        };

        let mut configuration = json!({
            "Event": OBJECT_CREATED,
            "Filter": {"S3Key": {"Rules": [{"Name": "suffix", "Value": suffix}]}},
        });
        configuration[destination_key] = destination;

        let bucket = stack.resource_mut(&self.logical_id)?;
        match &mut bucket.property_mut("NotificationConfiguration")[section] {
            Value::Array(configurations) => configurations.push(configuration),
            other => *other = Value::Array(vec![configuration]),
        }
        bucket.add_dependency(prerequisite);
        Ok(())
    }
}

pub fn declare_bucket(
    stack: &mut Stack,
    logical_id: &str,
    props: BucketProps,
) -> Result<BucketHandle, SynthError> {
    let mut properties = json!({});
    if let Some(bucket_name) = &props.bucket_name {
        properties["BucketName"] = json!(bucket_name);
    }
    if props.versioned {
        properties["VersioningConfiguration"] = json!({"Status": "Enabled"});
    }
    if let Some(days) = props.expiration_days {
        properties["LifecycleConfiguration"] = json!({
            "Rules": [{"Id": "ExpireObjects", "Status": "Enabled", "ExpirationInDays": days}]
        });
    }
    if props.auto_delete_objects {
        properties["Tags"] = json!([{"Key": AUTO_DELETE_TAG, "Value": "true"}]);
    }

    stack.add_resource(
        logical_id,
        Resource::new("AWS::S3::Bucket", properties).with_removal_policy(props.removal_policy),
    )?;
    Ok(BucketHandle {
        logical_id: logical_id.to_string(),
        bucket_name: props.bucket_name,
    })
}
