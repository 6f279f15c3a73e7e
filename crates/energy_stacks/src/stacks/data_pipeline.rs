use energy_core::env_vars;

use crate::config::EmailAddress;
use crate::constructs::bucket::{declare_bucket, BucketProps, NotificationTarget};
use crate::constructs::function::{declare_function, FunctionProps};
use crate::constructs::table::TableRef;
use crate::constructs::topic::{declare_topic, TopicProps};
use crate::error::SynthError;
use crate::stack::Stack;
use crate::stacks::APP_DESCRIPTION;
use crate::template::{Output, RemovalPolicy};

pub const STACK_NAME: &str = "DataPipelineStack";

pub const RAW_BUCKET_NAME: &str = "home-energy-coach-raw-data-upload";
pub const JSON_BUCKET_NAME: &str = "home-energy-coach-json-transformed";
pub const PROCESSED_BUCKET_NAME: &str = "home-energy-coach-processed-data";
pub const RAW_UPLOAD_TOPIC_NAME: &str = "home-energy-coach-raw-upload";
pub const SUMMARY_TOPIC_NAME: &str = "home-energy-coach-calculator-summary";

pub const TRANSFORM_FUNCTION_NAME: &str = "transform-to-json";
pub const TRANSFORM_ASSET: &str = "transform_to_json";
pub const CALCULATE_FUNCTION_NAME: &str = "calculate-and-notify";
pub const CALCULATE_ASSET: &str = "calculate_and_notify";

const RAW_EXPIRATION_DAYS: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct DataPipelineProps {
    pub admin_email: EmailAddress,
    pub calculated_energy_table: TableRef,
}

/// Raw CSV landing bucket → upload topic → transform function → JSON bucket →
/// calculate function → summary table and summary topic.
pub fn data_pipeline_stack(props: &DataPipelineProps) -> Result<Stack, SynthError> {
    let mut stack = Stack::new(STACK_NAME).with_description(APP_DESCRIPTION);

    let raw_bucket = declare_bucket(
        &mut stack,
        "RawDataUploadBucket",
        BucketProps {
            bucket_name: Some(RAW_BUCKET_NAME.to_string()),
            expiration_days: Some(RAW_EXPIRATION_DAYS),
            removal_policy: RemovalPolicy::Destroy,
            auto_delete_objects: true,
            ..Default::default()
        },
    )?;
    let json_bucket = declare_bucket(
        &mut stack,
        "JsonTransformedBucket",
        BucketProps {
            bucket_name: Some(JSON_BUCKET_NAME.to_string()),
            versioned: true,
            removal_policy: RemovalPolicy::Destroy,
            ..Default::default()
        },
    )?;
    declare_bucket(
        &mut stack,
        "ProcessedDataBucket",
        BucketProps {
            bucket_name: Some(PROCESSED_BUCKET_NAME.to_string()),
            removal_policy: RemovalPolicy::Destroy,
            auto_delete_objects: true,
            ..Default::default()
        },
    )?;

    let raw_upload_topic = declare_topic(
        &mut stack,
        "RawUploadTopic",
        TopicProps {
            topic_name: RAW_UPLOAD_TOPIC_NAME.to_string(),
            display_name: Some("Home Energy Coach SNS Topic".to_string()),
        },
    )?;
    let summary_topic = declare_topic(
        &mut stack,
        "CalculatorSummaryTopic",
        TopicProps {
            topic_name: SUMMARY_TOPIC_NAME.to_string(),
            display_name: Some("Home Energy Coach SNS Topic for calculator summary".to_string()),
        },
    )?;
    raw_upload_topic.subscribe_email(&mut stack, &props.admin_email)?;
    summary_topic.subscribe_email(&mut stack, &props.admin_email)?;

    let transform = declare_function(
        &mut stack,
        "TransformToJsonFunction",
        FunctionProps::new(TRANSFORM_FUNCTION_NAME, TRANSFORM_ASSET)
            .with_description("Lambda function transforms CSV to JSON and saves to S3 bucket")
            .with_env(env_vars::TRANSFORMED_BUCKET, json_bucket.name_ref()),
    )?;
    let calculate = declare_function(
        &mut stack,
        "CalculateAndNotifyFunction",
        FunctionProps::new(CALCULATE_FUNCTION_NAME, CALCULATE_ASSET)
            .with_description(
                "Lambda function calculates total energy usage and sends a summary notification via SNS",
            )
            .with_env(env_vars::SUMMARY_TOPIC, summary_topic.arn())
            .with_env(
                env_vars::TABLE_NAME,
                props.calculated_energy_table.name.clone(),
            ),
    )?;

    raw_bucket.grant_read(&mut stack, &transform)?;
    json_bucket.grant_write(&mut stack, &transform)?;
    json_bucket.grant_read(&mut stack, &calculate)?;
    props
        .calculated_energy_table
        .grant_write_data(&mut stack, &calculate)?;
    summary_topic.grant_publish(&mut stack, &calculate)?;

    raw_bucket.notify_on_object_created(
        &mut stack,
        NotificationTarget::Topic(&raw_upload_topic),
        ".csv",
    )?;
    raw_upload_topic.subscribe_function(&mut stack, &transform)?;
    json_bucket.notify_on_object_created(
        &mut stack,
        NotificationTarget::Function(&calculate),
        ".json",
    )?;

    stack.add_output(
        "RawDataLandingBucketName",
        Output::new(raw_bucket.name_ref()).with_description("Raw CSV landing bucket"),
    )?;
    stack.add_output(
        "JsonTransformedBucketName",
        Output::new(json_bucket.name_ref()).with_description("Transformed JSON bucket"),
    )?;
    stack.add_output(
        "SnsTopicRawUploadName",
        Output::new(raw_upload_topic.name()).with_description("Raw upload notification topic"),
    )?;
    stack.add_output(
        "SnsTopicCalculatorSummaryName",
        Output::new(summary_topic.name()).with_description("Calculator summary topic"),
    )?;

    Ok(stack)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::stacks::shared_resources::calculated_energy_table_ref;

    fn props() -> DataPipelineProps {
        DataPipelineProps {
            admin_email: EmailAddress::parse("admin@example.com").expect("email"),
            calculated_energy_table: calculated_energy_table_ref(),
        }
    }

    #[test]
    fn buckets_follow_their_retention_rules() {
        let stack = data_pipeline_stack(&props()).expect("synth");

        let raw = stack.resource("RawDataUploadBucket").expect("raw bucket");
        assert_eq!(
            raw.properties["LifecycleConfiguration"]["Rules"][0]["ExpirationInDays"],
            1
        );
        assert_eq!(raw.deletion_policy, Some(RemovalPolicy::Destroy));

        let json_bucket = stack.resource("JsonTransformedBucket").expect("json bucket");
        assert_eq!(
            json_bucket.properties["VersioningConfiguration"],
            json!({"Status": "Enabled"})
        );
        assert_eq!(json_bucket.deletion_policy, Some(RemovalPolicy::Destroy));
        assert_eq!(json_bucket.update_replace_policy, Some(RemovalPolicy::Destroy));
    }

    #[test]
    fn functions_receive_their_configuration() {
        let stack = data_pipeline_stack(&props()).expect("synth");

        let transform = stack.resource("TransformToJsonFunction").expect("transform");
        assert_eq!(
            transform.properties["Environment"]["Variables"],
            json!({"TRANSFORMED_BUCKET": {"Ref": "JsonTransformedBucket"}})
        );

        let calculate = stack
            .resource("CalculateAndNotifyFunction")
            .expect("calculate");
        assert_eq!(
            calculate.properties["Environment"]["Variables"],
            json!({
                "CALCULATED_ENERGY_TABLE_NAME": {
                    "Fn::ImportValue": "SharedResourcesStack:CalculatedEnergyTableName"
                },
                "SNS_TOPIC_CALCULATOR_SUMMARY": {"Ref": "CalculatorSummaryTopic"}
            })
        );
    }

    #[test]
    fn calculate_policy_covers_reads_writes_and_publish() {
        let stack = data_pipeline_stack(&props()).expect("synth");
        let policy = stack
            .resource("CalculateAndNotifyFunctionServiceRoleDefaultPolicy")
            .expect("policy");

        let statements = policy.properties["PolicyDocument"]["Statement"]
            .as_array()
            .expect("statements");
        let actions: Vec<&str> = statements
            .iter()
            .filter_map(|statement| statement["Action"].as_array())
            .flatten()
            .filter_map(|action| action.as_str())
            .collect();
        assert!(actions.contains(&"s3:GetObject*"));
        assert!(actions.contains(&"dynamodb:PutItem"));
        assert!(actions.contains(&"sns:Publish"));
        assert!(!actions.contains(&"s3:PutObject"));
    }

    #[test]
    fn uploads_flow_through_topic_to_transform_and_json_to_calculate() {
        let stack = data_pipeline_stack(&props()).expect("synth");

        let raw = stack.resource("RawDataUploadBucket").expect("raw bucket");
        assert_eq!(
            raw.properties["NotificationConfiguration"]["TopicConfigurations"][0]["Topic"],
            json!({"Ref": "RawUploadTopic"})
        );
        assert!(stack.contains("TransformToJsonFunctionRawUploadTopicSubscription"));

        let json_bucket = stack.resource("JsonTransformedBucket").expect("json bucket");
        let lambda = &json_bucket.properties["NotificationConfiguration"]["LambdaConfigurations"][0];
        assert_eq!(
            lambda["Function"],
            json!({"Fn::GetAtt": ["CalculateAndNotifyFunction", "Arn"]})
        );
        assert_eq!(lambda["Filter"]["S3Key"]["Rules"][0]["Value"], ".json");
    }

    #[test]
    fn topics_and_stack_carry_the_published_labels() {
        let stack = data_pipeline_stack(&props()).expect("synth");

        assert_eq!(stack.description(), Some(APP_DESCRIPTION));
        assert_eq!(
            stack.resource("RawUploadTopic").expect("raw topic").properties["DisplayName"],
            "Home Energy Coach SNS Topic"
        );
        assert_eq!(
            stack
                .resource("CalculatorSummaryTopic")
                .expect("summary topic")
                .properties["DisplayName"],
            "Home Energy Coach SNS Topic for calculator summary"
        );
    }

    #[test]
    fn outputs_name_the_pipeline_resources() {
        let stack = data_pipeline_stack(&props()).expect("synth");
        let names: Vec<&str> = stack.outputs().keys().map(String::as_str).collect();

        assert_eq!(
            names,
            vec![
                "JsonTransformedBucketName",
                "RawDataLandingBucketName",
                "SnsTopicCalculatorSummaryName",
                "SnsTopicRawUploadName",
            ]
        );
    }
}
