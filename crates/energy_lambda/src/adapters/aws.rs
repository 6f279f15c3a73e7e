use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_s3::primitives::ByteStream;
use energy_core::item::SummaryItem;

use crate::adapters::notifier::SummaryNotifier;
use crate::adapters::object_store::ObjectStore;
use crate::adapters::summary_store::SummaryStore;

/// Runs an SDK future to completion from synchronous handler code.
///
/// Requires the multi-thread tokio runtime the Lambda binaries start.
fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

#[derive(Clone)]
pub struct S3ObjectStore {
    s3_client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(s3_client: aws_sdk_s3::Client) -> Self {
        Self { s3_client }
    }
}

impl ObjectStore for S3ObjectStore {
    fn read_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, String> {
        let client = self.s3_client.clone();
        let bucket = bucket.to_string();
        let object_key = key.to_string();

        block_on(async move {
            let output = client
                .get_object()
                .bucket(bucket)
                .key(object_key)
                .send()
                .await
                .map_err(|error| format!("failed to read object from s3: {error}"))?;
            output
                .body
                .collect()
                .await
                .map(|data| data.into_bytes().to_vec())
                .map_err(|error| format!("failed to stream object body from s3: {error}"))
        })
    }

    fn write_object(
        &self,
        bucket: &str,
        key: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<(), String> {
        let client = self.s3_client.clone();
        let bucket = bucket.to_string();
        let object_key = key.to_string();
        let body_bytes = body.to_vec();
        let content_type = content_type.to_string();

        block_on(async move {
            client
                .put_object()
                .bucket(bucket)
                .key(object_key)
                .content_type(content_type)
                .body(ByteStream::from(body_bytes))
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to write object to s3: {error}"))
        })
    }
}

#[derive(Clone)]
pub struct DynamoSummaryStore {
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl DynamoSummaryStore {
    pub fn new(dynamodb_client: aws_sdk_dynamodb::Client) -> Self {
        Self { dynamodb_client }
    }
}

impl SummaryStore for DynamoSummaryStore {
    fn put_summary(&self, table_name: &str, item: &SummaryItem) -> Result<(), String> {
        let mut request = self.dynamodb_client.put_item().table_name(table_name);
        for (name, value) in item.attributes() {
            request = request.item(name, AttributeValue::S(value.to_string()));
        }

        block_on(async move {
            request
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to put summary item to dynamodb: {error}"))
        })
    }
}

#[derive(Clone)]
pub struct SnsSummaryNotifier {
    sns_client: aws_sdk_sns::Client,
}

impl SnsSummaryNotifier {
    pub fn new(sns_client: aws_sdk_sns::Client) -> Self {
        Self { sns_client }
    }
}

impl SummaryNotifier for SnsSummaryNotifier {
    fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> Result<(), String> {
        let request = self
            .sns_client
            .publish()
            .topic_arn(topic_arn)
            .subject(subject)
            .message(message);

        block_on(async move {
            request
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to publish summary to sns: {error}"))
        })
    }
}
