//! AWS S3 client wrapper implementing the provisioning backend.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, Event, NotificationConfiguration,
    ObjectOwnership, OwnershipControls, OwnershipControlsRule, QueueConfiguration, Tag, Tagging,
};
use aws_sdk_s3::Client as S3Client;
use log::{debug, info};
use std::collections::BTreeMap;

use crate::aws::backend::ProvisioningBackend;
use crate::aws::{AwsError, AwsResult};
use crate::types::{
    BucketDeclaration, BucketOutcome, NotificationDeclaration, ObjectUpload,
    OwnershipDeclaration, PolicyDocument,
};

/// Region in which `CreateBucket` must not carry a location constraint.
const DEFAULT_REGION: &str = "us-east-1";

pub struct AwsS3Client {
    client: S3Client,
}

impl AwsS3Client {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: S3Client::new(config),
        }
    }

    async fn create_bucket(&self, bucket: &str) -> AwsResult<()> {
        let mut request = self.client.create_bucket().bucket(bucket);

        if let Some(region) = self.client.config().region() {
            let region = region.as_ref();
            if region != DEFAULT_REGION {
                request = request.create_bucket_configuration(
                    CreateBucketConfiguration::builder()
                        .location_constraint(BucketLocationConstraint::from(region))
                        .build(),
                );
            }
        }

        request.send().await.map_err(|e| {
            AwsError::S3Error(format!(
                "Failed to create bucket '{bucket}': {}",
                DisplayErrorContext(&e)
            ))
        })?;
        info!("Created bucket {}", bucket);
        Ok(())
    }

    async fn put_bucket_tags(
        &self,
        bucket: &str,
        tags: &BTreeMap<String, String>,
    ) -> AwsResult<()> {
        let tag_set = tags
            .iter()
            .map(|(key, value)| {
                Tag::builder()
                    .key(key)
                    .value(value)
                    .build()
                    .map_err(|e| AwsError::S3Error(format!("Invalid tag '{key}': {e}")))
            })
            .collect::<AwsResult<Vec<_>>>()?;

        let tagging = Tagging::builder()
            .set_tag_set(Some(tag_set))
            .build()
            .map_err(|e| AwsError::S3Error(format!("Invalid tag set: {e}")))?;

        self.client
            .put_bucket_tagging()
            .bucket(bucket)
            .tagging(tagging)
            .send()
            .await
            .map_err(|e| {
                AwsError::S3Error(format!(
                    "Failed to tag bucket '{bucket}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}

#[async_trait]
impl ProvisioningBackend for AwsS3Client {
    async fn ensure_bucket(&self, bucket: &BucketDeclaration) -> AwsResult<BucketOutcome> {
        let outcome = match self.client.head_bucket().bucket(&bucket.name).send().await {
            Ok(_) => {
                debug!("Bucket {} already exists", bucket.name);
                BucketOutcome::Existing
            }
            Err(e) if e.as_service_error().is_some_and(HeadBucketError::is_not_found) => {
                self.create_bucket(&bucket.name).await?;
                BucketOutcome::Created
            }
            Err(e) => {
                return Err(AwsError::S3Error(format!(
                    "Failed to check bucket '{}': {}",
                    bucket.name,
                    DisplayErrorContext(&e)
                )))
            }
        };

        if !bucket.tags.is_empty() {
            self.put_bucket_tags(&bucket.name, &bucket.tags).await?;
        }

        Ok(outcome)
    }

    async fn put_bucket_policy(&self, bucket: &str, policy: &PolicyDocument) -> AwsResult<()> {
        let policy_json = serde_json::to_string(policy)
            .map_err(|e| AwsError::PolicyError(format!("Failed to serialize policy: {e}")))?;

        self.client
            .put_bucket_policy()
            .bucket(bucket)
            .policy(policy_json)
            .send()
            .await
            .map_err(|e| {
                AwsError::S3Error(format!(
                    "Failed to put bucket policy on '{bucket}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }

    async fn put_bucket_notification(
        &self,
        bucket: &str,
        notification: &NotificationDeclaration,
    ) -> AwsResult<()> {
        let queue = QueueConfiguration::builder()
            .queue_arn(&notification.queue_arn)
            .set_events(Some(
                notification
                    .events
                    .iter()
                    .map(|event| Event::from(event.as_str()))
                    .collect(),
            ))
            .build()
            .map_err(|e| AwsError::S3Error(format!("Invalid queue configuration: {e}")))?;

        self.client
            .put_bucket_notification_configuration()
            .bucket(bucket)
            .notification_configuration(
                NotificationConfiguration::builder()
                    .queue_configurations(queue)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| {
                AwsError::S3Error(format!(
                    "Failed to configure notifications on '{bucket}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }

    async fn put_ownership_controls(
        &self,
        bucket: &str,
        ownership: &OwnershipDeclaration,
    ) -> AwsResult<()> {
        let rule = OwnershipControlsRule::builder()
            .object_ownership(ObjectOwnership::from(ownership.object_ownership.as_str()))
            .build()
            .map_err(|e| AwsError::S3Error(format!("Invalid ownership rule: {e}")))?;
        let controls = OwnershipControls::builder()
            .rules(rule)
            .build()
            .map_err(|e| AwsError::S3Error(format!("Invalid ownership controls: {e}")))?;

        self.client
            .put_bucket_ownership_controls()
            .bucket(bucket)
            .ownership_controls(controls)
            .send()
            .await
            .map_err(|e| {
                AwsError::S3Error(format!(
                    "Failed to put ownership controls on '{bucket}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }

    async fn upload_object(&self, upload: &ObjectUpload) -> AwsResult<()> {
        let body = ByteStream::from_path(&upload.source_path)
            .await
            .map_err(|e| {
                AwsError::S3Error(format!(
                    "Failed to read '{}': {e}",
                    upload.source_path.display()
                ))
            })?;

        self.client
            .put_object()
            .bucket(&upload.bucket)
            .key(&upload.key)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                AwsError::S3Error(format!(
                    "Failed to upload '{}' to s3://{}/{}: {}",
                    upload.source_path.display(),
                    upload.bucket,
                    upload.key,
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}
