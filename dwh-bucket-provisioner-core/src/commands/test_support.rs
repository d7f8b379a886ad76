//! In-memory collaborators for service tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::aws::backend::ProvisioningBackend;
use crate::aws::stack_outputs::StackOutputLookup;
use crate::aws::{AwsError, AwsResult};
use crate::commands::BucketProvisionerService;
use crate::types::{
    BucketDeclaration, BucketOutcome, NotificationDeclaration, ObjectUpload,
    OwnershipDeclaration, PolicyDocument,
};

/// Records every call as a single line and optionally fails one of them.
#[derive(Clone, Default)]
pub(crate) struct RecordingBackend {
    calls: Arc<Mutex<Vec<String>>>,
    fail_on: Option<String>,
}

impl RecordingBackend {
    pub(crate) fn failing_on(call: &str) -> Self {
        Self {
            calls: Arc::default(),
            fail_on: Some(call.to_string()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> AwsResult<()> {
        self.calls.lock().unwrap().push(call.clone());
        if self.fail_on.as_deref() == Some(call.as_str()) {
            return Err(AwsError::S3Error(format!("injected failure: {call}")));
        }
        Ok(())
    }
}

#[async_trait]
impl ProvisioningBackend for RecordingBackend {
    async fn ensure_bucket(&self, bucket: &BucketDeclaration) -> AwsResult<BucketOutcome> {
        self.record(format!("ensure_bucket {}", bucket.name))?;
        Ok(BucketOutcome::Created)
    }

    async fn put_bucket_policy(&self, bucket: &str, policy: &PolicyDocument) -> AwsResult<()> {
        self.record(format!(
            "put_bucket_policy {} {}",
            bucket,
            policy.statements.len()
        ))
    }

    async fn put_bucket_notification(
        &self,
        bucket: &str,
        notification: &NotificationDeclaration,
    ) -> AwsResult<()> {
        self.record(format!(
            "put_bucket_notification {} {}",
            bucket, notification.queue_arn
        ))
    }

    async fn put_ownership_controls(
        &self,
        bucket: &str,
        ownership: &OwnershipDeclaration,
    ) -> AwsResult<()> {
        self.record(format!(
            "put_ownership_controls {} {}",
            bucket, ownership.object_ownership
        ))
    }

    async fn upload_object(&self, upload: &ObjectUpload) -> AwsResult<()> {
        self.record(format!("upload_object {}", upload.key))
    }
}

pub(crate) fn service_with(
    stack_outputs: impl StackOutputLookup + 'static,
    backend: RecordingBackend,
) -> BucketProvisionerService {
    BucketProvisionerService::new(Arc::new(stack_outputs), Arc::new(backend))
}
