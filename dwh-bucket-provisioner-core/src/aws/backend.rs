//! Seam between the deployment plan and the service that realises it.

use async_trait::async_trait;

use crate::aws::AwsResult;
use crate::types::{
    BucketDeclaration, BucketOutcome, NotificationDeclaration, ObjectUpload,
    OwnershipDeclaration, PolicyDocument,
};

/// Performs the create/update calls for each declared resource.
///
/// There is no delete operation: objects uploaded by an earlier run stay in the
/// bucket when they are no longer part of the plan.
#[async_trait]
pub trait ProvisioningBackend: Send + Sync {
    /// Create the bucket if it does not exist, then apply its tags.
    async fn ensure_bucket(&self, bucket: &BucketDeclaration) -> AwsResult<BucketOutcome>;

    /// Replace the bucket policy.
    async fn put_bucket_policy(&self, bucket: &str, policy: &PolicyDocument) -> AwsResult<()>;

    /// Replace the bucket notification configuration.
    async fn put_bucket_notification(
        &self,
        bucket: &str,
        notification: &NotificationDeclaration,
    ) -> AwsResult<()>;

    /// Replace the bucket ownership controls.
    async fn put_ownership_controls(
        &self,
        bucket: &str,
        ownership: &OwnershipDeclaration,
    ) -> AwsResult<()>;

    /// Upload one local file, overwriting any object already stored under the key.
    async fn upload_object(&self, upload: &ObjectUpload) -> AwsResult<()>;
}
