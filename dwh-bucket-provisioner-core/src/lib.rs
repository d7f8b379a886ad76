//! This crate provides the core business logic for the data-warehouse bucket provisioner:
//! - Bucket access policy composition for cross-account readers
//! - Date-partitioned upload planning for generated resource/schema files
//! - Stack output resolution and guarded S3 operations (bucket, policy, notifications,
//!   ownership controls, object uploads)
//!

mod aws;
pub mod commands;
mod config;
mod error;
mod partitioning;
mod providers;
mod synthesis;
mod types;

// Re-exports for a small, focused public API
pub use aws::backend::ProvisioningBackend;
pub use aws::s3_client::AwsS3Client;
pub use aws::stack_outputs::{CloudFormationStackOutputs, StackOutputLookup, StaticStackOutputs};
pub use aws::sts::caller_account_id;
pub use aws::{load_sdk_config, AwsError, AwsResult, SdkConfig};
pub use commands::BucketProvisionerService;
pub use config::{AccessConfig, BucketConfig, PrincipalSource, ProvisionConfig, UploadConfig};
pub use error::{ProvisionerError, ProvisionerResult};
pub use partitioning::{date_path, partition, KeyPrefix};
pub use providers::FileSystemProvider;
pub use synthesis::{
    bucket_list_statement, compose, load_balancer_log_statement, object_read_statement,
};
pub use types::{
    AccessRequest, ApplyOptions, ApplyResult, BucketDeclaration, BucketOutcome, DeploymentPlan,
    Effect, FileAssignment, NotificationDeclaration, ObjectUpload, OwnershipDeclaration,
    PolicyDocument, PolicyStatement, Principal, BUCKET_OWNER_ENFORCED,
    LOAD_BALANCER_LOG_DELIVERY_PRINCIPAL, OBJECT_CREATED_EVENT, POLICY_VERSION,
};
