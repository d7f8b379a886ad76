//! AWS SDK integration: S3 provisioning backend, stack output lookup, caller identity.

pub(crate) mod backend;
pub(crate) mod s3_client;
pub(crate) mod stack_outputs;
pub(crate) mod sts;

pub use aws_config::SdkConfig;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("S3 client error: {0}")]
    S3Error(String),
    #[error("Policy error: {0}")]
    PolicyError(String),
    #[error("CloudFormation error: {0}")]
    StackError(String),
    #[error("Stack '{stack}' does not exist")]
    StackNotFound { stack: String },
    #[error("Stack '{stack}' has no output named '{output}'")]
    StackOutputNotFound { stack: String, output: String },
    #[error("AWS SDK error: {0}")]
    SdkError(String),
}

pub type AwsResult<T> = Result<T, AwsError>;

/// Load AWS configuration using the standard credential provider chain.
pub async fn load_sdk_config() -> SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await
}
