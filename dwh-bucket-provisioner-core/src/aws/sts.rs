//! STS helpers.

use aws_config::SdkConfig;
use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::Client as StsClient;

use crate::aws::{AwsError, AwsResult};

/// Account the loaded credentials belong to.
pub async fn caller_account_id(config: &SdkConfig) -> AwsResult<String> {
    let client = StsClient::new(config);
    let identity = client.get_caller_identity().send().await.map_err(|e| {
        AwsError::SdkError(format!(
            "Failed to get caller identity: {}",
            DisplayErrorContext(&e)
        ))
    })?;

    identity
        .account()
        .map(str::to_string)
        .ok_or_else(|| AwsError::SdkError("Caller identity has no account id".to_string()))
}
