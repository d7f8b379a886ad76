//! Bucket Provisioner Service Layer
//!
//! The service holds the two external collaborators, the stack output lookup and the
//! provisioning backend, and exposes the high-level operations (plan, apply) used by the CLI.

use aws_config::SdkConfig;
use std::sync::Arc;

use crate::aws::backend::ProvisioningBackend;
use crate::aws::s3_client::AwsS3Client;
use crate::aws::stack_outputs::{CloudFormationStackOutputs, StackOutputLookup};

/// Main service struct that holds the external collaborators and provides business logic
/// operations
pub struct BucketProvisionerService {
    pub(crate) stack_outputs: Arc<dyn StackOutputLookup>,
    pub(crate) backend: Arc<dyn ProvisioningBackend>,
}

impl BucketProvisionerService {
    pub fn new(
        stack_outputs: Arc<dyn StackOutputLookup>,
        backend: Arc<dyn ProvisioningBackend>,
    ) -> Self {
        Self {
            stack_outputs,
            backend,
        }
    }

    /// Create a service backed by CloudFormation outputs and S3.
    pub fn from_sdk_config(config: &SdkConfig) -> Self {
        Self::new(
            Arc::new(CloudFormationStackOutputs::new(config)),
            Arc::new(AwsS3Client::new(config)),
        )
    }

    // plan() method implementation is in plan.rs
    // apply() method implementation is in apply.rs
}
