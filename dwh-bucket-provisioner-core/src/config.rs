//! Deployment configuration, read from a TOML file.
//!
//! Every section is optional; missing values fall back to the production schema-bucket
//! deployment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ProvisionerError, ProvisionerResult};
use crate::providers::FileSystemProvider;

const DEFAULT_BUCKET_NAME: &str = "terraform-schema-bucket";
const DEFAULT_READER_STACK: &str = "dwh-workflows-loader-prodbuckets-production";
const DEFAULT_READER_OUTPUT: &str = "dwhBucketReaderRole";
const DEFAULT_SOURCE_DIR: &str = "./outputs";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvisionConfig {
    pub bucket: BucketConfig,
    pub access: AccessConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BucketConfig {
    pub name: String,
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessConfig {
    /// Readers, in the order their statements appear in the policy.
    pub principals: Vec<PrincipalSource>,
    pub allow_load_balancer_logs: bool,
    pub enforce_ownership: bool,
    /// Queue ARN notified on every object-created event.
    pub notification_target: Option<String>,
}

/// Where a reader principal comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrincipalSource {
    /// A literal principal ARN.
    Arn(String),
    /// An output published by another deployed stack.
    StackOutput { stack: String, output: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadConfig {
    pub source_dir: PathBuf,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_BUCKET_NAME.to_string(),
            tags: BTreeMap::from([("owner".to_string(), "vvm".to_string())]),
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            principals: vec![PrincipalSource::StackOutput {
                stack: DEFAULT_READER_STACK.to_string(),
                output: DEFAULT_READER_OUTPUT.to_string(),
            }],
            allow_load_balancer_logs: false,
            enforce_ownership: true,
            notification_target: None,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
        }
    }
}

impl ProvisionConfig {
    /// Load configuration from a TOML file.
    pub async fn load(path: impl AsRef<Path>) -> ProvisionerResult<Self> {
        let content = FileSystemProvider::read_file(path.as_ref()).await?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ProvisionerError::Config(message) => ProvisionerError::config(format!(
                "{}: {}",
                path.as_ref().display(),
                message
            )),
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> ProvisionerResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ProvisionerError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ProvisionerResult<()> {
        if self.bucket.name.trim().is_empty() {
            return Err(ProvisionerError::config("bucket.name must not be empty"));
        }
        Ok(())
    }
}
