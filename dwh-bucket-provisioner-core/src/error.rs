//! Error types for the bucket provisioner.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::aws::AwsError;

/// Errors surfaced by planning and applying a bucket deployment.
#[derive(Debug, Error)]
pub enum ProvisionerError {
    /// The configuration file could not be parsed or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A local file system operation failed.
    #[error("File system error: failed to {operation} '{}': {source}", .path.display())]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An AWS call failed, or an external reference could not be resolved.
    #[error(transparent)]
    Aws(#[from] AwsError),
}

impl ProvisionerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn file_system(
        operation: impl Into<String>,
        path: impl AsRef<Path>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type ProvisionerResult<T> = Result<T, ProvisionerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_system_error_names_operation_and_path() {
        let err = ProvisionerError::file_system(
            "read directory",
            "./outputs",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let message = err.to_string();
        assert!(message.contains("read directory"));
        assert!(message.contains("./outputs"));
    }

    #[test]
    fn test_aws_error_is_transparent() {
        let err: ProvisionerError = AwsError::StackNotFound {
            stack: "loader".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Stack 'loader' does not exist");
    }
}
