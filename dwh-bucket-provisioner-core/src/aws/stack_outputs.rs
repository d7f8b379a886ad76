//! Resolution of values published by other deployed stacks.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_cloudformation::Client as CloudFormationClient;
use log::debug;
use std::collections::HashMap;

use crate::aws::{AwsError, AwsResult};

/// Reads an output published by a separately deployed stack.
#[async_trait]
pub trait StackOutputLookup: Send + Sync {
    async fn lookup(&self, stack_name: &str, output_key: &str) -> AwsResult<String>;
}

/// Looks outputs up with CloudFormation `DescribeStacks`.
pub struct CloudFormationStackOutputs {
    client: CloudFormationClient,
}

impl CloudFormationStackOutputs {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: CloudFormationClient::new(config),
        }
    }
}

#[async_trait]
impl StackOutputLookup for CloudFormationStackOutputs {
    async fn lookup(&self, stack_name: &str, output_key: &str) -> AwsResult<String> {
        let response = self
            .client
            .describe_stacks()
            .stack_name(stack_name)
            .send()
            .await
            .map_err(|e| {
                let missing = e
                    .as_service_error()
                    .and_then(|err| err.message())
                    .is_some_and(|message| message.contains("does not exist"));
                if missing {
                    AwsError::StackNotFound {
                        stack: stack_name.to_string(),
                    }
                } else {
                    AwsError::StackError(format!(
                        "Failed to describe stack '{stack_name}': {}",
                        DisplayErrorContext(&e)
                    ))
                }
            })?;

        let stack = response
            .stacks()
            .first()
            .ok_or_else(|| AwsError::StackNotFound {
                stack: stack_name.to_string(),
            })?;

        let value = stack
            .outputs()
            .iter()
            .find(|output| output.output_key() == Some(output_key))
            .and_then(|output| output.output_value())
            .ok_or_else(|| AwsError::StackOutputNotFound {
                stack: stack_name.to_string(),
                output: output_key.to_string(),
            })?;

        debug!("Resolved {}/{} = {}", stack_name, output_key, value);
        Ok(value.to_string())
    }
}

/// Fixed set of outputs, for offline planning.
#[derive(Debug, Clone, Default)]
pub struct StaticStackOutputs {
    outputs: HashMap<(String, String), String>,
}

impl StaticStackOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_output(
        mut self,
        stack_name: impl Into<String>,
        output_key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.insert(stack_name, output_key, value);
        self
    }

    pub fn insert(
        &mut self,
        stack_name: impl Into<String>,
        output_key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.outputs
            .insert((stack_name.into(), output_key.into()), value.into());
    }
}

#[async_trait]
impl StackOutputLookup for StaticStackOutputs {
    async fn lookup(&self, stack_name: &str, output_key: &str) -> AwsResult<String> {
        if let Some(value) = self
            .outputs
            .get(&(stack_name.to_string(), output_key.to_string()))
        {
            return Ok(value.clone());
        }

        if self.outputs.keys().any(|(stack, _)| stack == stack_name) {
            Err(AwsError::StackOutputNotFound {
                stack: stack_name.to_string(),
                output: output_key.to_string(),
            })
        } else {
            Err(AwsError::StackNotFound {
                stack: stack_name.to_string(),
            })
        }
    }
}
