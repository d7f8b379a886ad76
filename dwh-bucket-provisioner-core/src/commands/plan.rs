//! Plan creation logic for the bucket provisioner service

use chrono::NaiveDate;
use log::{debug, info};

use crate::config::{PrincipalSource, ProvisionConfig};
use crate::error::ProvisionerResult;
use crate::partitioning::partition;
use crate::providers::FileSystemProvider;
use crate::synthesis::compose;
use crate::types::{
    AccessRequest, BucketDeclaration, DeploymentPlan, NotificationDeclaration, ObjectUpload,
    OwnershipDeclaration, PolicyDocument,
};

impl super::service::BucketProvisionerService {
    /// Resolve principal sources to ARNs, in configuration order.
    ///
    /// Stack output references are resolved one at a time; the first missing stack or output
    /// aborts resolution.
    pub async fn resolve_principals(
        &self,
        sources: &[PrincipalSource],
    ) -> ProvisionerResult<Vec<String>> {
        let mut principal_arns = Vec::with_capacity(sources.len());
        for source in sources {
            let arn = match source {
                PrincipalSource::Arn(arn) => arn.clone(),
                PrincipalSource::StackOutput { stack, output } => {
                    let arn = self.stack_outputs.lookup(stack, output).await?;
                    debug!("Principal from {}/{}: {}", stack, output, arn);
                    arn
                }
            };
            principal_arns.push(arn);
        }
        Ok(principal_arns)
    }

    /// Build the composer input for a configuration.
    pub async fn access_request(
        &self,
        config: &ProvisionConfig,
    ) -> ProvisionerResult<AccessRequest> {
        Ok(AccessRequest {
            bucket_name: config.bucket.name.clone(),
            principal_arns: self.resolve_principals(&config.access.principals).await?,
            allow_load_balancer_logs: config.access.allow_load_balancer_logs,
            enforce_ownership: config.access.enforce_ownership,
            notification_target: config.access.notification_target.clone(),
        })
    }

    /// Compose the bucket policy only, without reading the upload directory.
    pub async fn compose_policy(
        &self,
        config: &ProvisionConfig,
    ) -> ProvisionerResult<PolicyDocument> {
        let request = self.access_request(config).await?;
        Ok(compose(&request))
    }

    /// Create the full deployment plan for `today`.
    pub async fn plan(
        &self,
        config: &ProvisionConfig,
        today: NaiveDate,
    ) -> ProvisionerResult<DeploymentPlan> {
        let request = self.access_request(config).await?;
        let policy = compose(&request);

        let source_dir = &config.uploads.source_dir;
        let file_names = FileSystemProvider::list_file_names(source_dir).await?;
        let uploads: Vec<ObjectUpload> = partition(source_dir, &file_names, today)
            .into_iter()
            .map(|assignment| ObjectUpload::retained(&request.bucket_name, assignment))
            .collect();

        info!(
            "Planned bucket {}: {} policy statements, {} of {} files to upload",
            request.bucket_name,
            policy.statements.len(),
            uploads.len(),
            file_names.len()
        );

        Ok(DeploymentPlan {
            bucket: BucketDeclaration {
                name: request.bucket_name,
                tags: config.bucket.tags.clone(),
            },
            policy,
            notification: request
                .notification_target
                .filter(|target| !target.trim().is_empty())
                .map(NotificationDeclaration::object_created),
            ownership: request
                .enforce_ownership
                .then(OwnershipDeclaration::bucket_owner_enforced),
            uploads,
        })
    }
}
