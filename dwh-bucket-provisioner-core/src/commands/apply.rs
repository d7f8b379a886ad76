//! Apply logic for the bucket provisioner service

use log::info;

use crate::error::ProvisionerResult;
use crate::types::{ApplyOptions, ApplyResult, DeploymentPlan};

impl super::service::BucketProvisionerService {
    /// Apply a deployment plan.
    ///
    /// Steps run in a fixed order: bucket, policy, notification, ownership controls, then
    /// uploads in plan order. The first failing call aborts the run and is returned; earlier
    /// steps are not rolled back and nothing is retried.
    pub async fn apply(
        &self,
        plan: &DeploymentPlan,
        options: ApplyOptions,
    ) -> ProvisionerResult<ApplyResult> {
        let bucket = plan.bucket.name.as_str();

        if options.dry_run {
            info!("[dry run] ensure bucket {}", bucket);
            info!(
                "[dry run] put bucket policy ({} statements)",
                plan.policy.statements.len()
            );
            if let Some(notification) = &plan.notification {
                info!("[dry run] notify {} on {:?}", notification.queue_arn, notification.events);
            }
            if let Some(ownership) = &plan.ownership {
                info!("[dry run] object ownership {}", ownership.object_ownership);
            }
            for upload in &plan.uploads {
                info!(
                    "[dry run] upload {} -> s3://{}/{}",
                    upload.source_path.display(),
                    upload.bucket,
                    upload.key
                );
            }
            return Ok(ApplyResult {
                dry_run: true,
                bucket: bucket.to_string(),
                bucket_outcome: None,
                policy_statement_count: plan.policy.statements.len(),
                notification_configured: plan.notification.is_some(),
                ownership_enforced: plan.ownership.is_some(),
                uploaded_keys: Vec::new(),
            });
        }

        let bucket_outcome = self.backend.ensure_bucket(&plan.bucket).await?;
        info!("Bucket {}: {:?}", bucket, bucket_outcome);

        self.backend.put_bucket_policy(bucket, &plan.policy).await?;
        info!(
            "Attached bucket policy with {} statements",
            plan.policy.statements.len()
        );

        if let Some(notification) = &plan.notification {
            self.backend
                .put_bucket_notification(bucket, notification)
                .await?;
            info!("Configured notifications to {}", notification.queue_arn);
        }

        if let Some(ownership) = &plan.ownership {
            self.backend.put_ownership_controls(bucket, ownership).await?;
            info!("Set object ownership to {}", ownership.object_ownership);
        }

        let mut uploaded_keys = Vec::with_capacity(plan.uploads.len());
        for upload in &plan.uploads {
            self.backend.upload_object(upload).await?;
            info!("Uploaded s3://{}/{}", upload.bucket, upload.key);
            uploaded_keys.push(upload.key.clone());
        }

        Ok(ApplyResult {
            dry_run: false,
            bucket: bucket.to_string(),
            bucket_outcome: Some(bucket_outcome),
            policy_statement_count: plan.policy.statements.len(),
            notification_configured: plan.notification.is_some(),
            ownership_enforced: plan.ownership.is_some(),
            uploaded_keys,
        })
    }
}
