//! Human-readable rendering of plans and results (stderr).

use dwh_bucket_provisioner_core::{ApplyResult, DeploymentPlan};

pub fn print_plan(plan: &DeploymentPlan) {
    let tags: Vec<String> = plan
        .bucket
        .tags
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    eprintln!("Bucket: {}", plan.bucket.name);
    if !tags.is_empty() {
        eprintln!("  Tags: {}", tags.join(", "));
    }

    eprintln!("Policy: {} statement(s)", plan.policy.statements.len());
    for statement in &plan.policy.statements {
        eprintln!(
            "  {:?} {} -> {} on {}",
            statement.effect,
            statement.principal.aws,
            statement.actions.join(", "),
            statement.resources.join(", ")
        );
    }

    match &plan.notification {
        Some(notification) => eprintln!(
            "Notification: {} on {}",
            notification.queue_arn,
            notification.events.join(", ")
        ),
        None => eprintln!("Notification: none"),
    }

    match &plan.ownership {
        Some(ownership) => eprintln!("Ownership: {}", ownership.object_ownership),
        None => eprintln!("Ownership: not enforced"),
    }

    eprintln!("Uploads: {} (retained on delete)", plan.uploads.len());
    for upload in &plan.uploads {
        eprintln!("  {} -> {}", upload.source_path.display(), upload.key);
    }
}

pub fn print_result(result: &ApplyResult) {
    if result.dry_run {
        eprintln!("Dry run complete for bucket {}: no changes made", result.bucket);
        return;
    }
    eprintln!("Applied bucket {}", result.bucket);
    if let Some(outcome) = result.bucket_outcome {
        eprintln!("  Bucket: {:?}", outcome);
    }
    eprintln!("  Policy statements: {}", result.policy_statement_count);
    eprintln!("  Notification configured: {}", result.notification_configured);
    eprintln!("  Ownership enforced: {}", result.ownership_enforced);
    eprintln!("  Uploaded objects: {}", result.uploaded_keys.len());
}
