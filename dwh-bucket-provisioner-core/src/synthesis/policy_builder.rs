//! Builds the cross-account bucket policy.

use log::debug;

use crate::types::{
    AccessRequest, PolicyDocument, PolicyStatement, LOAD_BALANCER_LOG_DELIVERY_PRINCIPAL,
};

const OBJECT_READ_ACTIONS: &[&str] = &["s3:GetObject", "s3:GetObjectVersion"];
const BUCKET_LIST_ACTIONS: &[&str] = &["s3:ListBucket", "s3:GetBucketLocation"];
const LOG_DELIVERY_ACTIONS: &[&str] = &["s3:PutObject"];

/// Compose the bucket policy for an access request.
///
/// Every principal gets an object-read statement followed by a bucket-list statement, in input
/// order. Duplicate principals are not merged. When load-balancer logs are allowed a single
/// log-delivery statement is appended after the principal statements.
pub fn compose(request: &AccessRequest) -> PolicyDocument {
    let bucket_arn = request.bucket_arn();
    let mut statements = Vec::with_capacity(
        request.principal_arns.len() * 2 + usize::from(request.allow_load_balancer_logs),
    );

    for principal_arn in &request.principal_arns {
        statements.push(object_read_statement(principal_arn, &bucket_arn));
        statements.push(bucket_list_statement(principal_arn, &bucket_arn));
    }

    if request.allow_load_balancer_logs {
        statements.push(load_balancer_log_statement(&bucket_arn));
    }

    debug!(
        "Composed policy for {} with {} statements ({} principals, load balancer logs: {})",
        bucket_arn,
        statements.len(),
        request.principal_arns.len(),
        request.allow_load_balancer_logs
    );

    PolicyDocument::new(statements)
}

/// Allow reading any object (and its versions) in the bucket.
pub fn object_read_statement(principal_arn: &str, bucket_arn: &str) -> PolicyStatement {
    PolicyStatement::allow(
        principal_arn,
        OBJECT_READ_ACTIONS,
        vec![format!("{bucket_arn}/*")],
    )
}

/// Allow listing the bucket and resolving its region.
pub fn bucket_list_statement(principal_arn: &str, bucket_arn: &str) -> PolicyStatement {
    PolicyStatement::allow(
        principal_arn,
        BUCKET_LIST_ACTIONS,
        vec![bucket_arn.to_string()],
    )
}

/// Allow the regional load-balancer log-delivery account to write access logs under `alb/`.
pub fn load_balancer_log_statement(bucket_arn: &str) -> PolicyStatement {
    PolicyStatement::allow(
        LOAD_BALANCER_LOG_DELIVERY_PRINCIPAL,
        LOG_DELIVERY_ACTIONS,
        vec![format!("{bucket_arn}/alb/AWSLogs/*")],
    )
}
