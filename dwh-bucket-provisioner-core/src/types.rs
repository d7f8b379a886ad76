//! Data model shared by the composer, the partitioner and the provisioning adapter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Policy language version attached to every bucket policy.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Regional Elastic Load Balancing log-delivery account. Fixed by the provider, never derived
/// from input.
pub const LOAD_BALANCER_LOG_DELIVERY_PRINCIPAL: &str = "arn:aws:iam::797873946194:root";

/// Event filter used for bucket notifications.
pub const OBJECT_CREATED_EVENT: &str = "s3:ObjectCreated:*";

/// Object ownership setting applied when ownership is enforced.
pub const BUCKET_OWNER_ENFORCED: &str = "BucketOwnerEnforced";

/// Input to the access policy composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
    pub bucket_name: String,
    pub principal_arns: Vec<String>,
    pub allow_load_balancer_logs: bool,
    pub enforce_ownership: bool,
    pub notification_target: Option<String>,
}

impl AccessRequest {
    /// ARN of the bucket itself (no object suffix).
    pub fn bucket_arn(&self) -> String {
        format!("arn:aws:s3:::{}", self.bucket_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    #[serde(rename = "AWS")]
    pub aws: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyStatement {
    #[serde(rename = "Effect")]
    pub effect: Effect,
    #[serde(rename = "Principal")]
    pub principal: Principal,
    #[serde(rename = "Action")]
    pub actions: Vec<String>,
    #[serde(rename = "Resource")]
    pub resources: Vec<String>,
}

impl PolicyStatement {
    pub fn allow(principal: impl Into<String>, actions: &[&str], resources: Vec<String>) -> Self {
        Self {
            effect: Effect::Allow,
            principal: Principal {
                aws: principal.into(),
            },
            actions: actions.iter().map(|a| (*a).to_string()).collect(),
            resources,
        }
    }
}

/// Bucket policy document in the provider's JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Statement")]
    pub statements: Vec<PolicyStatement>,
}

impl PolicyDocument {
    pub fn new(statements: Vec<PolicyStatement>) -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statements,
        }
    }
}

/// A local file and the storage key it is uploaded to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAssignment {
    pub source_path: PathBuf,
    pub destination_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketDeclaration {
    pub name: String,
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDeclaration {
    pub queue_arn: String,
    pub events: Vec<String>,
}

impl NotificationDeclaration {
    /// Queue notification for every object-created event.
    pub fn object_created(queue_arn: impl Into<String>) -> Self {
        Self {
            queue_arn: queue_arn.into(),
            events: vec![OBJECT_CREATED_EVENT.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipDeclaration {
    pub object_ownership: String,
}

impl OwnershipDeclaration {
    pub fn bucket_owner_enforced() -> Self {
        Self {
            object_ownership: BUCKET_OWNER_ENFORCED.to_string(),
        }
    }
}

/// Upload of one local file. Uploaded objects are never deleted by the provisioner, even
/// once the file drops out of a later plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectUpload {
    pub bucket: String,
    pub key: String,
    pub source_path: PathBuf,
    pub retain_on_delete: bool,
}

impl ObjectUpload {
    pub fn retained(bucket: impl Into<String>, assignment: FileAssignment) -> Self {
        Self {
            bucket: bucket.into(),
            key: assignment.destination_key,
            source_path: assignment.source_path,
            retain_on_delete: true,
        }
    }
}

/// Complete, immutable description of one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    pub bucket: BucketDeclaration,
    pub policy: PolicyDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationDeclaration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership: Option<OwnershipDeclaration>,
    pub uploads: Vec<ObjectUpload>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Log each step without calling AWS.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketOutcome {
    Created,
    Existing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    pub dry_run: bool,
    pub bucket: String,
    /// `None` on a dry run.
    pub bucket_outcome: Option<BucketOutcome>,
    pub policy_statement_count: usize,
    pub notification_configured: bool,
    pub ownership_enforced: bool,
    pub uploaded_keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_json_shape() {
        let policy = PolicyDocument::new(vec![PolicyStatement::allow(
            "arn:aws:iam::123456789012:role/reader",
            &["s3:ListBucket", "s3:GetBucketLocation"],
            vec!["arn:aws:s3:::bucket".to_string()],
        )]);

        let value = serde_json::to_value(&policy).unwrap();
        assert_eq!(value["Version"], "2012-10-17");
        let statement = &value["Statement"][0];
        assert_eq!(statement["Effect"], "Allow");
        assert_eq!(
            statement["Principal"]["AWS"],
            "arn:aws:iam::123456789012:role/reader"
        );
        assert_eq!(
            statement["Action"],
            serde_json::json!(["s3:ListBucket", "s3:GetBucketLocation"])
        );
        assert_eq!(statement["Resource"], serde_json::json!(["arn:aws:s3:::bucket"]));
    }

    #[test]
    fn test_bucket_arn_has_no_suffix() {
        let request = AccessRequest {
            bucket_name: "schema-bucket".to_string(),
            principal_arns: vec![],
            allow_load_balancer_logs: false,
            enforce_ownership: false,
            notification_target: None,
        };
        assert_eq!(request.bucket_arn(), "arn:aws:s3:::schema-bucket");
    }

    #[test]
    fn test_plan_omits_absent_optional_resources() {
        let plan = DeploymentPlan {
            bucket: BucketDeclaration {
                name: "b".to_string(),
                tags: BTreeMap::new(),
            },
            policy: PolicyDocument::new(vec![]),
            notification: None,
            ownership: Some(OwnershipDeclaration::bucket_owner_enforced()),
            uploads: vec![],
        };
        let value = serde_json::to_value(&plan).unwrap();
        assert!(value.get("notification").is_none());
        assert_eq!(value["ownership"]["object_ownership"], "BucketOwnerEnforced");
    }

    #[test]
    fn test_uploads_are_retained() {
        let upload = ObjectUpload::retained(
            "b",
            FileAssignment {
                source_path: PathBuf::from("outputs/x_schemas_y.json"),
                destination_key: "Schemas/2024/1/2/x_schemas_y.json".to_string(),
            },
        );
        assert!(upload.retain_on_delete);
        assert_eq!(upload.key, "Schemas/2024/1/2/x_schemas_y.json");
    }
}
