//! Service seams and the wire types that cross them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::Result;
use crate::requests::EditOperation;
use crate::snapshot::DocumentSnapshot;

/// Optimistic concurrency control for a batch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteControl {
    /// The batch fails if the document moved past this revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_revision_id: Option<String>,
}

/// Body of a `batchUpdate` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest<'a> {
    pub requests: &'a [EditOperation],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_control: Option<WriteControl>,
}

/// Response of a `batchUpdate` call: one reply per request, in order.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResponse {
    #[serde(default)]
    pub presentation_id: String,
    #[serde(default)]
    pub replies: Vec<Value>,
    #[serde(default)]
    pub write_control: Option<WriteControl>,
}

/// Outcome of one applied batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchResult {
    pub presentation_id: String,
    pub operation_count: usize,
    pub replies: Vec<Value>,
    /// Revision of the document right after the batch
    pub revision_id: Option<String>,
}

impl BatchResult {
    /// Id reported by the first `duplicateObject` reply, if any.
    pub fn duplicated_object_id(&self) -> Option<&str> {
        self.replies
            .iter()
            .find_map(|reply| reply.get("duplicateObject")?.get("objectId")?.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Writer,
    Commenter,
    Reader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GranteeType {
    User,
    Group,
    Domain,
    Anyone,
}

/// A file permission to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub role: Role,
    #[serde(rename = "type")]
    pub grantee: GranteeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl Permission {
    /// Edit access for every account in `domain`.
    pub fn domain_writer(domain: impl Into<String>) -> Self {
        Self {
            role: Role::Writer,
            grantee: GranteeType::Domain,
            email_address: None,
            domain: Some(domain.into()),
        }
    }

    /// Ownership for the account `email`.
    pub fn owner(email: impl Into<String>) -> Self {
        Self {
            role: Role::Owner,
            grantee: GranteeType::User,
            email_address: Some(email.into()),
            domain: None,
        }
    }
}

/// The presentation service (Slides API).
#[async_trait]
pub trait PresentationService: Send + Sync {
    /// Create an empty presentation, returning its id.
    async fn create(&self, title: &str) -> Result<String>;

    /// Apply a batch atomically.
    async fn batch_update(
        &self,
        presentation_id: &str,
        request: &BatchUpdateRequest<'_>,
    ) -> Result<BatchUpdateResponse>;

    /// Fetch the current document state.
    async fn get(&self, presentation_id: &str) -> Result<DocumentSnapshot>;
}

/// The file service (Drive API).
#[async_trait]
pub trait FileService: Send + Sync {
    /// Copy a file, returning the id of the copy.
    async fn copy_file(&self, file_id: &str, name: &str) -> Result<String>;

    /// Create a permission, returning its id.
    async fn create_permission(
        &self,
        file_id: &str,
        permission: &Permission,
        transfer_ownership: bool,
    ) -> Result<String>;
}
