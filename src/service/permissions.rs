//! Handing a finished deck over: domain sharing, then ownership transfer.
//!
//! The two grants are independent. The second is attempted even when the
//! first failed, and neither failure touches the deck content, which is
//! already committed by the time permissions are granted.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::types::{FileService, Permission};
use crate::common::Result;

/// Which grants to issue. Either may be left out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionPlan {
    /// Domain receiving edit access
    pub domain: Option<String>,
    /// Account receiving ownership
    pub new_owner: Option<String>,
}

impl PermissionPlan {
    pub fn is_empty(&self) -> bool {
        self.domain.is_none() && self.new_owner.is_none()
    }
}

/// Outcome of each grant; `None` when the plan did not ask for it.
#[derive(Debug, Default)]
pub struct PermissionReport {
    pub domain_share: Option<Result<String>>,
    pub ownership_transfer: Option<Result<String>>,
}

impl PermissionReport {
    /// Every requested grant succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures().is_empty()
    }

    pub fn failures(&self) -> Vec<&crate::common::Error> {
        [&self.domain_share, &self.ownership_transfer]
            .into_iter()
            .filter_map(|outcome| outcome.as_ref()?.as_ref().err())
            .collect()
    }
}

/// Grants permissions through a [`FileService`].
pub struct PermissionManager<'a, F: ?Sized> {
    files: &'a F,
}

impl<'a, F: FileService + ?Sized> PermissionManager<'a, F> {
    pub fn new(files: &'a F) -> Self {
        Self { files }
    }

    /// Give every account of `domain` edit access.
    pub async fn share_with_domain(&self, file_id: &str, domain: &str) -> Result<String> {
        let id = self
            .files
            .create_permission(file_id, &Permission::domain_writer(domain), false)
            .await?;
        info!(file = file_id, domain, permission = %id, "shared with domain");
        Ok(id)
    }

    /// Make `email` the owner of the file.
    pub async fn transfer_ownership(&self, file_id: &str, email: &str) -> Result<String> {
        let id = self
            .files
            .create_permission(file_id, &Permission::owner(email), true)
            .await?;
        info!(file = file_id, owner = email, permission = %id, "ownership transferred");
        Ok(id)
    }

    /// Issue the planned grants in order: domain share, then ownership.
    pub async fn apply(&self, file_id: &str, plan: &PermissionPlan) -> PermissionReport {
        let mut report = PermissionReport::default();

        if let Some(domain) = &plan.domain {
            let outcome = self.share_with_domain(file_id, domain).await;
            if let Err(err) = &outcome {
                error!(file = file_id, domain = %domain, error = %err, "domain share failed");
            }
            report.domain_share = Some(outcome);
        }

        if let Some(owner) = &plan.new_owner {
            let outcome = self.transfer_ownership(file_id, owner).await;
            if let Err(err) = &outcome {
                error!(file = file_id, owner = %owner, error = %err, "ownership transfer failed");
            }
            report.ownership_transfer = Some(outcome);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;
    use crate::service::testing::FakeDrive;
    use crate::service::{GranteeType, Role};

    fn plan() -> PermissionPlan {
        PermissionPlan {
            domain: Some("example.com".into()),
            new_owner: Some("owner@example.com".into()),
        }
    }

    #[tokio::test]
    async fn test_share_then_transfer() {
        let drive = FakeDrive::default();
        let report = PermissionManager::new(&drive).apply("deck", &plan()).await;
        assert!(report.is_complete());

        let calls = drive.permissions();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "deck");
        assert_eq!(calls[0].1, Permission::domain_writer("example.com"));
        assert!(!calls[0].2);
        assert_eq!(calls[1].1.role, Role::Owner);
        assert_eq!(calls[1].1.grantee, GranteeType::User);
        assert_eq!(calls[1].1.email_address.as_deref(), Some("owner@example.com"));
        assert!(calls[1].2);
    }

    #[tokio::test]
    async fn test_transfer_attempted_after_share_failure() {
        let drive = FakeDrive::default();
        drive.fail_next_permission(403);
        let report = PermissionManager::new(&drive).apply("deck", &plan()).await;

        assert!(!report.is_complete());
        assert!(matches!(report.domain_share, Some(Err(Error::PermissionDenied(_)))));
        assert!(matches!(report.ownership_transfer, Some(Ok(_))));
        assert_eq!(report.failures().len(), 1);
        assert_eq!(drive.permissions().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_plan_issues_nothing() {
        let drive = FakeDrive::default();
        let report = PermissionManager::new(&drive)
            .apply("deck", &PermissionPlan::default())
            .await;
        assert!(report.is_complete());
        assert!(report.domain_share.is_none());
        assert!(drive.permissions().is_empty());
    }
}
