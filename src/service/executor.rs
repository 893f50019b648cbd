//! Submission of edit batches and retrieval of snapshots.
//!
//! A batch is applied atomically by the service: either every operation is
//! committed or none is. The executor never splits a batch and never retries;
//! errors come back unchanged so the caller decides what a failure means.

use std::collections::{HashMap, HashSet};

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::types::{BatchResult, BatchUpdateRequest, PresentationService, WriteControl};
use crate::common::{Error, Result};
use crate::requests::EditOperation;
use crate::snapshot::DocumentSnapshot;

/// Applies batches against a [`PresentationService`].
///
/// The executor remembers a fingerprint of every batch it submitted per
/// document and refuses to submit an identical batch twice. A batch whose
/// outcome is unknown (transport failure) counts as submitted.
///
/// With revision pinning on, every batch carries the revision observed by the
/// last fetch or batch on that document, so the service rejects it if someone
/// else edited the document in between.
pub struct OperationExecutor<'a, S: ?Sized> {
    service: &'a S,
    pin_revision: bool,
    revisions: HashMap<String, String>,
    applied: HashSet<String>,
}

impl<'a, S> OperationExecutor<'a, S>
where
    S: PresentationService + ?Sized,
{
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            pin_revision: false,
            revisions: HashMap::new(),
            applied: HashSet::new(),
        }
    }

    pub fn with_revision_pinning(mut self, pin: bool) -> Self {
        self.pin_revision = pin;
        self
    }

    pub fn service(&self) -> &'a S {
        self.service
    }

    /// Last revision seen for `document_id`.
    pub fn known_revision(&self, document_id: &str) -> Option<&str> {
        self.revisions.get(document_id).map(String::as_str)
    }

    /// Submit `operations` as one atomic batch.
    pub async fn apply(&mut self, document_id: &str, operations: &[EditOperation]) -> Result<BatchResult> {
        if operations.is_empty() {
            return Err(Error::InvalidRequest(format!(
                "refusing to submit an empty batch to '{}'",
                document_id
            )));
        }

        let fingerprint = fingerprint(document_id, operations)?;
        if self.applied.contains(&fingerprint) {
            return Err(Error::DuplicateBatch {
                document_id: document_id.to_string(),
                fingerprint,
            });
        }

        let write_control = self
            .pin_revision
            .then(|| self.revisions.get(document_id).cloned())
            .flatten()
            .map(|revision| WriteControl {
                required_revision_id: Some(revision),
            });

        info!(
            document = document_id,
            operations = operations.len(),
            pinned = write_control.is_some(),
            "submitting batch"
        );
        let request = BatchUpdateRequest {
            requests: operations,
            write_control,
        };

        let response = match self.service.batch_update(document_id, &request).await {
            Ok(response) => response,
            Err(err) => {
                if err.is_ambiguous() {
                    warn!(document = document_id, %fingerprint, "batch outcome unknown, blocking resubmission");
                    self.applied.insert(fingerprint);
                }
                return Err(err);
            },
        };
        self.applied.insert(fingerprint);

        if response.replies.len() != operations.len() {
            warn!(
                document = document_id,
                expected = operations.len(),
                received = response.replies.len(),
                "reply count does not match operation count"
            );
        }

        let revision_id = response.write_control.and_then(|w| w.required_revision_id);
        match &revision_id {
            Some(revision) => {
                self.revisions.insert(document_id.to_string(), revision.clone());
            },
            None => {
                self.revisions.remove(document_id);
            },
        }

        let presentation_id = if response.presentation_id.is_empty() {
            document_id.to_string()
        } else {
            response.presentation_id
        };
        debug!(document = %presentation_id, revision = ?revision_id, "batch applied");

        Ok(BatchResult {
            presentation_id,
            operation_count: operations.len(),
            replies: response.replies,
            revision_id,
        })
    }

    /// Fetch the current state of `document_id`.
    pub async fn fetch(&mut self, document_id: &str) -> Result<DocumentSnapshot> {
        let snapshot = self.service.get(document_id).await?;
        debug!(
            document = document_id,
            slides = snapshot.slides.len(),
            revision = ?snapshot.revision_id,
            "fetched snapshot"
        );
        if let Some(revision) = &snapshot.revision_id {
            self.revisions.insert(document_id.to_string(), revision.clone());
        }
        Ok(snapshot)
    }
}

/// Hex SHA-256 of the document id and the serialized batch.
pub fn fingerprint(document_id: &str, operations: &[EditOperation]) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(document_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(serde_json::to_vec(operations)?);
    Ok(hasher.finalize().iter().map(|b| format!("{:02x}", b)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::FakeSlides;
    use crate::snapshot::DocumentSnapshot;

    fn batch() -> Vec<EditOperation> {
        vec![
            EditOperation::delete_all_text("p2_i7171"),
            EditOperation::insert_text("p2_i7171", "Lions vs Tigers"),
        ]
    }

    #[test]
    fn test_fingerprint_depends_on_document_and_operations() {
        let a = fingerprint("deck", &batch()).unwrap();
        assert_eq!(a.len(), 64);
        assert_eq!(a, fingerprint("deck", &batch()).unwrap());
        assert_ne!(a, fingerprint("other", &batch()).unwrap());
        assert_ne!(a, fingerprint("deck", &batch()[..1]).unwrap());
    }

    #[tokio::test]
    async fn test_apply_submits_one_batch() {
        let slides = FakeSlides::default();
        let mut executor = OperationExecutor::new(&slides);

        let result = executor.apply("deck", &batch()).await.unwrap();
        assert_eq!(result.presentation_id, "deck");
        assert_eq!(result.operation_count, 2);
        assert_eq!(result.replies.len(), 2);

        let batches = slides.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].0, "deck");
        assert_eq!(batches[0].1, batch());
    }

    #[tokio::test]
    async fn test_identical_batch_is_refused() {
        let slides = FakeSlides::default();
        let mut executor = OperationExecutor::new(&slides);

        executor.apply("deck", &batch()).await.unwrap();
        let err = executor.apply("deck", &batch()).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateBatch { .. }));
        assert_eq!(slides.batches().len(), 1);

        // Same batch on another document is a different batch.
        executor.apply("other", &batch()).await.unwrap();
        assert_eq!(slides.batches().len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_batch_may_be_resubmitted() {
        let slides = FakeSlides::default();
        slides.fail_next_batch(400);
        let mut executor = OperationExecutor::new(&slides);

        let err = executor.apply("deck", &batch()).await.unwrap_err();
        assert!(matches!(err, Error::BatchRejected(_)));
        executor.apply("deck", &batch()).await.unwrap();
        assert_eq!(slides.batches().len(), 1);
    }

    #[tokio::test]
    async fn test_ambiguous_failure_blocks_resubmission() {
        let slides = FakeSlides::default();
        slides.fail_next_batch(503);
        let mut executor = OperationExecutor::new(&slides);

        let err = executor.apply("deck", &batch()).await.unwrap_err();
        assert!(err.is_ambiguous());
        let err = executor.apply("deck", &batch()).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateBatch { .. }));
    }

    #[tokio::test]
    async fn test_empty_batch_is_invalid() {
        let slides = FakeSlides::default();
        let mut executor = OperationExecutor::new(&slides);
        assert!(matches!(
            executor.apply("deck", &[]).await,
            Err(Error::InvalidRequest(_))
        ));
        assert!(slides.batches().is_empty());
    }

    #[tokio::test]
    async fn test_pinning_uses_revision_from_fetch() {
        let slides = FakeSlides::with_snapshot(DocumentSnapshot {
            presentation_id: "deck".into(),
            ..Default::default()
        });
        let mut executor = OperationExecutor::new(&slides).with_revision_pinning(true);

        // Nothing observed yet: no write control.
        executor.apply("deck", &batch()).await.unwrap();
        let revision = executor.known_revision("deck").map(str::to_string);
        assert_eq!(revision.as_deref(), Some("rev-1"));

        let snapshot = executor.fetch("deck").await.unwrap();
        assert_eq!(snapshot.revision_id.as_deref(), Some("rev-1"));
        executor
            .apply("deck", &[EditOperation::delete_all_text("xyz")])
            .await
            .unwrap();

        let controls = slides.write_controls();
        assert_eq!(controls[0], None);
        assert_eq!(
            controls[1],
            Some(WriteControl {
                required_revision_id: Some("rev-1".into())
            })
        );
    }

    #[tokio::test]
    async fn test_without_pinning_no_write_control() {
        let slides = FakeSlides::default();
        let mut executor = OperationExecutor::new(&slides);
        executor.fetch("deck").await.unwrap();
        executor.apply("deck", &batch()).await.unwrap();
        assert_eq!(slides.write_controls(), vec![None]);
    }
}
