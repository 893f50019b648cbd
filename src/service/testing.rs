//! In-memory recording fakes of the service traits.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use super::types::{
    BatchUpdateRequest, BatchUpdateResponse, FileService, Permission, PresentationService, WriteControl,
};
use crate::common::{Error, Result};
use crate::requests::EditOperation;
use crate::snapshot::DocumentSnapshot;

#[derive(Debug, Clone)]
struct RecordedBatch {
    document_id: String,
    operations: Vec<EditOperation>,
    write_control: Option<WriteControl>,
}

/// Presentation service that records batches and serves a fixed snapshot.
///
/// Every successful batch bumps the revision: batch `n` answers `rev-n`, and
/// fetches report the revision of the last batch.
#[derive(Debug, Default)]
pub(crate) struct FakeSlides {
    snapshot: DocumentSnapshot,
    batches: Mutex<Vec<RecordedBatch>>,
    created: Mutex<Vec<String>>,
    fetches: Mutex<usize>,
    fail_batch: Mutex<Option<u16>>,
    fail_get: Mutex<Option<u16>>,
}

impl FakeSlides {
    pub(crate) fn with_snapshot(snapshot: DocumentSnapshot) -> Self {
        Self {
            snapshot,
            ..Default::default()
        }
    }

    /// The next batch fails with the error mapped from `status`.
    pub(crate) fn fail_next_batch(&self, status: u16) {
        *self.fail_batch.lock() = Some(status);
    }

    pub(crate) fn fail_next_get(&self, status: u16) {
        *self.fail_get.lock() = Some(status);
    }

    /// Successful batches: `(document id, operations)`.
    pub(crate) fn batches(&self) -> Vec<(String, Vec<EditOperation>)> {
        self.batches
            .lock()
            .iter()
            .map(|b| (b.document_id.clone(), b.operations.clone()))
            .collect()
    }

    pub(crate) fn write_controls(&self) -> Vec<Option<WriteControl>> {
        self.batches
            .lock()
            .iter()
            .map(|b| b.write_control.clone())
            .collect()
    }

    pub(crate) fn created(&self) -> Vec<String> {
        self.created.lock().clone()
    }

    pub(crate) fn fetch_count(&self) -> usize {
        *self.fetches.lock()
    }

    fn reply(op: &EditOperation) -> Value {
        match op {
            EditOperation::CreateSlide(r) => json!({"createSlide": {"objectId": r.object_id}}),
            EditOperation::DuplicateObject(r) => {
                let copy = r.object_ids.get(&r.object_id).cloned().unwrap_or_default();
                json!({"duplicateObject": {"objectId": copy}})
            },
            _ => json!({}),
        }
    }
}

#[async_trait]
impl PresentationService for FakeSlides {
    async fn create(&self, title: &str) -> Result<String> {
        let mut created = self.created.lock();
        created.push(title.to_string());
        Ok(format!("created{}", created.len()))
    }

    async fn batch_update(
        &self,
        presentation_id: &str,
        request: &BatchUpdateRequest<'_>,
    ) -> Result<BatchUpdateResponse> {
        if let Some(status) = self.fail_batch.lock().take() {
            return Err(Error::from_status(status, "injected failure".into()));
        }

        let mut batches = self.batches.lock();
        batches.push(RecordedBatch {
            document_id: presentation_id.to_string(),
            operations: request.requests.to_vec(),
            write_control: request.write_control.clone(),
        });

        Ok(BatchUpdateResponse {
            presentation_id: presentation_id.to_string(),
            replies: request.requests.iter().map(Self::reply).collect(),
            write_control: Some(WriteControl {
                required_revision_id: Some(format!("rev-{}", batches.len())),
            }),
        })
    }

    async fn get(&self, presentation_id: &str) -> Result<DocumentSnapshot> {
        *self.fetches.lock() += 1;
        if let Some(status) = self.fail_get.lock().take() {
            return Err(Error::from_status(status, "injected failure".into()));
        }

        let mut snapshot = self.snapshot.clone();
        if snapshot.presentation_id.is_empty() {
            snapshot.presentation_id = presentation_id.to_string();
        }
        snapshot.revision_id = Some(format!("rev-{}", self.batches.lock().len()));
        Ok(snapshot)
    }
}

/// File service that records copies and permission calls.
#[derive(Debug, Default)]
pub(crate) struct FakeDrive {
    copies: Mutex<Vec<(String, String)>>,
    permissions: Mutex<Vec<(String, Permission, bool)>>,
    fail_permission: Mutex<Option<u16>>,
    fail_copy: Mutex<Option<u16>>,
}

impl FakeDrive {
    /// The next permission call fails with the error mapped from `status`.
    pub(crate) fn fail_next_permission(&self, status: u16) {
        *self.fail_permission.lock() = Some(status);
    }

    pub(crate) fn fail_next_copy(&self, status: u16) {
        *self.fail_copy.lock() = Some(status);
    }

    /// Copies as `(source id, name)`.
    pub(crate) fn copies(&self) -> Vec<(String, String)> {
        self.copies.lock().clone()
    }

    /// Every attempted permission call, failed ones included.
    pub(crate) fn permissions(&self) -> Vec<(String, Permission, bool)> {
        self.permissions.lock().clone()
    }
}

#[async_trait]
impl FileService for FakeDrive {
    async fn copy_file(&self, file_id: &str, name: &str) -> Result<String> {
        if let Some(status) = self.fail_copy.lock().take() {
            return Err(Error::from_status(status, "injected failure".into()));
        }
        self.copies
            .lock()
            .push((file_id.to_string(), name.to_string()));
        Ok(format!("copy_of_{}", file_id))
    }

    async fn create_permission(
        &self,
        file_id: &str,
        permission: &Permission,
        transfer_ownership: bool,
    ) -> Result<String> {
        let mut calls = self.permissions.lock();
        calls.push((file_id.to_string(), permission.clone(), transfer_ownership));
        if let Some(status) = self.fail_permission.lock().take() {
            return Err(Error::from_status(status, "injected failure".into()));
        }
        Ok(format!("perm{}", calls.len()))
    }
}
