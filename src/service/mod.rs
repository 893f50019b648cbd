//! Remote side of a run: service traits, the Google HTTP client, batch
//! execution and permission management.
//!
//! The pipeline only talks to [`PresentationService`] and [`FileService`];
//! [`GoogleClient`] is the production implementation of both.

pub mod auth;
pub mod executor;
pub mod google;
pub mod permissions;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{StaticToken, TOKEN_ENV_VAR, TokenFile, TokenSource, token_from_env};
pub use executor::{OperationExecutor, fingerprint};
pub use google::{DRIVE_BASE_URL, GoogleClient, SLIDES_BASE_URL};
pub use permissions::{PermissionManager, PermissionPlan, PermissionReport};
pub use types::{
    BatchResult, BatchUpdateRequest, BatchUpdateResponse, FileService, GranteeType, Permission, PresentationService,
    Role, WriteControl,
};
