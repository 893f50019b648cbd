//! Slidesmith - template-driven population of Google Slides decks
//!
//! A run turns typed input into one ordered batch of declarative edit
//! operations, submits it atomically, inspects the result and hands the deck
//! over to its new owner:
//!
//! - **Request building** ([`deck`], [`requests`]): pure construction of
//!   [`EditOperation`](requests::EditOperation) batches from a match context
//!   or a report description
//! - **Execution** ([`service`]): batch submission with a double-apply guard
//!   and optional revision pinning, snapshot fetches, permission grants
//! - **Inspection** ([`snapshot`]): a deterministic structural trace of a
//!   fetched deck
//! - **Fix-up** ([`deck::DuplicationFixup`]): patching an element inside a
//!   duplicated slide once its service-generated id is known
//!
//! # Example - Building a template batch
//!
//! ```
//! use chrono::NaiveDate;
//! use slidesmith::deck::{DeckContext, Team, TemplateDeckBuilder, TemplateLayout};
//! use slidesmith::requests::OperationKind;
//!
//! # fn main() -> slidesmith::Result<()> {
//! let ctx = DeckContext::new(
//!     Team::new("Lions", "https://img/lions.png"),
//!     Team::new("Tigers", "https://img/tigers.png"),
//!     "Cup",
//!     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
//! )?;
//!
//! let ops = TemplateDeckBuilder::new(TemplateLayout::default()).build(&ctx)?;
//! assert_eq!(ops[0].kind(), OperationKind::DeleteText);
//! assert_eq!(ops[1].kind(), OperationKind::InsertText);
//!
//! // The batch is the `requests` array of a batchUpdate call.
//! let json = serde_json::to_string(&ops)?;
//! assert!(json.starts_with(r#"[{"deleteText""#));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Running against the live services
//!
//! ```no_run
//! use slidesmith::config::RunConfig;
//! use slidesmith::pipeline::DeckRun;
//! use slidesmith::service::GoogleClient;
//!
//! # async fn run() -> slidesmith::Result<()> {
//! let config = RunConfig::load("run.yaml")?;
//! let plan = config.plan(false)?;
//! let client = GoogleClient::with_timeout(config.token_source()?, config.request_timeout())?;
//!
//! let summary = DeckRun::new(&client, &client).execute(&plan).await?;
//! println!("populated {}", summary.document_id);
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod config;
pub mod deck;
pub mod pipeline;
pub mod requests;
pub mod service;
pub mod snapshot;

pub use common::{Error, Result};
