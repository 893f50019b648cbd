//! Run configuration, loaded from JSON or YAML.
//!
//! ```yaml
//! template_document_id: 1AbCdEf
//! championship: Cup
//! game_date: 2024-05-01
//! teams:
//!   - { name: Lions, logo: "https://img/lions.png" }
//!   - { name: Tigers, logo: "https://img/tigers.png" }
//! sharing:
//!   domain: example.com
//!   new_owner: owner@example.com
//! auth:
//!   access_token_file: /run/secrets/google-token
//! ```
//!
//! A config without `template_document_id` (or a run with `--scratch`)
//! builds the `report` section on a fresh presentation instead.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::{Error, Result};
use crate::deck::{DeckContext, ReportDeck, Team, TemplateLayout};
use crate::pipeline::{DeckSource, RunPlan};
use crate::service::{PermissionPlan, StaticToken, TokenFile, TokenSource, token_from_env};

/// Title used for scratch runs without an explicit title.
pub const DEFAULT_REPORT_TITLE: &str = "Report";

/// Where the bearer token comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub access_token: Option<String>,
    pub access_token_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Name of the new document; derived from the teams and date when unset
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub template_document_id: Option<String>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub championship: Option<String>,
    #[serde(default)]
    pub game_date: Option<NaiveDate>,
    #[serde(default)]
    pub layout: TemplateLayout,
    #[serde(default)]
    pub report: Option<ReportDeck>,
    #[serde(default)]
    pub sharing: PermissionPlan,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_pin_revision")]
    pub pin_revision: bool,
}

fn default_pin_revision() -> bool {
    true
}

impl RunConfig {
    /// Load from `path`; `.yaml`/`.yml` is read as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        debug!(path = %path.display(), yaml = is_yaml, "loading run configuration");
        if is_yaml {
            Self::from_yaml_str(&text)
        } else {
            Self::from_json_str(&text)
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(format!("invalid JSON configuration: {}", e)))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_saphyr::from_str(text).map_err(|e| Error::Config(format!("invalid YAML configuration: {}", e)))
    }

    /// The match context of a template run.
    pub fn deck_context(&self) -> Result<DeckContext> {
        let championship = self
            .championship
            .as_deref()
            .ok_or_else(|| Error::Config("missing 'championship'".to_string()))?;
        let game_date = self
            .game_date
            .ok_or_else(|| Error::Config("missing 'game_date'".to_string()))?;
        DeckContext::from_teams(&self.teams, championship, game_date)
    }

    /// Resolve the configuration into a run plan.
    ///
    /// `force_scratch` ignores the template and builds the `report` section.
    pub fn plan(&self, force_scratch: bool) -> Result<RunPlan> {
        let (title, source) = match (&self.template_document_id, force_scratch) {
            (Some(template_id), false) => {
                if template_id.trim().is_empty() {
                    return Err(Error::Config("'template_document_id' is empty".to_string()));
                }
                let context = self.deck_context()?;
                let title = self.title.clone().unwrap_or_else(|| context.default_title());
                let source = DeckSource::Template {
                    template_id: template_id.clone(),
                    context,
                    layout: self.layout.clone(),
                };
                (title, source)
            },
            _ => {
                let report = self.report.clone().ok_or_else(|| {
                    Error::Config("scratch run needs a 'report' section".to_string())
                })?;
                let title = self
                    .title
                    .clone()
                    .unwrap_or_else(|| DEFAULT_REPORT_TITLE.to_string());
                (title, DeckSource::Scratch(report))
            },
        };

        if title.trim().is_empty() {
            return Err(Error::Config("'title' is empty".to_string()));
        }

        Ok(RunPlan {
            title,
            source,
            sharing: self.sharing.clone(),
            pin_revision: self.pin_revision,
        })
    }

    /// Token source in order of precedence: environment, inline token, token file.
    pub fn token_source(&self) -> Result<Box<dyn TokenSource>> {
        if let Some(token) = token_from_env() {
            return Ok(Box::new(token));
        }
        if let Some(token) = &self.auth.access_token {
            return Ok(Box::new(StaticToken::new(token.as_str())?));
        }
        if let Some(path) = &self.auth.access_token_file {
            return Ok(Box::new(TokenFile::new(path)));
        }
        Err(Error::AuthFailure(
            "no access token: set auth.access_token, auth.access_token_file or the environment variable"
                .to_string(),
        ))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}
