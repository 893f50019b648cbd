//! Input data of a template run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};

/// A team as it appears on the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Logo URL, handed to the service as-is by `replaceImage`
    pub logo: String,
}

impl Team {
    pub fn new(name: impl Into<String>, logo: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logo: logo.into(),
        }
    }
}

/// Everything a template run writes into the deck. Read once, never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckContext {
    pub home: Team,
    pub away: Team,
    pub championship: String,
    pub game_date: NaiveDate,
}

impl DeckContext {
    /// Build a context, rejecting blank names, championship or logo URLs.
    pub fn new(home: Team, away: Team, championship: impl Into<String>, game_date: NaiveDate) -> Result<Self> {
        let championship = championship.into();
        for team in [&home, &away] {
            if team.name.trim().is_empty() {
                return Err(Error::Config("team name must not be empty".to_string()));
            }
            if team.logo.trim().is_empty() {
                return Err(Error::Config(format!("team '{}' has no logo URL", team.name)));
            }
        }
        if championship.trim().is_empty() {
            return Err(Error::Config("championship must not be empty".to_string()));
        }
        Ok(Self {
            home,
            away,
            championship,
            game_date,
        })
    }

    /// Build a context from the `teams` list of a run configuration, which
    /// must hold exactly two entries: home first, away second.
    pub fn from_teams(teams: &[Team], championship: impl Into<String>, game_date: NaiveDate) -> Result<Self> {
        match teams {
            [home, away] => Self::new(home.clone(), away.clone(), championship, game_date),
            _ => Err(Error::Config(format!("expected exactly 2 teams, got {}", teams.len()))),
        }
    }

    /// `"<home> vs <away>"`
    pub fn headline(&self) -> String {
        format!("{} vs {}", self.home.name, self.away.name)
    }

    /// `"<championship> - <YYYY-MM-DD>"`
    pub fn subtitle(&self) -> String {
        format!("{} - {}", self.championship, self.game_date.format("%Y-%m-%d"))
    }

    /// Title of the copied presentation when none is configured.
    pub fn default_title(&self) -> String {
        format!("{} - {}", self.headline(), self.game_date.format("%Y-%m-%d"))
    }
}
