//! Community initiatives users can join for bonus rewards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BinksError, Result};

/// Length of the generated card summary before truncation
pub const SHORT_DESCRIPTION_LEN: usize = 100;

/// Minimum title length for a new initiative
pub const MIN_TITLE_LEN: usize = 3;

/// Minimum description length for a new initiative
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Steps shown for an initiative created without a plan
pub const DEFAULT_STEP: &str = "Details to be announced";

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_' && *c != ' ')
        .collect::<String>()
        .to_ascii_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum InitiativeCategory {
    Recycling,
    #[serde(rename = "Clean-Up")]
    CleanUp,
    Composting,
    #[serde(rename = "E-Waste")]
    EWaste,
}

impl InitiativeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recycling => "Recycling",
            Self::CleanUp => "Clean-Up",
            Self::Composting => "Composting",
            Self::EWaste => "E-Waste",
        }
    }
}

impl fmt::Display for InitiativeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitiativeCategory {
    type Err = BinksError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "recycling" => Ok(Self::Recycling),
            "cleanup" => Ok(Self::CleanUp),
            "composting" => Ok(Self::Composting),
            "ewaste" => Ok(Self::EWaste),
            _ => Err(BinksError::validation(format!("unknown initiative category '{}'", s))),
        }
    }
}

impl TryFrom<String> for InitiativeCategory {
    type Error = BinksError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum InitiativeStatus {
    Active,
    Completed,
    Upcoming,
}

impl InitiativeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Upcoming => "Upcoming",
        }
    }
}

impl fmt::Display for InitiativeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitiativeStatus {
    type Err = BinksError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "upcoming" => Ok(Self::Upcoming),
            _ => Err(BinksError::validation(format!("unknown initiative status '{}'", s))),
        }
    }
}

impl TryFrom<String> for InitiativeStatus {
    type Error = BinksError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// A time-boxed community activity.
///
/// Fields are private so a constructed initiative always satisfies its
/// invariants and its id never changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Initiative {
    id: String,
    title: String,
    description: String,
    short_description: String,
    category: InitiativeCategory,
    reward_points: u32,
    status: InitiativeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress_percent: Option<u8>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

impl Initiative {
    /// Create a validated initiative with a generated short description
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: InitiativeCategory,
        reward_points: u32,
        status: InitiativeStatus,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self> {
        let id = id.into();
        let title = title.into();
        let description = description.into();

        if id.trim().is_empty() {
            return Err(BinksError::validation("initiative id must not be empty"));
        }
        if title.trim().is_empty() {
            return Err(BinksError::validation("initiative title must not be empty"));
        }
        if reward_points == 0 {
            return Err(BinksError::validation("reward points must be positive"));
        }
        if start_date > end_date {
            return Err(BinksError::validation(format!(
                "initiative '{}' ends before it starts",
                title
            )));
        }

        Ok(Self {
            short_description: summarize(&description),
            id,
            title,
            description,
            category,
            reward_points,
            status,
            progress_percent: None,
            start_date,
            end_date,
            steps: Vec::new(),
            image_url: None,
        })
    }

    pub fn with_short_description(mut self, short: impl Into<String>) -> Self {
        self.short_description = short.into();
        self
    }

    /// Attach a progress value; must be within 0..=100
    pub fn with_progress(mut self, percent: u8) -> Result<Self> {
        if percent > 100 {
            return Err(BinksError::validation(format!(
                "progress must be between 0 and 100, got {}",
                percent
            )));
        }
        self.progress_percent = Some(percent);
        Ok(self)
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn category(&self) -> InitiativeCategory {
        self.category
    }

    pub fn reward_points(&self) -> u32 {
        self.reward_points
    }

    pub fn status(&self) -> InitiativeStatus {
        self.status
    }

    pub fn progress_percent(&self) -> Option<u8> {
        self.progress_percent
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

/// Card summary: the first characters of the description, ellipsized
fn summarize(description: &str) -> String {
    if description.chars().count() > SHORT_DESCRIPTION_LEN {
        let head: String = description.chars().take(SHORT_DESCRIPTION_LEN).collect();
        format!("{}...", head)
    } else {
        description.to_string()
    }
}

/// Submission from the "create initiative" form
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInitiative {
    pub title: String,
    pub description: String,
    pub category: InitiativeCategory,
    pub reward_points: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewInitiative {
    /// Form-level checks applied before an initiative is created
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().chars().count() < MIN_TITLE_LEN {
            return Err(BinksError::validation(format!(
                "Initiative title must be at least {} characters.",
                MIN_TITLE_LEN
            )));
        }
        if self.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            return Err(BinksError::validation(format!(
                "Description must be at least {} characters.",
                MIN_DESCRIPTION_LEN
            )));
        }
        if self.reward_points == 0 {
            return Err(BinksError::validation("reward points must be positive"));
        }
        if self.start_date > self.end_date {
            return Err(BinksError::validation("end date must not be before start date"));
        }
        Ok(())
    }

    /// Turn the draft into an upcoming initiative with the given id
    pub fn into_initiative(self, id: impl Into<String>) -> Result<Initiative> {
        self.validate()?;

        let steps = if self.steps.is_empty() {
            vec![DEFAULT_STEP.to_string()]
        } else {
            self.steps
        };

        let initiative = Initiative::new(
            id,
            self.title.trim(),
            self.description,
            self.category,
            self.reward_points,
            InitiativeStatus::Upcoming,
            self.start_date,
            self.end_date,
        )?
        .with_steps(steps);

        Ok(match self.image_url {
            Some(url) => initiative.with_image(url),
            None => initiative,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft() -> NewInitiative {
        NewInitiative {
            title: "Beach Sweep".to_string(),
            description: "Collect plastic along the shoreline every Saturday.".to_string(),
            category: InitiativeCategory::CleanUp,
            reward_points: 45,
            start_date: date(2025, 6, 1),
            end_date: date(2025, 6, 30),
            steps: Vec::new(),
            image_url: None,
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Clean-Up".parse::<InitiativeCategory>().unwrap(), InitiativeCategory::CleanUp);
        assert_eq!("cleanup".parse::<InitiativeCategory>().unwrap(), InitiativeCategory::CleanUp);
        assert_eq!("E-Waste".parse::<InitiativeCategory>().unwrap(), InitiativeCategory::EWaste);
        assert!("Gardening".parse::<InitiativeCategory>().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("active".parse::<InitiativeStatus>().unwrap(), InitiativeStatus::Active);
        assert!("Paused".parse::<InitiativeStatus>().is_err());
    }

    #[test]
    fn test_invariants_enforced() {
        let start = date(2025, 4, 1);
        let end = date(2025, 5, 1);
        let make = |id: &str, points: u32, from: NaiveDate, to: NaiveDate| {
            Initiative::new(
                id,
                "T",
                "D",
                InitiativeCategory::Recycling,
                points,
                InitiativeStatus::Active,
                from,
                to,
            )
        };

        let ok = make("1", 10, start, end);
        assert!(ok.is_ok());

        assert!(make("1", 0, start, end).is_err());
        assert!(make("1", 10, end, start).is_err());
        assert!(make("", 10, start, end).is_err());
        assert!(ok.unwrap().with_progress(101).is_err());
    }

    #[test]
    fn test_draft_becomes_upcoming() {
        let initiative = draft().into_initiative("abc").unwrap();
        assert_eq!(initiative.id(), "abc");
        assert_eq!(initiative.status(), InitiativeStatus::Upcoming);
        assert_eq!(initiative.progress_percent(), None);
        assert_eq!(initiative.steps(), &[DEFAULT_STEP.to_string()]);
    }

    #[test]
    fn test_long_description_truncated() {
        let mut d = draft();
        d.description = "x".repeat(150);
        let initiative = d.into_initiative("abc").unwrap();
        assert_eq!(initiative.short_description().len(), SHORT_DESCRIPTION_LEN + 3);
        assert!(initiative.short_description().ends_with("..."));
        assert_eq!(initiative.description().len(), 150);
    }

    #[test]
    fn test_draft_validation() {
        let mut d = draft();
        d.title = "ab".to_string();
        assert!(d.validate().unwrap_err().is_validation());

        let mut d = draft();
        d.description = "short".to_string();
        assert!(d.validate().is_err());

        let mut d = draft();
        d.end_date = date(2025, 5, 1);
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let initiative = draft().into_initiative("7").unwrap();
        let json = serde_json::to_value(&initiative).unwrap();
        assert_eq!(json["category"], "Clean-Up");
        assert_eq!(json["rewardPoints"], 45);
        assert_eq!(json["startDate"], "2025-06-01");
        assert!(json.get("progressPercent").is_none());
    }
}
