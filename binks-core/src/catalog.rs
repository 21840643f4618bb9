//! Initiative catalog: search, filter, sort and creation.

use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::error::{BinksError, Result};
use crate::initiative::{Initiative, InitiativeCategory, InitiativeStatus, NewInitiative};
use crate::wallet::WalletSession;

/// Sentinel accepted by filter parameters to disable the filter
pub const ALL: &str = "All";

/// A filter that is either disabled or matches one value exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T> FromStr for Filter<T>
where
    T: FromStr<Err = BinksError>,
{
    type Err = BinksError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Ok(Self::All)
        } else {
            trimmed.parse().map(Self::Only)
        }
    }
}

/// Ordering applied to the filtered catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Highest reward first
    #[default]
    MostRewarding,
    /// Latest start date first
    Newest,
    /// Earliest end date first
    EndingSoon,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MostRewarding => write!(f, "Most Rewarding"),
            Self::Newest => write!(f, "Newest"),
            Self::EndingSoon => write!(f, "Ending Soon"),
        }
    }
}

impl FromStr for SortKey {
    type Err = BinksError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "" | "mostrewarding" => Ok(Self::MostRewarding),
            "newest" => Ok(Self::Newest),
            "endingsoon" => Ok(Self::EndingSoon),
            _ => Err(BinksError::validation(format!("unknown sort key '{}'", s))),
        }
    }
}

/// Search and filter settings of the initiatives page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitiativeQuery {
    pub search: String,
    pub status: Filter<InitiativeStatus>,
    pub category: Filter<InitiativeCategory>,
    pub sort: SortKey,
}

impl InitiativeQuery {
    /// Build a query from raw form values, rejecting unknown filter values
    pub fn parse(search: &str, status: &str, category: &str, sort: &str) -> Result<Self> {
        Ok(Self {
            search: search.to_string(),
            status: status.parse()?,
            category: category.parse()?,
            sort: sort.parse()?,
        })
    }

    fn matches(&self, initiative: &Initiative, needle: &str) -> bool {
        let matches_search = needle.is_empty()
            || initiative.title().to_lowercase().contains(needle)
            || initiative.description().to_lowercase().contains(needle);

        matches_search
            && self.status.matches(&initiative.status())
            && self.category.matches(&initiative.category())
    }
}

/// Apply search, filters and sort to `initiatives`.
///
/// Returns a new vector of clones; the input is left untouched. The sort is
/// stable, so ties keep their original order.
pub fn filter_and_sort(initiatives: &[Initiative], query: &InitiativeQuery) -> Vec<Initiative> {
    let needle = query.search.trim().to_lowercase();

    let mut selected: Vec<Initiative> = initiatives
        .iter()
        .filter(|i| query.matches(i, &needle))
        .cloned()
        .collect();

    match query.sort {
        SortKey::MostRewarding => {
            selected.sort_by(|a, b| b.reward_points().cmp(&a.reward_points()))
        }
        SortKey::Newest => selected.sort_by(|a, b| b.start_date().cmp(&a.start_date())),
        SortKey::EndingSoon => selected.sort_by(|a, b| a.end_date().cmp(&b.end_date())),
    }

    selected
}

/// Owner of the initiative list.
///
/// Initiatives are append-only: there is no update or delete path.
#[derive(Debug, Clone, Default)]
pub struct InitiativeCatalog {
    initiatives: Vec<Initiative>,
}

impl InitiativeCatalog {
    /// Create a catalog, rejecting duplicate ids
    pub fn new(initiatives: Vec<Initiative>) -> Result<Self> {
        let mut catalog = Self::default();
        for initiative in initiatives {
            catalog.insert(initiative)?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, initiative: Initiative) -> Result<()> {
        if self.get(initiative.id()).is_some() {
            return Err(BinksError::validation(format!(
                "duplicate initiative id '{}'",
                initiative.id()
            )));
        }
        self.initiatives.push(initiative);
        Ok(())
    }

    pub fn all(&self) -> &[Initiative] {
        &self.initiatives
    }

    pub fn len(&self) -> usize {
        self.initiatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initiatives.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Initiative> {
        self.initiatives.iter().find(|i| i.id() == id)
    }

    pub fn query(&self, query: &InitiativeQuery) -> Vec<Initiative> {
        filter_and_sort(&self.initiatives, query)
    }

    /// Create an initiative on behalf of the connected wallet.
    ///
    /// Only a connected session is required; the admin role is not checked.
    pub fn create(
        &mut self,
        draft: NewInitiative,
        session: Option<&WalletSession>,
    ) -> Result<Initiative> {
        let session = session.ok_or(BinksError::NotConnected)?;

        let id = uuid::Uuid::new_v4().to_string();
        let initiative = draft.into_initiative(id)?;
        self.insert(initiative.clone())?;

        info!(
            id = %initiative.id(),
            title = %initiative.title(),
            creator = %session.address,
            "Initiative created"
        );

        Ok(initiative)
    }
}
