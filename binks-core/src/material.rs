//! Waste material types and their reward multipliers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BinksError;

/// Kinds of waste a smart bin accepts.
///
/// Declaration order is the display order used by the dashboard tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum MaterialType {
    Plastic,
    Paper,
    Glass,
    Metal,
    Organic,
    #[serde(rename = "E-Waste")]
    EWaste,
}

impl MaterialType {
    /// Reward multiplier applied per kilogram of this material
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Plastic => 0.8,
            Self::Paper => 0.6,
            Self::Glass => 1.2,
            Self::Metal => 1.5,
            Self::Organic => 0.4,
            Self::EWaste => 3.0,
        }
    }

    /// Short description shown next to the multiplier
    pub fn description(&self) -> &'static str {
        match self {
            Self::Plastic => "Common but harmful to environment",
            Self::Paper => "Easily recyclable, lower impact",
            Self::Glass => "High reuse value",
            Self::Metal => "Valuable, high energy savings",
            Self::Organic => "Compostable, natural decay",
            Self::EWaste => "High-value components, highest impact",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plastic => "Plastic",
            Self::Paper => "Paper",
            Self::Glass => "Glass",
            Self::Metal => "Metal",
            Self::Organic => "Organic",
            Self::EWaste => "E-Waste",
        }
    }

    /// All materials in declaration order
    pub fn all() -> [Self; 6] {
        [
            Self::Plastic,
            Self::Paper,
            Self::Glass,
            Self::Metal,
            Self::Organic,
            Self::EWaste,
        ]
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialType {
    type Err = BinksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "plastic" => Ok(Self::Plastic),
            "paper" => Ok(Self::Paper),
            "glass" => Ok(Self::Glass),
            "metal" => Ok(Self::Metal),
            "organic" => Ok(Self::Organic),
            "ewaste" => Ok(Self::EWaste),
            _ => Err(BinksError::validation(format!(
                "unknown material type '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for MaterialType {
    type Error = BinksError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One row of the published multiplier table
#[derive(Debug, Clone, Serialize)]
pub struct MultiplierEntry {
    pub material: MaterialType,
    pub multiplier: f64,
    pub description: &'static str,
}

/// The full multiplier table, one entry per material
pub fn multiplier_table() -> Vec<MultiplierEntry> {
    MaterialType::all()
        .into_iter()
        .map(|material| MultiplierEntry {
            material,
            multiplier: material.multiplier(),
            description: material.description(),
        })
        .collect()
}
