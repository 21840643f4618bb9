//! BINK reward calculation.
//!
//! `Reward = BaseRate × MaterialMultiplier × Weight × EnvironmentalFactor`
//!
//! The environmental factor comes from time-boxed campaigns (Earth Week,
//! Plastic-Free July, ...) that boost specific materials. When several active
//! campaigns boost the same material, the largest multiplier wins; campaigns
//! never stack.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::{BinksError, Result};
use crate::material::MaterialType;

/// BINK tokens per kilogram before multipliers
pub const BASE_RATE: f64 = 10.0;

/// A time-boxed campaign multiplier for specific materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalFactor {
    pub name: String,
    pub description: String,
    pub applies_to: BTreeSet<MaterialType>,
    pub multiplier: f64,
    /// First day of the campaign (inclusive)
    pub start_date: NaiveDate,
    /// Last day of the campaign (inclusive)
    pub end_date: NaiveDate,
}

impl EnvironmentalFactor {
    /// Create a validated campaign factor
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        applies_to: impl IntoIterator<Item = MaterialType>,
        multiplier: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self> {
        let factor = Self {
            name: name.into(),
            description: description.into(),
            applies_to: applies_to.into_iter().collect(),
            multiplier,
            start_date,
            end_date,
        };
        factor.validate()?;
        Ok(factor)
    }

    /// Check the invariants a deserialized factor may have skipped
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BinksError::validation("environmental factor needs a name"));
        }
        if !self.multiplier.is_finite() || self.multiplier <= 0.0 {
            return Err(BinksError::validation(format!(
                "factor '{}' multiplier must be a positive number, got {}",
                self.name, self.multiplier
            )));
        }
        if self.start_date > self.end_date {
            return Err(BinksError::validation(format!(
                "factor '{}' ends before it starts",
                self.name
            )));
        }
        if self.applies_to.is_empty() {
            return Err(BinksError::validation(format!(
                "factor '{}' applies to no material",
                self.name
            )));
        }
        Ok(())
    }

    /// Whether the campaign runs on `date` (both ends inclusive)
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn applies_to(&self, material: MaterialType) -> bool {
        self.applies_to.contains(&material)
    }
}

/// Select the factors whose campaign window contains `date`
pub fn active_factors(
    factors: &[EnvironmentalFactor],
    date: NaiveDate,
) -> Vec<EnvironmentalFactor> {
    factors
        .iter()
        .filter(|f| f.is_active_on(date))
        .cloned()
        .collect()
}

/// Pick the strongest factor among `active` that boosts `material`.
///
/// On equal multipliers the earliest factor in `active` wins.
fn strongest_factor<'a>(
    material: MaterialType,
    active: &'a [EnvironmentalFactor],
) -> Option<&'a EnvironmentalFactor> {
    active
        .iter()
        .filter(|f| f.applies_to(material))
        .reduce(|best, f| if f.multiplier > best.multiplier { f } else { best })
}

fn validate_weight(weight_kg: f64) -> Result<()> {
    if !weight_kg.is_finite() || weight_kg < 0.0 {
        return Err(BinksError::validation(format!(
            "weight must be a non-negative number of kilograms, got {}",
            weight_kg
        )));
    }
    Ok(())
}

/// Compute the BINK reward for a disposal.
///
/// `active` must already be narrowed to the campaigns running on the
/// evaluation date (see [`active_factors`]). Returns full precision; use
/// [`round_tokens`] for display.
pub fn compute_reward(
    material: MaterialType,
    weight_kg: f64,
    active: &[EnvironmentalFactor],
) -> Result<f64> {
    validate_weight(weight_kg)?;

    let environmental = strongest_factor(material, active)
        .map(|f| f.multiplier)
        .unwrap_or(1.0);

    Ok(BASE_RATE * material.multiplier() * weight_kg * environmental)
}

/// Round a token amount for display
pub fn round_tokens(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Itemised reward calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardQuote {
    pub material: MaterialType,
    pub weight_kg: f64,
    pub base_rate: f64,
    pub material_multiplier: f64,
    pub environmental_factor: f64,
    /// Campaign that supplied the environmental factor, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_campaign: Option<String>,
    pub tokens: f64,
    pub evaluated_on: NaiveDate,
}

/// Reward calculator bound to a campaign calendar
#[derive(Debug, Clone, Default)]
pub struct RewardCalculator {
    factors: Vec<EnvironmentalFactor>,
}

impl RewardCalculator {
    /// Create a calculator, rejecting any invalid campaign
    pub fn new(factors: Vec<EnvironmentalFactor>) -> Result<Self> {
        for factor in &factors {
            factor.validate()?;
        }
        Ok(Self { factors })
    }

    /// All campaigns known to this calculator
    pub fn factors(&self) -> &[EnvironmentalFactor] {
        &self.factors
    }

    /// Campaigns running on `date`
    pub fn active_on(&self, date: NaiveDate) -> Vec<EnvironmentalFactor> {
        active_factors(&self.factors, date)
    }

    /// Token amount for a disposal evaluated on `date`
    pub fn reward(&self, material: MaterialType, weight_kg: f64, date: NaiveDate) -> Result<f64> {
        compute_reward(material, weight_kg, &self.active_on(date))
    }

    /// Itemised reward for a disposal evaluated on `date`
    pub fn quote(
        &self,
        material: MaterialType,
        weight_kg: f64,
        date: NaiveDate,
    ) -> Result<RewardQuote> {
        let active = self.active_on(date);
        let tokens = compute_reward(material, weight_kg, &active)?;
        let applied = strongest_factor(material, &active);

        debug!(
            material = %material,
            weight_kg,
            tokens,
            campaign = applied.map(|f| f.name.as_str()).unwrap_or("none"),
            "Computed reward quote"
        );

        Ok(RewardQuote {
            material,
            weight_kg,
            base_rate: BASE_RATE,
            material_multiplier: material.multiplier(),
            environmental_factor: applied.map(|f| f.multiplier).unwrap_or(1.0),
            applied_campaign: applied.map(|f| f.name.clone()),
            tokens,
            evaluated_on: date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn earth_week() -> EnvironmentalFactor {
        EnvironmentalFactor::new(
            "Earth Week",
            "1.2x boost for Glass",
            [MaterialType::Glass],
            1.2,
            date(2025, 4, 20),
            date(2025, 4, 27),
        )
        .unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_metal_without_campaign() {
        let tokens = compute_reward(MaterialType::Metal, 2.3, &[]).unwrap();
        assert!(approx(tokens, 34.5));
    }

    #[test]
    fn test_campaign_for_other_material_ignored() {
        let tokens = compute_reward(MaterialType::Plastic, 1.2, &[earth_week()]).unwrap();
        assert!(approx(tokens, 9.6));
    }

    #[test]
    fn test_campaign_boosts_matching_material() {
        let tokens = compute_reward(MaterialType::Glass, 1.0, &[earth_week()]).unwrap();
        assert!(approx(tokens, 10.0 * 1.2 * 1.2));
    }

    #[test]
    fn test_zero_weight_is_zero_tokens() {
        assert_eq!(compute_reward(MaterialType::EWaste, 0.0, &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_weight_rejected() {
        let err = compute_reward(MaterialType::Paper, -0.1, &[]).unwrap_err();
        assert!(err.is_validation());
        assert!(compute_reward(MaterialType::Paper, f64::NAN, &[]).is_err());
        assert!(compute_reward(MaterialType::Paper, f64::INFINITY, &[]).is_err());
    }

    #[test]
    fn test_overlapping_campaigns_take_strongest() {
        let mild = EnvironmentalFactor::new(
            "Glass Month",
            "",
            [MaterialType::Glass],
            1.1,
            date(2025, 4, 1),
            date(2025, 4, 30),
        )
        .unwrap();
        let active = vec![mild, earth_week()];
        let tokens = compute_reward(MaterialType::Glass, 1.0, &active).unwrap();
        assert!(approx(tokens, 10.0 * 1.2 * 1.2));
    }

    #[test]
    fn test_equal_campaigns_keep_calendar_order() {
        let glass = |name: &str| {
            EnvironmentalFactor::new(
                name,
                "",
                [MaterialType::Glass],
                1.2,
                date(2025, 4, 1),
                date(2025, 4, 30),
            )
            .unwrap()
        };
        let calc = RewardCalculator::new(vec![glass("First"), glass("Second")]).unwrap();

        let quote = calc.quote(MaterialType::Glass, 1.0, date(2025, 4, 10)).unwrap();
        assert_eq!(quote.applied_campaign.as_deref(), Some("First"));
        assert_eq!(quote.environmental_factor, 1.2);
    }

    #[test]
    fn test_active_window_inclusive() {
        let f = earth_week();
        assert!(f.is_active_on(date(2025, 4, 20)));
        assert!(f.is_active_on(date(2025, 4, 27)));
        assert!(!f.is_active_on(date(2025, 4, 19)));
        assert!(!f.is_active_on(date(2025, 4, 28)));
    }

    #[test]
    fn test_invalid_factor_rejected() {
        let (jan1, jan2) = (date(2025, 1, 1), date(2025, 1, 2));
        let glass = [MaterialType::Glass];

        assert!(EnvironmentalFactor::new("x", "", glass, 0.0, jan1, jan2).is_err());
        assert!(EnvironmentalFactor::new("x", "", glass, 1.5, jan2, jan1).is_err());
        assert!(EnvironmentalFactor::new("x", "", [], 1.5, jan1, jan2).is_err());
    }

    #[test]
    fn test_calculator_quote_uses_date() {
        let calc = RewardCalculator::new(vec![earth_week()]).unwrap();

        let during = calc.quote(MaterialType::Glass, 0.9, date(2025, 4, 22)).unwrap();
        assert_eq!(during.applied_campaign.as_deref(), Some("Earth Week"));
        assert!(approx(during.tokens, 10.0 * 1.2 * 0.9 * 1.2));

        let after = calc.quote(MaterialType::Glass, 0.9, date(2025, 5, 1)).unwrap();
        assert_eq!(after.applied_campaign, None);
        assert_eq!(after.environmental_factor, 1.0);
        assert!(approx(after.tokens, 10.8));
    }

    #[test]
    fn test_round_tokens() {
        assert_eq!(round_tokens(9.6000000001, 2), 9.6);
        assert_eq!(round_tokens(34.456, 1), 34.5);
    }
}
