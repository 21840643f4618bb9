//! Reward formula integration tests
//!
//! Exercises the public reward API against the built-in campaign calendar:
//! - Worked examples from the rewards page
//! - Campaign windows and overlap resolution
//! - Linearity in weight

use binks_core::{
    active_factors, compute_reward, fixtures, round_tokens, EnvironmentalFactor, MaterialType,
    RewardCalculator,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn calendar() -> RewardCalculator {
    RewardCalculator::new(fixtures::environmental_factors().unwrap()).unwrap()
}

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn test_metal_outside_campaigns() {
    let tokens = calendar()
        .reward(MaterialType::Metal, 2.3, date(2025, 4, 14))
        .unwrap();
    assert_eq!(round_tokens(tokens, 2), 34.5);
}

#[test]
fn test_plastic_outside_campaigns() {
    let tokens = calendar()
        .reward(MaterialType::Plastic, 1.2, date(2025, 4, 16))
        .unwrap();
    assert_eq!(round_tokens(tokens, 2), 9.6);
}

#[test]
fn test_plastic_free_july_boost() {
    let quote = calendar()
        .quote(MaterialType::Plastic, 2.0, date(2025, 7, 15))
        .unwrap();
    assert_eq!(quote.applied_campaign.as_deref(), Some("Plastic-Free July"));
    assert_eq!(quote.environmental_factor, 1.5);
    assert_eq!(round_tokens(quote.tokens, 2), 24.0);
}

#[test]
fn test_campaign_ignores_other_materials() {
    let quote = calendar()
        .quote(MaterialType::Paper, 1.0, date(2025, 7, 15))
        .unwrap();
    assert_eq!(quote.applied_campaign, None);
    assert_eq!(quote.environmental_factor, 1.0);
    assert_eq!(round_tokens(quote.tokens, 2), 6.0);
}

#[test]
fn test_e_waste_drive_bounds() {
    let calculator = calendar();
    let inside_first = calculator.reward(MaterialType::EWaste, 1.0, date(2025, 5, 15)).unwrap();
    let inside_last = calculator.reward(MaterialType::EWaste, 1.0, date(2025, 5, 30)).unwrap();
    let after = calculator.reward(MaterialType::EWaste, 1.0, date(2025, 5, 31)).unwrap();

    assert_eq!(inside_first, 60.0);
    assert_eq!(inside_last, 60.0);
    assert_eq!(after, 30.0);
}

// =============================================================================
// Overlapping campaigns
// =============================================================================

#[test]
fn test_overlapping_factors_do_not_stack() {
    let weekend = EnvironmentalFactor::new(
        "Glass Weekend",
        "1.5x boost for Glass",
        [MaterialType::Glass],
        1.5,
        date(2025, 4, 26),
        date(2025, 4, 27),
    )
    .unwrap();

    let mut factors = fixtures::environmental_factors().unwrap();
    factors.push(weekend);

    let active = active_factors(&factors, date(2025, 4, 26));
    assert_eq!(active.len(), 2);

    let tokens = compute_reward(MaterialType::Glass, 1.0, &active).unwrap();
    assert_eq!(round_tokens(tokens, 2), 18.0);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_reward_is_linear_in_weight() {
    let calculator = calendar();
    let on = date(2025, 7, 4);

    for material in MaterialType::all() {
        for weight in [0.25, 0.5, 1.0, 3.0] {
            let single = calculator.reward(material, weight, on).unwrap();
            let double = calculator.reward(material, weight * 2.0, on).unwrap();
            assert_eq!(double, single * 2.0, "{} at {}kg", material, weight);
        }
    }
}

#[test]
fn test_zero_weight_earns_nothing() {
    for material in MaterialType::all() {
        assert_eq!(compute_reward(material, 0.0, &[]).unwrap(), 0.0);
    }
}

#[test]
fn test_invalid_weight_rejected() {
    let calculator = calendar();
    for weight in [-0.1, f64::NAN, f64::INFINITY] {
        let err = calculator
            .reward(MaterialType::Glass, weight, date(2025, 4, 1))
            .unwrap_err();
        assert!(err.is_validation());
    }
}
