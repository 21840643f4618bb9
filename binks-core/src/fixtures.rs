//! Built-in program data: seed initiatives, the campaign calendar and a
//! sample disposal history for the dashboard.

use chrono::{NaiveDate, NaiveDateTime};

use crate::disposal::DisposalRecord;
use crate::error::{BinksError, Result};
use crate::initiative::{Initiative, InitiativeCategory as Category, InitiativeStatus as Status};
use crate::material::MaterialType;
use crate::reward::EnvironmentalFactor;

fn date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| BinksError::validation(format!("bad fixture date '{}': {}", s, e)))
}

fn timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map_err(|e| BinksError::validation(format!("bad fixture timestamp '{}': {}", s, e)))
}

/// Campaigns that boost specific materials
pub fn environmental_factors() -> Result<Vec<EnvironmentalFactor>> {
    Ok(vec![
        EnvironmentalFactor::new(
            "Earth Week",
            "1.2x boost for Glass",
            [MaterialType::Glass],
            1.2,
            date("2025-04-20")?,
            date("2025-04-27")?,
        )?,
        EnvironmentalFactor::new(
            "Plastic-Free July",
            "1.5x boost for Plastic",
            [MaterialType::Plastic],
            1.5,
            date("2025-07-01")?,
            date("2025-07-31")?,
        )?,
        EnvironmentalFactor::new(
            "E-waste Drive",
            "2.0x boost for E-waste",
            [MaterialType::EWaste],
            2.0,
            date("2025-05-15")?,
            date("2025-05-30")?,
        )?,
    ])
}

/// Seed initiatives shown on the initiatives page
pub fn initiatives() -> Result<Vec<Initiative>> {
    Ok(vec![
        Initiative::new(
            "1",
            "Community Recycling Challenge",
            "Join our community recycling challenge! Collect plastic waste from your neighborhood and bring it to our BINKS stations. Help us reduce plastic pollution while earning rewards.",
            Category::Recycling,
            50,
            Status::Active,
            date("2025-04-01")?,
            date("2025-05-15")?,
        )?
        .with_short_description("Collect and recycle plastic waste in your community.")
        .with_progress(60)?
        .with_steps([
            "Register for the challenge",
            "Collect plastic waste",
            "Bring to BINKS stations",
            "Scan QR code to record your contribution",
        ])
        .with_image("https://images.unsplash.com/photo-1532996122724-e3c354a0b15b"),
        Initiative::new(
            "2",
            "E-Waste Collection Drive",
            "Electronic waste contains toxic materials that shouldn't end up in landfills. Bring your old electronics to our collection centers and earn rewards while helping protect the environment.",
            Category::EWaste,
            75,
            Status::Upcoming,
            date("2025-05-10")?,
            date("2025-06-10")?,
        )?
        .with_short_description("Properly dispose of electronic waste at designated centers.")
        .with_steps([
            "Register online",
            "Collect e-waste",
            "Visit collection center",
            "Get your reward token",
        ]),
        Initiative::new(
            "3",
            "Park Clean-Up Event",
            "Let's keep our parks clean and beautiful! Join our clean-up crew for a day of community service. We'll provide all necessary equipment. Your efforts will be tracked and rewarded through BINKS.",
            Category::CleanUp,
            40,
            Status::Active,
            date("2025-04-15")?,
            date("2025-04-30")?,
        )?
        .with_short_description("Join us for a day of cleaning our local parks.")
        .with_progress(30)?
        .with_steps([
            "Sign up",
            "Check-in at the park",
            "Collect provided supplies",
            "Clean your assigned area",
            "Check-out to claim rewards",
        ])
        .with_image("https://images.unsplash.com/photo-1615729947596-a598e5de0ab3"),
        Initiative::new(
            "4",
            "Composting Workshop",
            "Join our expert-led workshop to learn effective composting techniques. Participants will receive a starter kit and earn BINK tokens for implementing composting at home.",
            Category::Composting,
            35,
            Status::Upcoming,
            date("2025-05-05")?,
            date("2025-05-05")?,
        )?
        .with_short_description("Learn how to start composting at home and earn rewards.")
        .with_steps([
            "Register for the workshop",
            "Attend the session",
            "Set up your composting system",
            "Document your progress",
            "Earn rewards",
        ])
        .with_image("https://images.unsplash.com/photo-1506744038136-46273834b3fb"),
        Initiative::new(
            "5",
            "Office Recycling Program",
            "Transform your office into an eco-friendly workplace! Our program helps businesses implement effective waste sorting and recycling systems. Track your progress and earn corporate rewards.",
            Category::Recycling,
            100,
            Status::Active,
            date("2025-03-01")?,
            date("2025-06-30")?,
        )?
        .with_short_description("Implement waste sorting in your workplace with our guidance.")
        .with_progress(75)?
        .with_steps([
            "Register your company",
            "Schedule assessment",
            "Implement system",
            "Track metrics",
            "Receive rewards",
        ]),
        Initiative::new(
            "6",
            "River Clean-Up Campaign",
            "Our rivers need help! Join our campaign to clean up local waterways and prevent plastic from reaching the ocean. Equipment will be provided, and rewards will be based on participation and volume collected.",
            Category::CleanUp,
            60,
            Status::Completed,
            date("2025-02-10")?,
            date("2025-03-10")?,
        )?
        .with_short_description("Help remove plastic and debris from local waterways.")
        .with_progress(100)?
        .with_steps([
            "Register as volunteer",
            "Attend safety briefing",
            "Participate in clean-up",
            "Document your findings",
            "Claim rewards",
        ])
        .with_image("https://images.unsplash.com/photo-1500673922987-e212871fec22"),
    ])
}

/// Sample disposal history, newest first
pub fn disposal_history() -> Result<Vec<DisposalRecord>> {
    let rows = [
        ("2025-04-16 15:45", MaterialType::Plastic, 1.2, 9.6),
        ("2025-04-14 10:30", MaterialType::Metal, 2.3, 34.5),
        ("2025-04-12 09:00", MaterialType::Glass, 0.9, 10.8),
        ("2025-04-08 11:20", MaterialType::EWaste, 0.4, 12.0),
        ("2025-04-05 14:10", MaterialType::Paper, 1.8, 10.8),
        ("2025-04-02 09:15", MaterialType::Organic, 3.5, 14.0),
        ("2025-03-28 16:40", MaterialType::Plastic, 2.0, 16.0),
    ];

    rows.into_iter()
        .map(|(at, material, weight, tokens)| {
            DisposalRecord::new(timestamp(at)?, material, weight, tokens)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reward::RewardCalculator;

    #[test]
    fn test_fixtures_are_valid() {
        assert_eq!(initiatives().unwrap().len(), 6);
        assert_eq!(environmental_factors().unwrap().len(), 3);
        assert_eq!(disposal_history().unwrap().len(), 7);
    }

    #[test]
    fn test_history_matches_reward_formula() {
        let calculator = RewardCalculator::new(environmental_factors().unwrap()).unwrap();
        for record in disposal_history().unwrap() {
            let expected = calculator
                .reward(record.material, record.weight_kg, record.timestamp.date())
                .unwrap();
            assert!(
                (expected - record.tokens_awarded).abs() < 1e-6,
                "{} {}kg: expected {}, fixture has {}",
                record.material,
                record.weight_kg,
                expected,
                record.tokens_awarded
            );
        }
    }
}
