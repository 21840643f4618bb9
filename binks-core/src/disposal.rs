//! Disposal records and dashboard aggregates.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{BinksError, Result};
use crate::material::MaterialType;

/// One item dropped into a smart bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisposalRecord {
    pub timestamp: NaiveDateTime,
    pub material: MaterialType,
    pub weight_kg: f64,
    pub tokens_awarded: f64,
}

impl DisposalRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        material: MaterialType,
        weight_kg: f64,
        tokens_awarded: f64,
    ) -> Result<Self> {
        if !weight_kg.is_finite() || weight_kg < 0.0 {
            return Err(BinksError::validation(format!(
                "disposal weight must be a non-negative number, got {}",
                weight_kg
            )));
        }
        if !tokens_awarded.is_finite() || tokens_awarded < 0.0 {
            return Err(BinksError::validation(format!(
                "awarded tokens must be a non-negative number, got {}",
                tokens_awarded
            )));
        }
        Ok(Self {
            timestamp,
            material,
            weight_kg,
            tokens_awarded,
        })
    }
}

/// Per-material totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialTotals {
    pub material: MaterialType,
    pub disposals: usize,
    pub weight_kg: f64,
    pub tokens: f64,
}

/// Dashboard summary over a disposal history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisposalSummary {
    pub total_disposals: usize,
    pub total_weight_kg: f64,
    pub total_tokens: f64,
    /// Materials with at least one disposal, in material order
    pub per_material: Vec<MaterialTotals>,
}

/// Aggregate a disposal history
pub fn summarize(records: &[DisposalRecord]) -> DisposalSummary {
    let per_material: Vec<MaterialTotals> = MaterialType::all()
        .into_iter()
        .filter_map(|material| {
            let matching: Vec<&DisposalRecord> =
                records.iter().filter(|r| r.material == material).collect();
            if matching.is_empty() {
                return None;
            }
            Some(MaterialTotals {
                material,
                disposals: matching.len(),
                weight_kg: matching.iter().map(|r| r.weight_kg).sum(),
                tokens: matching.iter().map(|r| r.tokens_awarded).sum(),
            })
        })
        .collect();

    DisposalSummary {
        total_disposals: records.len(),
        total_weight_kg: records.iter().map(|r| r.weight_kg).sum(),
        total_tokens: records.iter().map(|r| r.tokens_awarded).sum(),
        per_material,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_record_validation() {
        assert!(DisposalRecord::new(at(1), MaterialType::Glass, -1.0, 0.0).is_err());
        assert!(DisposalRecord::new(at(1), MaterialType::Glass, 1.0, -5.0).is_err());
        assert!(DisposalRecord::new(at(1), MaterialType::Glass, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_disposals, 0);
        assert_eq!(summary.total_tokens, 0.0);
        assert!(summary.per_material.is_empty());
    }

    #[test]
    fn test_summary_groups_by_material() {
        let records = vec![
            DisposalRecord::new(at(1), MaterialType::Plastic, 1.0, 8.0).unwrap(),
            DisposalRecord::new(at(2), MaterialType::Metal, 2.0, 30.0).unwrap(),
            DisposalRecord::new(at(3), MaterialType::Plastic, 2.0, 16.0).unwrap(),
        ];
        let summary = summarize(&records);

        assert_eq!(summary.total_disposals, 3);
        assert_eq!(summary.total_tokens, 54.0);
        assert_eq!(summary.per_material.len(), 2);
        assert_eq!(summary.per_material[0].material, MaterialType::Plastic);
        assert_eq!(summary.per_material[0].disposals, 2);
        assert_eq!(summary.per_material[0].weight_kg, 3.0);
        assert_eq!(summary.per_material[1].material, MaterialType::Metal);
    }
}
