//! Smart bin services: waste identification and disposal submission.
//!
//! The camera/ML model and the token ledger are external services. Only their
//! request/response contracts live here, together with simulated versions
//! that answer after a fixed delay. No timeout or retry policy is applied.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::disposal::DisposalRecord;
use crate::error::{BinksError, Result};
use crate::material::MaterialType;
use crate::reward::RewardCalculator;

/// Delay used by the simulated services
pub const SIMULATED_DELAY: Duration = Duration::from_secs(2);

/// Result of scanning an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteIdentification {
    pub material: MaterialType,
    /// Model confidence in percent (0..=100)
    pub confidence: u8,
    pub suggested_weight_kg: f64,
}

/// A disposal the user confirmed at the bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisposalRequest {
    pub timestamp: NaiveDateTime,
    pub material: MaterialType,
    pub weight_kg: f64,
}

/// Ledger answer for a submitted disposal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisposalReceipt {
    pub tokens_awarded: f64,
    pub record: DisposalRecord,
}

/// Camera + ML waste identification
#[async_trait]
pub trait WasteIdentifier: Send + Sync {
    async fn identify_waste(&self) -> Result<WasteIdentification>;
}

/// Ledger that records disposals and awards tokens
#[async_trait]
pub trait DisposalLedger: Send + Sync {
    async fn submit_disposal(&self, request: DisposalRequest) -> Result<DisposalReceipt>;
}

/// Identifier that always recognises the same item
pub struct SimulatedWasteIdentifier {
    delay: Duration,
    result: WasteIdentification,
}

impl SimulatedWasteIdentifier {
    pub fn new() -> Self {
        Self {
            delay: SIMULATED_DELAY,
            result: WasteIdentification {
                material: MaterialType::Plastic,
                confidence: 92,
                suggested_weight_kg: 0.34,
            },
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_result(mut self, result: WasteIdentification) -> Self {
        self.result = result;
        self
    }
}

impl Default for SimulatedWasteIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WasteIdentifier for SimulatedWasteIdentifier {
    async fn identify_waste(&self) -> Result<WasteIdentification> {
        tokio::time::sleep(self.delay).await;
        debug!(
            material = %self.result.material,
            confidence = self.result.confidence,
            "Waste identified"
        );
        Ok(self.result.clone())
    }
}

/// Ledger that prices disposals with the reward calculator and keeps them in memory
pub struct SimulatedLedger {
    delay: Duration,
    calculator: RewardCalculator,
    records: Mutex<Vec<DisposalRecord>>,
}

impl SimulatedLedger {
    pub fn new(calculator: RewardCalculator) -> Self {
        Self {
            delay: SIMULATED_DELAY,
            calculator,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Disposals accepted so far, oldest first
    pub async fn records(&self) -> Vec<DisposalRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl DisposalLedger for SimulatedLedger {
    async fn submit_disposal(&self, request: DisposalRequest) -> Result<DisposalReceipt> {
        // Price before waiting so invalid input fails fast
        let tokens = self.calculator.reward(
            request.material,
            request.weight_kg,
            request.timestamp.date(),
        )?;
        let record = DisposalRecord::new(
            request.timestamp,
            request.material,
            request.weight_kg,
            tokens,
        )?;

        tokio::time::sleep(self.delay).await;
        self.records.lock().await.push(record.clone());

        Ok(DisposalReceipt {
            tokens_awarded: tokens,
            record,
        })
    }
}

/// Two-step bin flow: scan an item, then confirm its weight
pub struct SmartBin {
    identifier: Arc<dyn WasteIdentifier>,
    ledger: Arc<dyn DisposalLedger>,
    pending: Mutex<Option<WasteIdentification>>,
}

impl SmartBin {
    pub fn new(identifier: Arc<dyn WasteIdentifier>, ledger: Arc<dyn DisposalLedger>) -> Self {
        Self {
            identifier,
            ledger,
            pending: Mutex::new(None),
        }
    }

    /// Identify the item in the bin; replaces any earlier scan
    pub async fn scan(&self) -> Result<WasteIdentification> {
        let identification = self.identifier.identify_waste().await?;
        *self.pending.lock().await = Some(identification.clone());
        Ok(identification)
    }

    /// The scan awaiting confirmation, if any
    pub async fn pending(&self) -> Option<WasteIdentification> {
        self.pending.lock().await.clone()
    }

    /// Submit the scanned item with the confirmed weight.
    ///
    /// The scan is kept when submission fails so the user can retry.
    pub async fn confirm(&self, weight_kg: f64, at: NaiveDateTime) -> Result<DisposalReceipt> {
        let mut pending = self.pending.lock().await;
        let identification = pending
            .clone()
            .ok_or_else(|| BinksError::validation("scan an item before confirming a disposal"))?;

        let receipt = self
            .ledger
            .submit_disposal(DisposalRequest {
                timestamp: at,
                material: identification.material,
                weight_kg,
            })
            .await?;

        *pending = None;
        info!(
            material = %identification.material,
            weight_kg,
            tokens = receipt.tokens_awarded,
            "Disposal confirmed"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(15, 45, 0)
            .unwrap()
    }

    fn bin(calculator: RewardCalculator) -> (Arc<SimulatedLedger>, SmartBin) {
        let identifier = Arc::new(SimulatedWasteIdentifier::new().with_delay(Duration::ZERO));
        let ledger = Arc::new(SimulatedLedger::new(calculator).with_delay(Duration::ZERO));
        let bin = SmartBin::new(identifier, ledger.clone());
        (ledger, bin)
    }

    #[tokio::test]
    async fn test_scan_then_confirm() {
        let (ledger, bin) = bin(RewardCalculator::default());

        let scanned = bin.scan().await.unwrap();
        assert_eq!(scanned.material, MaterialType::Plastic);
        assert_eq!(scanned.confidence, 92);

        let receipt = bin.confirm(scanned.suggested_weight_kg, at(2025, 4, 16)).await.unwrap();
        assert!((receipt.tokens_awarded - 10.0 * 0.8 * 0.34).abs() < 1e-9);
        assert!(bin.pending().await.is_none());
        assert_eq!(ledger.records().await.len(), 1);
    }

    #[tokio::test]
    async fn test_confirm_without_scan() {
        let (ledger, bin) = bin(RewardCalculator::default());
        let err = bin.confirm(1.0, at(2025, 4, 16)).await.unwrap_err();
        assert!(err.is_validation());
        assert!(ledger.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_confirm_keeps_scan() {
        let (ledger, bin) = bin(RewardCalculator::default());
        bin.scan().await.unwrap();

        assert!(bin.confirm(-2.0, at(2025, 4, 16)).await.is_err());
        assert!(bin.pending().await.is_some());
        assert!(ledger.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_ledger_applies_campaign_on_disposal_date() {
        let factors = crate::fixtures::environmental_factors().unwrap();
        let calculator = RewardCalculator::new(factors).unwrap();
        let ledger = SimulatedLedger::new(calculator).with_delay(Duration::ZERO);

        let receipt = ledger
            .submit_disposal(DisposalRequest {
                timestamp: at(2025, 7, 10),
                material: MaterialType::Plastic,
                weight_kg: 1.0,
            })
            .await
            .unwrap();
        assert!((receipt.tokens_awarded - 10.0 * 0.8 * 1.5).abs() < 1e-9);
    }
}
