//! Reward endpoints: multiplier table, campaign calendar and quotes.

use bytes::Bytes;
use chrono::NaiveDate;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use binks_core::{multiplier_table, EnvironmentalFactor, MaterialType, RewardQuote};

use crate::routes::{error_response, json_response};
use crate::server::AppState;
use crate::types::{BackendError, Result};

#[derive(Debug, Default, Deserialize)]
struct FactorsParams {
    date: Option<String>,
}

#[derive(Serialize)]
struct FactorView<'a> {
    #[serde(flatten)]
    factor: &'a EnvironmentalFactor,
    active: bool,
}

#[derive(Serialize)]
struct FactorsResponse<'a> {
    date: NaiveDate,
    factors: Vec<FactorView<'a>>,
}

/// Body of POST /api/rewards/quote
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub material: String,
    pub weight_kg: f64,
    /// Evaluation date; today (UTC) when omitted
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| BackendError::BadRequest(format!("date must be YYYY-MM-DD, got '{}'", raw)))
}

/// GET /api/materials
pub fn handle_materials() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &multiplier_table())
}

/// GET /api/factors[?date=YYYY-MM-DD]
pub fn handle_factors(state: &AppState, query: &str) -> Response<Full<Bytes>> {
    let date = match factors_date(query) {
        Ok(date) => date,
        Err(e) => return error_response(e),
    };

    let factors = state
        .calculator
        .factors()
        .iter()
        .map(|factor| FactorView {
            factor,
            active: factor.is_active_on(date),
        })
        .collect();

    json_response(StatusCode::OK, &FactorsResponse { date, factors })
}

fn factors_date(query: &str) -> Result<NaiveDate> {
    let params: FactorsParams = serde_urlencoded::from_str(query)?;
    match params.date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => parse_date(raw),
        None => Ok(today()),
    }
}

/// POST /api/rewards/quote
pub fn handle_quote(state: &AppState, body: &Bytes) -> Response<Full<Bytes>> {
    match quote(state, body) {
        Ok(quote) => json_response(StatusCode::OK, &quote),
        Err(e) => error_response(e),
    }
}

fn quote(state: &AppState, body: &Bytes) -> Result<RewardQuote> {
    let request: QuoteRequest = serde_json::from_slice(body)?;
    let material: MaterialType = request.material.parse()?;
    let date = request.date.unwrap_or_else(today);
    Ok(state.calculator.quote(material, request.weight_kg, date)?)
}
