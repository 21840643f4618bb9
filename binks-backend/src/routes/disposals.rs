//! Disposal history for the rewards dashboard

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

use binks_core::{summarize, DisposalRecord, DisposalSummary};

use crate::routes::json_response;
use crate::server::AppState;

#[derive(Serialize)]
struct DisposalsResponse<'a> {
    history: &'a [DisposalRecord],
    summary: DisposalSummary,
}

/// GET /api/disposals
pub fn handle_disposals(state: &AppState) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &DisposalsResponse {
            history: &state.disposals,
            summary: summarize(&state.disposals),
        },
    )
}
