//! Initiative catalog endpoints

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use binks_core::{Initiative, InitiativeQuery};

use crate::routes::{error_response, json_response};
use crate::server::AppState;
use crate::types::{BackendError, Result};

/// Query string of GET /api/initiatives; missing values mean "no filter"
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InitiativeParams {
    search: String,
    status: String,
    category: String,
    sort: String,
}

#[derive(Serialize)]
struct InitiativeListResponse {
    count: usize,
    initiatives: Vec<Initiative>,
}

fn parse_query(raw: &str) -> Result<InitiativeQuery> {
    let params: InitiativeParams = serde_urlencoded::from_str(raw)?;
    Ok(InitiativeQuery::parse(
        &params.search,
        &params.status,
        &params.category,
        &params.sort,
    )?)
}

/// GET /api/initiatives?search=&status=&category=&sort=
pub fn handle_list_initiatives(state: &AppState, query: &str) -> Response<Full<Bytes>> {
    let query = match parse_query(query) {
        Ok(q) => q,
        Err(e) => return error_response(e),
    };

    let initiatives = state.catalog.query(&query);
    debug!(matched = initiatives.len(), sort = %query.sort, "Initiative query");

    json_response(
        StatusCode::OK,
        &InitiativeListResponse {
            count: initiatives.len(),
            initiatives,
        },
    )
}

/// GET /api/initiatives/{id}
pub fn handle_get_initiative(state: &AppState, id: &str) -> Response<Full<Bytes>> {
    match state.catalog.get(id) {
        Some(initiative) => json_response(StatusCode::OK, initiative),
        None => error_response(BackendError::NotFound(format!("initiative '{}'", id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binks_core::{Filter, InitiativeStatus, SortKey};

    #[test]
    fn test_empty_query_is_default() {
        assert_eq!(parse_query("").unwrap(), InitiativeQuery::default());
    }

    #[test]
    fn test_query_decodes_form_encoding() {
        let raw = "search=park+clean&status=Active&category=All&sort=Newest";
        let query = parse_query(raw).unwrap();
        assert_eq!(query.search, "park clean");
        assert_eq!(query.status, Filter::Only(InitiativeStatus::Active));
        assert_eq!(query.category, Filter::All);
        assert_eq!(query.sort, SortKey::Newest);
    }
}
