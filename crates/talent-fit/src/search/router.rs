use std::collections::BTreeMap;

use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::{parse, Clause, SearchRow};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub rows: Vec<SearchRowPayload>,
}

/// Row as posted by the list view; `haystack` defaults to the joined known fields.
#[derive(Debug, Deserialize)]
pub struct SearchRowPayload {
    pub id: String,
    #[serde(default)]
    pub haystack: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub clauses: Vec<Clause>,
    pub matches: Vec<String>,
    pub total: usize,
}

/// Stateless router filtering posted rows with a boolean query.
pub fn search_router() -> Router {
    Router::new().route("/api/v1/search", post(search_handler))
}

pub(crate) async fn search_handler(Json(request): Json<SearchRequest>) -> impl IntoResponse {
    let query = parse(&request.query);
    let total = request.rows.len();

    let rows: Vec<SearchRow> = request
        .rows
        .into_iter()
        .map(|payload| {
            let row = SearchRow::from_fields(payload.id, payload.fields);
            match payload.haystack {
                Some(haystack) => row.with_haystack(&haystack),
                None => row,
            }
        })
        .collect();
    let matches = query.filter(&rows).map(|row| row.id.clone()).collect();

    (
        StatusCode::OK,
        Json(SearchResponse {
            clauses: query.clauses().to_vec(),
            matches,
            total,
        }),
    )
}
