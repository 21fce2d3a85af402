use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State as AxumState,
    },
    Json,
};
use loadboard_app::{
    app::{ingest_posting, search_postings},
    envelope::{PostingEnvelope, SearchEnvelope},
};
use loadboard_domain::{
    model::IngestRequest,
    service::{parse_limit, SearchFilter},
};

use crate::{error::AppError, state::State, utils::run_blocking};

/// Query parameters of the search endpoint (mock load-board API format)
#[derive(Debug, Default, PartialEq)]
pub struct SearchParams {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub equipment: Option<String>,
    pub status: Option<String>,
    pub limit: Option<String>,
}

impl SearchParams {
    /// The first value of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "origin" => &mut params.origin,
                "destination" => &mut params.destination,
                "equipment" => &mut params.equipment,
                "status" => &mut params.status,
                "limit" => &mut params.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

pub async fn search_handler(
    AxumState(state): AxumState<Arc<State>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<SearchEnvelope>, AppError> {
    let Query(pairs) = pairs.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
    let params = SearchParams::from_pairs(pairs);

    let limit = parse_limit(params.limit.as_deref(), state.config.default_search_limit)
        .map_err(loadboard_types::Error::from)?;
    let filter = SearchFilter::default()
        .with_origin(params.origin)
        .with_destination(params.destination)
        .with_equipment(params.equipment)
        .with_status(params.status)
        .with_limit(limit);

    let store = state.store.clone();
    let postings = run_blocking(move || search_postings(&store, &filter)).await?;

    Ok(Json(SearchEnvelope::new(postings)))
}

pub async fn ingest_handler(
    AxumState(state): AxumState<Arc<State>>,
    payload: Result<Json<IngestRequest>, JsonRejection>,
) -> Result<Json<PostingEnvelope>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;

    let store = state.store.clone();
    let record = run_blocking(move || ingest_posting(&store, &request)).await?;

    Ok(Json(PostingEnvelope::new(record)))
}

pub async fn health_handler() -> &'static str {
    "ok"
}
