use super::engine::cached_word_frequencies;
use super::error::ApiError;
use super::protocol::{FrequencyResponse, HealthResponse};
use super::request::{RawInput, RequestLimits};
use crate::cache::ranking::RankingCache;
use axum::extract::Request;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_word_frequency(
    Extension(cache): Extension<Arc<RankingCache>>,
    Extension(limits): Extension<RequestLimits>,
    request: Request,
) -> Result<Json<FrequencyResponse>, ApiError> {
    let input = RawInput::from_request(request, limits).await?;

    let request = input.validate(limits).inspect_err(|e| {
        tracing::info!("Rejected word-frequency request: {}", e);
    })?;

    let data = cached_word_frequencies(&request, &cache).await;
    Ok(Json(FrequencyResponse { data }))
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
