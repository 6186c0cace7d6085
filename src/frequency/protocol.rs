//! Word-Frequency HTTP Protocol
//!
//! Defines the API endpoints and the response bodies returned by the service.
//! Request bodies are not modelled as DTOs because they arrive either as JSON or as
//! multipart form data; see `request::RawInput`.

use super::types::RankedEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// --- API Endpoints ---

/// Public endpoint computing the top-N words of a text or uploaded file.
pub const ENDPOINT_WORD_FREQUENCY: &str = "/api/word-frequency";
/// Liveness probe.
pub const ENDPOINT_HEALTH: &str = "/health";

// --- Data Transfer Objects ---

/// Successful response: ranked words, most frequent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyResponse {
    pub data: Vec<RankedEntry>,
}

/// Body of every error response.
///
/// `errors` is only present for validation failures and maps a field name (`text`,
/// `top`, `exclude`, `exclude.<index>`) to its messages.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
