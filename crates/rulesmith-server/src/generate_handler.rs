use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use rulesmith::RuleRecord;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    /// Free-form description of the rule to build.
    /// Missing text is treated as empty and rejected as too short.
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub ok: bool,
    /// The input the rule was generated from, as stored.
    pub input: String,
    /// True when the model asked for clarification instead of guessing.
    pub needs_clarification: bool,
    /// The stored record, with its assigned id and timestamp. Clarification
    /// replies are stored too, with an empty expression.
    pub record: RuleRecord,
}

/// `POST /api/generate` - turn free text into a rule and store it.
pub async fn generate_rule(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let reply = state.copilot.generate_and_store(&req.text).await?;
    Ok(Json(GenerateResponse {
        ok: true,
        input: reply.record.user_input.clone(),
        needs_clarification: reply.needs_clarification,
        record: reply.record,
    }))
}
