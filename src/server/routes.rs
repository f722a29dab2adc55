// ==========================================
// Medication Shortage CDS Service - HTTP routes
// ==========================================
// Thin glue over the API layer; every handler returns either a JSON body
// or an ApiError, which maps to a distinct error response.
// ==========================================

use crate::api::{ApiError, ApiResult, CheckReport, UpdateReport};
use crate::server::state::AppState;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/autocomplete/medication", get(autocomplete_medication))
        .route("/check-and-notify-external", post(check_and_notify_external))
        .route("/update-database-auto", post(update_database_auto))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ==========================================
// Handlers
// ==========================================

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub medication_name: Option<String>,
}

async fn check_and_notify_external(
    State(state): State<AppState>,
    Json(body): Json<CheckRequest>,
) -> ApiResult<Json<CheckReport>> {
    let name = body
        .medication_name
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_string();
    if name.is_empty() {
        return Err(ApiError::InvalidInput(
            "'medication_name' must be a non-empty string".to_string(),
        ));
    }

    let report = state.check_api.check_and_notify(&name).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    pub term: Option<String>,
}

async fn autocomplete_medication(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteParams>,
) -> ApiResult<Json<Vec<String>>> {
    let term = params.term.unwrap_or_default();
    let suggestions = state.medication_api.suggest(&term)?;
    Ok(Json(suggestions))
}

async fn update_database_auto(State(state): State<AppState>) -> ApiResult<Json<UpdateReport>> {
    let report = state.update_api.run().await?;
    Ok(Json(report))
}

async fn healthz(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let conn = crate::db::open_sqlite_connection(&state.db_path)
        .map_err(|e| ApiError::StoreUnavailable(e.to_string()))?;
    let schema_ok = crate::db::schema_present(&conn)
        .map_err(|e| ApiError::StoreUnavailable(e.to_string()))?;

    if !schema_ok {
        return Err(ApiError::StoreUnavailable(
            "dataset tables are missing".to_string(),
        ));
    }

    Ok(Json(json!({
        "status": "ok",
        "version": crate::VERSION,
    })))
}
