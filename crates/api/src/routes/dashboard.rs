//! Dashboard route.

use axum::{Json, Router, extract::State, routing::get};

use crate::{AppState, error::ApiResult, middleware::auth::AuthUser};
use tally_core::dashboard::{DashboardService, DashboardSummary};
use tally_store::TransactionRepository;

/// Creates the dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// GET /dashboard - Totals, expense breakdown, monthly series, and recent activity.
async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DashboardSummary>> {
    let transactions = TransactionRepository::new(state.store.clone())
        .all_for_user(auth.user_id())
        .await?;

    Ok(Json(DashboardService::summarize(&transactions)))
}
