//! Transaction routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extractors::JsonBody,
    middleware::auth::AuthUser,
};
use tally_core::transaction::{Direction, TransactionInput, parse_date};
use tally_store::{CategoryRepository, TransactionRepository, repositories::TransactionFilter};

/// Query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct ListTransactionsQuery {
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub direction: Option<String>,
    /// Category ID.
    pub category: Option<String>,
    /// Earliest date, inclusive.
    pub from: Option<String>,
    /// Latest date, inclusive.
    pub to: Option<String>,
}

impl ListTransactionsQuery {
    fn into_filter(self) -> ApiResult<TransactionFilter> {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Ok(TransactionFilter {
            direction: non_blank(self.direction)
                .map(|d| d.parse::<Direction>())
                .transpose()?,
            category_id: non_blank(self.category),
            from: non_blank(self.from).map(|d| parse_date(&d)).transpose()?,
            to: non_blank(self.to).map(|d| parse_date(&d)).transpose()?,
        })
    }
}

/// Creates the transaction router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

/// Rejects category IDs the caller does not own.
async fn ensure_category_owned(
    state: &AppState,
    user_id: &str,
    category_id: Option<&str>,
) -> ApiResult<()> {
    let Some(category_id) = category_id else {
        return Ok(());
    };
    let owned = CategoryRepository::new(state.store.clone())
        .find_for_user(user_id, category_id)
        .await?
        .is_some();
    if owned {
        Ok(())
    } else {
        Err(ApiError::validation("Category not found"))
    }
}

/// GET /transactions - List the caller's transactions, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = query.into_filter()?;
    let transactions = TransactionRepository::new(state.store.clone())
        .list_for_user(auth.user_id(), &filter)
        .await?;

    Ok(Json(json!({ "transactions": transactions })))
}

/// POST /transactions - Record a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<TransactionInput>,
) -> ApiResult<impl IntoResponse> {
    let transaction = payload.validate()?;
    ensure_category_owned(&state, auth.user_id(), transaction.category_id.as_deref()).await?;

    let created = TransactionRepository::new(state.store.clone())
        .create(auth.user_id(), &transaction)
        .await?;
    info!(user_id = %auth.user_id(), transaction_id = %created.id, "Transaction created");

    Ok((StatusCode::CREATED, Json(json!({ "transaction": created }))))
}

/// GET /transactions/{id} - Fetch one transaction.
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let transaction = TransactionRepository::new(state.store.clone())
        .find_for_user(auth.user_id(), &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Transaction"))?;

    Ok(Json(json!({ "transaction": transaction })))
}

/// PUT /transactions/{id} - Update any subset of fields.
///
/// An empty `category` detaches the transaction from its category.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<TransactionInput>,
) -> ApiResult<impl IntoResponse> {
    let patch = payload.validate_patch()?;
    let new_category = patch.category_id.as_ref().and_then(Option::as_deref);
    ensure_category_owned(&state, auth.user_id(), new_category).await?;

    let transaction = TransactionRepository::new(state.store.clone())
        .update(auth.user_id(), &id, &patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Transaction"))?;

    Ok(Json(json!({ "transaction": transaction })))
}

/// DELETE /transactions/{id} - Remove a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let deleted = TransactionRepository::new(state.store.clone())
        .delete(auth.user_id(), &id)
        .await?;
    if !deleted {
        return Err(ApiError::not_found("Transaction"));
    }

    info!(user_id = %auth.user_id(), transaction_id = %id, "Transaction deleted");
    Ok(Json(json!({ "success": true })))
}
