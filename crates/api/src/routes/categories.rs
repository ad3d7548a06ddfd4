//! Category routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extractors::JsonBody,
    middleware::auth::AuthUser,
};
use tally_core::category::CategoryInput;
use tally_store::CategoryRepository;

const DUPLICATE_NAME: &str = "A category with this name already exists";

/// Creates the category router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

/// GET /categories - List the caller's categories.
async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let categories = CategoryRepository::new(state.store.clone())
        .list_for_user(auth.user_id())
        .await?;

    Ok(Json(json!({ "categories": categories })))
}

/// POST /categories - Create a category.
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<CategoryInput>,
) -> ApiResult<impl IntoResponse> {
    let category = payload.validate()?;
    let repo = CategoryRepository::new(state.store.clone());

    if repo.name_exists(auth.user_id(), &category.name, None).await? {
        return Err(ApiError::conflict(DUPLICATE_NAME));
    }

    let created = repo.create(auth.user_id(), &category).await?;
    info!(user_id = %auth.user_id(), category_id = %created.id, "Category created");

    Ok((StatusCode::CREATED, Json(json!({ "category": created }))))
}

/// GET /categories/{id} - Fetch one category.
async fn get_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let category = CategoryRepository::new(state.store.clone())
        .find_for_user(auth.user_id(), &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category"))?;

    Ok(Json(json!({ "category": category })))
}

/// PUT /categories/{id} - Update name and/or color.
async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<CategoryInput>,
) -> ApiResult<impl IntoResponse> {
    let patch = payload.validate_patch()?;
    let repo = CategoryRepository::new(state.store.clone());

    if let Some(name) = &patch.name
        && repo.name_exists(auth.user_id(), name, Some(&id)).await?
    {
        return Err(ApiError::conflict(DUPLICATE_NAME));
    }

    let category = repo
        .update(auth.user_id(), &id, &patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Category"))?;

    Ok(Json(json!({ "category": category })))
}

/// DELETE /categories/{id} - Remove a category.
async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let deleted = CategoryRepository::new(state.store.clone())
        .delete(auth.user_id(), &id)
        .await?;
    if !deleted {
        return Err(ApiError::not_found("Category"));
    }

    info!(user_id = %auth.user_id(), category_id = %id, "Category deleted");
    Ok(Json(json!({ "success": true })))
}
