use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};
use serde_json::Value;

use crate::api::{recipe_detail, recipe_summaries, RecipeDetail, RecipeSummary};
use crate::database::models::NewRecipe;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;

/// GET /api/recipe/recipes/ - List the caller's recipes, newest first
pub async fn get(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<RecipeSummary>> {
    let recipes = state.store.list(auth_user.user_id).await?;
    Ok(ApiResponse::success(recipe_summaries(&recipes)))
}

/// POST /api/recipe/recipes/ - Create a recipe owned by the caller
pub async fn post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<RecipeDetail> {
    let Json(body) = payload?;
    if !body.is_object() {
        return Err(ApiError::invalid_json("Request body must be a JSON object"));
    }

    // Validate fully before touching the store
    let new_recipe = NewRecipe::from_payload(&body).map_err(|errors| {
        tracing::debug!("Rejected recipe payload from user {}: {:?}", auth_user.user_id, errors);
        ApiError::from(errors)
    })?;

    let recipe = state.store.create(auth_user.user_id, new_recipe).await?;
    tracing::info!("User {} created recipe {}", auth_user.user_id, recipe.id);

    Ok(ApiResponse::created(recipe_detail(&recipe)))
}
