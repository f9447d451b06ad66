use axum::extract::{Extension, Path, State};

use crate::api::{recipe_detail, RecipeDetail};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::types::RecipeId;

/// GET /api/recipe/recipes/:id/ - Show one of the caller's recipes.
///
/// An id that is malformed, missing, or owned by someone else is a plain 404.
pub async fn get(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<RecipeDetail> {
    let id: RecipeId = id
        .parse()
        .map_err(|_| ApiError::not_found("Recipe not found"))?;

    let recipe = state.store.retrieve(auth_user.user_id, id).await?;
    Ok(ApiResponse::success(recipe_detail(&recipe)))
}
