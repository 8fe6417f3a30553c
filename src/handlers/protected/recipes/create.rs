// handlers/protected/recipes/create.rs - POST /recipes handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use tracing::info;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

use super::{RecipeBody, RecipeRequest};

/// POST /recipes - create a recipe owned by the caller.
///
/// Any `owner` in the body is ignored.
pub async fn recipe_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> ApiResult<RecipeBody> {
    let Json(request) = payload?;
    let recipe = state.recipes.create(&request.into_input(), user.id).await?;

    info!("User {} created recipe {}", user.email, recipe.id);
    Ok(ApiResponse::created(RecipeBody { recipe }))
}
