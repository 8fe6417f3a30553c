// handlers/protected/recipes/list.rs - GET /recipes handler

use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::RecipesBody;

/// GET /recipes - every recipe, regardless of owner
pub async fn recipe_list(State(state): State<AppState>) -> ApiResult<RecipesBody> {
    let recipes = state.recipes.find_all().await?;
    Ok(ApiResponse::success(RecipesBody { recipes }))
}
