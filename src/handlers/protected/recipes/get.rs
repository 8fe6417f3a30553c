// handlers/protected/recipes/get.rs - GET /recipes/:id handler

use axum::extract::{Path, State};

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::{parse_recipe_id, RecipeBody};

/// GET /recipes/:id - any authenticated user may read any recipe
pub async fn recipe_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<RecipeBody> {
    let id = parse_recipe_id(&id)?;
    let recipe = state.recipes.find_by_id(id).await?;
    Ok(ApiResponse::success(RecipeBody { recipe }))
}
