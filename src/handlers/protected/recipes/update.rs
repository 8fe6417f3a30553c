// handlers/protected/recipes/update.rs - PATCH /recipes/:id handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use tracing::info;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

use super::{ensure_owner, parse_recipe_id, RecipeRequest};

/// PATCH /recipes/:id - partial update, owner only.
///
/// Checks run in order: recipe exists (404), caller owns it (401), merged
/// fields valid (422). Blank values in the patch leave fields unchanged.
pub async fn recipe_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> ApiResult<()> {
    let id = parse_recipe_id(&id)?;
    let existing = state.recipes.find_by_id(id).await?;
    ensure_owner(&existing, &user)?;

    let Json(request) = payload?;
    state.recipes.update(id, &request.into_input()).await?;

    info!("User {} updated recipe {}", user.email, id);
    Ok(ApiResponse::no_content())
}
