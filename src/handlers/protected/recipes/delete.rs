// handlers/protected/recipes/delete.rs - DELETE /recipes/:id handler

use axum::{
    extract::{Path, State},
    Extension,
};
use tracing::info;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

use super::{ensure_owner, parse_recipe_id};

/// DELETE /recipes/:id - owner only. Deleting twice yields 404 the second time.
pub async fn recipe_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_recipe_id(&id)?;
    let existing = state.recipes.find_by_id(id).await?;
    ensure_owner(&existing, &user)?;

    state.recipes.delete(id).await?;

    info!("User {} deleted recipe {}", user.email, id);
    Ok(ApiResponse::no_content())
}
