// handlers/protected/recipes/mod.rs - Recipe CRUD handlers
//
// Every handler here runs behind token_auth_middleware, so an AuthUser is
// always present in request extensions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{Recipe, RecipeInput};
use crate::error::ApiError;
use crate::middleware::AuthUser;

pub mod create; // POST /recipes
pub mod delete; // DELETE /recipes/:id
pub mod get; // GET /recipes/:id
pub mod list; // GET /recipes
pub mod update; // PATCH /recipes/:id

pub use create::recipe_create;
pub use delete::recipe_delete;
pub use get::recipe_get;
pub use list::recipe_list;
pub use update::recipe_update;

/// `{ "recipe": { ... } }`
#[derive(Debug, Serialize)]
pub struct RecipeBody {
    pub recipe: Recipe,
}

/// `{ "recipes": [ ... ] }`
#[derive(Debug, Serialize)]
pub struct RecipesBody {
    pub recipes: Vec<Recipe>,
}

/// Create and update payload. A missing or null `recipe` key is an empty submission.
#[derive(Debug, Deserialize)]
pub struct RecipeRequest {
    #[serde(default)]
    pub recipe: Option<RecipeInput>,
}

impl RecipeRequest {
    pub fn into_input(self) -> RecipeInput {
        self.recipe.unwrap_or_default()
    }
}

/// Ids that can't be parsed can't match a recipe either
fn parse_recipe_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::not_found("Recipe not found"))
}

/// Non-owners are answered exactly like unauthenticated callers
fn ensure_owner(recipe: &Recipe, user: &AuthUser) -> Result<(), ApiError> {
    if recipe.is_owned_by(user.id) {
        Ok(())
    } else {
        tracing::warn!("User {} ({}) is not the owner of recipe {}", user.email, user.id, recipe.id);
        Err(ApiError::unauthorized())
    }
}
