use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Recipe, RecipeInput, User, ValidationError};

/// Errors from recipe and user stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Recipe {0} not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Duplicate {0}")]
    Conflict(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence for recipe documents.
///
/// Implementations validate at this boundary: nothing that breaks a recipe
/// invariant is ever written.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Validates every required field, then persists a new recipe owned by `owner`
    async fn create(&self, input: &RecipeInput, owner: Uuid) -> Result<Recipe, StoreError>;

    /// Every recipe, oldest first
    async fn find_all(&self) -> Result<Vec<Recipe>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Recipe, StoreError>;

    /// Merges the non-blank fields of `patch` into the stored recipe
    async fn update(&self, id: Uuid, patch: &RecipeInput) -> Result<Recipe, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Token lookup for request authentication
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, StoreError>;

    async fn insert(&self, user: User) -> Result<User, StoreError>;
}
