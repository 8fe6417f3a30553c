use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::database::models::{Recipe, RecipeInput, User};
use crate::database::store::{RecipeStore, StoreError, UserStore};

/// In-process store used for local development and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    // insertion order doubles as creation order
    recipes: RwLock<Vec<Recipe>>,
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn create(&self, input: &RecipeInput, owner: Uuid) -> Result<Recipe, StoreError> {
        let recipe = Recipe::new(input.validate()?, owner);
        self.recipes.write().await.push(recipe.clone());
        debug!("Created recipe {} for {}", recipe.id, owner);
        Ok(recipe)
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.recipes.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Recipe, StoreError> {
        self.recipes
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: Uuid, patch: &RecipeInput) -> Result<Recipe, StoreError> {
        let mut recipes = self.recipes.write().await;
        let recipe = recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let merged = patch.merge_into(&recipe.fields())?;
        recipe.apply(merged);
        debug!("Updated recipe {}", id);
        Ok(recipe.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut recipes = self.recipes.write().await;
        let index = recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        recipes.remove(index);
        debug!("Deleted recipe {}", id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(token).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!("email {}", user.email)));
        }
        users.insert(user.token.clone(), user.clone());
        Ok(user)
    }
}
