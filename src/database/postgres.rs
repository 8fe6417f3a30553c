use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::database::manager::DatabaseManager;
use crate::database::models::{Recipe, RecipeInput, User};
use crate::database::store::{RecipeStore, StoreError, UserStore};

const RECIPE_COLUMNS: &str =
    "id, ingredient, temperature, time, fuel, directions, owner, created_at, updated_at";

/// Recipe and user persistence backed by PostgreSQL
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = DatabaseManager::connect(url, config).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl RecipeStore for PgStore {
    async fn create(&self, input: &RecipeInput, owner: Uuid) -> Result<Recipe, StoreError> {
        let recipe = Recipe::new(input.validate()?, owner);

        let sql = format!(
            "INSERT INTO recipes ({RECIPE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {RECIPE_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Recipe>(&sql)
            .bind(recipe.id)
            .bind(&recipe.ingredient)
            .bind(recipe.temperature)
            .bind(recipe.time)
            .bind(&recipe.fuel)
            .bind(&recipe.directions)
            .bind(recipe.owner)
            .bind(recipe.created_at)
            .bind(recipe.updated_at)
            .fetch_one(&self.pool)
            .await?;

        debug!("Created recipe {} for {}", created.id, owner);
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, StoreError> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY created_at, id");
        Ok(sqlx::query_as::<_, Recipe>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Recipe, StoreError> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1");
        sqlx::query_as::<_, Recipe>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: Uuid, patch: &RecipeInput) -> Result<Recipe, StoreError> {
        let mut recipe = self.find_by_id(id).await?;
        recipe.apply(patch.merge_into(&recipe.fields())?);

        // Last write wins; the row may have vanished since the read
        let sql = format!(
            "UPDATE recipes SET ingredient = $2, temperature = $3, time = $4, fuel = $5, directions = $6, updated_at = $7 \
             WHERE id = $1 RETURNING {RECIPE_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Recipe>(&sql)
            .bind(id)
            .bind(&recipe.ingredient)
            .bind(recipe.temperature)
            .bind(recipe.time)
            .bind(&recipe.fuel)
            .bind(&recipe.directions)
            .bind(recipe.updated_at)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))?;

        debug!("Updated recipe {}", id);
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        debug!("Deleted recipe {}", id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(DatabaseManager::health_check(&self.pool).await?)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, token, hashed_password, created_at, updated_at FROM users WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, token, hashed_password, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, email, token, hashed_password, created_at, updated_at",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.token)
        .bind(&user.hashed_password)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Conflict(format!("email {}", user.email)))
            }
            Err(e) => Err(e.into()),
        }
    }
}
