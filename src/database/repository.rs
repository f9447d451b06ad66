use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::models::{NewRecipe, Recipe};
use crate::database::store::{not_found, RecipeStore};
use crate::types::{RecipeId, UserId};

const RECIPE_COLUMNS: &str = "id, user_id, title, time_minutes, price, description, link";

#[derive(Debug, FromRow)]
struct RecipeRow {
    id: i64,
    user_id: i64,
    title: String,
    time_minutes: i32,
    price: Decimal,
    description: String,
    link: String,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            owner: UserId(row.user_id),
            title: row.title,
            time_minutes: row.time_minutes,
            price: row.price,
            description: row.description,
            link: row.link,
        }
    }
}

/// Postgres-backed recipe store
pub struct PgRecipeStore {
    pool: PgPool,
}

impl PgRecipeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn list(&self, owner: UserId) -> Result<Vec<Recipe>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM recipes WHERE user_id = $1 ORDER BY id DESC",
            RECIPE_COLUMNS
        );
        let rows = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(owner.0)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Listed {} recipes for user {}", rows.len(), owner);
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn retrieve(&self, owner: UserId, id: RecipeId) -> Result<Recipe, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM recipes WHERE id = $1 AND user_id = $2",
            RECIPE_COLUMNS
        );
        sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(id)
            .bind(owner.0)
            .fetch_optional(&self.pool)
            .await?
            .map(Recipe::from)
            .ok_or_else(not_found)
    }

    async fn create(&self, owner: UserId, recipe: NewRecipe) -> Result<Recipe, DatabaseError> {
        let sql = format!(
            "INSERT INTO recipes (user_id, title, time_minutes, price, description, link) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            RECIPE_COLUMNS
        );
        let row = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(owner.0)
            .bind(&recipe.title)
            .bind(recipe.time_minutes)
            .bind(recipe.price)
            .bind(&recipe.description)
            .bind(&recipe.link)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Created recipe {} for user {}", row.id, owner);
        Ok(row.into())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
