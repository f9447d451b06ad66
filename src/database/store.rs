use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewRecipe, Recipe};
use crate::types::{RecipeId, UserId};

/// Owner-scoped access to the recipe collection.
///
/// Every method takes the caller as its first argument. There is no way to
/// read or write a recipe without naming whose it is, and rows belonging to
/// anyone else behave exactly as if they did not exist.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All recipes owned by `owner`, newest (highest id) first
    async fn list(&self, owner: UserId) -> Result<Vec<Recipe>, DatabaseError>;

    /// The recipe `id` if and only if it belongs to `owner`.
    /// Missing and foreign ids both yield `DatabaseError::NotFound`.
    async fn retrieve(&self, owner: UserId, id: RecipeId) -> Result<Recipe, DatabaseError>;

    /// Atomically insert `recipe` owned by `owner` and return it with its new id
    async fn create(&self, owner: UserId, recipe: NewRecipe) -> Result<Recipe, DatabaseError>;

    /// Reachability check behind `/health`
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

pub(crate) fn not_found() -> DatabaseError {
    DatabaseError::NotFound("Recipe not found".to_string())
}
