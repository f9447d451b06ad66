use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewRecipe, Recipe};
use crate::database::store::{not_found, RecipeStore};
use crate::types::{RecipeId, UserId};

/// In-process recipe store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    inner: RwLock<Table>,
}

#[derive(Debug, Default)]
struct Table {
    last_id: RecipeId,
    // Append-only, so rows stay in ascending id order
    rows: Vec<Recipe>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn list(&self, owner: UserId) -> Result<Vec<Recipe>, DatabaseError> {
        let table = self.inner.read().await;
        let recipes: Vec<Recipe> = table
            .rows
            .iter()
            .rev()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect();
        tracing::debug!("Listed {} recipes for user {}", recipes.len(), owner);
        Ok(recipes)
    }

    async fn retrieve(&self, owner: UserId, id: RecipeId) -> Result<Recipe, DatabaseError> {
        let table = self.inner.read().await;
        table
            .rows
            .iter()
            .find(|r| r.id == id && r.owner == owner)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create(&self, owner: UserId, recipe: NewRecipe) -> Result<Recipe, DatabaseError> {
        // Id assignment and insert under one write guard
        let mut table = self.inner.write().await;
        table.last_id += 1;
        let recipe = recipe.into_recipe(table.last_id, owner);
        table.rows.push(recipe.clone());
        tracing::debug!("Created recipe {} for user {}", recipe.id, owner);
        Ok(recipe)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    const ALICE: UserId = UserId(1);
    const BOB: UserId = UserId(2);

    fn sample(title: &str) -> NewRecipe {
        NewRecipe {
            title: title.to_string(),
            time_minutes: 22,
            price: Decimal::new(525, 2),
            description: "Sample recipe description".to_string(),
            link: "https://example.com/recipe.pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryRecipeStore::new();
        let r1 = store.create(ALICE, sample("one")).await.unwrap();
        let r2 = store.create(ALICE, sample("two")).await.unwrap();
        let r3 = store.create(ALICE, sample("three")).await.unwrap();

        let ids: Vec<_> = store.list(ALICE).await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![r3.id, r2.id, r1.id]);
    }

    #[tokio::test]
    async fn list_is_limited_to_owner() {
        let store = MemoryRecipeStore::new();
        store.create(ALICE, sample("a1")).await.unwrap();
        store.create(BOB, sample("b1")).await.unwrap();
        store.create(ALICE, sample("a2")).await.unwrap();
        store.create(BOB, sample("b2")).await.unwrap();

        let alice = store.list(ALICE).await.unwrap();
        assert_eq!(alice.len(), 2);
        assert!(alice.iter().all(|r| r.owner == ALICE));

        let titles: Vec<_> = store.list(BOB).await.unwrap().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["b2", "b1"]);
    }

    #[tokio::test]
    async fn empty_list_is_ok() {
        let store = MemoryRecipeStore::new();
        assert!(store.list(ALICE).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn foreign_recipe_looks_missing() {
        let store = MemoryRecipeStore::new();
        let bobs = store.create(BOB, sample("secret")).await.unwrap();

        let foreign = store.retrieve(ALICE, bobs.id).await.unwrap_err();
        let missing = store.retrieve(ALICE, 9_999).await.unwrap_err();
        assert_eq!(foreign.to_string(), missing.to_string());
        assert!(matches!(foreign, DatabaseError::NotFound(_)));

        assert_eq!(store.retrieve(BOB, bobs.id).await.unwrap(), bobs);
    }

    #[tokio::test]
    async fn create_binds_owner_and_fields() {
        let store = MemoryRecipeStore::new();
        let created = store.create(ALICE, sample("Sample")).await.unwrap();

        let fetched = store.retrieve(ALICE, created.id).await.unwrap();
        assert_eq!(fetched.owner, ALICE);
        assert_eq!(fetched.title, "Sample");
        assert_eq!(fetched.price, Decimal::new(525, 2));
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let store = Arc::new(MemoryRecipeStore::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            let owner = if i % 2 == 0 { ALICE } else { BOB };
            handles.push(tokio::spawn(async move {
                store.create(owner, sample("x")).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
        assert_eq!(store.list(ALICE).await.unwrap().len(), 16);
    }
}
