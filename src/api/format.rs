use rust_decimal::Decimal;
use serde::Serialize;

use crate::database::models::Recipe;
use crate::types::RecipeId;

/// List representation: scalar fields only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub time_minutes: i32,
    /// Serialized as a string, e.g. "5.25"
    pub price: Decimal,
}

/// Single-item representation: everything in the summary plus the long fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    pub description: String,
    pub link: String,
}

pub fn recipe_summary(recipe: &Recipe) -> RecipeSummary {
    RecipeSummary {
        id: recipe.id,
        title: recipe.title.clone(),
        time_minutes: recipe.time_minutes,
        price: recipe.price,
    }
}

pub fn recipe_detail(recipe: &Recipe) -> RecipeDetail {
    RecipeDetail {
        summary: recipe_summary(recipe),
        description: recipe.description.clone(),
        link: recipe.link.clone(),
    }
}

pub fn recipe_summaries(recipes: &[Recipe]) -> Vec<RecipeSummary> {
    recipes.iter().map(recipe_summary).collect()
}
