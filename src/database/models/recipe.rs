use rust_decimal::Decimal;

use crate::types::{RecipeId, UserId};

/// A stored recipe. `owner` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub owner: UserId,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: String,
    pub link: String,
}

/// Validated fields for a recipe that does not exist yet.
///
/// There is no owner here: the store binds one from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: String,
    pub link: String,
}

impl NewRecipe {
    pub fn into_recipe(self, id: RecipeId, owner: UserId) -> Recipe {
        Recipe {
            id,
            owner,
            title: self.title,
            time_minutes: self.time_minutes,
            price: self.price,
            description: self.description,
            link: self.link,
        }
    }
}
