pub mod recipe;

pub use recipe::{NewRecipe, Recipe};
