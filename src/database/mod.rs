pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryRecipeStore;
pub use models::{NewRecipe, Recipe};
pub use repository::PgRecipeStore;
pub use store::RecipeStore;
