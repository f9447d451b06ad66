pub mod format;
pub mod payload;

pub use format::{recipe_detail, recipe_summaries, recipe_summary, RecipeDetail, RecipeSummary};
pub use payload::ValidationErrors;
