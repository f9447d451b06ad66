pub mod collection;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::get as recipe_list;
pub use collection::post as recipe_create;
pub use record::get as recipe_retrieve;
