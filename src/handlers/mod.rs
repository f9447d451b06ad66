// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer token required)
pub mod public;    // Service info and health
pub mod protected; // Owner-scoped recipe endpoints
