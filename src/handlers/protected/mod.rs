// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route in this tier sits behind `jwt_auth_middleware`, which attaches
// an `AuthUser` to the request. Handlers pass `AuthUser::user_id` as the owner
// to every store call; nothing here reads or writes rows without one.
//
// Route Prefix: /api/recipe/*
pub mod recipe;
