/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an authenticated caller.
///
/// Every store operation takes one of these as its first argument; the store
/// never works out who is asking on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId(id)
    }
}

/// Primary key of a recipe row. Assigned by the store, strictly increasing.
pub type RecipeId = i64;
