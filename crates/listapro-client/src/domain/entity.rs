//! Domain Layer - Core Entity Trait
//!
//! Every record the client caches carries a server-assigned identifier.

use std::fmt::Debug;
use std::hash::Hash;

/// Core trait for all cached entities
pub trait Entity: Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + Hash + Debug;

    /// Returns the entity's server-assigned identifier
    fn id(&self) -> Self::Id;
}
