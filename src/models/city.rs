//! City domain model
//!
//! The record shape returned by the data-access layer and cached as JSON.

use serde::{Deserialize, Serialize};

/// A city record as stored in the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Stable numeric identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Region the city belongs to
    pub region: String,
    /// Current population
    pub population: u64,
    /// Free-form description shown on the city page
    pub description: String,
}
