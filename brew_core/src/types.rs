//! Core domain types for the BrewLog cup tracker.
//!
//! This module defines the recipe data structures used by the catalog and
//! the presentation layer. A logged cup itself has no structure beyond its
//! instant; cup logs are plain `Vec<DateTime<Utc>>` sequences ordered by
//! insertion.

use serde::{Deserialize, Serialize};

// ============================================================================
// Recipe Types
// ============================================================================

/// One segment of a recipe's ratio bar (e.g. "Espresso" at 1 part)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatioComponent {
    pub label: String,
    pub parts: u32,
}

/// An espresso drink definition (e.g. "Latte")
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub ratio_label: String,
    pub ratio_components: Vec<RatioComponent>,
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Total number of ratio parts across all components
    pub fn ratio_total(&self) -> u32 {
        self.ratio_components.iter().map(|c| c.parts).sum()
    }
}
