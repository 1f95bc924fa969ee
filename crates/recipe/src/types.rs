use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single ingredient line of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: Option<f32>,
    pub unit: Option<String>,
}

/// Read-only catalog entry. The engine never mutates recipes; they are
/// reference data loaded alongside the application.
///
/// `needs` lists the required ingredient names used for pantry matching and
/// dietary filtering; `ingredients` carries the full quantified lines shown
/// to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub time_min: u32,
    pub kcal: Option<u32>,
    pub tags: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    pub needs: Vec<String>,
    #[serde(default)]
    pub optional: Vec<String>,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<String>,
    #[serde(default)]
    pub substitutions: HashMap<String, Vec<String>>,
}

impl Recipe {
    /// Required ingredient names, trimmed and lower-cased for matching.
    pub fn normalized_needs(&self) -> Vec<String> {
        self.needs
            .iter()
            .map(|n| n.trim().to_lowercase())
            .collect()
    }

    pub fn is_quick(&self) -> bool {
        self.time_min <= 25
    }
}
