use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
pub enum Diet {
    #[default]
    Regular,
    Vegetarian,
    Vegan,
    Pescatarian,
    Keto,
    GlutenFree,
}

impl Diet {
    /// Ingredient fragments a diet rules out. A recipe is excluded when any
    /// required ingredient name contains one of these fragments
    /// (case-insensitive).
    pub fn restricted_ingredients(&self) -> &'static [&'static str] {
        match self {
            Diet::Regular => &[],
            Diet::Vegetarian => &[
                "chicken", "beef", "pork", "bacon", "ham", "turkey", "lamb", "sausage", "salmon",
                "tuna", "shrimp", "anchov", "fish", "gelatin", "lard", "meat",
            ],
            Diet::Vegan => &[
                "chicken", "beef", "pork", "bacon", "ham", "turkey", "lamb", "sausage", "salmon",
                "tuna", "shrimp", "anchov", "fish", "gelatin", "lard", "meat", "milk", "butter",
                "cheese", "cream", "yogurt", "egg", "honey", "broth",
            ],
            Diet::Pescatarian => &[
                "chicken", "beef", "pork", "bacon", "ham", "turkey", "lamb", "sausage", "meat",
            ],
            Diet::Keto => &[
                "sugar", "bread", "pasta", "rice", "potato", "flour", "tortilla", "oats", "honey",
                "noodle",
            ],
            Diet::GlutenFree => &[
                "wheat", "flour", "bread", "pasta", "barley", "rye", "cracker", "breadcrumb",
                "soy sauce", "noodle",
            ],
        }
    }
}

/// User food preferences consulted by the ranker and the context digest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub diet: Diet,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub disliked_ingredients: Vec<String>,
}

impl Preferences {
    pub fn new(diet: Diet) -> Self {
        Preferences {
            diet,
            allergies: Vec::new(),
            disliked_ingredients: Vec::new(),
        }
    }

    pub fn is_allergic_to(&self, allergen: &str) -> bool {
        let normalized = allergen.trim().to_lowercase();
        self.allergies
            .iter()
            .any(|a| a.trim().to_lowercase() == normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_diet_restricts_nothing() {
        assert!(Diet::Regular.restricted_ingredients().is_empty());
    }

    #[test]
    fn vegan_restrictions_cover_vegetarian_ones() {
        let vegan = Diet::Vegan.restricted_ingredients();
        for fragment in Diet::Vegetarian.restricted_ingredients() {
            assert!(vegan.contains(fragment), "vegan missing {fragment}");
        }
    }

    #[test]
    fn allergy_match_is_case_insensitive() {
        let mut prefs = Preferences::new(Diet::Regular);
        prefs.allergies.push("Peanut".to_string());
        assert!(prefs.is_allergic_to("peanut"));
        assert!(prefs.is_allergic_to(" PEANUT "));
        assert!(!prefs.is_allergic_to("almond"));
    }
}
