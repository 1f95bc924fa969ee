use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Grocery-store bucket used to group the shopping list for display.
#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum Aisle {
    Produce,
    Proteins,
    Dairy,
    Bakery,
    Frozen,
    Pantry,
    Misc,
}

const PRODUCE_KEYWORDS: &[&str] = &[
    "tomato", "onion", "garlic", "lettuce", "carrot", "celery", "pepper", "cucumber", "zucchini",
    "broccoli", "cauliflower", "spinach", "kale", "cabbage", "potato", "mushroom", "avocado",
    "eggplant", "squash", "ginger", "cilantro", "parsley", "basil", "mint", "apple", "banana",
    "orange", "lemon", "lime", "berry", "grape", "mango", "peach", "melon", "fruit", "vegetable",
];

const PROTEIN_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "turkey", "lamb", "fish", "salmon", "tuna", "shrimp", "tofu",
    "tempeh", "sausage", "bacon", "ham", "steak", "mince",
];

const DAIRY_KEYWORDS: &[&str] = &[
    "milk", "cheese", "yogurt", "butter", "cream", "egg",
];

const BAKERY_KEYWORDS: &[&str] = &[
    "bread", "bagel", "bun", "roll", "tortilla", "croissant", "muffin", "pita", "baguette",
];

const FROZEN_KEYWORDS: &[&str] = &["frozen"];

const PANTRY_KEYWORDS: &[&str] = &[
    "rice", "pasta", "noodle", "flour", "sugar", "oil", "vinegar", "salt", "spice", "sauce",
    "canned", "bean", "lentil", "oats", "cereal", "stock", "broth", "honey", "paste",
];

/// Stateless service mapping item names to aisles by keyword containment.
/// Aisles are tried in taxonomy order and the first hit wins; anything
/// unrecognised lands in [`Aisle::Misc`].
pub struct AisleClassifier;

impl AisleClassifier {
    pub fn classify(item_name: &str) -> Aisle {
        let normalized = item_name.trim().to_lowercase();

        for (aisle, keywords) in [
            (Aisle::Produce, PRODUCE_KEYWORDS),
            (Aisle::Proteins, PROTEIN_KEYWORDS),
            (Aisle::Dairy, DAIRY_KEYWORDS),
            (Aisle::Bakery, BAKERY_KEYWORDS),
            (Aisle::Frozen, FROZEN_KEYWORDS),
            (Aisle::Pantry, PANTRY_KEYWORDS),
        ] {
            if keywords.iter().any(|k| normalized.contains(k)) {
                return aisle;
            }
        }

        Aisle::Misc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_produce() {
        assert_eq!(AisleClassifier::classify("tomato"), Aisle::Produce);
        assert_eq!(AisleClassifier::classify("cherry tomatoes"), Aisle::Produce);
        assert_eq!(AisleClassifier::classify("Lemon"), Aisle::Produce);
    }

    #[test]
    fn classifies_proteins() {
        assert_eq!(AisleClassifier::classify("chicken breast"), Aisle::Proteins);
        assert_eq!(AisleClassifier::classify("smoked salmon"), Aisle::Proteins);
    }

    #[test]
    fn classifies_dairy() {
        assert_eq!(AisleClassifier::classify("milk"), Aisle::Dairy);
        assert_eq!(AisleClassifier::classify("greek yogurt"), Aisle::Dairy);
        assert_eq!(AisleClassifier::classify("eggs"), Aisle::Dairy);
    }

    #[test]
    fn classifies_bakery_frozen_pantry() {
        assert_eq!(AisleClassifier::classify("sourdough bread"), Aisle::Bakery);
        assert_eq!(AisleClassifier::classify("frozen peas"), Aisle::Frozen);
        assert_eq!(AisleClassifier::classify("basmati rice"), Aisle::Pantry);
    }

    #[test]
    fn unknown_names_default_to_misc() {
        assert_eq!(AisleClassifier::classify("unknown-xyz"), Aisle::Misc);
        assert_eq!(AisleClassifier::classify(""), Aisle::Misc);
    }

    #[test]
    fn first_matching_aisle_wins() {
        // "eggplant" contains the dairy keyword "egg", but produce is
        // checked first in taxonomy order.
        assert_eq!(AisleClassifier::classify("eggplant"), Aisle::Produce);
    }
}
