use std::collections::HashMap;

use crate::types::{Recipe, RecipeIngredient};

fn ingredient(name: &str, quantity: Option<f32>, unit: Option<&str>) -> RecipeIngredient {
    RecipeIngredient {
        name: name.to_string(),
        quantity,
        unit: unit.map(str::to_string),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Built-in starter catalog shipped with the app.
///
/// Kept deliberately small; the host can replace or extend it with a remote
/// catalog without touching the engine.
pub fn starter_catalog() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "veggie-stir-fry".to_string(),
            title: "Veggie Stir Fry".to_string(),
            time_min: 20,
            kcal: Some(420),
            tags: strings(&["quick", "vegetarian", "asian"]),
            allergens: strings(&["soy"]),
            needs: strings(&["broccoli", "carrot", "soy sauce", "rice"]),
            optional: strings(&["sesame seeds"]),
            ingredients: vec![
                ingredient("broccoli", Some(1.0), Some("head")),
                ingredient("carrot", Some(2.0), None),
                ingredient("soy sauce", Some(3.0), Some("tbsp")),
                ingredient("rice", Some(1.5), Some("cup")),
            ],
            steps: strings(&[
                "Cook the rice.",
                "Stir-fry the vegetables over high heat.",
                "Add soy sauce and toss, then serve over rice.",
            ]),
            substitutions: HashMap::from([(
                "soy sauce".to_string(),
                strings(&["tamari", "coconut aminos"]),
            )]),
        },
        Recipe {
            id: "chicken-pasta".to_string(),
            title: "Creamy Chicken Pasta".to_string(),
            time_min: 35,
            kcal: Some(680),
            tags: strings(&["comfort", "italian"]),
            allergens: strings(&["gluten", "dairy"]),
            needs: strings(&["chicken breast", "pasta", "cream", "garlic"]),
            optional: strings(&["parmesan"]),
            ingredients: vec![
                ingredient("chicken breast", Some(2.0), None),
                ingredient("pasta", Some(250.0), Some("g")),
                ingredient("cream", Some(200.0), Some("ml")),
                ingredient("garlic", Some(2.0), Some("clove")),
            ],
            steps: strings(&[
                "Boil the pasta until al dente.",
                "Sear the chicken, then add garlic and cream.",
                "Combine with the pasta and simmer briefly.",
            ]),
            substitutions: HashMap::new(),
        },
        Recipe {
            id: "shakshuka".to_string(),
            title: "Shakshuka".to_string(),
            time_min: 25,
            kcal: Some(390),
            tags: strings(&["quick", "vegetarian", "breakfast"]),
            allergens: strings(&["egg"]),
            needs: strings(&["egg", "tomato", "onion", "bell pepper"]),
            optional: strings(&["feta"]),
            ingredients: vec![
                ingredient("egg", Some(4.0), None),
                ingredient("tomato", Some(4.0), None),
                ingredient("onion", Some(1.0), None),
                ingredient("bell pepper", Some(1.0), None),
            ],
            steps: strings(&[
                "Soften the onion and pepper, then add tomatoes.",
                "Simmer into a sauce and crack the eggs on top.",
                "Cover until the whites are set.",
            ]),
            substitutions: HashMap::new(),
        },
        Recipe {
            id: "salmon-bowl".to_string(),
            title: "Salmon Rice Bowl".to_string(),
            time_min: 22,
            kcal: Some(540),
            tags: strings(&["quick", "pescatarian", "asian"]),
            allergens: strings(&["fish", "soy"]),
            needs: strings(&["salmon", "rice", "cucumber", "soy sauce"]),
            optional: strings(&["avocado"]),
            ingredients: vec![
                ingredient("salmon", Some(1.0), Some("fillet")),
                ingredient("rice", Some(1.0), Some("cup")),
                ingredient("cucumber", Some(0.5), None),
                ingredient("soy sauce", Some(2.0), Some("tbsp")),
            ],
            steps: strings(&[
                "Cook the rice and flake the cooked salmon over it.",
                "Top with cucumber and dress with soy sauce.",
            ]),
            substitutions: HashMap::new(),
        },
        Recipe {
            id: "lentil-curry".to_string(),
            title: "Red Lentil Curry".to_string(),
            time_min: 40,
            kcal: Some(460),
            tags: strings(&["vegan", "indian", "batch"]),
            allergens: vec![],
            needs: strings(&["red lentils", "coconut milk", "onion", "curry paste"]),
            optional: strings(&["cilantro"]),
            ingredients: vec![
                ingredient("red lentils", Some(1.0), Some("cup")),
                ingredient("coconut milk", Some(400.0), Some("ml")),
                ingredient("onion", Some(1.0), None),
                ingredient("curry paste", Some(2.0), Some("tbsp")),
            ],
            steps: strings(&[
                "Fry the onion with the curry paste.",
                "Add lentils and coconut milk, simmer until tender.",
            ]),
            substitutions: HashMap::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_catalog_entries_are_complete() {
        for recipe in starter_catalog() {
            assert!(!recipe.id.is_empty());
            assert!(!recipe.needs.is_empty());
            assert!(!recipe.steps.is_empty());
            assert!(recipe.time_min > 0);
        }
    }
}
