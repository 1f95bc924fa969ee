use pantry::PantryStore;
use serde::{Deserialize, Serialize};

/// Fixed ingredient → alternatives table. Lookup picks the longest key that
/// substring-matches the query, so "heavy cream" wins over "cream".
const SUBSTITUTIONS: &[(&str, &[&str])] = &[
    ("heavy cream", &["evaporated milk", "greek yogurt", "coconut cream"]),
    ("sour cream", &["greek yogurt", "creme fraiche", "plain yogurt"]),
    ("buttermilk", &["milk with lemon juice", "plain yogurt"]),
    ("cream", &["evaporated milk", "greek yogurt", "coconut cream"]),
    ("butter", &["margarine", "coconut oil", "olive oil"]),
    ("milk", &["oat milk", "almond milk", "soy milk"]),
    ("egg", &["applesauce", "mashed banana", "flaxseed meal"]),
    ("sugar", &["honey", "maple syrup", "agave syrup"]),
    ("flour", &["almond flour", "oat flour", "cornstarch"]),
    ("soy sauce", &["tamari", "coconut aminos"]),
    ("breadcrumbs", &["crushed crackers", "rolled oats"]),
    ("wine", &["stock", "grape juice"]),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstituteSuggestion {
    pub name: String,
    pub in_pantry: bool,
}

fn names_match(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// Alternatives for a missing ingredient, each annotated with whether it is
/// already sitting in the active pantry. `None` when the table knows no
/// entry for the ingredient.
pub fn suggest_substitutes(
    ingredient: &str,
    pantry: &PantryStore,
) -> Option<Vec<SubstituteSuggestion>> {
    let query = ingredient.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    let (_, alternatives) = SUBSTITUTIONS
        .iter()
        .filter(|(key, _)| names_match(&query, key))
        .max_by_key(|(key, _)| key.len())?;

    let suggestions = alternatives
        .iter()
        .take(3)
        .map(|alt| SubstituteSuggestion {
            name: alt.to_string(),
            in_pantry: pantry
                .active_items()
                .any(|item| names_match(&item.normalized_name(), &alt.to_lowercase())),
        })
        .collect();
    Some(suggestions)
}
