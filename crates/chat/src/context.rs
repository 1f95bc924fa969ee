use std::fmt::Write as _;

use learning::LearningState;
use pantry::PantryStore;
use recipe::Recipe;
use shopping::ShoppingListEngine;
use user::Preferences;

/// Plain-text digest of the household state, handed to the conversational
/// agent as grounding context. Deliberately prose-shaped, not JSON: the
/// agent reads it the way a human assistant would skim a fridge note.
pub fn build_context_summary(
    prefs: &Preferences,
    pantry: &PantryStore,
    cart: &ShoppingListEngine,
    learning: Option<&LearningState>,
    suggestions: &[Recipe],
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Diet: {}", prefs.diet);
    if !prefs.allergies.is_empty() {
        let _ = writeln!(out, "Allergies: {}", prefs.allergies.join(", "));
    }
    if !prefs.disliked_ingredients.is_empty() {
        let _ = writeln!(out, "Dislikes: {}", prefs.disliked_ingredients.join(", "));
    }

    if let Some(state) = learning {
        let likes = state.summarize_likes();
        if !likes.is_empty() {
            let _ = writeln!(out, "Enjoys: {}", likes.join(", "));
        }
    }

    let pantry_lines: Vec<String> = pantry
        .active_items()
        .map(|item| match item.quantity {
            Some(qty) => format!("{} x{}", item.name, qty),
            None => item.name.clone(),
        })
        .collect();
    if pantry_lines.is_empty() {
        let _ = writeln!(out, "Pantry: empty");
    } else {
        let _ = writeln!(out, "Pantry: {}", pantry_lines.join(", "));
    }

    let open: Vec<String> = cart.open_items().map(|i| i.name.clone()).collect();
    if !open.is_empty() {
        let _ = writeln!(out, "Shopping list: {}", open.join(", "));
    }

    if !suggestions.is_empty() {
        let titles: Vec<&str> = suggestions.iter().map(|r| r.title.as_str()).collect();
        let _ = writeln!(out, "Current suggestions: {}", titles.join(", "));
    }

    out
}
