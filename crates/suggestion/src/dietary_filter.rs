use recipe::Recipe;
use user::Preferences;

/// Hard eligibility gate applied before any scoring. A recipe failing any
/// check is excluded entirely, never merely penalized:
///
/// - diet: a required ingredient name containing one of the diet's
///   restricted fragments rules the recipe out;
/// - allergens: exact case-insensitive match against the user's allergies;
/// - dislikes: a required ingredient name containing a disliked fragment.
pub fn passes_hard_filters(recipe: &Recipe, prefs: &Preferences) -> bool {
    let needs = recipe.normalized_needs();

    let restricted = prefs.diet.restricted_ingredients();
    if needs
        .iter()
        .any(|need| restricted.iter().any(|fragment| need.contains(fragment)))
    {
        return false;
    }

    if recipe.allergens.iter().any(|a| prefs.is_allergic_to(a)) {
        return false;
    }

    let dislikes: Vec<String> = prefs
        .disliked_ingredients
        .iter()
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .collect();
    if needs
        .iter()
        .any(|need| dislikes.iter().any(|dislike| need.contains(dislike)))
    {
        return false;
    }

    true
}
