use learning::LearningState;
use pantry::PantryItem;
use recipe::Recipe;
use serde::Serialize;
use tracing::debug;
use user::Preferences;

use crate::dietary_filter::passes_hard_filters;

/// Points per required ingredient found in the active pantry.
pub const PANTRY_MATCH_BONUS: f32 = 2.0;
/// Flat bonus for recipes cookable in 25 minutes or less.
pub const QUICK_RECIPE_BONUS: f32 = 1.0;
/// Minimum share of required ingredients the pantry must cover. The
/// boundary is inclusive: exactly half stays eligible.
const MIN_PANTRY_MATCH_PCT: f32 = 0.5;

/// Intermediate scoring view: eligibility is an explicit flag, never a
/// zeroed score standing in for exclusion.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecipe<'a> {
    pub recipe: &'a Recipe,
    pub eligible: bool,
    pub score: f32,
    pub matched_needs: usize,
}

fn names_match(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

fn score_recipe<'a>(
    recipe: &'a Recipe,
    active_pantry: &[String],
    learning: Option<&LearningState>,
) -> ScoredRecipe<'a> {
    let needs = recipe.normalized_needs();

    let matched_needs = needs
        .iter()
        .filter(|need| active_pantry.iter().any(|item| names_match(item, need)))
        .count();

    let match_pct = if needs.is_empty() {
        1.0
    } else {
        matched_needs as f32 / needs.len() as f32
    };

    let mut score = matched_needs as f32 * PANTRY_MATCH_BONUS;
    if recipe.is_quick() {
        score += QUICK_RECIPE_BONUS;
    }

    // Only positive affinity boosts the score; negative affinity is
    // expressed through the hard filters, not subtracted here.
    if let Some(state) = learning {
        score += recipe
            .tags
            .iter()
            .map(|tag| state.tag_boost(tag).max(0.0))
            .sum::<f32>();
    }

    ScoredRecipe {
        recipe,
        eligible: match_pct >= MIN_PANTRY_MATCH_PCT,
        score,
        matched_needs,
    }
}

/// Score every recipe that survives the hard filters. Exposed so hosts can
/// show per-recipe match detail; exclusion stays an explicit flag here.
pub fn score_catalog<'a>(
    catalog: &'a [Recipe],
    prefs: &Preferences,
    pantry_items: &[PantryItem],
    learning: Option<&LearningState>,
) -> Vec<ScoredRecipe<'a>> {
    let active_pantry: Vec<String> = pantry_items
        .iter()
        .filter(|i| !i.used)
        .map(|i| i.normalized_name())
        .collect();

    catalog
        .iter()
        .filter(|recipe| passes_hard_filters(recipe, prefs))
        .map(|recipe| score_recipe(recipe, &active_pantry, learning))
        .collect()
}

/// Rank the catalog for the user: hard-filter, score by pantry overlap and
/// learned tag affinity, and return the top `count` recipes.
///
/// When nothing is eligible — typically a pantry too thin to cover half of
/// any recipe's ingredients — the result is empty; there is no fallback to
/// unmatched recipes.
pub fn suggest(
    catalog: &[Recipe],
    prefs: &Preferences,
    pantry_items: &[PantryItem],
    count: usize,
    learning: Option<&LearningState>,
) -> Vec<Recipe> {
    let mut scored: Vec<ScoredRecipe> = score_catalog(catalog, prefs, pantry_items, learning)
        .into_iter()
        .filter(|s| s.eligible && s.score > 0.0)
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.recipe.time_min.cmp(&b.recipe.time_min))
    });

    debug!(
        catalog = catalog.len(),
        eligible = scored.len(),
        "ranked recipe suggestions"
    );

    scored
        .into_iter()
        .take(count)
        .map(|s| s.recipe.clone())
        .collect()
}
