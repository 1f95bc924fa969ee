pub mod dietary_filter;
pub mod ranker;

pub use dietary_filter::passes_hard_filters;
pub use ranker::{score_catalog, suggest, ScoredRecipe, PANTRY_MATCH_BONUS, QUICK_RECIPE_BONUS};
