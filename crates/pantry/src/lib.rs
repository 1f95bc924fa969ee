pub mod decay;
pub mod store;

pub use decay::{RestockSuggestion, DAILY_DECAY_FACTOR, LOW_STOCK_THRESHOLD};
pub use store::{
    DetectedItem, ItemSource, NewPantryItem, PantryItem, PantryStore, USAGE_CONFIDENCE_FACTOR,
};
