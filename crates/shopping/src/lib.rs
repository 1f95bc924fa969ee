pub mod categorization;
pub mod engine;
pub mod undo;

pub use categorization::{Aisle, AisleClassifier};
pub use engine::{
    CartOp, CartOutcome, NewShoppingItem, RestockReason, ShoppingItem, ShoppingListEngine,
};
pub use undo::UndoStack;
