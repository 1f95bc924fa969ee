use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use tracing::debug;
use uuid::Uuid;

use crate::categorization::{Aisle, AisleClassifier};
use crate::undo::UndoStack;

/// Why an entry landed on the list. Fixed at creation; never mutates.
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
    Serialize,
    Deserialize,
)]
pub enum RestockReason {
    LowStock,
    UsedUp,
    MissingFromRecipe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    pub suggested_qty: Option<f32>,
    pub unit: Option<String>,
    pub reason: RestockReason,
    pub bought: bool,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShoppingItem {
    pub name: String,
    pub suggested_qty: Option<f32>,
    pub unit: Option<String>,
    pub reason: RestockReason,
}

impl NewShoppingItem {
    pub fn new(name: &str, reason: RestockReason) -> Self {
        NewShoppingItem {
            name: name.to_string(),
            suggested_qty: None,
            unit: None,
            reason,
        }
    }
}

/// Inverse record of the last cart mutation, replayed by undo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartOp {
    Add { item: ShoppingItem },
    Remove { item: ShoppingItem },
    Update { before: ShoppingItem, after: ShoppingItem },
}

/// Structured result of a cart operation. Expected business conditions
/// (duplicate add, nothing to undo, unknown item) come back as
/// `success: false` with a user-presentable message; nothing here throws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartOutcome {
    pub success: bool,
    pub message: String,
    pub item: Option<ShoppingItem>,
}

impl CartOutcome {
    fn ok(message: impl Into<String>, item: Option<ShoppingItem>) -> Self {
        CartOutcome {
            success: true,
            message: message.into(),
            item,
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        CartOutcome {
            success: false,
            message: message.into(),
            item: None,
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Derived collection of items needing replenishment, with a single-step
/// operation-log undo over add/remove/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListEngine {
    items: Vec<ShoppingItem>,
    undo: UndoStack<CartOp>,
}

impl Default for ShoppingListEngine {
    fn default() -> Self {
        ShoppingListEngine::new()
    }
}

impl ShoppingListEngine {
    pub fn new() -> Self {
        ShoppingListEngine {
            items: Vec::new(),
            undo: UndoStack::new(1),
        }
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    /// Entries still to buy.
    pub fn open_items(&self) -> impl Iterator<Item = &ShoppingItem> {
        self.items.iter().filter(|i| !i.bought)
    }

    pub fn has_open_item(&self, name: &str) -> bool {
        let key = normalize(name);
        self.open_items().any(|i| normalize(&i.name) == key)
    }

    /// Queue an item. A matching unbought entry makes this a recorded-free
    /// no-op so callers (and the decay pass) can re-request blindly.
    pub fn add_item(&mut self, draft: NewShoppingItem, now: DateTime<Utc>) -> CartOutcome {
        if self.has_open_item(&draft.name) {
            return CartOutcome::rejected(format!("{} is already on the list", draft.name));
        }

        let item = ShoppingItem {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            suggested_qty: draft.suggested_qty,
            unit: draft.unit,
            reason: draft.reason,
            bought: false,
            added_at: now,
        };
        debug!(name = %item.name, reason = %item.reason, "added shopping item");
        self.items.push(item.clone());
        self.undo.push(CartOp::Add { item: item.clone() });
        CartOutcome::ok(format!("Added {} to the list", item.name), Some(item))
    }

    /// Delete the unbought entry matching an id or a name.
    pub fn remove_item(&mut self, id_or_name: &str) -> CartOutcome {
        let key = normalize(id_or_name);
        let pos = self
            .items
            .iter()
            .position(|i| !i.bought && (i.id == id_or_name || normalize(&i.name) == key));
        let Some(pos) = pos else {
            return CartOutcome::rejected(format!("{id_or_name} is not on the list"));
        };

        let item = self.items.remove(pos);
        debug!(name = %item.name, "removed shopping item");
        self.undo.push(CartOp::Remove { item: item.clone() });
        CartOutcome::ok(format!("Removed {} from the list", item.name), Some(item))
    }

    /// Merge the provided fields into the unbought entry with this name.
    pub fn update_item(
        &mut self,
        name: &str,
        qty: Option<f32>,
        unit: Option<String>,
    ) -> CartOutcome {
        let key = normalize(name);
        let pos = self
            .items
            .iter()
            .position(|i| !i.bought && normalize(&i.name) == key);
        let Some(pos) = pos else {
            return CartOutcome::rejected(format!("{name} is not on the list"));
        };

        let before = self.items[pos].clone();
        let item = &mut self.items[pos];
        if qty.is_some() {
            item.suggested_qty = qty;
        }
        if unit.is_some() {
            item.unit = unit;
        }
        let after = item.clone();
        debug!(name = %after.name, "updated shopping item");
        self.undo.push(CartOp::Update {
            before,
            after: after.clone(),
        });
        CartOutcome::ok(format!("Updated {}", after.name), Some(after))
    }

    /// Keep the entry for history/grouping; only the flag flips. Not
    /// recorded to the operation log.
    pub fn mark_bought(&mut self, id: &str) -> CartOutcome {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.bought = true;
                CartOutcome::ok(format!("Marked {} as bought", item.name), Some(item.clone()))
            }
            None => CartOutcome::rejected("No such item on the list"),
        }
    }

    /// Unbought items grouped by aisle, in taxonomy order; empty aisles are
    /// omitted.
    pub fn summarize_by_aisle(&self) -> Vec<(Aisle, Vec<ShoppingItem>)> {
        Aisle::VARIANTS
            .iter()
            .filter_map(|aisle| {
                let items: Vec<ShoppingItem> = self
                    .open_items()
                    .filter(|i| AisleClassifier::classify(&i.name) == *aisle)
                    .cloned()
                    .collect();
                if items.is_empty() {
                    None
                } else {
                    Some((*aisle, items))
                }
            })
            .collect()
    }

    /// Revert the most recent add/remove/update by replaying its inverse.
    pub fn undo_last_operation(&mut self) -> CartOutcome {
        let Some(op) = self.undo.pop() else {
            return CartOutcome::rejected("Nothing to undo");
        };

        match op {
            CartOp::Add { item } => {
                self.items.retain(|i| i.id != item.id);
                CartOutcome::ok(format!("Removed {} again", item.name), None)
            }
            CartOp::Remove { item } => {
                let restored = item.clone();
                self.items.push(item);
                CartOutcome::ok(
                    format!("Put {} back on the list", restored.name),
                    Some(restored),
                )
            }
            CartOp::Update { before, .. } => {
                match self.items.iter_mut().find(|i| i.id == before.id) {
                    Some(item) => {
                        *item = before.clone();
                        CartOutcome::ok(format!("Reverted {}", before.name), Some(before))
                    }
                    None => CartOutcome::rejected("The updated item is no longer on the list"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap()
    }

    #[test]
    fn duplicate_open_entries_are_rejected() {
        let mut cart = ShoppingListEngine::new();
        assert!(cart
            .add_item(NewShoppingItem::new("Milk", RestockReason::LowStock), now())
            .success);

        let outcome = cart.add_item(NewShoppingItem::new("milk", RestockReason::UsedUp), now());
        assert!(!outcome.success);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn bought_entries_do_not_block_requeueing() {
        let mut cart = ShoppingListEngine::new();
        cart.add_item(NewShoppingItem::new("milk", RestockReason::LowStock), now());
        let id = cart.items()[0].id.clone();
        cart.mark_bought(&id);

        assert!(cart
            .add_item(NewShoppingItem::new("milk", RestockReason::LowStock), now())
            .success);
        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn update_merges_only_provided_fields() {
        let mut cart = ShoppingListEngine::new();
        cart.add_item(
            NewShoppingItem {
                name: "rice".to_string(),
                suggested_qty: Some(1.0),
                unit: Some("kg".to_string()),
                reason: RestockReason::LowStock,
            },
            now(),
        );

        let outcome = cart.update_item("rice", Some(2.0), None);
        assert!(outcome.success);
        let item = &cart.items()[0];
        assert_eq!(item.suggested_qty, Some(2.0));
        assert_eq!(item.unit.as_deref(), Some("kg"));
    }

    #[test]
    fn reason_is_fixed_at_creation() {
        let mut cart = ShoppingListEngine::new();
        cart.add_item(NewShoppingItem::new("milk", RestockReason::LowStock), now());
        cart.update_item("milk", Some(2.0), None);
        assert_eq!(cart.items()[0].reason, RestockReason::LowStock);
    }
}
