use chrono::{DateTime, Utc};
use pantry::PantryStore;
use serde::{Deserialize, Serialize};
use shopping::{NewShoppingItem, RestockReason, ShoppingListEngine};
use tracing::info;

/// Outcome of one decay pass, for host-side logging and toasts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecayReport {
    /// Items found under the low-stock threshold.
    pub low_stock: usize,
    /// Shopping entries created this pass.
    pub queued: usize,
    /// Low-stock items already waiting unbought on the list.
    pub already_queued: usize,
}

/// Externally-triggered pass: decay pantry confidence, then queue a
/// low-stock shopping entry for anything that fell below the threshold and
/// is not already waiting on the list. Duplicate suppression rides on the
/// cart's own unbought-name check.
pub fn run_decay_pass(
    pantry: &mut PantryStore,
    shopping: &mut ShoppingListEngine,
    now: DateTime<Utc>,
) -> DecayReport {
    let mut report = DecayReport::default();

    for suggestion in pantry.apply_decay(now) {
        report.low_stock += 1;
        let outcome = shopping.add_item(
            NewShoppingItem {
                name: suggestion.name,
                suggested_qty: suggestion.suggested_qty,
                unit: suggestion.unit,
                reason: RestockReason::LowStock,
            },
            now,
        );
        if outcome.success {
            report.queued += 1;
        } else {
            report.already_queued += 1;
        }
    }

    info!(
        low_stock = report.low_stock,
        queued = report.queued,
        "decay pass finished"
    );
    report
}
