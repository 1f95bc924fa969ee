use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::PantryStore;

/// Multiplier applied to an item's confidence per elapsed day.
pub const DAILY_DECAY_FACTOR: f32 = 0.97;
/// Below this confidence an item is considered likely depleted.
pub const LOW_STOCK_THRESHOLD: f32 = 0.25;

/// A pantry item whose confidence sits below the low-stock threshold after a
/// decay pass; the restock coordinator turns these into shopping entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockSuggestion {
    pub name: String,
    pub suggested_qty: Option<f32>,
    pub unit: Option<String>,
}

impl PantryStore {
    /// Attenuate every active item's confidence for the time elapsed since
    /// the later of its `last_seen_at` and the previous pass, then report
    /// the items now under [`LOW_STOCK_THRESHOLD`].
    ///
    /// The pass anchors on `last_decay_at`, so running it twice at the same
    /// instant changes nothing. Confidence is bounded below by zero through
    /// the multiplicative curve; an item without a confidence value starts
    /// from 1.0. Used items are skipped entirely.
    pub fn apply_decay(&mut self, now: DateTime<Utc>) -> Vec<RestockSuggestion> {
        let pass_anchor = self.last_decay_at();
        let mut low_stock = Vec::new();

        for item in self.items_mut().iter_mut().filter(|i| !i.used) {
            let anchor = match pass_anchor {
                Some(at) if at > item.last_seen_at => at,
                _ => item.last_seen_at,
            };
            let elapsed_secs = (now - anchor).num_seconds().max(0);
            let elapsed_days = elapsed_secs as f32 / 86_400.0;
            let factor = DAILY_DECAY_FACTOR.powf(elapsed_days);

            let confidence = item.confidence.unwrap_or(1.0) * factor;
            item.confidence = Some(confidence);

            if confidence < LOW_STOCK_THRESHOLD {
                low_stock.push(RestockSuggestion {
                    name: item.name.clone(),
                    suggested_qty: item.quantity,
                    unit: item.unit.clone(),
                });
            }
        }

        self.set_last_decay_at(now);
        debug!(low_stock = low_stock.len(), "decay pass complete");
        low_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewPantryItem;
    use chrono::{Duration, TimeZone};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, 9, 0, 0).unwrap()
    }

    #[test]
    fn decay_is_monotone_and_anchored() {
        let mut store = PantryStore::new();
        store.add_item(NewPantryItem::manual("milk"), day(1));

        store.apply_decay(day(11));
        let after_ten_days = store.items()[0].confidence.unwrap();
        let expected = DAILY_DECAY_FACTOR.powf(10.0);
        assert!((after_ten_days - expected).abs() < 1e-4);

        // Re-running at the same instant is a no-op.
        store.apply_decay(day(11));
        assert!((store.items()[0].confidence.unwrap() - after_ten_days).abs() < 1e-6);

        // More elapsed time only lowers it further.
        store.apply_decay(day(12));
        assert!(store.items()[0].confidence.unwrap() < after_ten_days);
    }

    #[test]
    fn items_under_threshold_are_reported() {
        let mut store = PantryStore::new();
        store.add_item(
            NewPantryItem {
                name: "cream".to_string(),
                quantity: Some(1.0),
                unit: Some("cup".to_string()),
                source: Default::default(),
                confidence: Some(0.3),
            },
            day(1),
        );

        // 0.3 * 0.97^10 ≈ 0.22, under the 0.25 threshold.
        let low = store.apply_decay(day(1) + Duration::days(10));
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "cream");
        assert_eq!(low[0].suggested_qty, Some(1.0));
        assert_eq!(low[0].unit.as_deref(), Some("cup"));
    }

    #[test]
    fn used_items_do_not_decay_or_report() {
        let mut store = PantryStore::new();
        store.add_item(
            NewPantryItem {
                name: "butter".to_string(),
                quantity: None,
                unit: None,
                source: Default::default(),
                confidence: Some(0.1),
            },
            day(1),
        );
        let id = store.items()[0].id.clone();
        store.toggle_used(&id);

        let low = store.apply_decay(day(20));
        assert!(low.is_empty());
        assert_eq!(store.items()[0].confidence, Some(0.1));
    }
}
