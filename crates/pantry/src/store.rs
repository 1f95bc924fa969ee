use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use tracing::debug;
use uuid::Uuid;

/// Confidence multiplier applied to matched items when a recipe is marked as
/// cooked. Monotone decreasing and deterministic for identical inputs.
pub const USAGE_CONFIDENCE_FACTOR: f32 = 0.4;

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
pub enum ItemSource {
    Photo,
    #[default]
    Manual,
}

/// One pantry entry. Merge identity is the trimmed lower-cased name, not the
/// id; the store keeps at most one entry per normalized name at insertion
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: String,
    pub name: String,
    pub quantity: Option<f32>,
    pub unit: Option<String>,
    pub source: ItemSource,
    pub confidence: Option<f32>,
    pub last_seen_at: DateTime<Utc>,
    pub used: bool,
}

impl PantryItem {
    pub fn normalized_name(&self) -> String {
        normalize(&self.name)
    }
}

/// Insertion draft; the store assigns the id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPantryItem {
    pub name: String,
    pub quantity: Option<f32>,
    pub unit: Option<String>,
    pub source: ItemSource,
    pub confidence: Option<f32>,
}

impl NewPantryItem {
    pub fn manual(name: &str) -> Self {
        NewPantryItem {
            name: name.to_string(),
            quantity: None,
            unit: None,
            source: ItemSource::Manual,
            confidence: None,
        }
    }
}

/// Output shape of the vision collaborator, committed as photo-sourced items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedItem {
    pub name: String,
    pub confidence: f32,
}

/// Snapshot of the items touched by the last mark-recipe-used adjustment,
/// kept so the immediately preceding confidence state can be restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub recipe_id: String,
    pub recipe_title: String,
    pub at: DateTime<Utc>,
    entries: Vec<UsageEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct UsageEntry {
    item_id: String,
    confidence: Option<f32>,
    used: bool,
}

/// The authoritative ingredient collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PantryStore {
    items: Vec<PantryItem>,
    last_decay_at: Option<DateTime<Utc>>,
    last_usage_event: Option<UsageEvent>,
}

pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn names_match(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a))
}

impl PantryStore {
    pub fn new() -> Self {
        PantryStore::default()
    }

    pub fn items(&self) -> &[PantryItem] {
        &self.items
    }

    /// Items still considered present (not consumed).
    pub fn active_items(&self) -> impl Iterator<Item = &PantryItem> {
        self.items.iter().filter(|i| !i.used)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&PantryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Insert or merge one item. An existing entry with the same normalized
    /// name absorbs the draft: quantities sum (each side defaulting to 1),
    /// `last_seen_at` refreshes, and an incoming confidence replaces the old
    /// one.
    pub fn add_item(&mut self, draft: NewPantryItem, now: DateTime<Utc>) -> &PantryItem {
        let key = normalize(&draft.name);
        if let Some(pos) = self
            .items
            .iter()
            .position(|i| i.normalized_name() == key)
        {
            let existing = &mut self.items[pos];
            existing.quantity =
                Some(existing.quantity.unwrap_or(1.0) + draft.quantity.unwrap_or(1.0));
            existing.last_seen_at = now;
            if draft.confidence.is_some() {
                existing.confidence = draft.confidence;
            }
            if draft.unit.is_some() {
                existing.unit = draft.unit;
            }
            debug!(name = %existing.name, "merged pantry item");
            return &self.items[pos];
        }

        let item = PantryItem {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            quantity: draft.quantity,
            unit: draft.unit,
            source: draft.source,
            confidence: draft.confidence,
            last_seen_at: now,
            used: false,
        };
        debug!(name = %item.name, source = %item.source, "added pantry item");
        let idx = self.items.len();
        self.items.push(item);
        &self.items[idx]
    }

    /// Batch insert in array order; later drafts may merge into entries the
    /// same batch created.
    pub fn add_items(&mut self, drafts: Vec<NewPantryItem>, now: DateTime<Utc>) {
        for draft in drafts {
            self.add_item(draft, now);
        }
    }

    /// Commit the vision collaborator's detections as photo-sourced items,
    /// routed through the same merge as manual adds.
    pub fn commit_detections(&mut self, detections: &[DetectedItem], now: DateTime<Utc>) {
        let drafts = detections
            .iter()
            .map(|d| NewPantryItem {
                name: d.name.clone(),
                quantity: None,
                unit: None,
                source: ItemSource::Photo,
                confidence: Some(d.confidence.clamp(0.0, 1.0)),
            })
            .collect();
        self.add_items(drafts, now);
    }

    /// Flip the used flag; returns false for an unknown id.
    pub fn toggle_used(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.used = !item.used;
                true
            }
            None => false,
        }
    }

    /// Delete an entry, handing it back so the caller can keep it for its
    /// own undo. The store retains no tombstone.
    pub fn remove_item(&mut self, id: &str) -> Option<PantryItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Mark every active item whose name bidirectionally substring-matches
    /// one of `ingredient_names` as used. Zero matches is a normal outcome.
    pub fn consume_for_recipe(&mut self, ingredient_names: &[String]) -> usize {
        let mut consumed = 0;
        for item in self.items.iter_mut().filter(|i| !i.used) {
            if ingredient_names.iter().any(|n| names_match(&item.name, n)) {
                item.used = true;
                consumed += 1;
            }
        }
        debug!(consumed, "consumed pantry items for recipe");
        consumed
    }

    /// Lower the confidence of every item matching the cooked recipe's
    /// ingredients and snapshot their prior state for a single-level undo.
    /// An item without a confidence value is treated as fully present.
    pub fn update_confidence_after_recipe(
        &mut self,
        recipe_id: &str,
        recipe_title: &str,
        ingredients: &[String],
        now: DateTime<Utc>,
    ) {
        let mut entries = Vec::new();
        for item in self.items.iter_mut() {
            if !ingredients.iter().any(|n| names_match(&item.name, n)) {
                continue;
            }
            entries.push(UsageEntry {
                item_id: item.id.clone(),
                confidence: item.confidence,
                used: item.used,
            });
            let base = item.confidence.unwrap_or(1.0);
            item.confidence = Some(base * USAGE_CONFIDENCE_FACTOR);
        }
        debug!(recipe_id, touched = entries.len(), "updated confidence after recipe");
        self.last_usage_event = Some(UsageEvent {
            recipe_id: recipe_id.to_string(),
            recipe_title: recipe_title.to_string(),
            at: now,
            entries,
        });
    }

    /// Restore the confidence/used snapshot taken by the last
    /// `update_confidence_after_recipe` call. Single level: a second undo
    /// with no intervening usage event returns false.
    pub fn undo_last_usage_event(&mut self) -> bool {
        let Some(event) = self.last_usage_event.take() else {
            return false;
        };
        for entry in event.entries {
            if let Some(item) = self.items.iter_mut().find(|i| i.id == entry.item_id) {
                item.confidence = entry.confidence;
                item.used = entry.used;
            }
        }
        true
    }

    pub(crate) fn last_decay_at(&self) -> Option<DateTime<Utc>> {
        self.last_decay_at
    }

    pub(crate) fn set_last_decay_at(&mut self, at: DateTime<Utc>) {
        self.last_decay_at = Some(at);
    }

    pub(crate) fn items_mut(&mut self) -> &mut [PantryItem] {
        &mut self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn add_merges_on_normalized_name() {
        let mut store = PantryStore::new();
        store.add_item(NewPantryItem::manual("Milk"), now());
        store.add_item(
            NewPantryItem {
                name: " milk ".to_string(),
                quantity: Some(2.0),
                unit: Some("l".to_string()),
                source: ItemSource::Photo,
                confidence: Some(0.9),
            },
            now(),
        );

        assert_eq!(store.items().len(), 1);
        let item = &store.items()[0];
        assert_eq!(item.quantity, Some(3.0)); // 1 (default) + 2
        assert_eq!(item.unit.as_deref(), Some("l"));
        assert_eq!(item.confidence, Some(0.9));
    }

    #[test]
    fn merge_keeps_existing_confidence_when_draft_has_none() {
        let mut store = PantryStore::new();
        store.commit_detections(
            &[DetectedItem {
                name: "egg".to_string(),
                confidence: 0.8,
            }],
            now(),
        );
        store.add_item(NewPantryItem::manual("egg"), now());

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].confidence, Some(0.8));
    }

    #[test]
    fn toggle_used_flips_and_reports_unknown_ids() {
        let mut store = PantryStore::new();
        store.add_item(NewPantryItem::manual("butter"), now());
        let id = store.items()[0].id.clone();

        assert!(store.toggle_used(&id));
        assert!(store.items()[0].used);
        assert!(store.toggle_used(&id));
        assert!(!store.items()[0].used);
        assert!(!store.toggle_used("missing"));
    }

    #[test]
    fn remove_returns_the_entry() {
        let mut store = PantryStore::new();
        store.add_item(NewPantryItem::manual("butter"), now());
        let id = store.items()[0].id.clone();

        let removed = store.remove_item(&id);
        assert_eq!(removed.map(|i| i.name), Some("butter".to_string()));
        assert!(store.items().is_empty());
        assert!(store.remove_item(&id).is_none());
    }
}
