use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use chat::{build_context_summary, ToolExecution, ToolExecutor, ToolInvocation};
use learning::{LearningState, Signal, SignalLog};
use pantry::{DetectedItem, NewPantryItem, PantryStore};
use recipe::Recipe;
use shopping::{CartOutcome, NewShoppingItem, ShoppingListEngine};
use user::Preferences;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
}

/// The whole engine state as one opaque blob. The persistence collaborator
/// stores and returns it without looking inside; the engine rehydrates from
/// it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSnapshot {
    pub version: u32,
    pub preferences: Preferences,
    pub pantry: PantryStore,
    pub shopping: ShoppingListEngine,
    pub signals: SignalLog,
    pub learning: Option<LearningState>,
}

impl AppSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(SnapshotError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: AppSnapshot =
            serde_json::from_str(json).map_err(SnapshotError::Decode)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }
}

/// Contract for the durable-storage collaborator. The host decides when to
/// call `save` (typically after each mutating engine call, batched or
/// debounced as it sees fit).
pub trait Persistence {
    fn load(&mut self) -> anyhow::Result<Option<AppSnapshot>>;
    fn save(&mut self, snapshot: &AppSnapshot) -> anyhow::Result<()>;
}

/// Explicit root state object owned by the host application layer. Each
/// component owns its collection exclusively; everything else goes through
/// the owning component's operations.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub preferences: Preferences,
    pub pantry: PantryStore,
    pub shopping: ShoppingListEngine,
    pub signals: SignalLog,
    pub learning: Option<LearningState>,
}

impl AppState {
    pub fn new(preferences: Preferences) -> Self {
        AppState {
            preferences,
            ..AppState::default()
        }
    }

    pub fn from_snapshot(snapshot: AppSnapshot) -> Self {
        AppState {
            preferences: snapshot.preferences,
            pantry: snapshot.pantry,
            shopping: snapshot.shopping,
            signals: snapshot.signals,
            learning: snapshot.learning,
        }
    }

    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            version: SNAPSHOT_VERSION,
            preferences: self.preferences.clone(),
            pantry: self.pantry.clone(),
            shopping: self.shopping.clone(),
            signals: self.signals.clone(),
            learning: self.learning.clone(),
        }
    }

    /// Append an interaction signal and re-fold the learning state.
    pub fn record_signal(&mut self, signal: Signal, now: DateTime<Utc>) {
        self.signals.record(signal);
        self.learning = Some(LearningState::recompute(
            self.signals.signals(),
            self.learning.as_ref(),
            now,
        ));
    }

    /// Ranked shortlist for the current pantry and preferences.
    pub fn suggestions(&self, catalog: &[Recipe], count: usize) -> Vec<Recipe> {
        suggestion::suggest(
            catalog,
            &self.preferences,
            self.pantry.items(),
            count,
            self.learning.as_ref(),
        )
    }

    /// "I cooked this": consume matching pantry items and lower their
    /// confidence, snapshotting first so the action can be undone once.
    /// Returns how many pantry items were consumed.
    pub fn mark_recipe_used(&mut self, recipe: &Recipe, now: DateTime<Utc>) -> usize {
        self.pantry
            .update_confidence_after_recipe(&recipe.id, &recipe.title, &recipe.needs, now);
        let consumed = self.pantry.consume_for_recipe(&recipe.needs);
        info!(recipe = %recipe.id, consumed, "marked recipe as used");
        consumed
    }

    /// Revert the last `mark_recipe_used`. Single level.
    pub fn undo_recipe_usage(&mut self) -> bool {
        self.pantry.undo_last_usage_event()
    }

    pub fn add_pantry_items(&mut self, drafts: Vec<NewPantryItem>, now: DateTime<Utc>) {
        self.pantry.add_items(drafts, now);
    }

    pub fn commit_detections(&mut self, detections: &[DetectedItem], now: DateTime<Utc>) {
        self.pantry.commit_detections(detections, now);
    }

    pub fn add_to_shopping_list(
        &mut self,
        draft: NewShoppingItem,
        now: DateTime<Utc>,
    ) -> CartOutcome {
        self.shopping.add_item(draft, now)
    }

    /// Dispatch a chat turn's tool-call batch against pantry and cart.
    pub fn handle_tool_calls(
        &mut self,
        invocations: &[ToolInvocation],
        now: DateTime<Utc>,
    ) -> Vec<ToolExecution> {
        ToolExecutor::execute_batch(&mut self.pantry, &mut self.shopping, invocations, now)
    }

    /// Plain-text digest handed to the conversational agent.
    pub fn context_summary(&self, suggestions: &[Recipe]) -> String {
        build_context_summary(
            &self.preferences,
            &self.pantry,
            &self.shopping,
            self.learning.as_ref(),
            suggestions,
        )
    }
}
