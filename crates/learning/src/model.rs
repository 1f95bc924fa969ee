use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::signal::Signal;

pub const MIN_WEIGHT: f32 = -8.0;
pub const MAX_WEIGHT: f32 = 12.0;
/// Weights are attenuated once per window of this many days.
pub const DECAY_DAYS: i64 = 7;
pub const DECAY_FACTOR: f32 = 0.9;

const LIKE_THRESHOLD: f32 = 1.5;
const TOP_TAG_THRESHOLD: f32 = 0.5;

/// Per-tag affinity weights learned from the signal log.
///
/// The state is a deterministic fold: `recompute` consumes only signals newer
/// than `last_updated`, so replaying the same log against the same state is a
/// no-op. Decay multiplies every weight by [`DECAY_FACTOR`] once the anchor
/// window of [`DECAY_DAYS`] has elapsed and is idempotent per anchor window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningState {
    pub tag_weights: HashMap<String, f32>,
    pub decay_anchor: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl LearningState {
    pub fn new(now: DateTime<Utc>) -> Self {
        LearningState {
            tag_weights: HashMap::new(),
            decay_anchor: now,
            last_updated: now,
        }
    }

    /// Fold the signal log into a new state.
    ///
    /// With no prior state every signal is processed; otherwise only signals
    /// strictly newer than `last_updated` contribute, which makes the
    /// recomputation resumable and safe against reprocessing.
    pub fn recompute(signals: &[Signal], current: Option<&LearningState>, now: DateTime<Utc>) -> Self {
        let mut state = match current {
            Some(existing) => existing.clone(),
            None => LearningState::new(now),
        };

        if now - state.decay_anchor >= Duration::days(DECAY_DAYS) {
            for weight in state.tag_weights.values_mut() {
                *weight = (*weight * DECAY_FACTOR).clamp(MIN_WEIGHT, MAX_WEIGHT);
            }
            state.decay_anchor = now;
        }

        let cutoff = current.map(|c| c.last_updated);
        let mut applied = 0usize;
        for signal in signals {
            if let Some(cutoff) = cutoff {
                if signal.at <= cutoff {
                    continue;
                }
            }
            let delta = signal.kind.delta();
            if delta == 0.0 {
                continue;
            }
            for tag in &signal.tags {
                let weight = state.tag_weights.entry(tag.clone()).or_insert(0.0);
                *weight = (*weight + delta).clamp(MIN_WEIGHT, MAX_WEIGHT);
            }
            applied += 1;
        }

        state.last_updated = now;
        debug!(applied, tags = state.tag_weights.len(), "recomputed learning state");
        state
    }

    /// Learned weight for a tag, 0.0 when the tag has never been seen.
    pub fn tag_boost(&self, tag: &str) -> f32 {
        self.tag_weights.get(tag).copied().unwrap_or(0.0)
    }

    /// Up to three tags the user demonstrably likes, strongest first.
    pub fn summarize_likes(&self) -> Vec<String> {
        let mut liked: Vec<(&String, f32)> = self
            .tag_weights
            .iter()
            .filter(|(_, w)| **w > LIKE_THRESHOLD)
            .map(|(tag, w)| (tag, *w))
            .collect();
        liked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        liked.into_iter().take(3).map(|(tag, _)| tag.clone()).collect()
    }

    /// Tags with a meaningful positive or negative weight, by magnitude.
    pub fn top_tags(&self, limit: usize) -> Vec<(String, f32)> {
        let mut tags: Vec<(String, f32)> = self
            .tag_weights
            .iter()
            .filter(|(_, w)| w.abs() >= TOP_TAG_THRESHOLD)
            .map(|(tag, w)| (tag.clone(), *w))
            .collect();
        tags.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        tags.truncate(limit);
        tags
    }

    /// Up to two of the recipe's tags that justify suggesting it.
    pub fn why_this_reasons(&self, recipe_tags: &[String]) -> Vec<String> {
        let mut reasons: Vec<(&String, f32)> = recipe_tags
            .iter()
            .map(|tag| (tag, self.tag_boost(tag)))
            .filter(|(_, w)| *w > LIKE_THRESHOLD)
            .collect();
        reasons.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        reasons
            .into_iter()
            .take(2)
            .map(|(tag, _)| tag.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SignalKind;
    use chrono::TimeZone;

    fn ts(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0).unwrap()
    }

    fn signal(at: DateTime<Utc>, kind: SignalKind, tags: &[&str]) -> Signal {
        Signal {
            at,
            kind,
            recipe_id: "r1".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            needs: vec![],
        }
    }

    #[test]
    fn empty_log_returns_state_with_refreshed_timestamp() {
        let now = ts(10, 12);
        let state = LearningState::recompute(&[], None, now);
        assert!(state.tag_weights.is_empty());
        assert_eq!(state.decay_anchor, now);
        assert_eq!(state.last_updated, now);
    }

    #[test]
    fn deltas_accumulate_within_one_batch() {
        let now = ts(10, 12);
        let signals = vec![
            signal(ts(10, 9), SignalKind::Accepted, &["quick", "asian"]),
            signal(ts(10, 10), SignalKind::Skipped, &["quick"]),
            signal(ts(10, 11), SignalKind::Another, &["asian"]),
        ];

        let state = LearningState::recompute(&signals, None, now);
        assert_eq!(state.tag_boost("quick"), 0.0); // +2 - 2
        assert_eq!(state.tag_boost("asian"), 1.0); // +2 - 1
    }

    #[test]
    fn viewed_signals_change_nothing() {
        let now = ts(10, 12);
        let signals = vec![signal(ts(10, 9), SignalKind::Viewed, &["quick"])];
        let state = LearningState::recompute(&signals, None, now);
        assert!(state.tag_weights.is_empty());
    }

    #[test]
    fn only_signals_newer_than_last_updated_are_folded() {
        let signals = vec![signal(ts(10, 9), SignalKind::Accepted, &["quick"])];
        let first = LearningState::recompute(&signals, None, ts(10, 12));
        assert_eq!(first.tag_boost("quick"), 2.0);

        // Same log replayed: the lone signal is older than last_updated.
        let second = LearningState::recompute(&signals, Some(&first), ts(10, 12));
        assert_eq!(second.tag_boost("quick"), 2.0);
    }

    #[test]
    fn decay_fires_once_per_window() {
        let signals = vec![signal(ts(1, 9), SignalKind::Accepted, &["quick"])];
        let state = LearningState::recompute(&signals, None, ts(1, 12));
        assert_eq!(state.tag_boost("quick"), 2.0);

        // Seven days later the weight is attenuated and the anchor resets.
        let decayed = LearningState::recompute(&signals, Some(&state), ts(8, 12));
        assert!((decayed.tag_boost("quick") - 1.8).abs() < 1e-6);
        assert_eq!(decayed.decay_anchor, ts(8, 12));

        // Recomputing again right away must not decay a second time.
        let again = LearningState::recompute(&signals, Some(&decayed), ts(8, 12));
        assert!((again.tag_boost("quick") - 1.8).abs() < 1e-6);
    }

    #[test]
    fn summaries_respect_thresholds_and_ordering() {
        let now = ts(10, 12);
        let signals = vec![
            signal(ts(10, 8), SignalKind::Accepted, &["quick", "italian"]),
            signal(ts(10, 9), SignalKind::Accepted, &["quick"]),
            signal(ts(10, 10), SignalKind::Skipped, &["spicy"]),
            signal(ts(10, 11), SignalKind::Another, &["baking"]),
        ];
        let state = LearningState::recompute(&signals, None, now);

        // quick=4, italian=2, spicy=-2, baking=-1
        assert_eq!(state.summarize_likes(), vec!["quick", "italian"]);

        let top = state.top_tags(10);
        assert_eq!(top[0], ("quick".to_string(), 4.0));
        assert_eq!(top[1], ("italian".to_string(), 2.0));
        assert_eq!(top[2], ("spicy".to_string(), -2.0));
        assert_eq!(top[3], ("baking".to_string(), -1.0));

        let reasons =
            state.why_this_reasons(&["spicy".to_string(), "quick".to_string(), "italian".to_string()]);
        assert_eq!(reasons, vec!["quick", "italian"]);
    }
}
