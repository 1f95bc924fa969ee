use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Oldest signals are dropped once the log holds this many.
pub const MAX_SIGNALS: usize = 500;

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
pub enum SignalKind {
    Viewed,
    Accepted,
    Another,
    Skipped,
}

impl SignalKind {
    /// Weight delta applied to every tag the signal carries.
    pub fn delta(&self) -> f32 {
        match self {
            SignalKind::Accepted => 2.0,
            SignalKind::Skipped => -2.0,
            SignalKind::Another => -1.0,
            SignalKind::Viewed => 0.0,
        }
    }
}

/// One implicit feedback event tied to a recipe interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub at: DateTime<Utc>,
    pub kind: SignalKind,
    pub recipe_id: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub needs: Vec<String>,
}

/// Append-only interaction log with ring-buffer semantics: once the cap is
/// reached the oldest entries are dropped first, order preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalLog {
    signals: Vec<Signal>,
}

impl SignalLog {
    pub fn new() -> Self {
        SignalLog {
            signals: Vec::new(),
        }
    }

    pub fn record(&mut self, signal: Signal) {
        self.signals.push(signal);
        if self.signals.len() > MAX_SIGNALS {
            let excess = self.signals.len() - MAX_SIGNALS;
            self.signals.drain(..excess);
        }
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn signal(kind: SignalKind, recipe_id: &str) -> Signal {
        Signal {
            at: Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap(),
            kind,
            recipe_id: recipe_id.to_string(),
            tags: vec!["quick".to_string()],
            needs: vec![],
        }
    }

    #[test]
    fn log_caps_at_max_dropping_oldest() {
        let mut log = SignalLog::new();
        for i in 0..(MAX_SIGNALS + 10) {
            log.record(signal(SignalKind::Viewed, &format!("r{i}")));
        }

        assert_eq!(log.len(), MAX_SIGNALS);
        // The first ten entries were dropped.
        assert_eq!(log.signals()[0].recipe_id, "r10");
        assert_eq!(
            log.signals()[MAX_SIGNALS - 1].recipe_id,
            format!("r{}", MAX_SIGNALS + 9)
        );
    }

    #[test]
    fn log_preserves_insertion_order() {
        let mut log = SignalLog::new();
        log.record(signal(SignalKind::Viewed, "a"));
        log.record(signal(SignalKind::Accepted, "b"));

        let ids: Vec<&str> = log.signals().iter().map(|s| s.recipe_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
