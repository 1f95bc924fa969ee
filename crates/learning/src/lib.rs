pub mod model;
pub mod signal;

pub use model::{
    LearningState, DECAY_DAYS, DECAY_FACTOR, MAX_WEIGHT, MIN_WEIGHT,
};
pub use signal::{Signal, SignalKind, SignalLog, MAX_SIGNALS};
