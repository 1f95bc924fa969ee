pub mod restock;
pub mod state;

pub use restock::{run_decay_pass, DecayReport};
pub use state::{AppSnapshot, AppState, Persistence, SnapshotError, SNAPSHOT_VERSION};

// The component crates are the public surface; re-export them so hosts can
// depend on `cookmate` alone.
pub use chat;
pub use learning;
pub use pantry;
pub use recipe;
pub use shopping;
pub use suggestion;
pub use user;
