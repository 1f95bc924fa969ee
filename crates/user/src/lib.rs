pub mod types;

pub use types::{Diet, Preferences};
