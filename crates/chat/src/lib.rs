pub mod context;
pub mod executor;
pub mod substitutes;
pub mod tools;

pub use context::build_context_summary;
pub use executor::{ToolExecution, ToolExecutor, ToolResult};
pub use substitutes::{suggest_substitutes, SubstituteSuggestion};
pub use tools::{ToolCall, ToolInvocation, ToolParseError};
