use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Tool request as the conversational agent emits it: a name plus a loose
/// JSON argument bag. Parsing into [`ToolCall`] happens before dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolInvocation {
    pub fn new(name: &str, arguments: Value) -> Self {
        ToolInvocation {
            name: name.to_string(),
            arguments,
        }
    }
}

/// Closed set of actions the agent may take against pantry/cart state.
/// Adding a tool means adding a variant, which the compiler then forces
/// through every match.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    GetPantry,
    GetCart,
    AddToCart {
        name: String,
        qty: Option<f32>,
        unit: Option<String>,
    },
    RemoveFromCart {
        name: String,
    },
    UpdateCartItem {
        name: String,
        qty: Option<f32>,
        unit: Option<String>,
    },
    SummarizeCart,
    SuggestSubstitutes {
        ingredient: String,
    },
    UndoLastChange,
}

#[derive(Debug, Error, PartialEq)]
pub enum ToolParseError {
    #[error("tool not implemented: {0}")]
    UnknownTool(String),
    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
}

fn required_str(args: &Value, tool: &str, key: &str) -> Result<String, ToolParseError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ToolParseError::InvalidArguments {
            tool: tool.to_string(),
            reason: format!("missing string field `{key}`"),
        })
}

fn optional_f32(args: &Value, key: &str) -> Option<f32> {
    args.get(key).and_then(Value::as_f64).map(|v| v as f32)
}

fn optional_str(args: &Value, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .filter(|s| !s.trim().is_empty())
}

impl ToolCall {
    /// Map a wire invocation onto the closed tool set. Unknown names and
    /// malformed argument bags are reported, not panicked on; the executor
    /// turns them into "not implemented" / "bad arguments" results.
    pub fn parse(invocation: &ToolInvocation) -> Result<Self, ToolParseError> {
        let args = &invocation.arguments;
        match invocation.name.as_str() {
            "getPantry" => Ok(ToolCall::GetPantry),
            "getCart" => Ok(ToolCall::GetCart),
            "addToCart" => Ok(ToolCall::AddToCart {
                name: required_str(args, "addToCart", "name")?,
                qty: optional_f32(args, "qty"),
                unit: optional_str(args, "unit"),
            }),
            "removeFromCart" => Ok(ToolCall::RemoveFromCart {
                name: required_str(args, "removeFromCart", "name")?,
            }),
            "updateCartItem" => Ok(ToolCall::UpdateCartItem {
                name: required_str(args, "updateCartItem", "name")?,
                qty: optional_f32(args, "qty"),
                unit: optional_str(args, "unit"),
            }),
            "summarizeCart" => Ok(ToolCall::SummarizeCart),
            "suggestSubstitutes" => Ok(ToolCall::SuggestSubstitutes {
                ingredient: required_str(args, "suggestSubstitutes", "missing")
                    .or_else(|_| required_str(args, "suggestSubstitutes", "ingredient"))?,
            }),
            "undoLastChange" => Ok(ToolCall::UndoLastChange),
            other => Err(ToolParseError::UnknownTool(other.to_string())),
        }
    }
}
