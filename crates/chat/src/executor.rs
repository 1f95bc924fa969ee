use chrono::{DateTime, Utc};
use pantry::PantryStore;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shopping::{CartOutcome, NewShoppingItem, RestockReason, ShoppingListEngine};
use tracing::debug;

use crate::substitutes::suggest_substitutes;
use crate::tools::{ToolCall, ToolInvocation, ToolParseError};

/// Structured outcome of one tool call, rendered by the host into a
/// confirmation message. Validation rejections come back as
/// `success: false`; the executor never throws for expected conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ToolResult {
    fn ok_with(message: impl Into<String>, data: Value) -> Self {
        ToolResult {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        ToolResult {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    fn from_cart(outcome: CartOutcome) -> Self {
        let data = outcome
            .item
            .as_ref()
            .and_then(|item| serde_json::to_value(item).ok());
        ToolResult {
            success: outcome.success,
            message: outcome.message,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolExecution {
    pub tool_name: String,
    pub result: ToolResult,
}

/// Stateless dispatcher from parsed tool calls onto the injected pantry and
/// cart collaborators.
pub struct ToolExecutor;

impl ToolExecutor {
    /// Execute a batch strictly in order: earlier mutations are visible to
    /// later calls (an `addToCart` followed by `summarizeCart` sees the new
    /// entry).
    pub fn execute_batch(
        pantry: &mut PantryStore,
        cart: &mut ShoppingListEngine,
        invocations: &[ToolInvocation],
        now: DateTime<Utc>,
    ) -> Vec<ToolExecution> {
        invocations
            .iter()
            .map(|invocation| {
                let result = match ToolCall::parse(invocation) {
                    Ok(call) => Self::execute_one(pantry, cart, call, now),
                    Err(ToolParseError::UnknownTool(name)) => {
                        ToolResult::rejected(format!("Tool {name} is not implemented"))
                    }
                    Err(err @ ToolParseError::InvalidArguments { .. }) => {
                        ToolResult::rejected(err.to_string())
                    }
                };
                debug!(tool = %invocation.name, success = result.success, "executed tool call");
                ToolExecution {
                    tool_name: invocation.name.clone(),
                    result,
                }
            })
            .collect()
    }

    fn execute_one(
        pantry: &mut PantryStore,
        cart: &mut ShoppingListEngine,
        call: ToolCall,
        now: DateTime<Utc>,
    ) -> ToolResult {
        match call {
            ToolCall::GetPantry => {
                let items: Vec<_> = pantry.active_items().collect();
                let count = items.len();
                ToolResult::ok_with(
                    format!("{count} items in the pantry"),
                    serde_json::to_value(items).unwrap_or(Value::Null),
                )
            }
            ToolCall::GetCart => {
                let items: Vec<_> = cart.open_items().collect();
                let count = items.len();
                ToolResult::ok_with(
                    format!("{count} items on the shopping list"),
                    serde_json::to_value(items).unwrap_or(Value::Null),
                )
            }
            ToolCall::AddToCart { name, qty, unit } => ToolResult::from_cart(cart.add_item(
                NewShoppingItem {
                    name,
                    suggested_qty: qty,
                    unit,
                    reason: RestockReason::MissingFromRecipe,
                },
                now,
            )),
            ToolCall::RemoveFromCart { name } => ToolResult::from_cart(cart.remove_item(&name)),
            ToolCall::UpdateCartItem { name, qty, unit } => {
                ToolResult::from_cart(cart.update_item(&name, qty, unit))
            }
            ToolCall::SummarizeCart => {
                let groups = cart.summarize_by_aisle();
                let total: usize = groups.iter().map(|(_, items)| items.len()).sum();
                let data = json!(groups
                    .iter()
                    .map(|(aisle, items)| {
                        json!({
                            "aisle": aisle.to_string(),
                            "items": items,
                        })
                    })
                    .collect::<Vec<_>>());
                ToolResult::ok_with(format!("{total} items to buy"), data)
            }
            ToolCall::SuggestSubstitutes { ingredient } => {
                match suggest_substitutes(&ingredient, pantry) {
                    Some(subs) => ToolResult::ok_with(
                        format!("Found {} substitutes for {ingredient}", subs.len()),
                        serde_json::to_value(subs).unwrap_or(Value::Null),
                    ),
                    None => {
                        ToolResult::rejected(format!("No substitutes known for {ingredient}"))
                    }
                }
            }
            ToolCall::UndoLastChange => {
                let outcome = cart.undo_last_operation();
                ToolResult {
                    success: outcome.success,
                    message: outcome.message,
                    data: None,
                }
            }
        }
    }
}
