//! Tool trait definition.

use async_trait::async_trait;
use lantern_protocol::{ToolError, ToolSpec};
use serde_json::Value;
use std::fmt::Debug;

/// Interface for operations a model may invoke during a turn.
///
/// Tools are stateless and context-free; everything a call needs arrives
/// in its JSON arguments.
#[async_trait]
pub trait Tool: Send + Sync + Debug {
    /// Return the tool name.
    fn name(&self) -> &str;
    /// Return the tool description.
    fn description(&self) -> &str;
    /// Return the JSON schema for tool arguments.
    fn args_schema(&self) -> Value;

    /// Invoke the tool with JSON arguments.
    async fn call(&self, args: Value) -> Result<Value, ToolError>;

    /// Build a `ToolSpec` describing this tool.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            args_schema: self.args_schema(),
        }
    }
}
