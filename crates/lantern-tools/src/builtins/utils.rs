//! Utility helpers shared by built-in tools.

use lantern_protocol::ToolError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse JSON args into a typed struct for tool calls.
pub(super) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|err| ToolError::InvalidArguments(err.to_string()))
}

/// JSON schema for an object with the given required number properties.
pub(super) fn number_schema(fields: &[(&str, &str)]) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();
    for (name, description) in fields {
        properties.insert(
            (*name).to_string(),
            serde_json::json!({"type": "number", "description": description}),
        );
        required.push(Value::String((*name).to_string()));
    }
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
