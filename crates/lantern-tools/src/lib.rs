//! Tool trait, registry, and the built-in tool set.

pub mod builtins;
pub mod registry;
pub mod tool;

pub use builtins::builtin_tool_registry;
pub use registry::ToolRegistry;
pub use tool::Tool;

/// Re-exported for tool authors.
pub use lantern_protocol::{ToolError, ToolSpec};
