//! MCP stdio client: spawn a server process and surface its tools.

pub mod error;
pub mod toolset;

/// MCP error type.
pub use error::McpError;
/// Server spec, connection handle, and tool adapter.
pub use toolset::{McpServer, McpTool, McpToolset};
