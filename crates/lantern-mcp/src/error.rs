//! MCP client error type.

use thiserror::Error;

/// Errors from connecting to or calling an MCP server.
#[derive(Debug, Error)]
pub enum McpError {
    /// The server process could not be spawned.
    #[error("failed to spawn MCP server process: {0}")]
    Spawn(#[from] std::io::Error),

    /// The initialization handshake failed.
    #[error("MCP initialization failed: {0}")]
    Initialize(String),

    /// A request to the server failed after initialization.
    #[error("MCP request failed: {0}")]
    Request(String),
}
