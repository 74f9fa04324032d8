//! Stdio MCP client exposing remote server tools as [`Tool`]s.

use crate::McpError;
use async_trait::async_trait;
use lantern_protocol::ToolError;
use lantern_tools::Tool;
use log::{debug, info};
use rmcp::ServiceExt;
use rmcp::model::{CallToolRequestParam, CallToolResult, Tool as RemoteToolInfo};
use rmcp::service::{Peer, RoleClient, RunningService};
use rmcp::transport::TokioChildProcess;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::process::Command;

/// Launch spec for a stdio MCP server process.
#[derive(Debug, Clone)]
pub struct McpServer {
    command: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl McpServer {
    /// Describe a server started by running `command`.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Append one command-line argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several command-line arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the server process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Connection to one MCP server and the tools it publishes.
///
/// The server runs as a child process speaking MCP over stdio; dropping
/// the toolset without calling [`McpToolset::shutdown`] leaves process
/// teardown to the transport.
pub struct McpToolset {
    service: RunningService<RoleClient, ()>,
}

impl McpToolset {
    /// Spawn the server process and run the initialization handshake.
    pub async fn connect(server: McpServer) -> Result<Self, McpError> {
        let mut command = Command::new(&server.command);
        command.args(&server.args);
        for (key, value) in &server.env {
            command.env(key, value);
        }
        let transport = TokioChildProcess::new(command)?;
        let service = ()
            .serve(transport)
            .await
            .map_err(|err| McpError::Initialize(err.to_string()))?;
        info!("connected to MCP server `{}`", server.command);
        Ok(Self { service })
    }

    /// List the server's tools as locally callable adapters.
    pub async fn tools(&self) -> Result<Vec<Arc<dyn Tool>>, McpError> {
        let listed = self
            .service
            .list_tools(Default::default())
            .await
            .map_err(|err| McpError::Request(err.to_string()))?;
        debug!("MCP server listed {} tool(s)", listed.tools.len());
        let peer = self.service.peer().clone();
        Ok(listed
            .tools
            .into_iter()
            .map(|info| Arc::new(McpTool::new(info, peer.clone())) as Arc<dyn Tool>)
            .collect())
    }

    /// Shut the connection down and stop the server process.
    pub async fn shutdown(self) -> Result<(), McpError> {
        self.service
            .cancel()
            .await
            .map_err(|err| McpError::Request(err.to_string()))?;
        Ok(())
    }
}

/// A remote MCP tool exposed through the local [`Tool`] interface.
#[derive(Clone)]
pub struct McpTool {
    name: String,
    description: String,
    schema: Value,
    peer: Peer<RoleClient>,
}

impl McpTool {
    fn new(info: RemoteToolInfo, peer: Peer<RoleClient>) -> Self {
        Self {
            name: info.name.to_string(),
            description: info
                .description
                .map(|text| text.to_string())
                .unwrap_or_default(),
            schema: Value::Object(info.input_schema.as_ref().clone()),
            peer,
        }
    }
}

impl fmt::Debug for McpTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("McpTool").field("name", &self.name).finish()
    }
}

#[async_trait]
impl Tool for McpTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn args_schema(&self) -> Value {
        self.schema.clone()
    }

    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        let arguments = args.as_object().cloned();
        let result = self
            .peer
            .call_tool(CallToolRequestParam {
                name: self.name.clone().into(),
                arguments,
            })
            .await
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;
        result_to_value(result)
    }
}

/// Map a tool-call result to a JSON value.
///
/// Structured content wins when present; otherwise the text blocks are
/// joined and parsed as JSON when they form a document, kept as a plain
/// string when they do not. Error results surface as execution failures
/// carrying the payload.
fn result_to_value(result: CallToolResult) -> Result<Value, ToolError> {
    let failed = result.is_error.unwrap_or(false);
    let value = match result.structured_content {
        Some(value) => value,
        None => {
            let text = result
                .content
                .iter()
                .filter_map(|content| content.as_text().map(|text| text.text.clone()))
                .collect::<Vec<_>>()
                .join("\n");
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        }
    };
    if failed {
        Err(ToolError::ExecutionFailed(value.to_string()))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rmcp::model::Content;
    use serde_json::json;

    #[test]
    fn text_content_parses_as_json_when_it_is_json() {
        let result = CallToolResult::success(vec![Content::text(r#"{"total": 7}"#)]);

        assert_eq!(result_to_value(result).unwrap(), json!({"total": 7}));
    }

    #[test]
    fn plain_text_content_stays_a_string() {
        let result = CallToolResult::success(vec![Content::text("sunny, 22 degrees")]);

        assert_eq!(
            result_to_value(result).unwrap(),
            json!("sunny, 22 degrees")
        );
    }

    #[test]
    fn structured_content_takes_precedence_over_text() {
        let result: CallToolResult = serde_json::from_value(json!({
            "content": [{"type": "text", "text": "ignored"}],
            "structuredContent": {"total": 7}
        }))
        .unwrap();

        assert_eq!(result_to_value(result).unwrap(), json!({"total": 7}));
    }

    #[test]
    fn error_result_becomes_execution_failure() {
        let result = CallToolResult::error(vec![Content::text("tool exploded")]);

        let err = result_to_value(result).unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
        assert!(err.to_string().contains("tool exploded"));
    }

    #[test]
    fn server_spec_accumulates_args_and_env() {
        let server = McpServer::new("npx")
            .arg("-y")
            .args(["@modelcontextprotocol/server-everything"])
            .env("LOG_LEVEL", "debug");

        assert_eq!(server.command, "npx");
        assert_eq!(
            server.args,
            vec!["-y", "@modelcontextprotocol/server-everything"]
        );
        assert_eq!(server.env, vec![("LOG_LEVEL".into(), "debug".into())]);
    }
}
