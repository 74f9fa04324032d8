//! Public SDK surface for Lantern.
//!
//! This crate re-exports the building blocks and provides a small
//! initialization helper to keep consumer setup consistent.

/// Re-export for convenience.
pub use lantern_core as core;
/// Re-export for convenience.
pub use lantern_llm as llm;
/// Re-export for convenience.
pub use lantern_mcp as mcp;
/// Re-export for convenience.
pub use lantern_memory as memory;
/// Re-export for convenience.
pub use lantern_protocol as protocol;
/// Re-export for convenience.
pub use lantern_store as store;
/// Re-export for convenience.
pub use lantern_tools as tools;

pub use lantern_core::{Assistant, PromptTemplate, TemplateValues, extract};
pub use lantern_llm::{ChatProvider, OpenAiChatModel};
pub use lantern_memory::{ChatMemory, MessageWindowMemory};
pub use lantern_protocol::{ChatMessage, Role};
pub use lantern_tools::{Tool, ToolRegistry, builtin_tool_registry};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reexports_reach_the_member_crates() {
        init_logging();
        let memory = MessageWindowMemory::new(3).expect("memory");
        assert_eq!(memory.capacity(), 3);
        assert_eq!(ChatMessage::user("hi").role, Role::User);
    }
}
