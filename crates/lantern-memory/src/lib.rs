//! Bounded conversational memory for Lantern.
//!
//! A memory instance is owned by exactly one conversation session and is
//! passed explicitly to the driver that uses it. There is no shared or
//! static memory state.

pub mod error;
pub mod window;

/// Memory error type.
pub use error::MemoryError;
/// Memory interface and the message-window implementation.
pub use window::{ChatMemory, MessageWindowMemory};
