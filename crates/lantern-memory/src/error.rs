//! Error types for memory construction.

/// Errors returned by memory constructors.
///
/// Every mutation after construction is total; the only failure mode a
/// memory has is being built with an unusable capacity, which is a
/// programming error and fails fast.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MemoryError {
    /// Capacity must be at least one message.
    #[error("invalid capacity: {0} (must be positive)")]
    InvalidCapacity(usize),
}
