//! Fixed-capacity message window with oldest-first eviction.

use crate::MemoryError;
use lantern_protocol::ChatMessage;
use log::debug;

/// Interface for conversation memories consumed by drivers.
///
/// Implementations retain turns in chronological order and never expose a
/// mutable view of their contents.
pub trait ChatMemory: Send {
    /// Append a message, evicting the oldest entries if needed.
    fn add(&mut self, message: ChatMessage);

    /// Current contents, oldest first.
    fn messages(&self) -> &[ChatMessage];

    /// Current entry count.
    fn len(&self) -> usize;

    /// Whether the memory holds no messages.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all retained messages.
    fn clear(&mut self);
}

/// Bounded FIFO window over the most recent conversation turns.
///
/// Holds at most `capacity` messages. Insertion appends at the tail;
/// once the window is full, the message admitted earliest is evicted,
/// regardless of its role. Eviction is silent and expected.
#[derive(Debug, Clone)]
pub struct MessageWindowMemory {
    capacity: usize,
    next_sequence: u64,
    entries: Vec<ChatMessage>,
}

impl MessageWindowMemory {
    /// Create a window retaining at most `capacity` messages.
    ///
    /// Fails with [`MemoryError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, MemoryError> {
        if capacity == 0 {
            return Err(MemoryError::InvalidCapacity(capacity));
        }
        Ok(Self {
            capacity,
            next_sequence: 1,
            entries: Vec::with_capacity(capacity),
        })
    }

    /// Maximum number of messages the window retains.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Seed the window from prior history.
    ///
    /// Messages are admitted in iteration order, so when the history
    /// exceeds the capacity only its tail survives, exactly as if each
    /// message had been added individually.
    pub fn add_all<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = ChatMessage>,
    {
        for message in messages {
            self.push(message);
        }
    }

    fn push(&mut self, mut message: ChatMessage) {
        message.sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(message);
        if self.entries.len() > self.capacity {
            let overflow = self.entries.len() - self.capacity;
            debug!(
                "evicting {overflow} oldest message(s) (capacity={})",
                self.capacity
            );
            self.entries.drain(..overflow);
        }
    }
}

impl ChatMemory for MessageWindowMemory {
    fn add(&mut self, message: ChatMessage) {
        self.push(message);
    }

    fn messages(&self) -> &[ChatMessage] {
        &self.entries
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
