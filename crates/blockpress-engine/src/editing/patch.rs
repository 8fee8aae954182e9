use crate::editing::BlockId;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Ids touched by the edit: the inserted, updated, removed, or moved
    /// block. Empty when the command was a documented no-op (boundary move,
    /// deleting the only block).
    pub changed: Vec<BlockId>,
    /// Document version after the edit. Only bumped when `changed` is
    /// non-empty, so no-ops are observable as no-ops.
    pub version: u64,
}

impl Patch {
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}
