use serde::{Deserialize, Serialize};

use crate::editing::block::SEED_PLACEHOLDER;
use crate::editing::{Block, BlockId, BlockKind, Cmd, EditError, Patch};

/// Core document structure: an ordered, never-empty sequence of blocks.
///
/// The document is the single source of truth for editing. It maintains:
///
/// - **The block list**: ordered `Vec<Block>`; order defines render and
///   export order.
/// - **The id counter**: `next_id` only ever moves forward, so ids are
///   unique for the document's lifetime even after deletes.
/// - **The version**: incremented on every edit that changes the block
///   list, enabling cheap change detection by the UI.
///
/// All edits flow through [`Document::apply`] as [`Cmd`] values; direct
/// mutation of the block list is not exposed. Commands targeting an unknown
/// id fail with [`EditError::BlockNotFound`] rather than silently doing
/// nothing.
///
/// ## Usage Pattern
///
/// ```rust
/// # use blockpress_engine::editing::*;
/// let mut doc = Document::new();
/// assert_eq!(doc.len(), 1); // seed paragraph, id 1
///
/// let first = doc.blocks()[0].id;
/// let patch = doc
///     .apply(Cmd::InsertAfter { anchor: first, template: BlockTemplate::Quote })
///     .unwrap();
/// assert_eq!(doc.len(), 2);
/// assert_eq!(patch.version, doc.version());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Ordered block list; invariant: never empty.
    pub(crate) blocks: Vec<Block>,
    /// Next id to hand out; invariant: greater than every id in `blocks`.
    pub(crate) next_id: u64,
    /// Version counter incremented on each effective edit.
    pub(crate) version: u64,
}

impl Document {
    /// Create a new document seeded with one placeholder paragraph (id 1),
    /// matching the state a fresh editor opens with.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::new(
                BlockId::new(1),
                BlockKind::Paragraph {
                    text: SEED_PLACEHOLDER.to_string(),
                },
            )],
            next_id: 2,
            version: 0,
        }
    }

    /// Build a document from an explicit block list.
    ///
    /// Validates the structural invariants (non-empty, unique ids) and
    /// seats the id counter above the largest id present.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, EditError> {
        let mut doc = Self {
            blocks,
            next_id: 1,
            version: 0,
        };
        doc.check_invariants()?;
        doc.reseat_counter();
        Ok(doc)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Look up a block by id.
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: the never-empty invariant holds for every reachable
    /// document state. Present for API completeness alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a command to the document.
    ///
    /// Returns a [`Patch`] naming the blocks the edit touched, or an
    /// [`EditError`] when the command targets an unknown id or carries an
    /// invalid payload. Boundary no-ops (moving the first block up, deleting
    /// the only block) succeed with an empty patch and do not bump the
    /// version.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        crate::editing::commands::apply_command(self, cmd)
    }

    pub(crate) fn index_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub(crate) fn fresh_id(&mut self) -> BlockId {
        let id = BlockId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Record an effective edit: bump the version and describe it.
    pub(crate) fn committed(&mut self, changed: Vec<BlockId>) -> Patch {
        debug_assert!(!changed.is_empty());
        self.version += 1;
        Patch {
            changed,
            version: self.version,
        }
    }

    /// Describe a command that legitimately changed nothing.
    pub(crate) fn unchanged(&self) -> Patch {
        Patch {
            changed: Vec::new(),
            version: self.version,
        }
    }

    /// Verify the structural invariants. Used after constructing a document
    /// from external data (explicit block lists, loaded drafts); internal
    /// edits preserve the invariants by construction.
    pub(crate) fn check_invariants(&self) -> Result<(), EditError> {
        if self.blocks.is_empty() {
            return Err(EditError::EmptyDocument);
        }
        let mut seen = std::collections::HashSet::new();
        for block in &self.blocks {
            if !seen.insert(block.id) {
                return Err(EditError::DuplicateId(block.id));
            }
            if let BlockKind::Columns { cells } = &block.kind
                && cells.is_empty()
            {
                return Err(EditError::InvalidColumnCount(0));
            }
        }
        Ok(())
    }

    /// Move the id counter above every id in the block list, so documents
    /// rebuilt from external data keep handing out unique ids.
    pub(crate) fn reseat_counter(&mut self) {
        let max_id = self.blocks.iter().map(|b| b.id.raw()).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
