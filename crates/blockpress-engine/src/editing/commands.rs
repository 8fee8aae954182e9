use serde::{Deserialize, Serialize};

use crate::editing::block::{COLUMN_PLACEHOLDER, NEW_BLOCK_PLACEHOLDER};
use crate::editing::{Block, BlockId, BlockKind, Document, Patch};

/// Direction for [`Cmd::Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

/// What kind of block an insert should create.
///
/// Freshly-inserted blocks start with placeholder content: text kinds get
/// [`NEW_BLOCK_PLACEHOLDER`], images start empty (the UI prompts for a URL),
/// and column cells get [`COLUMN_PLACEHOLDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockTemplate {
    Paragraph,
    Heading,
    Quote,
    Code,
    Image,
    Columns { count: usize },
}

impl BlockTemplate {
    fn instantiate(self, id: BlockId) -> Result<Block, EditError> {
        let kind = match self {
            BlockTemplate::Paragraph => BlockKind::Paragraph {
                text: NEW_BLOCK_PLACEHOLDER.to_string(),
            },
            BlockTemplate::Heading => BlockKind::Heading {
                text: NEW_BLOCK_PLACEHOLDER.to_string(),
            },
            BlockTemplate::Quote => BlockKind::Quote {
                text: NEW_BLOCK_PLACEHOLDER.to_string(),
            },
            BlockTemplate::Code => BlockKind::Code {
                source: NEW_BLOCK_PLACEHOLDER.to_string(),
            },
            BlockTemplate::Image => BlockKind::Image { url: String::new() },
            BlockTemplate::Columns { count } => {
                if count == 0 {
                    return Err(EditError::InvalidColumnCount(count));
                }
                BlockKind::Columns {
                    cells: vec![COLUMN_PLACEHOLDER.to_string(); count],
                }
            }
        };
        Ok(Block::new(id, kind))
    }
}

/// An edit operation on the document.
///
/// Commands are applied via [`Document::apply`] and either succeed with a
/// [`Patch`] or fail with an [`EditError`]. Unknown target ids are always
/// reported, never swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    /// Insert a new block immediately after `anchor`.
    InsertAfter {
        anchor: BlockId,
        template: BlockTemplate,
    },
    /// Replace the text payload of a paragraph, heading, quote, code, or
    /// image (url) block.
    SetText { id: BlockId, text: String },
    /// Replace one cell of a columns block.
    SetColumnText {
        id: BlockId,
        column: usize,
        text: String,
    },
    /// Resize a columns block, keeping existing cells and filling new ones
    /// with the column placeholder.
    SetColumnCount { id: BlockId, count: usize },
    /// Remove a block. Deleting the only remaining block is a no-op.
    Delete { id: BlockId },
    /// Swap a block with its neighbor. No-op at either boundary.
    Move { id: BlockId, direction: Direction },
}

/// Errors from applying a [`Cmd`] or constructing a [`Document`] from
/// external data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("no block with id {0}")]
    BlockNotFound(BlockId),
    #[error("block {0} is a columns block and has no single text payload")]
    NotATextBlock(BlockId),
    #[error("block {0} is not a columns block")]
    NotAColumnsBlock(BlockId),
    #[error("column {column} out of range for block {id} ({count} columns)")]
    ColumnOutOfRange {
        id: BlockId,
        column: usize,
        count: usize,
    },
    #[error("column count must be at least 1, got {0}")]
    InvalidColumnCount(usize),
    #[error("document must contain at least one block")]
    EmptyDocument,
    #[error("duplicate block id {0}")]
    DuplicateId(BlockId),
}

/// Apply a command to the document (called via [`Document::apply`]).
pub(crate) fn apply_command(doc: &mut Document, cmd: Cmd) -> Result<Patch, EditError> {
    match cmd {
        Cmd::InsertAfter { anchor, template } => insert_after(doc, anchor, template),
        Cmd::SetText { id, text } => set_text(doc, id, text),
        Cmd::SetColumnText { id, column, text } => set_column_text(doc, id, column, text),
        Cmd::SetColumnCount { id, count } => set_column_count(doc, id, count),
        Cmd::Delete { id } => delete(doc, id),
        Cmd::Move { id, direction } => move_block(doc, id, direction),
    }
}

fn insert_after(
    doc: &mut Document,
    anchor: BlockId,
    template: BlockTemplate,
) -> Result<Patch, EditError> {
    let index = doc
        .index_of(anchor)
        .ok_or(EditError::BlockNotFound(anchor))?;

    let block = template.instantiate(doc.fresh_id())?;
    let new_id = block.id;
    doc.blocks.insert(index + 1, block);

    Ok(doc.committed(vec![new_id]))
}

fn set_text(doc: &mut Document, id: BlockId, text: String) -> Result<Patch, EditError> {
    let index = doc.index_of(id).ok_or(EditError::BlockNotFound(id))?;

    match &mut doc.blocks[index].kind {
        BlockKind::Paragraph { text: t } | BlockKind::Heading { text: t } | BlockKind::Quote { text: t } => {
            *t = text;
        }
        BlockKind::Code { source } => *source = text,
        BlockKind::Image { url } => *url = text,
        BlockKind::Columns { .. } => return Err(EditError::NotATextBlock(id)),
    }

    Ok(doc.committed(vec![id]))
}

fn set_column_text(
    doc: &mut Document,
    id: BlockId,
    column: usize,
    text: String,
) -> Result<Patch, EditError> {
    let index = doc.index_of(id).ok_or(EditError::BlockNotFound(id))?;

    let BlockKind::Columns { cells } = &mut doc.blocks[index].kind else {
        return Err(EditError::NotAColumnsBlock(id));
    };
    let count = cells.len();
    let cell = cells
        .get_mut(column)
        .ok_or(EditError::ColumnOutOfRange { id, column, count })?;
    *cell = text;

    Ok(doc.committed(vec![id]))
}

fn set_column_count(doc: &mut Document, id: BlockId, count: usize) -> Result<Patch, EditError> {
    if count == 0 {
        return Err(EditError::InvalidColumnCount(count));
    }
    let index = doc.index_of(id).ok_or(EditError::BlockNotFound(id))?;

    let BlockKind::Columns { cells } = &mut doc.blocks[index].kind else {
        return Err(EditError::NotAColumnsBlock(id));
    };
    if cells.len() == count {
        return Ok(doc.unchanged());
    }
    cells.resize_with(count, || COLUMN_PLACEHOLDER.to_string());

    Ok(doc.committed(vec![id]))
}

fn delete(doc: &mut Document, id: BlockId) -> Result<Patch, EditError> {
    let index = doc.index_of(id).ok_or(EditError::BlockNotFound(id))?;

    // Never-empty invariant: deleting the only block changes nothing.
    if doc.blocks.len() == 1 {
        return Ok(doc.unchanged());
    }
    doc.blocks.remove(index);

    Ok(doc.committed(vec![id]))
}

fn move_block(doc: &mut Document, id: BlockId, direction: Direction) -> Result<Patch, EditError> {
    let index = doc.index_of(id).ok_or(EditError::BlockNotFound(id))?;

    let neighbor = match direction {
        Direction::Up if index > 0 => index - 1,
        Direction::Down if index + 1 < doc.blocks.len() => index + 1,
        // At a boundary the move changes nothing.
        _ => return Ok(doc.unchanged()),
    };
    doc.blocks.swap(index, neighbor);

    Ok(doc.committed(vec![id]))
}
