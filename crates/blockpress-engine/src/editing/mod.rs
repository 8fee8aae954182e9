/*!
 * # Editing Core Module
 *
 * This module implements the block-document editing model behind blockpress.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: the block list
 * - The entire document is an ordered `Vec<Block>` owned by [`Document`]
 * - A document is never empty: a fresh document seeds one placeholder
 *   paragraph, and deleting the last remaining block is a no-op
 * - Block ids come from a monotonic counter owned by the document, so they
 *   are unique for the document's lifetime and stable across reorders
 *
 * ### 2. Command-Based Editing
 * - All edits are represented as **Commands** (`Cmd` enum) applied through
 *   [`Document::apply`]
 * - A command either succeeds and returns a [`Patch`] describing which
 *   blocks changed, or fails with an [`EditError`] — there are no silent
 *   failures on unknown block ids
 * - Boundary cases that leave the document untouched (moving the first
 *   block up, deleting the only block) succeed with an empty patch
 *
 * ### 3. Exhaustive Block Kinds
 * - [`BlockKind`] is a sum type over the six block kinds; rendering and
 *   export match on it exhaustively, so adding a kind is a compile error
 *   until every consumer handles it
 * - The columns payload carries its cells directly (`Vec<String>`), so the
 *   "cell count equals column count" invariant holds by construction
 *
 * ### 4. Transient Session State
 * - Selection and the open add-block menu live in [`EditorSession`],
 *   separate from the document — they are per-editing-session state and
 *   are never persisted with a draft
 *
 * ## Usage Pattern
 *
 * ```rust
 * use blockpress_engine::editing::*;
 *
 * // 1. Fresh document with the seed paragraph (id 1)
 * let mut doc = Document::new();
 * let first = doc.blocks()[0].id;
 *
 * // 2. Apply structured edits
 * let patch = doc
 *     .apply(Cmd::InsertAfter {
 *         anchor: first,
 *         template: BlockTemplate::Heading,
 *     })
 *     .unwrap();
 * let heading = patch.changed[0];
 *
 * // 3. Reorder and edit
 * doc.apply(Cmd::Move { id: heading, direction: Direction::Up }).unwrap();
 * doc.apply(Cmd::SetText { id: heading, text: "My Post".to_string() }).unwrap();
 *
 * // 4. Publish
 * let html = blockpress_engine::export::html::render_document(&doc);
 * assert!(html.contains("<h2>My Post</h2>"));
 * ```
 */

pub mod block;
pub mod commands;
pub mod document;
pub mod patch;
pub mod session;

pub use block::{Block, BlockId, BlockKind};
pub use commands::{BlockTemplate, Cmd, Direction, EditError};
pub use document::Document;
pub use patch::Patch;
pub use session::EditorSession;
