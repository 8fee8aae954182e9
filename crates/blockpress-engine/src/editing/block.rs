use serde::{Deserialize, Serialize};
use std::fmt;

/// Content seeded into a brand-new document's first paragraph.
pub const SEED_PLACEHOLDER: &str = "Start writing...";

/// Content seeded into blocks created via insert (image blocks start empty).
pub const NEW_BLOCK_PLACEHOLDER: &str = "New block...";

/// Content seeded into freshly-created column cells.
pub const COLUMN_PLACEHOLDER: &str = "Column content...";

/// Stable identifier for a block within one document.
///
/// Ids are handed out by the owning [`Document`](crate::editing::Document)
/// from a monotonic counter and are never reused, so an id stays valid (and
/// unique) across reorders for the document's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(u64);

impl BlockId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of block, with its content payload carried in the variant.
///
/// Keeping the payload in the variant (instead of a shared `content` field
/// plus side-car column fields) means the columns invariant — cell count
/// equals column count — cannot be violated: the count *is* `cells.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Plain paragraph text.
    Paragraph { text: String },
    /// Section heading (exports as a level-2 heading).
    Heading { text: String },
    /// Pull quote.
    Quote { text: String },
    /// Preformatted code, stored verbatim.
    Code { source: String },
    /// Image reference; `url` is the source locator, empty until set.
    Image { url: String },
    /// Multi-column group; one cell of text per column, at least one cell.
    Columns { cells: Vec<String> },
}

impl BlockKind {
    /// Human-readable kind name, for UI labels and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::Heading { .. } => "heading",
            BlockKind::Quote { .. } => "quote",
            BlockKind::Code { .. } => "code",
            BlockKind::Image { .. } => "image",
            BlockKind::Columns { .. } => "columns",
        }
    }

    /// The single text payload, if this kind has one (`None` for columns).
    pub fn text(&self) -> Option<&str> {
        match self {
            BlockKind::Paragraph { text }
            | BlockKind::Heading { text }
            | BlockKind::Quote { text } => Some(text),
            BlockKind::Code { source } => Some(source),
            BlockKind::Image { url } => Some(url),
            BlockKind::Columns { .. } => None,
        }
    }

    /// Number of columns (`None` for non-columns kinds).
    pub fn column_count(&self) -> Option<usize> {
        match self {
            BlockKind::Columns { cells } => Some(cells.len()),
            _ => None,
        }
    }
}

/// One content unit in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(id: BlockId, kind: BlockKind) -> Self {
        Self { id, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id_display_and_raw() {
        let id = BlockId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.raw(), 42);
    }

    #[test]
    fn test_kind_names_cover_all_six_kinds() {
        let kinds = [
            BlockKind::Paragraph { text: String::new() },
            BlockKind::Heading { text: String::new() },
            BlockKind::Quote { text: String::new() },
            BlockKind::Code { source: String::new() },
            BlockKind::Image { url: String::new() },
            BlockKind::Columns { cells: vec![String::new()] },
        ];
        let names: Vec<_> = kinds.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            ["paragraph", "heading", "quote", "code", "image", "columns"]
        );
    }

    #[test]
    fn test_text_accessor_returns_payload_for_text_kinds() {
        let heading = BlockKind::Heading {
            text: "Title".to_string(),
        };
        assert_eq!(heading.text(), Some("Title"));

        let image = BlockKind::Image {
            url: "https://example.com/pic.jpg".to_string(),
        };
        assert_eq!(image.text(), Some("https://example.com/pic.jpg"));

        let columns = BlockKind::Columns {
            cells: vec!["A".to_string(), "B".to_string()],
        };
        assert_eq!(columns.text(), None);
        assert_eq!(columns.column_count(), Some(2));
    }

    #[test]
    fn test_block_serde_round_trip() {
        let block = Block::new(
            BlockId::new(7),
            BlockKind::Columns {
                cells: vec!["left".to_string(), "right".to_string()],
            },
        );

        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }
}
