//! HTML export: flatten the block document into a markup string.
//!
//! Each block maps to one top-level element, in document order. All text
//! payloads are escaped before embedding (`encode_text` for element bodies,
//! `encode_double_quoted_attribute` for the image url), so block content can
//! never smuggle markup into the published page.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::editing::{Block, BlockKind, Document};

/// Render the whole document to an HTML string, in block order.
///
/// Pure function: the "publish" surface of the editor just hands this
/// string to whatever wants it (a file, a preview pane, a clipboard).
pub fn render_document(doc: &Document) -> String {
    let mut html = String::new();
    for block in doc.blocks() {
        render_block_into(&mut html, block);
    }
    html
}

/// Render a single block to HTML, for per-block previews.
pub fn render_block(block: &Block) -> String {
    let mut html = String::new();
    render_block_into(&mut html, block);
    html
}

fn render_block_into(out: &mut String, block: &Block) {
    match &block.kind {
        BlockKind::Paragraph { text } => {
            let _ = write!(out, "<p>{}</p>", encode_text(text));
        }
        BlockKind::Heading { text } => {
            let _ = write!(out, "<h2>{}</h2>", encode_text(text));
        }
        BlockKind::Quote { text } => {
            let _ = write!(out, "<blockquote>{}</blockquote>", encode_text(text));
        }
        BlockKind::Code { source } => {
            let _ = write!(out, "<pre><code>{}</code></pre>", encode_text(source));
        }
        BlockKind::Image { url } => {
            let _ = write!(
                out,
                "<img src=\"{}\" alt=\"Blog image\" />",
                encode_double_quoted_attribute(url)
            );
        }
        BlockKind::Columns { cells } => {
            let _ = write!(
                out,
                "<div class=\"columns\" style=\"display: grid; grid-template-columns: repeat({}, 1fr); gap: 2rem;\">",
                cells.len()
            );
            for cell in cells {
                let _ = write!(out, "<div>{}</div>", encode_text(cell));
            }
            out.push_str("</div>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Block, BlockId};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn block(kind: BlockKind) -> Block {
        Block::new(BlockId::new(1), kind)
    }

    #[rstest]
    #[case(BlockKind::Paragraph { text: "Hello".into() }, "<p>Hello</p>")]
    #[case(BlockKind::Heading { text: "Title".into() }, "<h2>Title</h2>")]
    #[case(BlockKind::Quote { text: "Wise words".into() }, "<blockquote>Wise words</blockquote>")]
    #[case(BlockKind::Code { source: "fn main() {}".into() }, "<pre><code>fn main() {}</code></pre>")]
    #[case(
        BlockKind::Image { url: "https://example.com/a.jpg".into() },
        "<img src=\"https://example.com/a.jpg\" alt=\"Blog image\" />"
    )]
    fn test_render_block_by_kind(#[case] kind: BlockKind, #[case] expected: &str) {
        assert_eq!(render_block(&block(kind)), expected);
    }

    #[test]
    fn test_render_columns_emits_grid_wrapper_with_cells_in_order() {
        let columns = block(BlockKind::Columns {
            cells: vec!["A".to_string(), "B".to_string()],
        });

        assert_eq!(
            render_block(&columns),
            "<div class=\"columns\" style=\"display: grid; grid-template-columns: repeat(2, 1fr); gap: 2rem;\">\
             <div>A</div><div>B</div></div>"
        );
    }

    #[test]
    fn test_render_document_concatenates_blocks_in_order() {
        let doc = Document::from_blocks(vec![
            Block::new(BlockId::new(1), BlockKind::Heading { text: "Post".into() }),
            Block::new(BlockId::new(2), BlockKind::Paragraph { text: "Body".into() }),
        ])
        .unwrap();

        assert_eq!(render_document(&doc), "<h2>Post</h2><p>Body</p>");
    }

    #[test]
    fn test_single_paragraph_document_renders_hello() {
        let doc = Document::from_blocks(vec![Block::new(
            BlockId::new(1),
            BlockKind::Paragraph {
                text: "Hello".into(),
            },
        )])
        .unwrap();

        assert_eq!(render_document(&doc), "<p>Hello</p>");
    }

    // Block content is user input; none of it may reach the page as markup.

    #[test]
    fn test_text_content_is_escaped() {
        let sneaky = block(BlockKind::Paragraph {
            text: "<script>alert(1)</script>".into(),
        });

        assert_eq!(
            render_block(&sneaky),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_code_markup_is_escaped_not_interpreted() {
        let code = block(BlockKind::Code {
            source: "if a < b && b > c { }".into(),
        });

        let html = render_block(&code);
        assert!(html.starts_with("<pre><code>"));
        assert!(html.contains("a &lt; b"));
        assert!(!html.contains("< b &&"), "raw angle bracket leaked: {html}");
    }

    #[test]
    fn test_image_url_is_attribute_escaped() {
        let image = block(BlockKind::Image {
            url: "https://example.com/a.jpg\" onerror=\"alert(1)".into(),
        });

        let html = render_block(&image);
        assert!(
            !html.contains("onerror=\"alert"),
            "attribute breakout not escaped: {html}"
        );
    }

    #[test]
    fn test_column_cells_are_escaped() {
        let columns = block(BlockKind::Columns {
            cells: vec!["<b>bold</b>".to_string()],
        });

        assert!(render_block(&columns).contains("&lt;b&gt;bold&lt;/b&gt;"));
    }
}
