//! Visible-text extraction from rendered HTML.

use scraper::{Html, Node};

/// Elements whose text content is never shown to a reader.
const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Extracts the visible text of an HTML document.
///
/// Text nodes are taken in document order, content of [`SKIPPED_ELEMENTS`] is
/// dropped, and every run of whitespace collapses to a single space.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let fragments: Vec<&str> = document
        .tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let hidden = node.ancestors().any(|ancestor| {
                    matches!(ancestor.value(), Node::Element(el) if SKIPPED_ELEMENTS.contains(&el.name()))
                });
                if hidden {
                    None
                } else {
                    Some(&**text)
                }
            }
            _ => None,
        })
        .collect();

    clean_text(&fragments.join(" "))
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
