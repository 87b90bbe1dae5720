//! Removal of previously inserted anchors
//!
//! Only anchors whose `class` attribute equals [`MARKER_CLASS`] are touched.
//! Each one is replaced by its inner content; an opening tag not directly
//! followed by its `</a>` is left as it is.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::markup::MARKER_CLASS;

static ANCHOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a(?:\s[^>]*)?>|</a\s*>").unwrap());

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)([a-z_:][-\w:.]*)\s*(?:=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#).unwrap()
});

fn is_closing(tag: &str) -> bool {
    tag.starts_with("</")
}

/// The first `class` attribute of an opening `<a …>` tag equals the marker
///
/// Attributes are read as name/value pairs, so `class=` text inside another
/// attribute's quoted value is never taken for the real one.
fn is_marked(tag: &str) -> bool {
    let attributes = tag.get(2..tag.len() - 1).unwrap_or_default();

    ATTRIBUTE
        .captures_iter(attributes)
        .find(|caps| caps[1].eq_ignore_ascii_case("class"))
        .and_then(|caps| caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)))
        .is_some_and(|value| value.as_str().trim() == MARKER_CLASS)
}

/// Replace every marker-classed anchor with its inner content
#[must_use]
pub fn strip_links(text: &str) -> String {
    let tags: Vec<_> = ANCHOR_TAG.find_iter(text).collect();
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;
    let mut index = 0;

    while index < tags.len() {
        let open = tags[index];
        let close = tags.get(index + 1).filter(|tag| is_closing(tag.as_str()));

        match close {
            Some(close) if !is_closing(open.as_str()) && is_marked(open.as_str()) => {
                trace!(position = open.start(), "stripping anchor");
                output.push_str(&text[copied..open.start()]);
                output.push_str(&text[open.end()..close.start()]);
                copied = close.end();
                index += 2;
            }
            _ => index += 1,
        }
    }

    output.push_str(&text[copied..]);
    output
}
