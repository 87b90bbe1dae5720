//! Raw-markup helpers shared by the processor and the stripper
//!
//! Everything here works on the text as-is: no tree is built and nothing
//! outside the inspected span is touched.

use crate::keyword::Keyword;

/// Class stamped on every inserted anchor, used to find them again
pub const MARKER_CLASS: &str = "ifocus-link-nest";

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Why a candidate match was not linked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The match sits inside a tag, e.g. in an attribute value
    InsideTag,
    /// The match is already wrapped in `<a>…</a>`
    InsideAnchor,
    /// The match is in a heading and headings are excluded
    InsideHeading,
}

impl Rejection {
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::InsideTag => "inside tag",
            Self::InsideAnchor => "already linked",
            Self::InsideHeading => "inside heading",
        }
    }
}

/// Decide whether a match ending at `end` may be linked
///
/// Looks only at the text between `end` and the next `<`: a `>` there means
/// the match is inside a tag, and a closing `</a>` or (optionally) heading
/// tag right after means the match is inside that element.
#[must_use]
pub fn check_boundary(text: &str, end: usize, exclude_headings: bool) -> Option<Rejection> {
    let rest = &text[end..];
    let Some(lt) = rest.find('<') else {
        return rest.contains('>').then_some(Rejection::InsideTag);
    };

    if rest[..lt].contains('>') {
        return Some(Rejection::InsideTag);
    }

    let name = closing_tag_name(&rest[lt..])?;
    if name.eq_ignore_ascii_case("a") {
        return Some(Rejection::InsideAnchor);
    }
    if exclude_headings && HEADING_TAGS.iter().any(|h| name.eq_ignore_ascii_case(h)) {
        return Some(Rejection::InsideHeading);
    }

    None
}

/// Name of the closing tag `</name>` at the start of `tag`, if it is one
fn closing_tag_name(tag: &str) -> Option<&str> {
    let body = tag.strip_prefix("</")?;
    let name_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let (name, after) = body.split_at(name_len);

    after.trim_start().starts_with('>').then_some(name)
}

/// Render the anchor that replaces a matched phrase
///
/// The matched text is emitted verbatim so its original casing survives.
#[must_use]
pub fn render_anchor(keyword: &Keyword, matched_text: &str, open_in_new_window: bool) -> String {
    let target = if open_in_new_window {
        r#" target="_blank""#
    } else {
        ""
    };

    format!(
        r#"<a href="{href}" title="{title}" class="{MARKER_CLASS}" rel="{rel}"{target}>{matched_text}</a>"#,
        href = escape_attr(&keyword.target_url),
        title = escape_attr(&keyword.title),
        rel = escape_attr(&keyword.relation),
    )
}

/// Escape the characters that would break out of a quoted attribute
///
/// `&` is left alone so already-encoded URLs are not double-encoded.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_eligible() {
        let text = "dolor non, hendrerit";
        assert_eq!(check_boundary(text, 9, true), None);
    }

    #[test]
    fn test_end_of_text_is_eligible() {
        assert_eq!(check_boundary("dolor non", 9, true), None);
    }

    #[test]
    fn test_attribute_value_is_rejected() {
        let text = r#"<a title="online marketing" href="/">x</a>"#;
        let end = text.find("marketing").unwrap() + "marketing".len();
        assert_eq!(check_boundary(text, end, false), Some(Rejection::InsideTag));
    }

    #[test]
    fn test_unterminated_tag_is_rejected() {
        let text = r#"<img alt="seo audit">"#;
        assert_eq!(check_boundary(text, 13, false), Some(Rejection::InsideTag));
    }

    #[test]
    fn test_existing_anchor_is_rejected() {
        let text = r#"see <a href="/">seo audit</a> now"#;
        let end = text.find("audit").unwrap() + "audit".len();
        assert_eq!(check_boundary(text, end, false), Some(Rejection::InsideAnchor));
    }

    #[test]
    fn test_uppercase_closing_anchor_is_rejected() {
        assert_eq!(check_boundary("x seo</A>", 5, false), Some(Rejection::InsideAnchor));
    }

    #[test]
    fn test_heading_depends_on_setting() {
        let text = "<h2>seo audit</h2><p>text</p>";
        let end = text.find("</h2>").unwrap();
        assert_eq!(check_boundary(text, end, true), Some(Rejection::InsideHeading));
        assert_eq!(check_boundary(text, end, false), None);
    }

    #[test]
    fn test_other_closing_tags_are_eligible() {
        assert_eq!(check_boundary("seo</p>", 3, true), None);
        assert_eq!(check_boundary("seo</abbr>", 3, true), None);
        assert_eq!(check_boundary("seo</h7>", 3, true), None);
        assert_eq!(check_boundary("seo <b>x</b></a>", 3, true), None);
    }

    #[test]
    fn test_only_nearest_tag_is_inspected() {
        let text = r#"<a href="/">the <b>seo</b></a>"#;
        let end = text.find("</b>").unwrap();
        assert_eq!(check_boundary(text, end, true), None);

        let end = text.find("the").unwrap() + 3;
        assert_eq!(check_boundary(text, end, true), None);
    }

    #[test]
    fn test_render_anchor() {
        let keyword = Keyword::new("non", "online marketing", "help", "https://linking.objav.digital/services/");

        assert_eq!(
            render_anchor(&keyword, "Non", true),
            r#"<a href="https://linking.objav.digital/services/" title="online marketing" class="ifocus-link-nest" rel="help" target="_blank">Non</a>"#
        );
        assert_eq!(
            render_anchor(&keyword, "non", false),
            r#"<a href="https://linking.objav.digital/services/" title="online marketing" class="ifocus-link-nest" rel="help">non</a>"#
        );
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"say "hi" <b>"#), "say &quot;hi&quot; &lt;b&gt;");
        assert_eq!(escape_attr("/?a=1&amp;b=2"), "/?a=1&amp;b=2");
    }
}
