//! Field text extraction.
//!
//! Turns a raw field value into plain text usable for excerpting. Rich text
//! fields get a narrow, best-effort markup stripper; this is not a general
//! HTML parser. Unsupported field kinds yield an empty string, which callers
//! treat as "no excerpt available", never as an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::{FieldKind, FieldMeta, Record};

/// Opening tags of these block-level elements get a space inserted before
/// them, so "<h3>Heading</h3><p>text</p>" does not collapse to "Headingtext".
const BLOCK_ELEMENTS: &[&str] = &[
    "blockquote",
    "div",
    "dd",
    "dl",
    "dt",
    "figure",
    "figcaption",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "li",
    "ol",
    "p",
    "td",
    "th",
    "ul",
];

static BLOCK_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = BLOCK_ELEMENTS.join("|");
    Regex::new(&format!(r"(?i)<(?:{alternation})\b")).expect("block tag pattern is valid")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX]?[0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").expect("entity pattern is valid")
});

/// Extract plain text from one of a record's fields.
///
/// Rich text is stripped via [`html_to_text`], plain text is returned
/// verbatim, and any other field kind yields an empty string.
pub fn extract_text(record: &Record, meta: &FieldMeta) -> String {
    let value = match record.field_value(&meta.identifier) {
        Some(value) => value,
        None => return String::new(),
    };
    match meta.kind {
        FieldKind::RichText => html_to_text(value),
        FieldKind::PlainText => value.to_string(),
        FieldKind::Other(_) => String::new(),
    }
}

/// Convert lightly-marked-up rich text to plain text, best effort.
///
/// Inserts a space before each recognized block-level opening tag, removes
/// all remaining markup, then decodes entities. Malformed markup degrades to
/// whatever text survives the stripping; this never fails.
pub fn html_to_text(value: &str) -> String {
    let spaced = BLOCK_OPEN_RE.replace_all(value, " $0");
    let stripped = TAG_RE.replace_all(&spaced, "");
    decode_entities(&stripped)
}

/// Decode numeric character references and a common set of named entities.
/// Unknown entities are left untouched.
fn decode_entities(value: &str) -> String {
    ENTITY_RE
        .replace_all(value, |caps: &regex::Captures<'_>| {
            let body = &caps[1];
            match decode_entity_body(body) {
                Some(decoded) => decoded,
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn decode_entity_body(body: &str) -> Option<String> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = if let Some(hex) = numeric.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            numeric.parse::<u32>().ok()?
        };
        return char::from_u32(code).map(String::from);
    }
    let decoded = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "hellip" => '…',
        "ndash" => '–',
        "mdash" => '—',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        _ => return None,
    };
    Some(decoded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldKind;

    #[test]
    fn test_block_elements_get_spaced() {
        let text = html_to_text("<h3>Heading</h3><p>text</p>");
        assert_eq!(text, " Heading text");
    }

    #[test]
    fn test_inline_elements_do_not_get_spaced() {
        let text = html_to_text("a<em>b</em>c");
        assert_eq!(text, "abc");
    }

    #[test]
    fn test_pre_is_not_mistaken_for_p() {
        let text = html_to_text("x<pre>y</pre>");
        assert_eq!(text, "xy");
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(html_to_text("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(html_to_text("&lt;b&gt;"), "<b>");
        assert_eq!(html_to_text("&#65;&#x42;"), "AB");
        assert_eq!(html_to_text("&bogus;"), "&bogus;");
    }

    #[test]
    fn test_malformed_markup_degrades_gracefully() {
        assert_eq!(html_to_text("broken <p unclosed"), "broken  <p unclosed");
        assert_eq!(html_to_text("<>"), "");
    }

    #[test]
    fn test_extract_text_by_field_kind() {
        let record = Record::new(1, "Title")
            .with_field("body", "<p>Hello</p>")
            .with_field("summary", "plain <b>text</b>")
            .with_field("specs", "rows");

        let rich = FieldMeta::new(FieldKind::RichText, "body");
        assert_eq!(extract_text(&record, &rich), " Hello");

        let plain = FieldMeta::new(FieldKind::PlainText, "summary");
        assert_eq!(extract_text(&record, &plain), "plain <b>text</b>");

        let other = FieldMeta::new(FieldKind::Other("table".to_string()), "specs");
        assert_eq!(extract_text(&record, &other), "");

        let missing = FieldMeta::new(FieldKind::PlainText, "absent");
        assert_eq!(extract_text(&record, &missing), "");
    }
}
