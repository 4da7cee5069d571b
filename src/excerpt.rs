//! Excerpt building for search results.
//!
//! Produces a short, HTML-safe snippet of the text surrounding the first
//! occurrence of the needle, with every occurrence inside the window wrapped
//! in a highlight element and ellipsis markers where the text was clipped.

use regex::Regex;

/// Maximum number of characters shown before the matched needle.
pub const MAX_CHARS_BEFORE_KEYWORD: usize = 100;

/// Maximum number of characters shown after the matched needle.
pub const MAX_CHARS_AFTER_KEYWORD: usize = 100;

/// Marker inserted where the source text was clipped.
const ELLIPSIS: char = '…';

/// Builds HTML excerpts around needle matches.
///
/// The output is safe to embed inside an HTML block element: everything,
/// including the highlighted needle occurrences themselves, is
/// entity-escaped, and only the configured highlight tag is emitted as
/// markup.
#[derive(Debug, Clone)]
pub struct ExcerptBuilder {
    /// HTML tag to wrap highlighted occurrences (e.g., "mark", "em").
    tag: String,
    /// CSS class to add to highlight tags.
    css_class: Option<String>,
}

impl Default for ExcerptBuilder {
    fn default() -> Self {
        ExcerptBuilder {
            tag: "mark".to_string(),
            css_class: None,
        }
    }
}

impl ExcerptBuilder {
    /// Create a new excerpt builder with the default `<mark>` highlight tag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTML tag for highlighting.
    pub fn tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the CSS class for highlight tags.
    pub fn css_class<S: Into<String>>(mut self, css_class: S) -> Self {
        self.css_class = Some(css_class.into());
        self
    }

    /// Build the opening highlight tag.
    fn opening_tag(&self) -> String {
        if let Some(ref css_class) = self.css_class {
            format!("<{} class=\"{}\">", self.tag, css_class)
        } else {
            format!("<{}>", self.tag)
        }
    }

    /// Build the closing highlight tag.
    fn closing_tag(&self) -> String {
        format!("</{}>", self.tag)
    }

    /// Build an HTML excerpt of `full_text` around the first
    /// case-insensitive occurrence of `needle`.
    ///
    /// The window spans up to [`MAX_CHARS_BEFORE_KEYWORD`] characters before
    /// the match and [`MAX_CHARS_AFTER_KEYWORD`] after it; an ellipsis is
    /// added on each side where text was actually clipped. When the needle
    /// does not occur (or is empty), the window degenerates to the start of
    /// the text and nothing is highlighted. This never fails.
    pub fn build(&self, full_text: &str, needle: &str) -> String {
        let matcher = needle_matcher(needle);
        let first = matcher.as_ref().and_then(|re| re.find(full_text));

        let (match_start, match_end, after) = match first {
            Some(m) => (m.start(), m.end(), MAX_CHARS_AFTER_KEYWORD),
            // Fall back to a window from position 0 whose end still
            // advances by the needle's length, as if it matched there.
            None => (0, 0, needle.chars().count() + MAX_CHARS_AFTER_KEYWORD),
        };

        let (window_start, clipped_before) =
            step_back(full_text, match_start, MAX_CHARS_BEFORE_KEYWORD);
        let (window_end, clipped_after) = step_forward(full_text, match_end, after);
        let window = &full_text[window_start..window_end];

        let mut excerpt = String::new();
        if clipped_before {
            excerpt.push(ELLIPSIS);
        }
        let mut last = 0;
        if let Some(re) = &matcher {
            for m in re.find_iter(window) {
                excerpt.push_str(&escape_html(&window[last..m.start()]));
                excerpt.push_str(&self.opening_tag());
                excerpt.push_str(&escape_html(m.as_str()));
                excerpt.push_str(&self.closing_tag());
                last = m.end();
            }
        }
        excerpt.push_str(&escape_html(&window[last..]));
        if clipped_after {
            excerpt.push(ELLIPSIS);
        }
        excerpt
    }
}

/// Compile a case-insensitive literal matcher for the needle.
///
/// Returns `None` for an empty needle, which would otherwise match at every
/// position.
fn needle_matcher(needle: &str) -> Option<Regex> {
    if needle.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(needle))).ok()
}

/// Walk back up to `n` characters from byte position `from`, returning the
/// new position and whether any text remains before it.
fn step_back(text: &str, from: usize, n: usize) -> (usize, bool) {
    let mut pos = from;
    let mut taken = 0;
    for (i, _) in text[..from].char_indices().rev() {
        if taken == n {
            return (pos, true);
        }
        pos = i;
        taken += 1;
    }
    (pos, false)
}

/// Walk forward up to `n` characters from byte position `from`, returning
/// the new position and whether any text remains after it.
fn step_forward(text: &str, from: usize, n: usize) -> (usize, bool) {
    let mut taken = 0;
    for (i, _) in text[from..].char_indices() {
        if taken == n {
            return (from + i, true);
        }
        taken += 1;
    }
    (text.len(), false)
}

/// Escape HTML metacharacters so the result is safe inside a block element.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
