//! Ordered substitution rules for rendering accumulated text
//!
//! Each rule is a regex plus a replacement template. Rules run in list
//! order over the whole buffer; `bold` must precede `italic` so that the
//! single-asterisk pattern never sees a `**` pair, and `image` must
//! precede `link` because an image is a link prefixed with `!`.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Inline style applied to rendered images
pub const IMAGE_STYLE: &str = "max-width: 100%; display: block; margin: 10px 0;";

/// Inline style applied to `### ` headings
pub const HEADING_STYLE: &str = "display: block; margin-top: 10px;";

/// Bullet marker inserted for `- ` lines
pub const BULLET_MARKER: &str = "•";

/// A single named substitution.
#[derive(Debug)]
pub struct MarkupRule {
    /// Stable identifier, used by tests and logging
    pub name: &'static str,
    regex: Regex,
    replacement: String,
}

impl MarkupRule {
    fn new(name: &'static str, pattern: &str, replacement: String) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("Invalid markup rule pattern"),
            replacement,
        }
    }

    /// Apply this rule to every match in `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.regex.replace_all(text, self.replacement.as_str())
    }

    /// The regex source, for diagnostics.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Any character except a line terminator
const LINE_CHAR: &str = r"[^\r\n\x{2028}\x{2029}]";

/// Start of text or a line terminator, captured so it can be put back
const LINE_START: &str = r"(^|[\r\n\x{2028}\x{2029}])";

/// All rules in application order.
///
/// `\r`, `\n`, U+2028 and U+2029 all end a line. Inline constructs never
/// span one, and headings and bullets may start after any of them.
pub(crate) static RULES: Lazy<Vec<MarkupRule>> = Lazy::new(|| {
    vec![
        MarkupRule::new(
            "bold",
            &format!(r"\*\*({}*?)\*\*", LINE_CHAR),
            "<strong>${1}</strong>".to_string(),
        ),
        MarkupRule::new(
            "italic",
            &format!(r"\*({}*?)\*", LINE_CHAR),
            "<em>${1}</em>".to_string(),
        ),
        MarkupRule::new(
            "image",
            &format!(r"!\[({0}*?)\]\(({0}*?)\)", LINE_CHAR),
            format!(r#"<img alt="${{1}}" src="${{2}}" style="{}">"#, IMAGE_STYLE),
        ),
        MarkupRule::new(
            "link",
            &format!(r"\[({0}*?)\]\(({0}*?)\)", LINE_CHAR),
            r#"<a href="${2}" target="_blank">${1}</a>"#.to_string(),
        ),
        MarkupRule::new(
            "heading",
            &format!(r"{}###\s({}*)", LINE_START, LINE_CHAR),
            format!(r#"${{1}}<strong style="{}">${{2}}</strong>"#, HEADING_STYLE),
        ),
        MarkupRule::new(
            "bullet",
            &format!(r"{}-\s({}*)", LINE_START, LINE_CHAR),
            format!("${{1}}<br>{} ${{2}}", BULLET_MARKER),
        ),
    ]
});
