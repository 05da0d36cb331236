//! Markup rendering for streamed assistant text
//!
//! Converts the accumulated plain text into a small HTML fragment. This is
//! deliberately not a Markdown parser: only a fixed list of substitutions
//! is applied, always to the full buffer, so a render never depends on
//! what was rendered before.
//!
//! Supported:
//! - Bold (**text**) - `<strong>`
//! - Italic (*text*) - `<em>`
//! - Images (![alt](url)) - width-constrained `<img>`
//! - Links ([text](url)) - `<a target="_blank">`
//! - Headings (### Title) - block-level `<strong>`
//! - Bullets (- item) - line break plus bullet marker

mod rules;

pub use rules::{MarkupRule, BULLET_MARKER, HEADING_STYLE, IMAGE_STYLE};

use rules::RULES;

/// Render text by applying every rule in order.
///
/// Pure function of its input; rendering the same text twice yields
/// byte-identical output.
pub fn render_markup(text: &str) -> String {
    RULES
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc).into_owned())
}

/// The ordered rule list.
pub fn rules() -> &'static [MarkupRule] {
    RULES.as_slice()
}

/// Look up a rule by name.
pub fn find_rule(name: &str) -> Option<&'static MarkupRule> {
    RULES.iter().find(|rule| rule.name == name)
}
