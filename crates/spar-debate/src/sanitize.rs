//! Plain-text sanitizer for model output
//!
//! Generated replies must read like a message from a person: no markdown
//! emphasis, list markers, headings or quote markers. [`clean`] applies an
//! ordered list of [`Rule`]s, each a pure `&str -> String` transform.
//!
//! The pipeline is repeated until the text stops changing. Every rule only
//! removes characters (or swaps a `* ` bullet for `• `), so this terminates,
//! and it makes `clean` idempotent even when one rule exposes a pattern an
//! earlier rule handles.

use once_cell::sync::Lazy;
use regex::Regex;

/// One named transformation step
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

impl Rule {
    const fn new(name: &'static str, apply: fn(&str) -> String) -> Self {
        Self { name, apply }
    }
}

/// The pipeline, in application order
pub const RULES: &[Rule] = &[
    Rule::new("asterisk_bullets", convert_asterisk_bullets),
    Rule::new("header_emphasis", strip_header_emphasis),
    Rule::new("standalone_labels", strip_standalone_labels),
    Rule::new("bold", strip_bold),
    Rule::new("italic", strip_italic),
    Rule::new("stray_asterisks", strip_stray_asterisks),
    Rule::new("line_markers", strip_line_markers),
    Rule::new("blank_runs", collapse_blank_runs),
    Rule::new("trim", trim),
];

/// Glyph that replaces asterisk bullets
pub const BULLET: &str = "• ";

// Patterns are compile-time constants; construction cannot fail.
static ASTERISK_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\*[ \t]+").unwrap());
static HEADER_EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*{2,3}([^*\n]+?):\*{2,3}").unwrap());
static STANDALONE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([A-Za-z][A-Za-z \t]*?)[ \t]*:[ \t]*$").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+?)\*").unwrap());
// One match takes a whole stack of numbered, dash, heading and quote markers.
static LINE_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:[ \t]*(?:\d+\.[ \t]+|-[ \t]+|#+[ \t]*|>+[ \t]*))+").unwrap());
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// `* item` at line start becomes `• item`
pub fn convert_asterisk_bullets(text: &str) -> String {
    ASTERISK_BULLET.replace_all(text, BULLET).into_owned()
}

/// `**Label:**` / `***Label:***` becomes `Label`
pub fn strip_header_emphasis(text: &str) -> String {
    HEADER_EMPHASIS.replace_all(text, "$1").into_owned()
}

/// A line holding only `Some Label:` becomes `Some Label`
pub fn strip_standalone_labels(text: &str) -> String {
    STANDALONE_LABEL.replace_all(text, "$1").into_owned()
}

/// `**bold**` becomes `bold`
pub fn strip_bold(text: &str) -> String {
    BOLD.replace_all(text, "$1").into_owned()
}

/// `*italic*` becomes `italic`
pub fn strip_italic(text: &str) -> String {
    ITALIC.replace_all(text, "$1").into_owned()
}

/// Any asterisk left over from unbalanced emphasis is dropped
pub fn strip_stray_asterisks(text: &str) -> String {
    text.replace('*', "")
}

/// Leading `1. `, `- `, `#` and `>` markers are removed, however deeply stacked.
///
/// `1. item`, `- item`, `## Title` and `> quote` all become their text.
pub fn strip_line_markers(text: &str) -> String {
    LINE_MARKERS.replace_all(text, "").into_owned()
}

/// Three or more newlines collapse to one blank line
pub fn collapse_blank_runs(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}

pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

fn apply_rules(text: &str) -> String {
    RULES
        .iter()
        .fold(text.to_string(), |acc, rule| (rule.apply)(&acc))
}

/// Sanitize raw model output into plain conversational text.
///
/// Pure and idempotent: `clean(&clean(x)) == clean(x)`.
pub fn clean(raw: &str) -> String {
    let mut current = apply_rules(raw);
    loop {
        let next = apply_rules(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asterisk_bullets() {
        assert_eq!(convert_asterisk_bullets("* one\n  * two"), "• one\n• two");
        assert_eq!(convert_asterisk_bullets("a * b"), "a * b");
    }

    #[test]
    fn test_header_emphasis() {
        assert_eq!(strip_header_emphasis("**Pros:** cheap"), "Pros cheap");
        assert_eq!(strip_header_emphasis("***Key Point:***"), "Key Point");
        assert_eq!(strip_header_emphasis("**bold**"), "**bold**");
    }

    #[test]
    fn test_standalone_labels() {
        assert_eq!(
            strip_standalone_labels("Positive Impacts:\nmore"),
            "Positive Impacts\nmore"
        );
        assert_eq!(
            strip_standalone_labels("Note: this stays"),
            "Note: this stays"
        );
    }

    #[test]
    fn test_bold_then_italic() {
        assert_eq!(strip_bold("a **strong** b"), "a strong b");
        assert_eq!(strip_italic("an *aside* here"), "an aside here");
    }

    #[test]
    fn test_line_markers() {
        assert_eq!(
            strip_line_markers("1. first\n12. twelfth"),
            "first\ntwelfth"
        );
        assert_eq!(strip_line_markers("1.5 is a number"), "1.5 is a number");
        assert_eq!(strip_line_markers("- item\nwell-known"), "item\nwell-known");
        assert_eq!(strip_line_markers("## Title\n#tag"), "Title\ntag");
        assert_eq!(strip_line_markers("> quoted"), "quoted");
    }

    #[test]
    fn test_stacked_markers_go_in_one_pass() {
        assert_eq!(strip_line_markers("> - 1. ## deep"), "deep");

        let dashes = format!("{}x", "- ".repeat(20_000));
        assert_eq!(apply_rules(&dashes), "x");

        let mixed = format!("{}x", "- # > 3. ".repeat(5_000));
        assert_eq!(apply_rules(&mixed), "x");
    }

    #[test]
    fn test_collapse_blank_runs() {
        assert_eq!(collapse_blank_runs("a\n\n\n\nb\n\nc"), "a\n\nb\n\nc");
    }

    #[test]
    fn test_clean_example_reply() {
        let raw = "**Yes** it is!\n1. Great taste\n\n\n2. Versatile";
        assert_eq!(clean(raw), "Yes it is!\nGreat taste\n\nVersatile");
    }

    #[test]
    fn test_clean_reaches_patterns_exposed_by_later_rules() {
        // The dash hides the label from the label rule on the first pass.
        assert_eq!(clean("- Pros:\n- cheap"), "Pros\ncheap");
        assert_eq!(clean("# 1. Intro"), "Intro");
    }

    #[test]
    fn test_clean_drops_unbalanced_asterisks() {
        assert_eq!(clean("5 * 3 = 15 and **oops"), "5  3 = 15 and oops");
    }

    #[test]
    fn test_clean_keeps_plain_text() {
        let plain = "I hear you, but have you considered the cost?";
        assert_eq!(clean(plain), plain);
    }
}
