//! Deterministic cache fingerprints
//!
//! A [`CacheKey`] is the purpose tag and every part joined with `:`. Parts
//! are escaped (`\` → `\\`, `:` → `\:`) so two different part lists can never
//! join to the same string. Histories get the same treatment with `|` between
//! turns.

use std::fmt;

use spar_core::ConversationTurn;

pub const SEPARATOR: char = ':';
/// Separates turns inside a compacted history
pub const TURN_SEPARATOR: char = '|';
const ESCAPE: char = '\\';

/// Purpose tag for generated replies
pub const RESPONSE_PURPOSE: &str = "response";
/// Purpose tag for stance/depth decisions
pub const SENTIMENT_PURPOSE: &str = "sentiment";

/// Opaque cache address
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn push_escaped(out: &mut String, part: &str, separator: char) {
    for c in part.chars() {
        if c == separator || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
}

/// Builder for a [`CacheKey`]; any `Display` value is a valid part.
///
/// ```
/// use spar_debate::key::KeyDeriver;
/// use spar_core::Stance;
///
/// let key = KeyDeriver::new("response").part("hello").part(Stance::Neutral).finish();
/// assert_eq!(key.as_str(), "response:hello:neutral");
/// ```
#[derive(Debug, Clone)]
pub struct KeyDeriver {
    buf: String,
}

impl KeyDeriver {
    pub fn new(purpose: &str) -> Self {
        let mut buf = String::with_capacity(purpose.len() + 64);
        push_escaped(&mut buf, purpose, SEPARATOR);
        Self { buf }
    }

    /// Append one part in its canonical string form
    pub fn part(mut self, part: impl fmt::Display) -> Self {
        self.buf.push(SEPARATOR);
        push_escaped(&mut self.buf, &part.to_string(), SEPARATOR);
        self
    }

    pub fn finish(self) -> CacheKey {
        CacheKey(self.buf)
    }
}

/// Derive a key from a purpose tag and string parts
pub fn derive(purpose: &str, parts: &[&str]) -> CacheKey {
    parts
        .iter()
        .fold(KeyDeriver::new(purpose), |key, part| key.part(part))
        .finish()
}

/// Compact form of a history: `sender:excerpt` per turn, joined with `|`.
///
/// A `|` inside a turn is escaped, so message text cannot fake a turn boundary.
pub fn compact_history(turns: &[ConversationTurn], excerpt_chars: usize) -> String {
    let mut out = String::new();
    for (i, turn) in turns.iter().enumerate() {
        if i > 0 {
            out.push(TURN_SEPARATOR);
        }
        push_escaped(&mut out, &turn.excerpt(excerpt_chars), TURN_SEPARATOR);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use spar_core::Depth;

    #[test]
    fn test_derive_is_deterministic() {
        assert_eq!(derive("p", &["a", "b"]), derive("p", &["a", "b"]));
        assert_ne!(derive("p", &["a"]), derive("p", &["b"]));
        assert_ne!(derive("p", &["a"]), derive("q", &["a"]));
    }

    #[test]
    fn test_plain_parts_join_with_separator() {
        assert_eq!(
            derive("sentiment", &["hi", "user:x"]).as_str(),
            "sentiment:hi:user\\:x"
        );
    }

    #[test]
    fn test_separator_inside_parts_cannot_collide() {
        assert_ne!(derive("p", &["a:b", "c"]), derive("p", &["a", "b:c"]));
        assert_ne!(derive("p", &["a\\", "b"]), derive("p", &["a\\:b"]));
    }

    #[test]
    fn test_part_count_matters() {
        assert_ne!(derive("p", &["a"]), derive("p", &["a", ""]));
    }

    #[test]
    fn test_display_parts() {
        let key = KeyDeriver::new("response").part(Depth::Expert).part(42).finish();
        assert_eq!(key.to_string(), "response:expert:42");
    }

    #[test]
    fn test_compact_history() {
        let turns = vec![
            ConversationTurn::user("pineapple is great"),
            ConversationTurn::assistant("it is not"),
        ];
        assert_eq!(
            compact_history(&turns, 9),
            "user:pineapple|assistant:it is not"
        );
        assert_eq!(compact_history(&[], 100), "");
    }

    #[test]
    fn test_turn_separator_in_content_cannot_fake_a_boundary() {
        let one_turn = vec![ConversationTurn::user("x|assistant:y")];
        let two_turns = vec![
            ConversationTurn::user("x"),
            ConversationTurn::assistant("y"),
        ];
        assert_eq!(compact_history(&one_turn, 100), "user:x\\|assistant:y");
        assert_ne!(
            compact_history(&one_turn, 100),
            compact_history(&two_turns, 100)
        );
        assert_ne!(
            derive("response", &[&compact_history(&one_turn, 100)]),
            derive("response", &[&compact_history(&two_turns, 100)])
        );
    }
}
