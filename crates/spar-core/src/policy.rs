//! Stance and depth policy for a generated turn

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing a stance or depth label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}")]
pub struct PolicyParseError {
    pub kind: &'static str,
    pub value: String,
}

/// Rhetorical posture the assistant adopts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    /// Offer alternatives while keeping a supportive tone
    Supportive,
    /// Present strong counterarguments
    Challenging,
    /// Present balanced viewpoints
    Neutral,
}

impl Stance {
    pub const ALL: [Stance; 3] = [Self::Supportive, Self::Challenging, Self::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supportive => "supportive",
            Self::Challenging => "challenging",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stance {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supportive" => Ok(Self::Supportive),
            "challenging" => Ok(Self::Challenging),
            "neutral" => Ok(Self::Neutral),
            _ => Err(PolicyParseError {
                kind: "stance",
                value: s.to_string(),
            }),
        }
    }
}

/// Explanation sophistication level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    /// Simple, beginner-friendly
    Surface,
    /// Nuanced analysis
    Deep,
    /// Expert-level, advanced concepts
    Expert,
}

impl Depth {
    pub const ALL: [Depth; 3] = [Self::Surface, Self::Deep, Self::Expert];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::Deep => "deep",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Depth {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "surface" => Ok(Self::Surface),
            "deep" => Ok(Self::Deep),
            "expert" => Ok(Self::Expert),
            _ => Err(PolicyParseError {
                kind: "depth",
                value: s.to_string(),
            }),
        }
    }
}

/// The (stance, depth) pair governing one generated turn.
///
/// Always fully populated. [`Policy::default`] is the fallback
/// `{neutral, deep}` used whenever classification cannot decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Policy {
    pub stance: Stance,
    pub depth: Depth,
}

impl Policy {
    pub fn new(stance: Stance, depth: Depth) -> Self {
        Self { stance, depth }
    }

    /// Policy for the opening turns of a debate: a provocative counter-stance.
    pub fn opening() -> Self {
        Self::new(Stance::Challenging, Depth::Deep)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::new(Stance::Neutral, Depth::Deep)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stance: {}, depth: {}", self.stance, self.depth)
    }
}
