use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Literal token the lineage service understands as "traverse everything".
pub const FULL_DEPTH_TOKEN: &str = "Full";

/// How far to walk the lineage graph from the requested entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DepthRepr", into = "String")]
pub enum Depth {
    /// Bounded traversal, at least one hop
    Levels(NonZeroU32),

    /// Unbounded traversal
    Full,
}

impl Depth {
    pub fn levels(levels: u32) -> Result<Self> {
        NonZeroU32::new(levels)
            .map(Self::Levels)
            .ok_or_else(|| ProtocolError::InvalidDepth(levels.to_string()))
    }
}

impl Default for Depth {
    fn default() -> Self {
        Self::Levels(NonZeroU32::MIN)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Levels(levels) => write!(f, "{levels}"),
            Self::Full => f.write_str(FULL_DEPTH_TOKEN),
        }
    }
}

impl FromStr for Depth {
    type Err = ProtocolError;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(FULL_DEPTH_TOKEN) {
            return Ok(Self::Full);
        }
        trimmed
            .parse::<NonZeroU32>()
            .map(Self::Levels)
            .map_err(|_| ProtocolError::InvalidDepth(raw.to_string()))
    }
}

impl From<Depth> for String {
    fn from(depth: Depth) -> Self {
        depth.to_string()
    }
}

// Accepts both `2` and `"2"` on the wire; the depth selector historically sent strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum DepthRepr {
    Number(i64),
    Text(String),
}

impl TryFrom<DepthRepr> for Depth {
    type Error = ProtocolError;

    fn try_from(repr: DepthRepr) -> Result<Self> {
        match repr {
            DepthRepr::Number(n) => u32::try_from(n)
                .map_err(|_| ProtocolError::InvalidDepth(n.to_string()))
                .and_then(Depth::levels),
            DepthRepr::Text(text) => text.parse(),
        }
    }
}
