//! Track segment identifier type.

use std::fmt;

/// Error returned when parsing an invalid segment identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid segment id: {reason}")]
pub struct InvalidSegmentId {
    reason: &'static str,
}

/// An opaque, non-blank track segment (edge) identifier.
///
/// The id carries no direction; a segment joining A and B is the same
/// segment when seen from either end.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(String);

impl SegmentId {
    /// Parse a segment id from a string, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidSegmentId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidSegmentId {
                reason: "segment id cannot be blank",
            });
        }
        Ok(SegmentId(trimmed.to_string()))
    }

    /// Returns the segment id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentId({})", self.0)
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
