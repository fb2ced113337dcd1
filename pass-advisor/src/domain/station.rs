//! Station identifier type.

use std::fmt;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// An opaque, non-blank station (node) identifier.
///
/// Surrounding whitespace is trimmed on parse, so `" B "` and `"B"` name the
/// same station regardless of whether they came from JSON or CSV input.
///
/// # Examples
///
/// ```
/// use pass_advisor::domain::StationId;
///
/// let id = StationId::parse(" X ").unwrap();
/// assert_eq!(id.as_str(), "X");
///
/// // Blank ids are rejected
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Parse a station id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStationId {
                reason: "station id cannot be blank",
            });
        }
        Ok(StationId(trimmed.to_string()))
    }

    /// Returns the station id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
