//! Train identity, priority, and the request-scoped train record.

use std::fmt;

use super::StationId;

/// Error returned when parsing an invalid train identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train id: {reason}")]
pub struct InvalidTrainId {
    reason: &'static str,
}

/// A non-blank train identifier, unique within one roster.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainId(String);

impl TrainId {
    /// Parse a train id from a string, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidTrainId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidTrainId {
                reason: "train id cannot be blank",
            });
        }
        Ok(TrainId(trimmed.to_string()))
    }

    /// Returns the train id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainId({})", self.0)
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a priority value is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid priority {value:?}: expected an integer")]
pub struct InvalidPriority {
    value: String,
}

/// Dispatch priority of a train. Higher values are more important.
///
/// # Examples
///
/// ```
/// use pass_advisor::domain::Priority;
///
/// let express = Priority::parse("9").unwrap();
/// let freight = Priority::parse(" 2 ").unwrap();
/// assert!(express > freight);
///
/// assert!(Priority::parse("high").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Priority(pub i64);

impl Priority {
    /// Parse a priority from its decimal text form.
    pub fn parse(s: &str) -> Result<Self, InvalidPriority> {
        s.trim()
            .parse::<i64>()
            .map(Priority)
            .map_err(|_| InvalidPriority {
                value: s.to_string(),
            })
    }

    /// Returns the raw priority value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A train as supplied for one advisory computation.
///
/// Trains have no lifecycle beyond the request that carries them. Ordering
/// is by train id first, which gives conflict parties a canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Train {
    /// Unique train identifier.
    pub id: TrainId,

    /// Type or class label (e.g. "Express", "Freight").
    pub class: String,

    /// Station the train is currently at.
    pub location: StationId,

    /// Dispatch priority; higher is more important.
    pub priority: Priority,
}

impl Train {
    /// Create a new train.
    pub fn new(
        id: TrainId,
        class: impl Into<String>,
        location: StationId,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            class: class.into(),
            location,
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train(id: &str, location: &str, priority: i64) -> Train {
        Train::new(
            TrainId::parse(id).unwrap(),
            "Express",
            StationId::parse(location).unwrap(),
            Priority(priority),
        )
    }

    #[test]
    fn train_id_parse() {
        assert_eq!(TrainId::parse(" T1 ").unwrap().as_str(), "T1");
        assert!(TrainId::parse("").is_err());
        assert_eq!(format!("{:?}", TrainId::parse("T1").unwrap()), "TrainId(T1)");
    }

    #[test]
    fn priority_parse() {
        assert_eq!(Priority::parse("5").unwrap(), Priority(5));
        assert_eq!(Priority::parse("-3").unwrap(), Priority(-3));
        assert_eq!(Priority::parse(" 12\t").unwrap(), Priority(12));
        assert!(Priority::parse("").is_err());
        assert!(Priority::parse("1.5").is_err());
        assert!(Priority::parse("urgent").is_err());
    }

    #[test]
    fn priority_error_display() {
        let err = Priority::parse("urgent").unwrap_err();
        assert_eq!(err.to_string(), "invalid priority \"urgent\": expected an integer");
    }

    #[test]
    fn priority_ordering() {
        assert!(Priority(9) > Priority(2));
        assert!(Priority(-1) < Priority(0));
        assert_eq!(Priority(4).value(), 4);
    }

    #[test]
    fn trains_order_by_id_first() {
        let a = train("A1", "Z", 1);
        let b = train("B1", "A", 99);
        assert!(a < b);
    }
}
