//! Train roster: the trains supplied for one advisory computation.
//!
//! Rows that cannot be turned into a [`Train`] are excluded rather than
//! failing the whole computation; each exclusion is recorded as a
//! [`RosterIssue`] so callers can report it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{InvalidPriority, Priority, StationId, Train, TrainId};

/// Type label used when a row does not name one.
pub const UNKNOWN_TRAIN_TYPE: &str = "unknown";

/// A train row as supplied by a loader, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainRecord {
    #[serde(default)]
    pub train_id: Option<String>,

    #[serde(default)]
    pub train_type: Option<String>,

    #[serde(default)]
    pub current_location: Option<String>,

    #[serde(default)]
    pub priority: Option<String>,
}

impl TrainRecord {
    /// A record with every field present.
    pub fn new(
        train_id: impl Into<String>,
        train_type: impl Into<String>,
        current_location: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            train_id: Some(train_id.into()),
            train_type: Some(train_type.into()),
            current_location: Some(current_location.into()),
            priority: Some(priority.into()),
        }
    }
}

/// Why a roster row was excluded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectedRow {
    #[error("missing train id")]
    MissingTrainId,

    #[error("missing current location")]
    MissingLocation,

    #[error("missing priority")]
    MissingPriority,

    #[error(transparent)]
    InvalidPriority(#[from] InvalidPriority),

    #[error("duplicate train id: {0}")]
    DuplicateTrain(TrainId),
}

/// A roster row that was excluded, with its zero-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterIssue {
    pub row: usize,
    pub reason: RejectedRow,
}

/// Validated trains, in the order they were supplied.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    trains: Vec<Train>,
    issues: Vec<RosterIssue>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw records into a roster, excluding unusable rows.
    pub fn from_records(records: impl IntoIterator<Item = TrainRecord>) -> Self {
        let mut roster = Self::new();
        let mut seen = HashSet::new();
        for (row, record) in records.into_iter().enumerate() {
            match validate(record) {
                Ok(train) => roster.admit(row, train, &mut seen),
                Err(reason) => roster.reject(row, reason),
            }
        }
        roster
    }

    fn admit(&mut self, row: usize, train: Train, seen: &mut HashSet<TrainId>) {
        if seen.insert(train.id.clone()) {
            self.trains.push(train);
        } else {
            self.reject(row, RejectedRow::DuplicateTrain(train.id));
        }
    }

    fn reject(&mut self, row: usize, reason: RejectedRow) {
        warn!(row, %reason, "excluding train from roster");
        self.issues.push(RosterIssue { row, reason });
    }

    /// The usable trains, in supplied order.
    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Number of usable trains.
    pub fn len(&self) -> usize {
        self.trains.len()
    }

    /// Returns true if there are no usable trains.
    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    /// Rows that were excluded.
    pub fn issues(&self) -> &[RosterIssue] {
        &self.issues
    }

    /// Number of rows that were excluded.
    pub fn excluded(&self) -> usize {
        self.issues.len()
    }
}

fn validate(record: TrainRecord) -> Result<Train, RejectedRow> {
    let id = record
        .train_id
        .as_deref()
        .and_then(|s| TrainId::parse(s).ok())
        .ok_or(RejectedRow::MissingTrainId)?;

    let location = record
        .current_location
        .as_deref()
        .and_then(|s| StationId::parse(s).ok())
        .ok_or(RejectedRow::MissingLocation)?;

    let priority = match record.priority.as_deref().map(str::trim) {
        None | Some("") => return Err(RejectedRow::MissingPriority),
        Some(raw) => Priority::parse(raw)?,
    };

    let class = record
        .train_type
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_TRAIN_TYPE.to_string());

    Ok(Train::new(id, class, location, priority))
}
