//! Pairwise conflict detection.

use crate::domain::{SegmentId, Train};
use crate::network::OccupancyMap;

/// Two trains resolved to the same track segment.
///
/// The parties are kept in canonical (train id) order, so a conflict does not
/// depend on the order its trains were examined in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    segment: SegmentId,
    parties: [Train; 2],
}

impl Conflict {
    /// Create a conflict between two trains on `segment`.
    pub fn new(segment: SegmentId, a: Train, b: Train) -> Self {
        let parties = if a <= b { [a, b] } else { [b, a] };
        Self { segment, parties }
    }

    /// The contested segment.
    pub fn segment(&self) -> &SegmentId {
        &self.segment
    }

    /// Both trains, in canonical order.
    pub fn parties(&self) -> (&Train, &Train) {
        (&self.parties[0], &self.parties[1])
    }
}

/// Check whether two trains occupy the same segment.
///
/// A train whose location has no occupancy entry (a junction, an isolated
/// station, or a station not in the network) never takes part in a conflict.
/// A train is never in conflict with itself.
pub fn detect(a: &Train, b: &Train, occupancy: &OccupancyMap) -> Option<Conflict> {
    if a.id == b.id {
        return None;
    }

    let segment_a = occupancy.segment_at(&a.location)?;
    let segment_b = occupancy.segment_at(&b.location)?;

    (segment_a == segment_b).then(|| Conflict::new(segment_a.clone(), a.clone(), b.clone()))
}
