//! Network loading errors.

use crate::domain::{SegmentId, StationId};

/// The supplied node/edge collections do not form a usable network.
///
/// Loading is all-or-nothing: any of these aborts the load and no partial
/// network is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedGraphError {
    /// A node has no id, or a blank one
    #[error("node #{index} has no id")]
    MissingStationId { index: usize },

    /// Two nodes share an id
    #[error("duplicate station id: {0}")]
    DuplicateStation(StationId),

    /// An edge has no id, or a blank one
    #[error("edge #{index} has no id")]
    MissingSegmentId { index: usize },

    /// Two edges share an id
    #[error("duplicate segment id: {0}")]
    DuplicateSegment(SegmentId),

    /// An edge is missing its `from` or `to` station
    #[error("segment {segment} has no '{end}' station")]
    MissingEndpoint {
        segment: SegmentId,
        end: &'static str,
    },

    /// An edge references a station that is not in the network
    #[error("segment {segment} references unknown station {station}")]
    UnknownEndpoint {
        segment: SegmentId,
        station: StationId,
    },
}
