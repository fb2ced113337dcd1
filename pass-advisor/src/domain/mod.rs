//! Domain types for the pass advisor.
//!
//! Identifiers and train records are validated at construction time, so
//! code that receives these types can trust their validity.

mod segment;
mod station;
mod train;

pub use segment::{InvalidSegmentId, SegmentId};
pub use station::{InvalidStationId, StationId};
pub use train::{InvalidPriority, InvalidTrainId, Priority, Train, TrainId};
