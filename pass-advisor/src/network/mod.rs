//! Rail network model and occupancy resolution.
//!
//! A [`Network`] is validated once from raw nodes and edges and is read-only
//! afterwards. [`build_occupancy_map`] derives, for every dead-end station,
//! the single segment a train standing there must be occupying.

mod error;
mod graph;
mod occupancy;

pub use error::MalformedGraphError;
pub use graph::{EdgeSpec, Network, NetworkVersion, NodeSpec, Segment, Station};
pub use occupancy::{AdjacencyMap, OccupancyMap, build_occupancy_map};
