//! Station-to-segment occupancy.
//!
//! A train standing at a dead-end station (exactly one connecting segment)
//! can only be occupying that segment, so for conflict purposes the station
//! and the segment are interchangeable. Junctions and isolated stations are
//! left unresolved: without knowing which way a train arrived or will leave,
//! occupancy there is ambiguous and we make no claim.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{SegmentId, StationId};

use super::graph::Network;

/// Stations reachable from each station via exactly one segment hop.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyMap {
    neighbors: HashMap<StationId, Vec<(StationId, SegmentId)>>,
}

impl AdjacencyMap {
    /// Build the adjacency map of a network.
    ///
    /// Every segment is inserted in both directions. A self-loop therefore
    /// contributes two entries to its station.
    pub fn from_network(network: &Network) -> Self {
        let mut neighbors: HashMap<StationId, Vec<(StationId, SegmentId)>> = HashMap::new();

        for segment in network.segments() {
            neighbors
                .entry(segment.from.clone())
                .or_default()
                .push((segment.to.clone(), segment.id.clone()));
            neighbors
                .entry(segment.to.clone())
                .or_default()
                .push((segment.from.clone(), segment.id.clone()));
        }

        Self { neighbors }
    }

    /// Neighbor entries of a station; empty for stations with no segments.
    pub fn neighbors(&self, station: &StationId) -> &[(StationId, SegmentId)] {
        self.neighbors
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of neighbor entries of a station.
    pub fn degree(&self, station: &StationId) -> usize {
        self.neighbors(station).len()
    }
}

/// Which segment a train at a given station occupies.
///
/// Only dead-end (degree 1) stations have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyMap {
    entries: BTreeMap<StationId, SegmentId>,
}

impl OccupancyMap {
    /// The segment occupied by a train at `station`, if determinable.
    pub fn segment_at(&self, station: &StationId) -> Option<&SegmentId> {
        self.entries.get(station)
    }

    /// Whether `station` resolves to a segment.
    pub fn contains(&self, station: &StationId) -> bool {
        self.entries.contains_key(station)
    }

    /// Number of resolvable stations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no station resolves to a segment.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All (station, segment) entries in station-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&StationId, &SegmentId)> {
        self.entries.iter()
    }
}

/// Derive the occupancy map of a network.
///
/// Pure: the same network always yields the same map.
///
/// # Examples
///
/// ```
/// use pass_advisor::domain::StationId;
/// use pass_advisor::network::{EdgeSpec, Network, NodeSpec, build_occupancy_map};
///
/// // X is a dead end hanging off junction J
/// let network = Network::load(
///     vec![NodeSpec::new("X"), NodeSpec::new("J"), NodeSpec::new("P"), NodeSpec::new("Q")],
///     vec![
///         EdgeSpec::new("e7", "X", "J"),
///         EdgeSpec::new("e8", "J", "P"),
///         EdgeSpec::new("e9", "J", "Q"),
///     ],
/// )
/// .unwrap();
///
/// let occupancy = build_occupancy_map(&network);
/// assert_eq!(occupancy.segment_at(&StationId::parse("X").unwrap()).unwrap().as_str(), "e7");
/// assert!(occupancy.segment_at(&StationId::parse("J").unwrap()).is_none());
/// ```
pub fn build_occupancy_map(network: &Network) -> OccupancyMap {
    let adjacency = AdjacencyMap::from_network(network);

    let entries = network
        .stations()
        .filter_map(|station| match adjacency.neighbors(&station.id) {
            [(_, segment)] => Some((station.id.clone(), segment.clone())),
            _ => None,
        })
        .collect();

    OccupancyMap { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{EdgeSpec, NodeSpec};

    fn sid(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn seg(s: &str) -> SegmentId {
        SegmentId::parse(s).unwrap()
    }

    fn network(nodes: &[&str], edges: &[(&str, &str, &str)]) -> Network {
        Network::load(
            nodes.iter().map(|n| NodeSpec::new(*n)).collect(),
            edges
                .iter()
                .map(|(id, from, to)| EdgeSpec::new(*id, *from, *to))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn adjacency_is_symmetric() {
        let net = network(&["A", "B"], &[("e1", "A", "B")]);
        let adj = AdjacencyMap::from_network(&net);
        assert_eq!(adj.neighbors(&sid("A")), &[(sid("B"), seg("e1"))]);
        assert_eq!(adj.neighbors(&sid("B")), &[(sid("A"), seg("e1"))]);
    }

    #[test]
    fn adjacency_of_isolated_station_is_empty() {
        let net = network(&["A", "Lonely"], &[]);
        let adj = AdjacencyMap::from_network(&net);
        assert_eq!(adj.degree(&sid("Lonely")), 0);
        assert!(adj.neighbors(&sid("Lonely")).is_empty());
    }

    #[test]
    fn self_loop_counts_twice() {
        let net = network(&["L"], &[("loop", "L", "L")]);
        let adj = AdjacencyMap::from_network(&net);
        assert_eq!(adj.degree(&sid("L")), 2);
    }

    #[test]
    fn dead_ends_resolve_to_their_segment() {
        // B - A - C
        let net = network(&["A", "B", "C"], &[("e1", "A", "B"), ("e2", "A", "C")]);
        let occupancy = build_occupancy_map(&net);

        assert_eq!(occupancy.len(), 2);
        assert_eq!(occupancy.segment_at(&sid("B")), Some(&seg("e1")));
        assert_eq!(occupancy.segment_at(&sid("C")), Some(&seg("e2")));
        assert!(!occupancy.contains(&sid("A")));
    }

    #[test]
    fn two_station_line_resolves_both_ends() {
        let net = network(&["A", "B"], &[("e1", "A", "B")]);
        let occupancy = build_occupancy_map(&net);
        assert_eq!(occupancy.segment_at(&sid("A")), Some(&seg("e1")));
        assert_eq!(occupancy.segment_at(&sid("B")), Some(&seg("e1")));
    }

    #[test]
    fn junctions_and_isolated_stations_are_unresolved() {
        let net = network(
            &["J", "P", "Q", "R", "Lonely"],
            &[("e1", "J", "P"), ("e2", "J", "Q"), ("e3", "J", "R")],
        );
        let occupancy = build_occupancy_map(&net);
        assert!(!occupancy.contains(&sid("J")));
        assert!(!occupancy.contains(&sid("Lonely")));
        assert_eq!(occupancy.len(), 3);
    }

    #[test]
    fn self_loop_station_is_unresolved() {
        let net = network(&["L"], &[("loop", "L", "L")]);
        assert!(build_occupancy_map(&net).is_empty());
    }

    #[test]
    fn parallel_segments_make_a_station_ambiguous() {
        let net = network(&["A", "B"], &[("up", "A", "B"), ("down", "A", "B")]);
        assert!(build_occupancy_map(&net).is_empty());
    }

    #[test]
    fn iter_is_in_station_order() {
        let net = network(&["Z", "A", "M"], &[("e1", "M", "Z"), ("e2", "M", "A")]);
        let occupancy = build_occupancy_map(&net);
        let stations: Vec<&str> = occupancy.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(stations, vec!["A", "Z"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::network::{EdgeSpec, NodeSpec};
    use proptest::prelude::*;

    /// Networks of up to 8 stations with arbitrary edges, including
    /// self-loops and parallel edges.
    fn arb_network() -> impl Strategy<Value = Network> {
        (1usize..8).prop_flat_map(|n| {
            proptest::collection::vec((0..n, 0..n), 0..12).prop_map(move |pairs| {
                let nodes = (0..n).map(|i| NodeSpec::new(format!("S{i}"))).collect();
                let edges = pairs
                    .iter()
                    .enumerate()
                    .map(|(k, (a, b))| EdgeSpec::new(format!("e{k}"), format!("S{a}"), format!("S{b}")))
                    .collect();
                Network::load(nodes, edges).unwrap()
            })
        })
    }

    /// Incident segment ends at a station; a self-loop has two.
    fn incidence(network: &Network, station: &StationId) -> usize {
        network
            .segments()
            .map(|s| usize::from(&s.from == station) + usize::from(&s.to == station))
            .sum()
    }

    proptest! {
        /// A station is resolvable iff exactly one segment end touches it
        #[test]
        fn resolvable_iff_degree_one(network in arb_network()) {
            let occupancy = build_occupancy_map(&network);
            for station in network.stations() {
                prop_assert_eq!(
                    occupancy.contains(&station.id),
                    incidence(&network, &station.id) == 1
                );
            }
        }

        /// Every entry maps to a segment that ends at that station
        #[test]
        fn entries_touch_their_station(network in arb_network()) {
            let occupancy = build_occupancy_map(&network);
            for (station, segment) in occupancy.iter() {
                let segment = network.segment(segment).unwrap();
                prop_assert!(segment.touches(station));
                prop_assert!(!segment.is_self_loop());
            }
        }

        /// Rebuilding from the same network yields the same map
        #[test]
        fn build_is_idempotent(network in arb_network()) {
            prop_assert_eq!(build_occupancy_map(&network), build_occupancy_map(&network));
        }
    }
}
