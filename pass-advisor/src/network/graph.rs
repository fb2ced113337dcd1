//! Rail network graph: stations (nodes) and track segments (edges).

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::domain::{SegmentId, StationId};

use super::error::MalformedGraphError;

/// A node as supplied by a loader, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Station identifier.
    pub id: Option<String>,

    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl NodeSpec {
    /// A node with an id and no display name.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// An edge as supplied by a loader, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// Segment identifier.
    pub id: Option<String>,

    /// One endpoint station id.
    pub from: Option<String>,

    /// The other endpoint station id.
    pub to: Option<String>,
}

impl EdgeSpec {
    /// An edge with all fields present.
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }
}

/// A station in a loaded network.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Station {
    pub id: StationId,

    /// Display name; the id itself when none was supplied.
    pub name: String,
}

/// An undirected track segment between two stations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub id: SegmentId,
    pub from: StationId,
    pub to: StationId,
}

#[cfg(test)]
impl Segment {
    /// Whether `station` is one of this segment's endpoints.
    pub fn touches(&self, station: &StationId) -> bool {
        &self.from == station || &self.to == station
    }

    /// Whether both endpoints are the same station.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Content fingerprint of a network.
///
/// Two networks with the same stations, names, and segments share a version,
/// regardless of the order their nodes and edges were supplied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkVersion(u64);

impl fmt::Display for NetworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A validated, immutable rail network.
///
/// # Examples
///
/// ```
/// use pass_advisor::domain::StationId;
/// use pass_advisor::network::{EdgeSpec, Network, NodeSpec};
///
/// let network = Network::load(
///     vec![NodeSpec::new("X").with_name("Xanadu Sidings"), NodeSpec::new("J")],
///     vec![EdgeSpec::new("e7", "X", "J")],
/// )
/// .unwrap();
///
/// assert_eq!(network.name_of(&StationId::parse("X").unwrap()), "Xanadu Sidings");
/// assert_eq!(network.name_of(&StationId::parse("J").unwrap()), "J");
///
/// // Edges must reference known stations
/// assert!(Network::load(vec![NodeSpec::new("X")], vec![EdgeSpec::new("e1", "X", "Q")]).is_err());
/// ```
///
/// Equality compares content: two networks are equal when they have the same
/// stations, names, and segments, whatever order they were supplied in.
#[derive(Debug, Clone)]
pub struct Network {
    stations: BTreeMap<StationId, Station>,
    segments: Vec<Segment>,
    version: NetworkVersion,
}

impl Network {
    /// Validate raw nodes and edges into a network.
    ///
    /// Fails if any id is missing, blank, or duplicated, or if an edge
    /// endpoint is missing or names a station that is not among `nodes`.
    pub fn load(nodes: Vec<NodeSpec>, edges: Vec<EdgeSpec>) -> Result<Self, MalformedGraphError> {
        let mut stations = BTreeMap::new();
        for (index, node) in nodes.into_iter().enumerate() {
            let id = node
                .id
                .as_deref()
                .and_then(|s| StationId::parse(s).ok())
                .ok_or(MalformedGraphError::MissingStationId { index })?;

            if stations.contains_key(&id) {
                return Err(MalformedGraphError::DuplicateStation(id));
            }

            // Blank names fall back to the id, like absent ones
            let name = node
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| id.as_str().to_string());

            stations.insert(id.clone(), Station { id, name });
        }

        let mut seen = HashSet::new();
        let mut segments = Vec::with_capacity(edges.len());
        for (index, edge) in edges.into_iter().enumerate() {
            let id = edge
                .id
                .as_deref()
                .and_then(|s| SegmentId::parse(s).ok())
                .ok_or(MalformedGraphError::MissingSegmentId { index })?;

            if !seen.insert(id.clone()) {
                return Err(MalformedGraphError::DuplicateSegment(id));
            }

            let from = resolve_endpoint(&stations, &id, edge.from.as_deref(), "from")?;
            let to = resolve_endpoint(&stations, &id, edge.to.as_deref(), "to")?;

            segments.push(Segment { id, from, to });
        }

        let version = fingerprint(&stations, &segments);

        Ok(Self {
            stations,
            segments,
            version,
        })
    }

    /// Display name of a station.
    ///
    /// Falls back to the id itself for stations without a name, and for ids
    /// that are not in the network.
    pub fn name_of<'a>(&'a self, station: &'a StationId) -> &'a str {
        self.stations
            .get(station)
            .map(|s| s.name.as_str())
            .unwrap_or_else(|| station.as_str())
    }

    /// Look up a station by id.
    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    /// Look up a segment by id.
    pub fn segment(&self, id: &SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| &s.id == id)
    }

    /// Whether the network has a station with this id.
    pub fn contains_station(&self, id: &StationId) -> bool {
        self.stations.contains_key(id)
    }

    /// All stations, in id order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// All segments, in the order they were supplied.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Number of stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Content fingerprint, usable as a cache key.
    pub fn version(&self) -> NetworkVersion {
        self.version
    }
}

impl PartialEq for Network {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.stations == other.stations
            && sorted_by_id(&self.segments) == sorted_by_id(&other.segments)
    }
}

impl Eq for Network {}

#[cfg(test)]
impl Network {
    /// Force a version, to exercise fingerprint collisions.
    pub(crate) fn with_version(mut self, version: NetworkVersion) -> Self {
        self.version = version;
        self
    }
}

fn sorted_by_id(segments: &[Segment]) -> Vec<&Segment> {
    let mut sorted: Vec<&Segment> = segments.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));
    sorted
}

fn resolve_endpoint(
    stations: &BTreeMap<StationId, Station>,
    segment: &SegmentId,
    raw: Option<&str>,
    end: &'static str,
) -> Result<StationId, MalformedGraphError> {
    let station = raw
        .and_then(|s| StationId::parse(s).ok())
        .ok_or_else(|| MalformedGraphError::MissingEndpoint {
            segment: segment.clone(),
            end,
        })?;

    if !stations.contains_key(&station) {
        return Err(MalformedGraphError::UnknownEndpoint {
            segment: segment.clone(),
            station,
        });
    }

    Ok(station)
}

fn fingerprint(stations: &BTreeMap<StationId, Station>, segments: &[Segment]) -> NetworkVersion {
    let mut hasher = DefaultHasher::new();

    for station in stations.values() {
        station.hash(&mut hasher);
    }

    // Edge order is irrelevant to occupancy, so hash in id order
    for segment in sorted_by_id(segments) {
        segment.hash(&mut hasher);
    }

    NetworkVersion(hasher.finish())
}
