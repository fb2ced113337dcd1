//! Loading networks and rosters from files.
//!
//! The network is a JSON document of nodes and edges; the roster is a CSV
//! file with one train per row.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::network::{EdgeSpec, MalformedGraphError, Network, NodeSpec};
use crate::roster::{Roster, TrainRecord};

/// Errors from loading input data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading a file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The network document is not valid JSON of the expected shape
    #[error("invalid network JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The roster is not valid CSV
    #[error("invalid roster CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The network document describes an inconsistent graph
    #[error("malformed network: {0}")]
    Graph(#[from] MalformedGraphError),
}

impl LoadError {
    /// Whether the error is caused by the content of the input, rather than
    /// by failing to read it.
    pub fn is_bad_input(&self) -> bool {
        !matches!(self, LoadError::Io { .. })
    }
}

/// On-the-wire shape of a network document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkDocument {
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,

    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl NetworkDocument {
    /// Validate the document into a network.
    pub fn into_network(self) -> Result<Network, MalformedGraphError> {
        Network::load(self.nodes, self.edges)
    }
}

/// Parse and validate a network from JSON text.
pub fn parse_network(json: &str) -> Result<Network, LoadError> {
    let document: NetworkDocument = serde_json::from_str(json)?;
    Ok(document.into_network()?)
}

/// Parse a roster from CSV with a header row.
///
/// Columns are matched by name (`train_id`, `train_type`,
/// `current_location`, `priority`) and fields are trimmed. Short rows leave
/// their trailing fields missing, and rows with unusable fields are excluded
/// by [`Roster::from_records`]; only unreadable CSV is an error.
pub fn parse_roster<R: Read>(reader: R) -> Result<Roster, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let records = rdr
        .deserialize::<TrainRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Roster::from_records(records))
}

/// Paths of the network and roster files.
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub network: PathBuf,
    pub trains: PathBuf,
}

impl DataFiles {
    /// Create a new pair of data file paths.
    pub fn new(network: impl Into<PathBuf>, trains: impl Into<PathBuf>) -> Self {
        Self {
            network: network.into(),
            trains: trains.into(),
        }
    }

    /// Read and validate the network file.
    pub async fn load_network(&self) -> Result<Network, LoadError> {
        let text = read(&self.network).await?;
        let network = parse_network(&text)?;
        debug!(
            path = %self.network.display(),
            stations = network.station_count(),
            segments = network.segment_count(),
            "loaded network"
        );
        Ok(network)
    }

    /// Read and validate the roster file.
    pub async fn load_roster(&self) -> Result<Roster, LoadError> {
        let bytes = tokio::fs::read(&self.trains)
            .await
            .map_err(|source| LoadError::Io {
                path: self.trains.clone(),
                source,
            })?;
        let roster = parse_roster(bytes.as_slice())?;
        debug!(
            path = %self.trains.display(),
            trains = roster.len(),
            excluded = roster.excluded(),
            "loaded roster"
        );
        Ok(roster)
    }
}

impl Default for DataFiles {
    fn default() -> Self {
        Self::new("network.json", "trains.csv")
    }
}

async fn read(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, StationId};
    use crate::advisor::{Advisor, AdvisorConfig};
    use crate::network::build_occupancy_map;
    use crate::roster::{RejectedRow, RosterIssue};
    use tempfile::tempdir;

    const NETWORK: &str = r#"{
        "nodes": [
            {"id": "X", "name": "Xanadu Sidings"},
            {"id": "J"},
            {"id": "P", "name": null}
        ],
        "edges": [
            {"id": "e7", "from": "X", "to": "J"},
            {"id": "e8", "from": "J", "to": "P"}
        ]
    }"#;

    const TRAINS: &str = "\
train_id,train_type,current_location,priority
T1, Freight ,X,2
T2,Express,X, 9
";

    #[test]
    fn parse_network_json() {
        let network = parse_network(NETWORK).unwrap();
        assert_eq!(network.station_count(), 3);
        assert_eq!(network.segment_count(), 2);
        assert_eq!(network.name_of(&StationId::parse("X").unwrap()), "Xanadu Sidings");
        assert_eq!(network.name_of(&StationId::parse("P").unwrap()), "P");
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let network = parse_network("{}").unwrap();
        assert_eq!(network.station_count(), 0);
        assert_eq!(network.segment_count(), 0);
    }

    #[test]
    fn invalid_json_is_bad_input() {
        let err = parse_network("{ nodes: ").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        assert!(err.is_bad_input());
    }

    #[test]
    fn malformed_graph_is_bad_input() {
        let err = parse_network(r#"{"nodes": [{"id": "A"}], "edges": [{"id": "e1", "from": "A", "to": "Z"}]}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Graph(MalformedGraphError::UnknownEndpoint { .. })
        ));
        assert_eq!(
            err.to_string(),
            "malformed network: segment e1 references unknown station Z"
        );
    }

    #[test]
    fn parse_roster_csv() {
        let roster = parse_roster(TRAINS.as_bytes()).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.trains()[0].class, "Freight");
        assert_eq!(roster.trains()[1].priority, Priority(9));
    }

    #[test]
    fn roster_columns_matched_by_name() {
        let csv = "priority,current_location,train_id,notes,train_type\n4,X,T9,late,Local\n";
        let roster = parse_roster(csv.as_bytes()).unwrap();
        let train = &roster.trains()[0];
        assert_eq!(train.id.as_str(), "T9");
        assert_eq!(train.class, "Local");
        assert_eq!(train.location.as_str(), "X");
        assert_eq!(train.priority, Priority(4));
    }

    #[test]
    fn roster_rows_with_empty_fields_are_excluded() {
        let csv = "train_id,train_type,current_location,priority\nT1,Freight,X,\nT2,Express,,3\nT3,Local,X,1\n";
        let roster = parse_roster(csv.as_bytes()).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.issues()[0].reason, RejectedRow::MissingPriority);
        assert_eq!(roster.issues()[1].reason, RejectedRow::MissingLocation);
    }

    #[test]
    fn short_rows_are_excluded() {
        let csv = "train_id,train_type,current_location,priority\nT1,Freight,X,2\nT2,Express,X,9\nT3,Local\n";
        let roster = parse_roster(csv.as_bytes()).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(
            roster.issues(),
            &[RosterIssue {
                row: 2,
                reason: RejectedRow::MissingLocation,
            }]
        );
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let csv = b"train_id,train_type,current_location,priority\nT1,\xff\xfe,X,2\n";
        let err = parse_roster(&csv[..]).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
        assert!(err.is_bad_input());
    }

    #[tokio::test]
    async fn short_row_in_file_still_advises() {
        let dir = tempdir().unwrap();
        let files = DataFiles::new(dir.path().join("network.json"), dir.path().join("trains.csv"));
        std::fs::write(&files.network, NETWORK).unwrap();
        std::fs::write(&files.trains, format!("{TRAINS}T3,Local\n")).unwrap();

        let network = files.load_network().await.unwrap();
        let roster = files.load_roster().await.unwrap();
        let occupancy = build_occupancy_map(&network);
        let advice = Advisor::new(&network, &occupancy, &AdvisorConfig::default()).advise(&roster);

        assert_eq!(advice.excluded(), 1);
        assert_eq!(
            advice.recommendations()[0].to_string(),
            "Hold Train T1 (Freight) at Xanadu Sidings to let Train T2 (Express) pass."
        );
    }

    #[tokio::test]
    async fn load_files() {
        let dir = tempdir().unwrap();
        let files = DataFiles::new(dir.path().join("network.json"), dir.path().join("trains.csv"));
        std::fs::write(&files.network, NETWORK).unwrap();
        std::fs::write(&files.trains, TRAINS).unwrap();

        let network = files.load_network().await.unwrap();
        let roster = files.load_roster().await.unwrap();
        assert_eq!(network.station_count(), 3);
        assert_eq!(roster.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let files = DataFiles::new(dir.path().join("absent.json"), dir.path().join("absent.csv"));

        let err = files.load_network().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(!err.is_bad_input());
        assert!(err.to_string().contains("absent.json"));

        assert!(matches!(files.load_roster().await.unwrap_err(), LoadError::Io { .. }));
    }

    #[test]
    fn default_paths() {
        let files = DataFiles::default();
        assert_eq!(files.network, PathBuf::from("network.json"));
        assert_eq!(files.trains, PathBuf::from("trains.csv"));
    }
}
