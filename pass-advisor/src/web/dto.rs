//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::advisor::{Advice, NO_CONFLICT_STATUS, Recommendation};
use crate::roster::TrainRecord;
use crate::source::NetworkDocument;

/// Request to advise on an inline network and roster.
#[derive(Debug, Default, Deserialize)]
pub struct OptimizeRequest {
    /// Nodes and edges of the network
    #[serde(default)]
    pub network: NetworkDocument,

    /// Trains, in roster order
    #[serde(default)]
    pub trains: Vec<TrainDto>,
}

/// A train in a JSON request.
///
/// Fields may be strings or numbers; anything else counts as missing.
#[derive(Debug, Default, Deserialize)]
pub struct TrainDto {
    #[serde(default)]
    pub train_id: Option<Value>,

    #[serde(default)]
    pub train_type: Option<Value>,

    #[serde(default)]
    pub current_location: Option<Value>,

    #[serde(default)]
    pub priority: Option<Value>,
}

impl From<TrainDto> for TrainRecord {
    fn from(dto: TrainDto) -> Self {
        Self {
            train_id: dto.train_id.and_then(text),
            train_type: dto.train_type.and_then(text),
            current_location: dto.current_location.and_then(text),
            priority: dto.priority.and_then(text),
        }
    }
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A recommendation in a response.
#[derive(Debug, Serialize)]
pub struct RecommendationResult {
    /// Rendered sentence, e.g. "Hold Train T1 (Freight) at X to let Train T2 (Express) pass."
    pub recommendation: String,

    pub hold_train_id: String,
    pub hold_train_type: String,
    pub hold_location_id: String,
    pub hold_location_name: String,
    pub pass_train_id: String,
    pub pass_train_type: String,

    /// Contested segment
    pub segment_id: String,
}

impl From<&Recommendation> for RecommendationResult {
    fn from(r: &Recommendation) -> Self {
        Self {
            recommendation: r.to_string(),
            hold_train_id: r.hold_train_id.to_string(),
            hold_train_type: r.hold_train_type.clone(),
            hold_location_id: r.hold_location.to_string(),
            hold_location_name: r.hold_location_name.clone(),
            pass_train_id: r.pass_train_id.to_string(),
            pass_train_type: r.pass_train_type.clone(),
            segment_id: r.segment.to_string(),
        }
    }
}

/// Response for the optimize endpoint.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OptimizeResponse {
    /// Nothing to recommend
    NoConflict {
        status: &'static str,

        #[serde(skip_serializing_if = "is_zero")]
        excluded_trains: usize,
    },

    /// One or more holds
    Advice {
        /// Sentence of the first recommendation
        recommendation: String,

        recommendations: Vec<RecommendationResult>,

        #[serde(skip_serializing_if = "is_zero")]
        excluded_trains: usize,
    },
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl OptimizeResponse {
    /// Create from the advisor's result.
    pub fn from_advice(advice: &Advice) -> Self {
        let excluded_trains = advice.excluded();
        match advice.recommendations() {
            [] => OptimizeResponse::NoConflict {
                status: NO_CONFLICT_STATUS,
                excluded_trains,
            },
            recs @ [first, ..] => OptimizeResponse::Advice {
                recommendation: first.to_string(),
                recommendations: recs.iter().map(RecommendationResult::from).collect(),
                excluded_trains,
            },
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
