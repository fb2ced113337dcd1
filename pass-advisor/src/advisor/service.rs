//! Per-request decision service.
//!
//! Runs conflict detection over a roster and resolves every conflict found,
//! according to the configured [`ScanMode`].

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{SegmentId, Train};
use crate::network::{Network, OccupancyMap};
use crate::roster::Roster;

use super::config::{AdvisorConfig, ScanMode};
use super::detect::detect;
use super::policy::{Recommendation, Resolution, ResolutionPolicy};

/// Status reported when there is nothing to recommend.
pub const NO_CONFLICT_STATUS: &str = "no conflict found";

/// The result of one advisory computation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Advice {
    recommendations: Vec<Recommendation>,
    contested_segments: usize,
    excluded: usize,
}

impl Advice {
    /// Recommendations, one per resolved conflict.
    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Consume the advice, returning its recommendations.
    pub fn into_recommendations(self) -> Vec<Recommendation> {
        self.recommendations
    }

    /// Returns true if nothing is recommended.
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    /// Status text when nothing is recommended.
    pub fn status(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_CONFLICT_STATUS)
    }

    /// Segments with a conflict, including ones the policy declined.
    pub fn contested_segments(&self) -> usize {
        self.contested_segments
    }

    /// Roster rows that could not take part.
    pub fn excluded(&self) -> usize {
        self.excluded
    }
}

/// Advisor over one network snapshot.
///
/// # Examples
///
/// ```
/// use pass_advisor::advisor::{Advisor, AdvisorConfig};
/// use pass_advisor::network::{EdgeSpec, Network, NodeSpec, build_occupancy_map};
/// use pass_advisor::roster::{Roster, TrainRecord};
///
/// let network = Network::load(
///     vec![NodeSpec::new("X"), NodeSpec::new("J")],
///     vec![EdgeSpec::new("e7", "X", "J")],
/// )
/// .unwrap();
/// let occupancy = build_occupancy_map(&network);
/// let config = AdvisorConfig::default();
///
/// let roster = Roster::from_records(vec![
///     TrainRecord::new("T1", "Freight", "X", "2"),
///     TrainRecord::new("T2", "Express", "X", "9"),
/// ]);
///
/// let advice = Advisor::new(&network, &occupancy, &config).advise(&roster);
/// assert_eq!(
///     advice.recommendations()[0].to_string(),
///     "Hold Train T1 (Freight) at X to let Train T2 (Express) pass."
/// );
/// ```
pub struct Advisor<'a> {
    network: &'a Network,
    occupancy: &'a OccupancyMap,
    config: &'a AdvisorConfig,
    policy: ResolutionPolicy,
}

impl<'a> Advisor<'a> {
    /// Create a new advisor.
    ///
    /// `occupancy` must have been built from `network`.
    pub fn new(network: &'a Network, occupancy: &'a OccupancyMap, config: &'a AdvisorConfig) -> Self {
        Self {
            network,
            occupancy,
            config,
            policy: ResolutionPolicy::new(config.tie_break),
        }
    }

    /// Produce advice for a roster.
    pub fn advise(&self, roster: &Roster) -> Advice {
        let trains = roster.trains();

        let mut advice = Advice {
            excluded: roster.excluded(),
            ..Advice::default()
        };

        if trains.len() < 2 {
            debug!(trains = trains.len(), "fewer than two trains, nothing to compare");
            return advice;
        }

        let pairs = match self.config.scan_mode {
            ScanMode::FirstPair => vec![(&trains[0], &trains[1])],
            ScanMode::PerSegment => self.contested_pairs(trains),
        };

        for (a, b) in pairs {
            let Some(conflict) = detect(a, b, self.occupancy) else {
                continue;
            };
            advice.contested_segments += 1;

            match self.policy.resolve(&conflict, self.network) {
                Resolution::Hold(rec) => {
                    debug!(
                        segment = %rec.segment,
                        hold = %rec.hold_train_id,
                        pass = %rec.pass_train_id,
                        "recommending hold"
                    );
                    advice.recommendations.push(rec);
                }
                Resolution::Decline => {
                    debug!(segment = %conflict.segment(), "equal priority, no recommendation");
                }
            }
        }

        advice
    }

    /// First two trains on every segment occupied by at least two trains.
    ///
    /// Segments appear in the order they were first occupied in the roster.
    fn contested_pairs<'t>(&self, trains: &'t [Train]) -> Vec<(&'t Train, &'t Train)> {
        let mut order: Vec<&SegmentId> = Vec::new();
        let mut groups: HashMap<&SegmentId, Vec<&'t Train>> = HashMap::new();

        for train in trains {
            let Some(segment) = self.occupancy.segment_at(&train.location) else {
                continue;
            };
            let group = groups.entry(segment).or_default();
            if group.is_empty() {
                order.push(segment);
            }
            group.push(train);
        }

        order
            .into_iter()
            .filter_map(|segment| {
                let group = &groups[segment];
                if group.len() > 2 {
                    debug!(
                        %segment,
                        trains = group.len(),
                        "more than two trains on segment, resolving the first two"
                    );
                }
                match group.as_slice() {
                    [a, b, ..] => Some((*a, *b)),
                    _ => None,
                }
            })
            .collect()
    }
}
