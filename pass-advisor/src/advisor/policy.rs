//! Priority-based conflict resolution.

use std::cmp::Ordering;
use std::fmt;

use crate::domain::{SegmentId, StationId, Train, TrainId};
use crate::network::Network;

use super::config::TieBreak;
use super::detect::Conflict;

/// Advice to hold one train so another can pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub hold_train_id: TrainId,
    pub hold_train_type: String,

    /// Station the held train waits at.
    pub hold_location: StationId,

    /// Display name of [`Self::hold_location`].
    pub hold_location_name: String,

    pub pass_train_id: TrainId,
    pub pass_train_type: String,

    /// The segment both trains were contending for.
    pub segment: SegmentId,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hold Train {} ({}) at {} to let Train {} ({}) pass.",
            self.hold_train_id,
            self.hold_train_type,
            self.hold_location_name,
            self.pass_train_id,
            self.pass_train_type
        )
    }
}

/// Outcome of resolving one conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Hold one train, let the other pass.
    Hold(Recommendation),

    /// No recommendation is made.
    Decline,
}

impl Resolution {
    /// The recommendation, if one was made.
    pub fn recommendation(self) -> Option<Recommendation> {
        match self {
            Resolution::Hold(r) => Some(r),
            Resolution::Decline => None,
        }
    }
}

/// Decides which party of a conflict holds.
///
/// The strictly lower-priority train holds. Equal priorities are handled by
/// the configured [`TieBreak`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionPolicy {
    tie_break: TieBreak,
}

impl ResolutionPolicy {
    /// Create a policy with the given tie-break.
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    /// Resolve a conflict into a recommendation, or decline.
    ///
    /// `network` supplies the display name of the hold location.
    pub fn resolve(&self, conflict: &Conflict, network: &Network) -> Resolution {
        let (first, second) = conflict.parties();

        let (hold, pass) = match first.priority.cmp(&second.priority) {
            Ordering::Less => (first, second),
            Ordering::Greater => (second, first),
            Ordering::Equal => match self.tie_break {
                TieBreak::Decline => return Resolution::Decline,
                // Parties are in id order, so `second` sorts later
                TieBreak::TrainId => (second, first),
            },
        };

        Resolution::Hold(recommend(hold, pass, conflict.segment(), network))
    }
}

fn recommend(hold: &Train, pass: &Train, segment: &SegmentId, network: &Network) -> Recommendation {
    Recommendation {
        hold_train_id: hold.id.clone(),
        hold_train_type: hold.class.clone(),
        hold_location: hold.location.clone(),
        hold_location_name: network.name_of(&hold.location).to_string(),
        pass_train_id: pass.id.clone(),
        pass_train_type: pass.class.clone(),
        segment: segment.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use crate::network::{EdgeSpec, NodeSpec};

    fn network() -> Network {
        Network::load(
            vec![NodeSpec::new("X").with_name("Xanadu Sidings"), NodeSpec::new("J")],
            vec![EdgeSpec::new("e7", "X", "J")],
        )
        .unwrap()
    }

    fn train(id: &str, class: &str, priority: i64) -> Train {
        Train::new(
            TrainId::parse(id).unwrap(),
            class,
            StationId::parse("X").unwrap(),
            Priority(priority),
        )
    }

    fn conflict(a: Train, b: Train) -> Conflict {
        Conflict::new(SegmentId::parse("e7").unwrap(), a, b)
    }

    #[test]
    fn lower_priority_holds() {
        let c = conflict(train("T1", "Freight", 2), train("T2", "Express", 9));
        let rec = ResolutionPolicy::default()
            .resolve(&c, &network())
            .recommendation()
            .unwrap();

        assert_eq!(rec.hold_train_id.as_str(), "T1");
        assert_eq!(rec.hold_train_type, "Freight");
        assert_eq!(rec.hold_location.as_str(), "X");
        assert_eq!(rec.hold_location_name, "Xanadu Sidings");
        assert_eq!(rec.pass_train_id.as_str(), "T2");
        assert_eq!(rec.pass_train_type, "Express");
        assert_eq!(rec.segment.as_str(), "e7");
    }

    #[test]
    fn outcome_does_not_depend_on_id_order() {
        // The lower-priority train has the later id here
        let c = conflict(train("A", "Express", 9), train("Z", "Freight", 2));
        let rec = ResolutionPolicy::default()
            .resolve(&c, &network())
            .recommendation()
            .unwrap();
        assert_eq!(rec.hold_train_id.as_str(), "Z");
        assert_eq!(rec.pass_train_id.as_str(), "A");
    }

    #[test]
    fn equal_priority_declines_by_default() {
        let c = conflict(train("T1", "Freight", 2), train("T2", "Express", 2));
        assert_eq!(
            ResolutionPolicy::default().resolve(&c, &network()),
            Resolution::Decline
        );
    }

    #[test]
    fn train_id_tie_break_holds_later_id() {
        let c = conflict(train("T2", "Express", 2), train("T1", "Freight", 2));
        let rec = ResolutionPolicy::new(TieBreak::TrainId)
            .resolve(&c, &network())
            .recommendation()
            .unwrap();
        assert_eq!(rec.hold_train_id.as_str(), "T2");
        assert_eq!(rec.pass_train_id.as_str(), "T1");
    }

    #[test]
    fn display_sentence() {
        let c = conflict(train("T1", "Freight", 2), train("T2", "Express", 9));
        let rec = ResolutionPolicy::default()
            .resolve(&c, &network())
            .recommendation()
            .unwrap();
        assert_eq!(
            rec.to_string(),
            "Hold Train T1 (Freight) at Xanadu Sidings to let Train T2 (Express) pass."
        );
    }
}
