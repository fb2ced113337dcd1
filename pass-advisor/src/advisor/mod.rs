//! Conflict detection and hold/pass advice.
//!
//! Two trains conflict when their locations resolve to the same track
//! segment in the network's [`OccupancyMap`](crate::network::OccupancyMap).
//! Each conflict is resolved by priority: the lower-priority train is held
//! so the other can pass. Equal priorities are declined unless a tie-break
//! is configured.

mod config;
mod detect;
mod policy;
mod service;


pub use config::{AdvisorConfig, ScanMode, TieBreak, UnknownSetting};
pub use detect::{Conflict, detect};
pub use policy::{Recommendation, Resolution, ResolutionPolicy};
pub use service::{Advice, Advisor, NO_CONFLICT_STATUS};
