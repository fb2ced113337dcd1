//! Train pass advisor.
//!
//! Given a rail network and the trains currently on it, recommends which
//! train to hold at a dead-end station so a higher-priority train sharing
//! the same track segment can pass.

pub mod advisor;
pub mod cache;
pub mod config;
pub mod domain;
pub mod network;
pub mod roster;
pub mod source;
pub mod web;
