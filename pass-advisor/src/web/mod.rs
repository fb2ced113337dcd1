//! Web layer for the pass advisor.
//!
//! Provides HTTP endpoints that run the advisor over file-backed or inline
//! networks and rosters.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
