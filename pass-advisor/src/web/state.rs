//! Application state for the web layer.

use std::sync::Arc;

use crate::advisor::AdvisorConfig;
use crate::cache::OccupancyCache;
use crate::source::DataFiles;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Where `GET /api/optimize` reads its network and roster from
    pub files: Arc<DataFiles>,

    /// Occupancy maps by network version
    pub occupancy: Arc<OccupancyCache>,

    /// Advisor configuration
    pub config: Arc<AdvisorConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(files: DataFiles, occupancy: OccupancyCache, config: AdvisorConfig) -> Self {
        Self {
            files: Arc::new(files),
            occupancy: Arc::new(occupancy),
            config: Arc::new(config),
        }
    }
}
