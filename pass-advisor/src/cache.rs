//! Memoized occupancy maps.
//!
//! Occupancy is a pure function of the network, so a map is built once per
//! [`NetworkVersion`] and shared read-only afterwards. Concurrent requests for
//! a version that is still being built wait for that single build instead of
//! repeating it.
//!
//! Each entry keeps the network it was built from. A hit is only served when
//! that network equals the one asked about, so a fingerprint collision costs
//! a rebuild rather than a wrong map.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, warn};

use crate::network::{Network, NetworkVersion, OccupancyMap, build_occupancy_map};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 16,
        }
    }
}

/// An occupancy map together with the network it was built from.
struct Entry {
    network: Network,
    map: Arc<OccupancyMap>,
}

/// Cache of occupancy maps keyed by network version.
pub struct OccupancyCache {
    maps: MokaCache<NetworkVersion, Arc<Entry>>,
}

impl OccupancyCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let maps = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { maps }
    }

    /// The occupancy map of `network`, building it on first use.
    pub async fn get_or_build(&self, network: &Network) -> Arc<OccupancyMap> {
        let version = network.version();
        let entry = self
            .maps
            .get_with(version, async {
                let map = build_occupancy_map(network);
                debug!(%version, resolvable = map.len(), "built occupancy map");
                Arc::new(Entry {
                    network: network.clone(),
                    map: Arc::new(map),
                })
            })
            .await;

        if entry.network == *network {
            return Arc::clone(&entry.map);
        }

        warn!(%version, "network version collision, building uncached occupancy map");
        Arc::new(build_occupancy_map(network))
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.maps.entry_count()
    }
}
