//! # Configuration Module
//!
//! Runtime tunables for the world. Chunk dimensions are compile-time
//! constants (the save format depends on them); everything here is a knob a
//! player or a config file may turn without breaking saved worlds.

use serde::Deserialize;

/// Runtime world tuning.
///
/// Loadable from JSON (`WorldConfig::from_json`) so a settings file can
/// override the defaults; unspecified fields keep their default values.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// How many chunks around the player are kept loaded in each direction.
    pub render_distance: i32,
    /// Extra chunk rings beyond the render distance before the unload sweep
    /// evicts a chunk; the slack keeps chunks from thrashing at the border.
    pub unload_buffer: i32,
    /// Maximum dirty-chunk mesh rebuilds per tick. Bounds the per-frame cost
    /// of bulk edits; queued chunks render stale for a few frames instead.
    pub rebuild_budget: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            render_distance: 3,
            unload_buffer: 2,
            rebuild_budget: 4,
        }
    }
}

impl WorldConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The chunk distance beyond which the unload sweep evicts.
    #[inline]
    pub fn max_chunk_distance(&self) -> i32 {
        self.render_distance + self.unload_buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WorldConfig::default();
        assert_eq!(config.render_distance, 3);
        assert_eq!(config.unload_buffer, 2);
        assert_eq!(config.rebuild_budget, 4);
        assert_eq!(config.max_chunk_distance(), 5);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = WorldConfig::from_json(r#"{ "render_distance": 8 }"#).unwrap();
        assert_eq!(config.render_distance, 8);
        assert_eq!(config.rebuild_budget, 4);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(WorldConfig::from_json("render_distance = 8").is_err());
    }
}
