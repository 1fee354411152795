//! Builder for hierarchies and reward graphs
//!
//! This module provides a builder pattern for assembling the configuration
//! and the geospatial index before creating a hierarchy or a graph.

use std::path::Path;

use crate::compute::index::{GeoIndex, H3Index};
use crate::config::{Config, ResolutionProfile};
use crate::error::Result;
use crate::graph::RewardGraph;
use crate::hierarchy::DensityHierarchy;

/// Builder for hierarchy configuration with a custom index and profiles.
#[derive(Debug, Clone)]
pub struct HierarchyBuilder<I = H3Index> {
    config: Config,
    index: I,
}

impl HierarchyBuilder<H3Index> {
    /// Create a new builder with the default profile table on the H3 grid.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            index: H3Index::new(),
        }
    }
}

impl<I: GeoIndex> HierarchyBuilder<I> {
    /// Set the full configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a `.json` (or, with the `toml` feature,
    /// `.toml`) file.
    pub fn config_path<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.config = Config::from_path(path)?;
        Ok(self)
    }

    /// Set the working band of resolutions.
    pub fn resolution_band(mut self, res_min: u8, res_max: u8) -> Self {
        self.config = self.config.with_resolution_band(res_min, res_max);
        self
    }

    /// Override the profile of one resolution.
    pub fn profile(mut self, resolution: u8, profile: ResolutionProfile) -> Self {
        self.config = self.config.with_profile(resolution, profile);
        self
    }

    /// Use a different geospatial index.
    pub fn index<J: GeoIndex>(self, index: J) -> HierarchyBuilder<J> {
        HierarchyBuilder {
            config: self.config,
            index,
        }
    }

    /// Build an empty hierarchy.
    pub fn build(self) -> Result<DensityHierarchy<I>> {
        DensityHierarchy::with_index(self.config, self.index)
    }

    /// Build an empty reward graph.
    pub fn build_graph(self) -> Result<RewardGraph<I>>
    where
        I: Clone,
    {
        RewardGraph::with_index(self.config, self.index)
    }
}

impl Default for HierarchyBuilder<H3Index> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let hierarchy = HierarchyBuilder::new().build().unwrap();
        assert_eq!(hierarchy.config(), &Config::default());
    }

    #[test]
    fn test_builder_overrides() {
        let hierarchy = HierarchyBuilder::new()
            .resolution_band(5, 10)
            .profile(10, ResolutionProfile::new(1, 3, 9))
            .build()
            .unwrap();
        assert_eq!(hierarchy.config().res_min, 5);
        assert_eq!(hierarchy.config().profile(10).max, 9);
    }

    #[test]
    fn test_builder_rejects_bad_band() {
        assert!(HierarchyBuilder::new().resolution_band(8, 13).build().is_err());
    }

    #[test]
    fn test_builder_graph() {
        let graph = HierarchyBuilder::new().build_graph().unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_builder_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("band.json");
        std::fs::write(&path, r#"{ "res_min": 6, "res_max": 9 }"#).unwrap();

        let hierarchy = HierarchyBuilder::new()
            .config_path(&path)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(hierarchy.config().res_max, 9);
    }
}
