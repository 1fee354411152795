//! Node graph on top of the density hierarchy.
//!
//! `RewardGraph` keeps the external node records and turns them into reward
//! scales. The hierarchy is rebuilt from every node in one batch pass the
//! first time a scale is needed and cached until the node set changes.

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::OnceCell;

use crate::compute::index::{GeoIndex, H3Index};
use crate::compute::validation::validate_coordinate;
use crate::config::Config;
use crate::error::{HexScaleError, Result};
use crate::hierarchy::DensityHierarchy;

mod csv;
mod node;

pub use csv::{parse_nodes, read_nodes_csv};
pub use node::Node;

/// Result of one batch pass over the graph.
#[derive(Debug)]
pub struct ComputedScales<I: GeoIndex> {
    pub hierarchy: DensityHierarchy<I>,
    /// Reward scale per node id
    pub scales: BTreeMap<String, f64>,
}

/// Nodes keyed by id, with lazily computed reward scales.
pub struct RewardGraph<I: GeoIndex + Clone = H3Index> {
    config: Config,
    index: I,
    nodes: BTreeMap<String, Node>,
    computed: OnceCell<ComputedScales<I>>,
}

impl RewardGraph<H3Index> {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_index(config, H3Index::new())
    }

    /// Load a node file into a new graph.
    pub fn from_csv<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        let mut graph = Self::new(config)?;
        graph.import_csv(path)?;
        Ok(graph)
    }
}

impl<I: GeoIndex + Clone> RewardGraph<I> {
    pub fn with_index(config: Config, index: I) -> Result<Self> {
        config.validate().map_err(HexScaleError::InvalidConfig)?;
        Ok(Self {
            config,
            index,
            nodes: BTreeMap::new(),
            computed: OnceCell::new(),
        })
    }

    /// Add or replace a node. Drops any computed scales.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        validate_coordinate(node.lat, node.lng)?;
        if self.nodes.insert(node.id.clone(), node).is_some() {
            log::debug!("Replaced an existing node");
        }
        self.invalidate();
        Ok(())
    }

    /// Add a node at `(lat, lng)`. Without an explicit id the node is keyed
    /// (and named) by its concatenated coordinates, whole numbers keeping
    /// their `.0` (`1.0, 2.0` gives `"1.02.0"`).
    pub fn geo_to_node(&mut self, lat: f64, lng: f64, id: Option<&str>) -> Result<String> {
        let id = id
            .map(str::to_string)
            .unwrap_or_else(|| format!("{:?}{:?}", lat, lng));
        self.add_node(Node::new(id.clone(), id.clone(), lat, lng))?;
        Ok(id)
    }

    /// Add every node from a node file; returns how many were read.
    pub fn import_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let nodes = read_nodes_csv(path)?;
        let count = nodes.len();
        for node in nodes {
            self.add_node(node)?;
        }
        Ok(count)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Nodes ordered by id.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether scales are computed for the current node set.
    pub fn is_computed(&self) -> bool {
        self.computed.get().is_some()
    }

    /// Run the batch pass (once) and return every node's scale.
    pub fn compute_reward_scales(&self) -> Result<&BTreeMap<String, f64>> {
        Ok(&self.computed()?.scales)
    }

    /// Reward scale of node `id`; the first call materializes the whole graph.
    pub fn reward_scale(&self, id: &str) -> Result<f64> {
        if !self.nodes.contains_key(id) {
            return Err(HexScaleError::UnknownNode(id.to_string()));
        }
        self.compute_reward_scales()?
            .get(id)
            .copied()
            .ok_or_else(|| HexScaleError::UnknownNode(id.to_string()))
    }

    /// The materialized hierarchy behind the current scales.
    pub fn hierarchy(&self) -> Result<&DensityHierarchy<I>> {
        Ok(&self.computed()?.hierarchy)
    }

    fn computed(&self) -> Result<&ComputedScales<I>> {
        self.computed.get_or_try_init(|| self.build())
    }

    fn build(&self) -> Result<ComputedScales<I>> {
        log::info!("Computing reward scales for {} nodes", self.nodes.len());

        let mut hierarchy = DensityHierarchy::with_index(self.config.clone(), self.index.clone())?;
        for node in self.nodes.values() {
            hierarchy.add_resident(node.lat, node.lng, node.name.clone())?;
        }
        hierarchy.materialize()?;

        let mut scales = BTreeMap::new();
        for node in self.nodes.values() {
            scales.insert(node.id.clone(), hierarchy.reward_scale(node.lat, node.lng)?);
        }

        Ok(ComputedScales { hierarchy, scales })
    }

    fn invalidate(&mut self) {
        if self.computed.take().is_some() {
            log::debug!("Node set changed; dropping computed reward scales");
        }
    }
}

impl<I: GeoIndex + Clone> std::fmt::Debug for RewardGraph<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardGraph")
            .field("nodes", &self.nodes.len())
            .field("computed", &self.is_computed())
            .finish()
    }
}
