use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An externally sourced node (hotspot) with a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Graph key, unique per graph
    pub id: String,
    /// Resident name ingested into the hierarchy
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub lat: f64,
    pub lng: f64,
    /// Scale reported by the source, for comparison
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_scale_correct: Option<f64>,
    /// Any further columns of the source record
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            lat,
            lng,
            reward_scale_correct: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_reward_scale_correct(mut self, scale: f64) -> Self {
        self.reward_scale_correct = Some(scale);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
