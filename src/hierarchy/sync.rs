//! Thread-safe wrapper for concurrent ingestion and queries.
//!
//! `SyncHierarchy` puts a `DensityHierarchy` behind a `parking_lot::RwLock`.
//! Ingestion and materialization take the write lock, so updates to a base
//! cell are serialized; queries share the read lock.

use std::sync::Arc;

use hexscale_types::cell::CellId;
use parking_lot::RwLock;

use super::{Cell, DensityHierarchy, HierarchyStats};
use crate::compute::index::{GeoIndex, H3Index};
use crate::config::Config;
use crate::error::Result;

/// Thread-safe wrapper around `DensityHierarchy`.
pub struct SyncHierarchy<I: GeoIndex = H3Index> {
    inner: Arc<RwLock<DensityHierarchy<I>>>,
}

impl<I: GeoIndex> Clone for SyncHierarchy<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SyncHierarchy<H3Index> {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::from_hierarchy(DensityHierarchy::new(config)?))
    }
}

impl<I: GeoIndex> SyncHierarchy<I> {
    pub fn from_hierarchy(hierarchy: DensityHierarchy<I>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(hierarchy)),
        }
    }

    pub fn add_resident(&self, lat: f64, lng: f64, resident: impl Into<String>) -> Result<CellId> {
        self.inner.write().add_resident(lat, lng, resident)
    }

    pub fn materialize(&self) -> Result<()> {
        self.inner.write().materialize()
    }

    pub fn reward_scale(&self, lat: f64, lng: f64) -> Result<f64> {
        self.inner.read().reward_scale(lat, lng)
    }

    pub fn cell(&self, id: CellId) -> Result<Option<Cell>> {
        self.inner.read().cell(id)
    }

    pub fn is_materialized(&self) -> bool {
        self.inner.read().is_materialized()
    }

    pub fn stats(&self) -> HierarchyStats {
        self.inner.read().stats()
    }

    /// Unwrap the hierarchy if this is the last handle.
    pub fn into_inner(self) -> std::result::Result<DensityHierarchy<I>, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}
