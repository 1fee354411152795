//! GeoJSON export of hierarchy levels.

use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, json};

use crate::compute::index::GeoIndex;
use crate::error::{HexScaleError, Result};
use crate::hierarchy::{Cell, DensityHierarchy};

/// Converts one cell to a polygon feature carrying its densities.
pub fn cell_to_feature<I: GeoIndex>(index: &I, cell: &Cell) -> Result<Feature> {
    let outline = index.boundary(cell.id)?;
    let geometry = Geometry::new(Value::from(&outline));

    let mut properties = Map::new();
    properties.insert("id".to_string(), json!(cell.id.to_string()));
    properties.insert("resolution".to_string(), json!(cell.resolution));
    properties.insert("raw_density".to_string(), json!(cell.raw_density));
    properties.insert("unclipped_density".to_string(), json!(cell.unclipped_density));
    properties.insert("clipped_density".to_string(), json!(cell.clipped_density));
    properties.insert("density_limit".to_string(), json!(cell.density_limit));
    properties.insert("occupied_count".to_string(), json!(cell.occupied_count));
    properties.insert("residents".to_string(), json!(cell.residents));

    Ok(Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// All cells of `resolution` as a feature collection, ordered by cell id.
pub fn level_to_feature_collection<I: GeoIndex>(
    hierarchy: &DensityHierarchy<I>,
    resolution: u8,
) -> Result<FeatureCollection> {
    let features = hierarchy
        .cells_at(resolution)
        .iter()
        .map(|cell| cell_to_feature(hierarchy.index(), cell))
        .collect::<Result<Vec<_>>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// All cells of `resolution` as a GeoJSON string.
pub fn hierarchy_to_geojson<I: GeoIndex>(
    hierarchy: &DensityHierarchy<I>,
    resolution: u8,
) -> Result<String> {
    let collection = level_to_feature_collection(hierarchy, resolution)?;
    serde_json::to_string(&collection).map_err(|e| {
        HexScaleError::Serialization(format!(
            "Failed to serialize resolution {}: {}",
            resolution, e
        ))
    })
}
