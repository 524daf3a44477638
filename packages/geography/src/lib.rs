#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Australian state boundary management.
//!
//! Loads the states `GeoJSON` file once at startup and indexes its
//! features by the `STATE_CODE` property, which is the key the choropleth
//! builder uses to join incident records onto polygons. The index is
//! read-only for the life of the process.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr as _;

use geojson::{Feature, FeatureCollection, GeoJson};
use shark_map_incident_models::AusState;

/// Errors that can occur while loading boundary data.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// GeoJSON parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The file parsed but was not a feature collection.
    #[error("Boundary file is not a GeoJSON FeatureCollection")]
    NotAFeatureCollection,
}

/// The property key that identifies a state polygon in the boundary file.
pub const STATE_CODE_PROPERTY: &str = "STATE_CODE";

/// Read-only mapping from boundary region codes to state polygons.
#[derive(Debug, Clone)]
pub struct GeographyIndex {
    collection: FeatureCollection,
    by_code: BTreeMap<String, usize>,
}

impl GeographyIndex {
    /// Builds an index over an already-parsed feature collection.
    ///
    /// Features without a usable `STATE_CODE` property are kept in the
    /// collection (the map still renders them) but are not addressable by
    /// code.
    #[must_use]
    pub fn from_collection(collection: FeatureCollection) -> Self {
        let mut by_code = BTreeMap::new();
        for (i, feature) in collection.features.iter().enumerate() {
            if let Some(code) = feature_state_code(feature) {
                by_code.entry(code).or_insert(i);
            }
        }
        Self { collection, by_code }
    }

    /// Returns the boundary feature for a region code.
    #[must_use]
    pub fn boundary(&self, code: &str) -> Option<&Feature> {
        self.by_code
            .get(code)
            .and_then(|&i| self.collection.features.get(i))
    }

    /// Returns the boundary feature for a state.
    #[must_use]
    pub fn boundary_for_state(&self, state: AusState) -> Option<&Feature> {
        self.boundary(state.region_code())
    }

    /// Returns the full feature collection, serialized for embedding in a
    /// chart specification.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.collection).unwrap_or(serde_json::Value::Null)
    }

    /// Number of addressable region codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether the index has no addressable regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Extracts the `STATE_CODE` property from a feature, accepting either a
/// string or a numeric property value.
fn feature_state_code(feature: &Feature) -> Option<String> {
    let value = feature.property(STATE_CODE_PROPERTY)?;
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Loads the state boundary file.
///
/// # Errors
///
/// Returns [`GeoError`] if the file cannot be read, is not valid
/// `GeoJSON`, or is not a feature collection.
pub fn load_boundaries(path: &Path) -> Result<GeographyIndex, GeoError> {
    let contents = std::fs::read_to_string(path)?;
    let geojson = GeoJson::from_str(&contents)?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(GeoError::NotAFeatureCollection);
    };

    let index = GeographyIndex::from_collection(collection);
    log::info!(
        "Loaded {} state boundaries from {path:?}",
        index.len()
    );

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "STATE_CODE": "1", "STATE_NAME": "New South Wales" },
                "geometry": { "type": "Polygon", "coordinates": [[[141.0,-34.0],[153.6,-34.0],[153.6,-28.2],[141.0,-28.2],[141.0,-34.0]]] }
            },
            {
                "type": "Feature",
                "properties": { "STATE_CODE": 3, "STATE_NAME": "Queensland" },
                "geometry": { "type": "Polygon", "coordinates": [[[138.0,-29.0],[153.5,-29.0],[153.5,-10.7],[138.0,-10.7],[138.0,-29.0]]] }
            }
        ]
    }"#;

    fn index() -> GeographyIndex {
        let GeoJson::FeatureCollection(collection) = GeoJson::from_str(COLLECTION).unwrap() else {
            panic!("fixture must be a feature collection");
        };
        GeographyIndex::from_collection(collection)
    }

    #[test]
    fn looks_up_by_string_and_numeric_codes() {
        let index = index();
        assert!(index.boundary("1").is_some());
        assert!(index.boundary("3").is_some());
        assert!(index.boundary("9").is_none());
    }

    #[test]
    fn state_lookup_goes_through_region_code() {
        let index = index();
        let nsw = index.boundary_for_state(AusState::NSW).unwrap();
        assert_eq!(
            nsw.property("STATE_NAME").and_then(|v| v.as_str()),
            Some("New South Wales")
        );
        assert!(index.boundary_for_state(AusState::VIC).is_none());
    }

    #[test]
    fn serializes_for_chart_embedding() {
        let json = index().to_json();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"].as_array().unwrap().len(), 2);
    }
}
