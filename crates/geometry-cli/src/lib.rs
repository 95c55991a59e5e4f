//! Support code for the `sat-geometry` command.
//!
//! Config resolution and the JSON / GeoJSON / canvas renderings live here so
//! the binary stays a thin argument-to-call mapping.

use clap::ValueEnum;
use constellation_geometry::{ConstellationShape, GeodeticPosition, GeometryConfig, Result};
use std::path::Path;
use tracing::debug;

pub mod render;

/// How a footprint is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// ECEF and geodetic vertices with metadata
    #[default]
    Json,
    /// FeatureCollection with the footprint polygon and sub-satellite point
    Geojson,
    /// Equirectangular canvas pixels
    Canvas,
}

/// Config from `path`, or the built-in defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<GeometryConfig> {
    match path {
        Some(path) => GeometryConfig::from_json_file(path),
        None => {
            debug!("No config file given, using defaults");
            Ok(GeometryConfig::default())
        }
    }
}

/// Config shape with either dimension replaced from the command line
pub fn resolve_shape(
    config: &GeometryConfig,
    planes: Option<usize>,
    per_plane: Option<usize>,
) -> Result<ConstellationShape> {
    ConstellationShape::new(
        planes.unwrap_or(config.shape.plane_count()),
        per_plane.unwrap_or(config.shape.satellites_per_plane()),
    )
}

/// Ground site when both coordinates were given
pub fn resolve_site(lat: Option<f64>, lon: Option<f64>, alt_m: f64) -> Option<GeodeticPosition> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Some(GeodeticPosition::new(lat, lon, alt_m)),
        _ => None,
    }
}
