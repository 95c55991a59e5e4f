//! Geometry configuration loaded from JSON

use crate::canvas::MapCanvas;
use crate::ellipsoid::EllipsoidModel;
use crate::footprint::{FootprintGenerator, MIN_POINT_COUNT};
use crate::topology::ConstellationShape;
use crate::transforms::GeoEcefTransform;
use crate::{OrbitalError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// WGS-72 equatorial radius, the sphere SGP4 works on
pub const DEFAULT_EARTH_RADIUS_KM: f64 = 6378.135;

pub const DEFAULT_FOOTPRINT_POINTS: usize = 36;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub shape: ConstellationShape,
    pub footprint_points: usize,
    pub earth_radius_km: f64,
    pub ellipsoid: EllipsoidModel,
    pub canvas: MapCanvas,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            shape: ConstellationShape::HALO,
            footprint_points: DEFAULT_FOOTPRINT_POINTS,
            earth_radius_km: DEFAULT_EARTH_RADIUS_KM,
            ellipsoid: EllipsoidModel::default(),
            canvas: MapCanvas::default(),
        }
    }
}

impl GeometryConfig {
    /// Load and validate a config file. Absent fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading geometry config from {:?}", path);

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: GeometryConfig = serde_json::from_reader(reader)?;
        config.validate()?;

        info!(
            "Config: {}x{} constellation, {} footprint points, {:?}",
            config.shape.plane_count(),
            config.shape.satellites_per_plane(),
            config.footprint_points,
            config.ellipsoid
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.footprint_points < MIN_POINT_COUNT {
            return Err(OrbitalError::InvalidPointCount {
                min: MIN_POINT_COUNT,
                got: self.footprint_points,
            });
        }
        if !(self.earth_radius_km.is_finite() && self.earth_radius_km > 0.0) {
            return Err(OrbitalError::InvalidCoordinates(format!(
                "earth_radius_km must be positive, got {}",
                self.earth_radius_km
            )));
        }
        self.canvas.validate()
    }

    pub fn transform(&self) -> GeoEcefTransform {
        GeoEcefTransform::new(self.ellipsoid.parameters())
    }

    pub fn footprint_generator(&self) -> FootprintGenerator {
        FootprintGenerator::new(self.transform())
    }
}
