//! Equirectangular map canvas
//!
//! Longitude -180..180 spans the canvas width left to right, latitude 90..-90
//! spans the height top to bottom.

use crate::footprint::FootprintPolygon;
use crate::transforms::GeodeticPosition;
use crate::{OrbitalError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCanvas {
    pub width: u32,
    pub height: u32,
}

impl Default for MapCanvas {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 500,
        }
    }
}

impl MapCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(OrbitalError::InvalidCoordinates(format!(
                "canvas must have a non-zero size, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Column for a longitude. Truncated to a whole pixel and wrapped into the
    /// canvas, so +180° lands on column 0 with -180°.
    pub fn x(&self, longitude_deg: f64) -> f64 {
        let width = f64::from(self.width);
        let column = (width * longitude_deg / 360.0 + width / 2.0).trunc() as i64;
        column.rem_euclid(i64::from(self.width)) as f64
    }

    pub fn y(&self, latitude_deg: f64) -> f64 {
        let height = f64::from(self.height);
        -height * latitude_deg / 180.0 + height / 2.0
    }

    pub fn project(&self, position: &GeodeticPosition) -> CanvasPoint {
        CanvasPoint {
            x: self.x(position.longitude_deg),
            y: self.y(position.latitude_deg),
        }
    }

    pub fn project_polygon(&self, polygon: &FootprintPolygon) -> Vec<CanvasPoint> {
        polygon
            .points()
            .iter()
            .map(|p| self.project(&p.geodetic()))
            .collect()
    }
}
