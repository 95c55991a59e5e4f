//! Ground visibility footprint
//!
//! A satellite at height h over a sphere of radius r sees the surface out to
//! the horizon tangent point. That cap has geocentric half-angle
//! α = atan(slant / r) with slant = sqrt(h² + 2rh). The generator lays the cap
//! boundary out as a small circle around the (0°, 0°) reference point, then
//! rotates the whole circle onto the sub-satellite point in one step.

use crate::transforms::{EcefPosition, GeoEcefTransform, GeodeticPosition};
use crate::vector::{AxisAngleRotation, Vector3};
use crate::{OrbitalError, Result};
use serde::Serialize;
use std::f64::consts::TAU;
use tracing::debug;

/// Fewest points that still describe a closed polygon with area
pub const MIN_POINT_COUNT: usize = 4;

/// Closed ring of surface points; the first point is repeated at the end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintPolygon {
    points: Vec<EcefPosition>,
    sub_satellite: EcefPosition,
    half_angle_rad: f64,
}

impl FootprintPolygon {
    pub fn points(&self) -> &[EcefPosition] {
        &self.points
    }

    pub fn geodetic_points(&self) -> Vec<GeodeticPosition> {
        self.points.iter().map(EcefPosition::geodetic).collect()
    }

    pub fn sub_satellite(&self) -> &EcefPosition {
        &self.sub_satellite
    }

    pub fn half_angle_rad(&self) -> f64 {
        self.half_angle_rad
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }
}

/// Geocentric half-angle of the visible cap, radians
pub fn half_angle_rad(altitude_km: f64, earth_radius_km: f64) -> Result<f64> {
    if !(earth_radius_km.is_finite() && earth_radius_km > 0.0) {
        return Err(OrbitalError::InvalidCoordinates(format!(
            "earth radius must be positive, got {} km",
            earth_radius_km
        )));
    }
    if !(altitude_km.is_finite() && altitude_km >= 0.0) {
        return Err(OrbitalError::InvalidCoordinates(format!(
            "altitude must be non-negative, got {} km",
            altitude_km
        )));
    }

    let slant_km = (altitude_km * altitude_km + 2.0 * earth_radius_km * altitude_km).sqrt();
    Ok((slant_km / earth_radius_km).atan())
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FootprintGenerator {
    transform: GeoEcefTransform,
}

impl FootprintGenerator {
    pub fn new(transform: GeoEcefTransform) -> Self {
        Self { transform }
    }

    pub fn transform(&self) -> &GeoEcefTransform {
        &self.transform
    }

    /// Build the footprint for a satellite above `(latitude_deg, longitude_deg)`.
    ///
    /// Samples `point_count - 1` boundary points at bearings i·2π/point_count
    /// and closes the ring by repeating the first, so the result always holds
    /// exactly `point_count` points.
    pub fn generate(
        &self,
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_km: f64,
        earth_radius_km: f64,
        point_count: usize,
    ) -> Result<FootprintPolygon> {
        if point_count < MIN_POINT_COUNT {
            return Err(OrbitalError::InvalidPointCount {
                min: MIN_POINT_COUNT,
                got: point_count,
            });
        }
        let alpha = half_angle_rad(altitude_km, earth_radius_km)?;

        let sub_satellite = self.transform.to_ecef(latitude_deg, longitude_deg, 0.0)?;
        let reference = self.transform.to_ecef(0.0, 0.0, 0.0)?;
        let rotation =
            AxisAngleRotation::between(&reference.to_vector(), &sub_satellite.to_vector())?;

        debug!(
            latitude_deg,
            longitude_deg,
            half_angle_deg = alpha.to_degrees(),
            rotation_deg = rotation.angle_rad().to_degrees(),
            "generating footprint"
        );

        let radius = reference.to_vector().magnitude();
        let mut points = Vec::with_capacity(point_count);
        for i in 0..(point_count - 1) {
            let bearing = i as f64 * TAU / point_count as f64;
            let canonical = reference_circle_point(radius, alpha, bearing);
            let placed = rotation.apply(&canonical);
            points.push(self.transform.vector_to_geodetic(&placed)?);
        }
        points.push(points[0]);

        Ok(FootprintPolygon {
            points,
            sub_satellite,
            half_angle_rad: alpha,
        })
    }
}

/// Point at angular distance `alpha` from the (0°, 0°) direction, on a sphere of
/// `radius`. Bearing 0 points east, π/2 north.
fn reference_circle_point(radius: f64, alpha: f64, bearing: f64) -> Vector3 {
    let (sin_a, cos_a) = alpha.sin_cos();
    let (sin_b, cos_b) = bearing.sin_cos();
    Vector3::new(cos_a, sin_a * cos_b, sin_a * sin_b) * radius
}
