//! Geodetic ⇄ ECEF transforms
//!
//! Forward conversion is the closed-form ellipsoid projection; the inverse is
//! Bowring's single-step formula, so neither direction iterates.
//!
//! Reference: E. J. Krakiwsky and D. B. Thomson, "Geodetic Position
//! Computations", UNB Lecture Notes 39.

use crate::ellipsoid::Ellipsoid;
use crate::vector::Vector3;
use crate::{OrbitalError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Below this distance from the polar axis longitude is reported as 0
const POLAR_AXIS_EPSILON_M: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPosition {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

impl GeodeticPosition {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    /// Build from an altitude in kilometers (propagators report km)
    pub fn from_km_altitude(latitude_deg: f64, longitude_deg: f64, altitude_km: f64) -> Self {
        Self::new(latitude_deg, longitude_deg, altitude_km * 1000.0)
    }

    pub fn altitude_km(&self) -> f64 {
        self.altitude_m / 1000.0
    }

    fn validate(&self) -> Result<()> {
        if !(self.latitude_deg.is_finite()
            && self.longitude_deg.is_finite()
            && self.altitude_m.is_finite())
        {
            return Err(OrbitalError::InvalidCoordinates(format!(
                "non-finite geodetic position {:?}",
                self
            )));
        }
        if !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(OrbitalError::InvalidCoordinates(format!(
                "latitude {} outside [-90, 90]",
                self.latitude_deg
            )));
        }
        Ok(())
    }
}

/// Earth-centered, Earth-fixed position in meters.
///
/// Only [`GeoEcefTransform`] constructs these, and it always fills the cached
/// geodetic triple with the Bowring inverse of the stored coordinates, so the
/// two views never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EcefPosition {
    x_m: f64,
    y_m: f64,
    z_m: f64,
    geodetic: GeodeticPosition,
}

impl EcefPosition {
    pub fn x_m(&self) -> f64 {
        self.x_m
    }

    pub fn y_m(&self) -> f64 {
        self.y_m
    }

    pub fn z_m(&self) -> f64 {
        self.z_m
    }

    pub fn latitude_deg(&self) -> f64 {
        self.geodetic.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.geodetic.longitude_deg
    }

    pub fn altitude_m(&self) -> f64 {
        self.geodetic.altitude_m
    }

    pub fn geodetic(&self) -> GeodeticPosition {
        self.geodetic
    }

    pub fn to_vector(&self) -> Vector3 {
        Vector3::new(self.x_m, self.y_m, self.z_m)
    }

    /// Straight-line chord distance in meters.
    ///
    /// This is not a surface distance; use it for line-of-sight and RF range.
    pub fn distance_m(&self, other: &EcefPosition) -> f64 {
        distance_m(self, other)
    }
}

/// Euclidean distance between two ECEF positions, meters
pub fn distance_m(a: &EcefPosition, b: &EcefPosition) -> f64 {
    let dx = b.x_m - a.x_m;
    let dy = b.y_m - a.y_m;
    let dz = b.z_m - a.z_m;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Stateless converter bound to one ellipsoid
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeoEcefTransform {
    ellipsoid: Ellipsoid,
}

impl GeoEcefTransform {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Geodetic (degrees, meters) to ECEF.
    pub fn to_ecef(&self, latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Result<EcefPosition> {
        self.geodetic_to_ecef(&GeodeticPosition::new(latitude_deg, longitude_deg, altitude_m))
    }

    /// Same as [`to_ecef`](Self::to_ecef) with the altitude given in kilometers.
    pub fn to_ecef_km_altitude(
        &self,
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_km: f64,
    ) -> Result<EcefPosition> {
        self.geodetic_to_ecef(&GeodeticPosition::from_km_altitude(
            latitude_deg,
            longitude_deg,
            altitude_km,
        ))
    }

    pub fn geodetic_to_ecef(&self, pos: &GeodeticPosition) -> Result<EcefPosition> {
        pos.validate()?;

        let phi = pos.latitude_deg.to_radians();
        let lambda = pos.longitude_deg.to_radians();
        let e2 = self.ellipsoid.eccentricity_sq;
        let n = self.ellipsoid.prime_vertical_radius_m(phi);
        let h = pos.altitude_m;

        let x = (n + h) * phi.cos() * lambda.cos();
        let y = (n + h) * phi.cos() * lambda.sin();
        let z = (n * (1.0 - e2) + h) * phi.sin();

        self.to_geodetic(x, y, z)
    }

    /// ECEF (meters) to geodetic via Bowring's closed form.
    ///
    /// The origin has no geodetic equivalent and is rejected.
    pub fn to_geodetic(&self, x_m: f64, y_m: f64, z_m: f64) -> Result<EcefPosition> {
        if !(x_m.is_finite() && y_m.is_finite() && z_m.is_finite()) {
            return Err(OrbitalError::InvalidCoordinates(format!(
                "non-finite ECEF position ({}, {}, {})",
                x_m, y_m, z_m
            )));
        }
        if x_m == 0.0 && y_m == 0.0 && z_m == 0.0 {
            return Err(OrbitalError::DegeneratePosition);
        }

        Ok(EcefPosition {
            x_m,
            y_m,
            z_m,
            geodetic: self.bowring(x_m, y_m, z_m),
        })
    }

    pub fn vector_to_geodetic(&self, v: &Vector3) -> Result<EcefPosition> {
        self.to_geodetic(v.x(), v.y(), v.z())
    }

    fn bowring(&self, x: f64, y: f64, z: f64) -> GeodeticPosition {
        let a = self.ellipsoid.semi_major_axis_m;
        let b = self.ellipsoid.semi_minor_axis_m();
        let e2 = self.ellipsoid.eccentricity_sq;
        let ep2 = self.ellipsoid.second_eccentricity_sq();

        let p = (x * x + y * y).sqrt();
        let theta = (z * a).atan2(p * b);

        let lat = (z + ep2 * b * theta.sin().powi(3)).atan2(p - e2 * a * theta.cos().powi(3));
        let lon = if p < POLAR_AXIS_EPSILON_M {
            debug!(z_m = z, "position on the polar axis, longitude set to 0");
            0.0
        } else {
            y.atan2(x)
        };

        // Equivalent to p / cos(lat) - N(lat) but finite at the poles.
        let sin_lat = lat.sin();
        let alt = p * lat.cos() + z * sin_lat - a * (1.0 - e2 * sin_lat * sin_lat).sqrt();

        GeodeticPosition {
            latitude_deg: lat.to_degrees(),
            longitude_deg: lon.to_degrees(),
            altitude_m: alt,
        }
    }
}
