//! Reference ellipsoids
//!
//! The transform takes its ellipsoid as a value, so swapping WGS-72 for WGS-84
//! never touches shared constants.

use serde::{Deserialize, Serialize};

/// Immutable ellipsoid parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// Equatorial radius in meters
    pub semi_major_axis_m: f64,
    /// Flattening (a - b) / a
    pub flattening: f64,
    /// First eccentricity squared
    pub eccentricity_sq: f64,
}

impl Ellipsoid {
    /// WGS-72 radius and flattening as used by the NORAD SGP4 models.
    ///
    /// The eccentricity is the published 6.6943799901377997e-3 rather than
    /// `2f - f²`; the simulation has always paired the two this way.
    pub const WGS72: Ellipsoid = Ellipsoid {
        semi_major_axis_m: 6_378_135.0,
        flattening: 1.0 / 298.26,
        eccentricity_sq: 6.694_379_990_137_799_7e-3,
    };

    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major_axis_m: 6_378_137.0,
        flattening: 1.0 / 298.257223563,
        eccentricity_sq: 2.0 * (1.0 / 298.257223563) - (1.0 / 298.257223563) * (1.0 / 298.257223563),
    };

    /// Polar radius b = a(1 - f), meters
    pub fn semi_minor_axis_m(&self) -> f64 {
        self.semi_major_axis_m * (1.0 - self.flattening)
    }

    /// Second eccentricity squared e'² = e²·a²/b²
    pub fn second_eccentricity_sq(&self) -> f64 {
        let a = self.semi_major_axis_m;
        let b = self.semi_minor_axis_m();
        self.eccentricity_sq * a * a / (b * b)
    }

    /// Prime vertical radius of curvature N(φ), meters
    pub fn prime_vertical_radius_m(&self, latitude_rad: f64) -> f64 {
        self.semi_major_axis_m / (1.0 - self.eccentricity_sq * latitude_rad.sin().powi(2)).sqrt()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS72
    }
}

/// Named ellipsoid selector for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EllipsoidModel {
    #[default]
    Wgs72,
    Wgs84,
}

impl EllipsoidModel {
    pub fn parameters(&self) -> Ellipsoid {
        match self {
            EllipsoidModel::Wgs72 => Ellipsoid::WGS72,
            EllipsoidModel::Wgs84 => Ellipsoid::WGS84,
        }
    }
}
