//! Look angles from a ground site
//!
//! Range, elevation and azimuth of a satellite in the site's local
//! east-north-up frame. "Up" is the ellipsoid normal at the site, so a
//! satellite at the site's latitude and longitude is at exactly 90°.

use crate::propagation::{satellite_ecef, Propagator};
use crate::transforms::{distance_m, EcefPosition, GeoEcefTransform, GeodeticPosition};
use crate::{OrbitalError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookAngles {
    /// Straight-line distance from the site
    pub range_m: f64,
    /// Angle above the local horizon, [-90, 90]
    pub elevation_deg: f64,
    /// Clockwise from north, [0, 360)
    pub azimuth_deg: f64,
}

impl LookAngles {
    pub fn is_visible(&self, min_elevation_deg: f64) -> bool {
        self.elevation_deg >= min_elevation_deg
    }
}

/// Look angles from `site` to an Earth-fixed `satellite` position
pub fn look_angles(
    transform: &GeoEcefTransform,
    site: &GeodeticPosition,
    satellite: &EcefPosition,
) -> Result<LookAngles> {
    let site_ecef = transform.geodetic_to_ecef(site)?;
    let range_m = distance_m(&site_ecef, satellite);
    if range_m == 0.0 {
        return Err(OrbitalError::InvalidCoordinates(format!(
            "satellite coincides with site {:?}",
            site
        )));
    }

    let d = satellite.to_vector() - site_ecef.to_vector();
    let (sin_lat, cos_lat) = site.latitude_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = site.longitude_deg.to_radians().sin_cos();

    let east = -sin_lon * d.x() + cos_lon * d.y();
    let north = -sin_lat * cos_lon * d.x() - sin_lat * sin_lon * d.y() + cos_lat * d.z();
    let up = cos_lat * cos_lon * d.x() + cos_lat * sin_lon * d.y() + sin_lat * d.z();

    Ok(LookAngles {
        range_m,
        elevation_deg: up.atan2(east.hypot(north)).to_degrees(),
        azimuth_deg: fold_azimuth_deg(east.atan2(north).to_degrees()),
    })
}

/// Fold into [0, 360). `rem_euclid` rounds tiny negative angles up to 360.
fn fold_azimuth_deg(deg: f64) -> f64 {
    let folded = deg.rem_euclid(360.0);
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

/// Look angles from `site` to a propagated satellite
pub fn look_angles_at(
    propagator: &(impl Propagator + ?Sized),
    transform: &GeoEcefTransform,
    minutes_since_epoch: f64,
    site: &GeodeticPosition,
) -> Result<LookAngles> {
    let satellite = satellite_ecef(propagator, transform, minutes_since_epoch)?;
    look_angles(transform, site, &satellite)
}
