//! Orbit propagator seam
//!
//! Geometry only needs two things from an orbit model: an ECI position at a
//! time offset, and the plane orientation. Both are traits so SGP4 and test
//! doubles plug in the same way.

use crate::transforms::{EcefPosition, GeoEcefTransform, GeodeticPosition};
use crate::vector::{AxisAngleRotation, Vector3};
use crate::{OrbitalError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use tracing::debug;

/// Two planes with RAAN and inclination closer than this are the same plane
pub const PLANE_TOLERANCE_DEG: f64 = 1e-9;

/// Look-ahead used by [`is_ascending`]
pub const ASCENDING_STEP_MINUTES: f64 = 0.25;

const UNIX_EPOCH_JULIAN_DATE: f64 = 2_440_587.5;
const J2000_JULIAN_DATE: f64 = 2_451_545.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Orientation of an orbital plane. Angles are degrees.
pub trait OrbitalPlaneInfo {
    fn raan_deg(&self) -> f64;
    fn inclination_deg(&self) -> f64;
}

/// Position source for one satellite
pub trait Propagator {
    /// TEME/ECI position in kilometers
    fn position_eci_km(&self, minutes_since_epoch: f64) -> Result<[f64; 3]>;

    fn epoch(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneElements {
    pub raan_deg: f64,
    pub inclination_deg: f64,
}

impl OrbitalPlaneInfo for PlaneElements {
    fn raan_deg(&self) -> f64 {
        self.raan_deg
    }

    fn inclination_deg(&self) -> f64 {
        self.inclination_deg
    }
}

/// True when both satellites share RAAN and inclination.
///
/// RAAN is compared on the circle, so 0° and 360° are the same node.
pub fn same_orbital_plane<A, B>(a: &A, b: &B) -> bool
where
    A: OrbitalPlaneInfo + ?Sized,
    B: OrbitalPlaneInfo + ?Sized,
{
    let raan_diff = (a.raan_deg() - b.raan_deg()).rem_euclid(360.0);
    let raan_diff = raan_diff.min(360.0 - raan_diff);
    raan_diff <= PLANE_TOLERANCE_DEG
        && (a.inclination_deg() - b.inclination_deg()).abs() <= PLANE_TOLERANCE_DEG
}

/// SGP4 model built from a two-line element set
pub struct Sgp4Propagator {
    name: Option<String>,
    norad_id: u64,
    elements: sgp4::Elements,
    constants: sgp4::Constants,
}

impl Sgp4Propagator {
    pub fn from_tle(name: Option<String>, line1: &str, line2: &str) -> Result<Self> {
        let elements = sgp4::Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes())
            .map_err(|e| OrbitalError::InvalidTle(format!("{:?}", e)))?;

        let constants = sgp4::Constants::from_elements(&elements)
            .map_err(|e| OrbitalError::PropagationFailed(format!("{:?}", e)))?;

        debug!(
            "Loaded TLE {} (NORAD {}), epoch {}",
            name.as_deref().unwrap_or("<unnamed>"),
            elements.norad_id,
            elements.datetime
        );

        Ok(Self {
            name,
            norad_id: elements.norad_id,
            elements,
            constants,
        })
    }

    /// Parse a TLE file: two lines, or three with a leading name line
    pub fn from_tle_text(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.trim().is_empty())
            .collect();

        match lines.as_slice() {
            [line1, line2] => Self::from_tle(None, line1, line2),
            [name, line1, line2] => Self::from_tle(Some(name.trim().to_string()), line1, line2),
            _ => Err(OrbitalError::InvalidTle(format!(
                "expected 2 or 3 non-empty lines, found {}",
                lines.len()
            ))),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn norad_id(&self) -> u64 {
        self.norad_id
    }

    /// Minutes from the element epoch to `time`
    pub fn minutes_since_epoch(&self, time: DateTime<Utc>) -> f64 {
        let duration = time.signed_duration_since(self.epoch());
        duration.num_milliseconds() as f64 / 60_000.0
    }
}

impl fmt::Debug for Sgp4Propagator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sgp4Propagator")
            .field("name", &self.name)
            .field("norad_id", &self.norad_id)
            .field("epoch", &self.elements.datetime)
            .finish()
    }
}

impl Propagator for Sgp4Propagator {
    fn position_eci_km(&self, minutes_since_epoch: f64) -> Result<[f64; 3]> {
        let prediction = self
            .constants
            .propagate(minutes_since_epoch)
            .map_err(|e| OrbitalError::PropagationFailed(format!("{:?}", e)))?;
        Ok(prediction.position)
    }

    fn epoch(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_naive_utc_and_offset(self.elements.datetime, Utc)
    }
}

impl OrbitalPlaneInfo for Sgp4Propagator {
    fn raan_deg(&self) -> f64 {
        self.elements.right_ascension
    }

    fn inclination_deg(&self) -> f64 {
        self.elements.inclination
    }
}

/// Greenwich mean sidereal time (IAU 1982), radians in [0, 2π)
pub fn gmst_rad(time: DateTime<Utc>) -> f64 {
    let unix_seconds =
        time.timestamp() as f64 + time.timestamp_subsec_nanos() as f64 * 1e-9;
    let julian_date = unix_seconds / SECONDS_PER_DAY + UNIX_EPOCH_JULIAN_DATE;
    let t = (julian_date - J2000_JULIAN_DATE) / 36_525.0;

    let gmst_seconds = 67_310.548_41
        + (876_600.0 * 3_600.0 + 8_640_184.812_866) * t
        + 0.093_104 * t * t
        - 6.2e-6 * t * t * t;

    (gmst_seconds.rem_euclid(SECONDS_PER_DAY) / SECONDS_PER_DAY * TAU).rem_euclid(TAU)
}

/// Rotate an ECI position into the Earth-fixed frame at `time`. Units pass through.
pub fn eci_to_ecef(eci: Vector3, time: DateTime<Utc>) -> Result<Vector3> {
    let earth_rotation = AxisAngleRotation::new(Vector3::new(0.0, 0.0, 1.0), -gmst_rad(time))?;
    Ok(earth_rotation.apply(&eci))
}

fn time_at(propagator: &(impl Propagator + ?Sized), minutes_since_epoch: f64) -> DateTime<Utc> {
    let offset_ms = (minutes_since_epoch * 60_000.0).round() as i64;
    propagator.epoch() + Duration::milliseconds(offset_ms)
}

/// Earth-fixed satellite position in meters, with its geodetic coordinates
pub fn satellite_ecef(
    propagator: &(impl Propagator + ?Sized),
    transform: &GeoEcefTransform,
    minutes_since_epoch: f64,
) -> Result<EcefPosition> {
    let [x_km, y_km, z_km] = propagator.position_eci_km(minutes_since_epoch)?;
    let eci_m = Vector3::new(x_km, y_km, z_km) * 1000.0;
    let ecef_m = eci_to_ecef(eci_m, time_at(propagator, minutes_since_epoch))?;
    transform.vector_to_geodetic(&ecef_m)
}

/// Geodetic point under the satellite. Altitude is the satellite's height in meters.
pub fn sub_satellite_point(
    propagator: &(impl Propagator + ?Sized),
    transform: &GeoEcefTransform,
    minutes_since_epoch: f64,
) -> Result<GeodeticPosition> {
    Ok(satellite_ecef(propagator, transform, minutes_since_epoch)?.geodetic())
}

/// Whether latitude is increasing at this point of the orbit
pub fn is_ascending(
    propagator: &(impl Propagator + ?Sized),
    transform: &GeoEcefTransform,
    minutes_since_epoch: f64,
) -> Result<bool> {
    let now = sub_satellite_point(propagator, transform, minutes_since_epoch)?;
    let later = sub_satellite_point(
        propagator,
        transform,
        minutes_since_epoch + ASCENDING_STEP_MINUTES,
    )?;
    Ok(now.latitude_deg < later.latitude_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ISS_NAME: &str = "ISS (ZARYA)";
    const ISS_LINE1: &str = "1 25544U 98067A   24226.56250000  .00007211  00000-0  13379-3 0  9991";
    const ISS_LINE2: &str = "2 25544  51.6422 266.4643 0007888 121.4429 238.6624 15.49494792423450";

    /// Circular orbit with a fixed epoch, for exercising the seam without SGP4
    struct CircularOrbit {
        radius_km: f64,
        inclination_deg: f64,
        period_minutes: f64,
        epoch: DateTime<Utc>,
    }

    impl Propagator for CircularOrbit {
        fn position_eci_km(&self, minutes_since_epoch: f64) -> Result<[f64; 3]> {
            let u = TAU * minutes_since_epoch / self.period_minutes;
            let i = self.inclination_deg.to_radians();
            Ok([
                self.radius_km * u.cos(),
                self.radius_km * u.sin() * i.cos(),
                self.radius_km * u.sin() * i.sin(),
            ])
        }

        fn epoch(&self) -> DateTime<Utc> {
            self.epoch
        }
    }

    fn circular() -> CircularOrbit {
        CircularOrbit {
            radius_km: 16_878.0,
            inclination_deg: 55.0,
            period_minutes: 363.0,
            epoch: Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_gmst_at_j2000() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((gmst_rad(j2000).to_degrees() - 280.460_618_37).abs() < 1e-6);
    }

    #[test]
    fn test_gmst_advances_one_sidereal_step_per_day() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = t0 + Duration::days(1);
        let step = (gmst_rad(t1) - gmst_rad(t0)).rem_euclid(TAU).to_degrees();
        assert!((step - 0.985_647).abs() < 1e-4);
    }

    #[test]
    fn test_gmst_range() {
        for day in 0..400 {
            let t = Utc.with_ymd_and_hms(2023, 6, 1, 7, 30, 0).unwrap() + Duration::days(day);
            let g = gmst_rad(t);
            assert!((0.0..TAU).contains(&g));
        }
    }

    #[test]
    fn test_eci_to_ecef_preserves_z_and_radius() {
        let t = Utc.with_ymd_and_hms(2024, 3, 20, 6, 0, 0).unwrap();
        let eci = Vector3::new(7000.0, -1200.0, 300.0);
        let ecef = eci_to_ecef(eci, t).unwrap();
        assert!((ecef.z() - 300.0).abs() < 1e-9);
        assert!((ecef.magnitude() - eci.magnitude()).abs() < 1e-9);

        // ECEF longitude is ECI right ascension minus GMST
        let ra = eci.y().atan2(eci.x());
        let lon = ecef.y().atan2(ecef.x());
        let expected = (ra - gmst_rad(t)).rem_euclid(TAU);
        assert!((lon.rem_euclid(TAU) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_same_orbital_plane() {
        let a = PlaneElements { raan_deg: 120.0, inclination_deg: 55.0 };
        let b = PlaneElements { raan_deg: 120.0, inclination_deg: 55.0 };
        let c = PlaneElements { raan_deg: 240.0, inclination_deg: 55.0 };
        let d = PlaneElements { raan_deg: 120.0, inclination_deg: 53.0 };
        assert!(same_orbital_plane(&a, &b));
        assert!(!same_orbital_plane(&a, &c));
        assert!(!same_orbital_plane(&a, &d));
    }

    #[test]
    fn test_same_orbital_plane_across_raan_seam() {
        let a = PlaneElements { raan_deg: 0.0, inclination_deg: 55.0 };
        let b = PlaneElements { raan_deg: 360.0, inclination_deg: 55.0 };
        assert!(same_orbital_plane(&a, &b));
    }

    #[test]
    fn test_sgp4_from_tle() {
        let iss = Sgp4Propagator::from_tle(Some(ISS_NAME.to_string()), ISS_LINE1, ISS_LINE2).unwrap();
        assert_eq!(iss.norad_id(), 25544);
        assert_eq!(iss.name(), Some(ISS_NAME));
        assert!((iss.inclination_deg() - 51.6422).abs() < 1e-9);
        assert!((iss.raan_deg() - 266.4643).abs() < 1e-9);
        let expected = Utc.with_ymd_and_hms(2024, 8, 13, 13, 30, 0).unwrap();
        assert!((iss.epoch() - expected).num_milliseconds().abs() < 1);
    }

    #[test]
    fn test_sgp4_from_tle_text() {
        let text = format!("{}\n{}\n{}\n", ISS_NAME, ISS_LINE1, ISS_LINE2);
        let iss = Sgp4Propagator::from_tle_text(&text).unwrap();
        assert_eq!(iss.name(), Some(ISS_NAME));

        let bare = Sgp4Propagator::from_tle_text(&format!("{}\n{}", ISS_LINE1, ISS_LINE2)).unwrap();
        assert_eq!(bare.name(), None);

        assert!(matches!(
            Sgp4Propagator::from_tle_text(ISS_LINE1),
            Err(OrbitalError::InvalidTle(_))
        ));
    }

    #[test]
    fn test_sgp4_rejects_garbage() {
        let result = Sgp4Propagator::from_tle(None, "1 not a tle", "2 not a tle");
        assert!(matches!(result, Err(OrbitalError::InvalidTle(_))));
    }

    #[test]
    fn test_sgp4_rejects_bad_checksum() {
        let corrupted = ISS_LINE1.replace("9991", "9992");
        let result = Sgp4Propagator::from_tle(None, &corrupted, ISS_LINE2);
        assert!(matches!(result, Err(OrbitalError::InvalidTle(_))));

        let corrupted = ISS_LINE2.replace("423450", "423451");
        let result = Sgp4Propagator::from_tle(None, ISS_LINE1, &corrupted);
        assert!(matches!(result, Err(OrbitalError::InvalidTle(_))));
    }

    #[test]
    fn test_satellite_ecef_matches_sub_satellite_point() {
        let orbit = circular();
        let transform = GeoEcefTransform::default();
        let ecef = satellite_ecef(&orbit, &transform, 42.0).unwrap();
        assert!((ecef.to_vector().magnitude() - 16_878_000.0).abs() < 1e-3);
        assert_eq!(
            ecef.geodetic(),
            sub_satellite_point(&orbit, &transform, 42.0).unwrap()
        );
    }

    #[test]
    fn test_sgp4_sub_satellite_point() {
        let iss = Sgp4Propagator::from_tle(None, ISS_LINE1, ISS_LINE2).unwrap();
        let transform = GeoEcefTransform::default();

        let radius = {
            let [x, y, z] = iss.position_eci_km(0.0).unwrap();
            (x * x + y * y + z * z).sqrt()
        };
        assert!(radius > 6_700.0 && radius < 6_850.0);

        for minutes in [0.0, 15.0, 30.0, 45.0, 60.0, 75.0, 90.0] {
            let point = sub_satellite_point(&iss, &transform, minutes).unwrap();
            assert!(point.latitude_deg.abs() < 52.5, "lat {}", point.latitude_deg);
            assert!(point.altitude_km() > 380.0 && point.altitude_km() < 450.0);
        }
    }

    #[test]
    fn test_sgp4_ascending_near_node() {
        // Argument of perigee plus mean anomaly puts the epoch just past the ascending node.
        let iss = Sgp4Propagator::from_tle(None, ISS_LINE1, ISS_LINE2).unwrap();
        let transform = GeoEcefTransform::default();
        assert!(is_ascending(&iss, &transform, 0.0).unwrap());
        assert!(!is_ascending(&iss, &transform, 46.0).unwrap());
    }

    #[test]
    fn test_minutes_since_epoch() {
        let iss = Sgp4Propagator::from_tle(None, ISS_LINE1, ISS_LINE2).unwrap();
        let later = iss.epoch() + Duration::minutes(90);
        assert!((iss.minutes_since_epoch(later) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_circular_orbit_ascending_and_descending() {
        let orbit = circular();
        let transform = GeoEcefTransform::default();
        let quarter = orbit.period_minutes / 4.0;

        assert!(is_ascending(&orbit, &transform, 0.0).unwrap());
        assert!(!is_ascending(&orbit, &transform, 2.0 * quarter).unwrap());
        assert!(is_ascending(&orbit, &transform, 3.5 * quarter).unwrap());
    }

    #[test]
    fn test_circular_orbit_peak_latitude() {
        let orbit = circular();
        let transform = GeoEcefTransform::default();
        let apex = sub_satellite_point(&orbit, &transform, orbit.period_minutes / 4.0).unwrap();

        // Geodetic latitude sits slightly poleward of the geocentric 55°.
        assert!(apex.latitude_deg > 55.0 && apex.latitude_deg < 55.2);
        assert!((apex.altitude_km() - 10_500.0).abs() < 30.0);
    }

    #[test]
    fn test_trait_objects() {
        let orbit = circular();
        let dynamic: &dyn Propagator = &orbit;
        let transform = GeoEcefTransform::default();
        assert!(sub_satellite_point(dynamic, &transform, 10.0).is_ok());

        let plane: &dyn OrbitalPlaneInfo = &PlaneElements { raan_deg: 10.0, inclination_deg: 55.0 };
        assert!(same_orbital_plane(plane, &PlaneElements { raan_deg: 10.0, inclination_deg: 55.0 }));
    }
}
