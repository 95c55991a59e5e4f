//! Walker Delta constellation description
//!
//! Notation i:T/P/F. The HALO constellation is 55°:12/3/4 at 10,500 km.

use crate::propagation::PlaneElements;
use crate::topology::ConstellationShape;
use crate::{OrbitalError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkerDelta {
    pub total_satellites: u32,
    pub planes: u32,
    pub phasing: u32,
    pub altitude_km: f64,
    pub inclination_deg: f64,
}

impl WalkerDelta {
    pub fn halo_constellation() -> Self {
        WalkerDelta {
            total_satellites: 12,
            planes: 3,
            phasing: 4,
            altitude_km: 10500.0,
            inclination_deg: 55.0,
        }
    }

    /// Planes and satellites must be non-zero, with the satellites dividing
    /// evenly into planes. Every derived quantity checks this first.
    pub fn validate(&self) -> Result<()> {
        if self.planes == 0 || self.total_satellites == 0 {
            return Err(OrbitalError::InvalidShape(format!(
                "walker needs at least one plane and one satellite, got {}/{}",
                self.total_satellites, self.planes
            )));
        }
        if self.total_satellites % self.planes != 0 {
            return Err(OrbitalError::InvalidShape(format!(
                "{} satellites do not divide into {} planes",
                self.total_satellites, self.planes
            )));
        }
        Ok(())
    }

    pub fn satellites_per_plane(&self) -> Result<u32> {
        self.validate()?;
        Ok(self.total_satellites / self.planes)
    }

    pub fn plane_spacing_deg(&self) -> Result<f64> {
        self.validate()?;
        Ok(360.0 / self.planes as f64)
    }

    pub fn in_plane_spacing_deg(&self) -> Result<f64> {
        Ok(360.0 / self.satellites_per_plane()? as f64)
    }

    /// Along-track offset between satellites in neighbouring planes
    pub fn phase_offset_deg(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.phasing as f64 * 360.0 / self.total_satellites as f64)
    }

    /// Link-topology shape
    pub fn shape(&self) -> Result<ConstellationShape> {
        ConstellationShape::new(self.planes as usize, self.satellites_per_plane()? as usize)
    }

    /// Nominal RAAN and inclination of one plane
    pub fn plane_elements(&self, plane: u32) -> Result<PlaneElements> {
        let spacing = self.plane_spacing_deg()?;
        if plane >= self.planes {
            return Err(OrbitalError::IndexOutOfRange {
                index: plane as usize,
                total: self.planes as usize,
            });
        }
        Ok(PlaneElements {
            raan_deg: plane as f64 * spacing,
            inclination_deg: self.inclination_deg,
        })
    }

    /// Mean anomaly of a slot, including the inter-plane phase offset
    pub fn mean_anomaly_deg(&self, plane: u32, slot: u32) -> Result<f64> {
        let per_plane = self.satellites_per_plane()?;
        if plane >= self.planes {
            return Err(OrbitalError::IndexOutOfRange {
                index: plane as usize,
                total: self.planes as usize,
            });
        }
        if slot >= per_plane {
            return Err(OrbitalError::IndexOutOfRange {
                index: slot as usize,
                total: per_plane as usize,
            });
        }
        let raw = slot as f64 * self.in_plane_spacing_deg()? + plane as f64 * self.phase_offset_deg()?;
        Ok(raw.rem_euclid(360.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::same_orbital_plane;

    #[test]
    fn test_halo_spacing() {
        let halo = WalkerDelta::halo_constellation();
        assert_eq!(halo.satellites_per_plane().unwrap(), 4);
        assert_eq!(halo.plane_spacing_deg().unwrap(), 120.0);
        assert_eq!(halo.in_plane_spacing_deg().unwrap(), 90.0);
        assert_eq!(halo.phase_offset_deg().unwrap(), 120.0);
    }

    #[test]
    fn test_halo_shape() {
        let shape = WalkerDelta::halo_constellation().shape().unwrap();
        assert_eq!(shape, ConstellationShape::HALO);
        assert!(shape.is_inter_satellite_link(0, 4).unwrap());
    }

    #[test]
    fn test_uneven_shape_rejected() {
        let mut walker = WalkerDelta::halo_constellation();
        walker.total_satellites = 13;
        assert!(walker.shape().is_err());
        assert!(walker.in_plane_spacing_deg().is_err());
        walker.planes = 0;
        assert!(walker.shape().is_err());
    }

    #[test]
    fn test_zero_planes_rejected() {
        let mut walker = WalkerDelta::halo_constellation();
        walker.planes = 0;
        assert!(matches!(walker.validate(), Err(OrbitalError::InvalidShape(_))));
        assert!(walker.satellites_per_plane().is_err());
        assert!(walker.plane_spacing_deg().is_err());
        assert!(walker.in_plane_spacing_deg().is_err());
        assert!(walker.phase_offset_deg().is_err());
        assert!(walker.plane_elements(0).is_err());
        assert!(walker.mean_anomaly_deg(0, 0).is_err());
    }

    #[test]
    fn test_zero_satellites_rejected() {
        let mut walker = WalkerDelta::halo_constellation();
        walker.total_satellites = 0;
        assert!(matches!(walker.validate(), Err(OrbitalError::InvalidShape(_))));
        assert!(walker.phase_offset_deg().is_err());
        assert!(walker.in_plane_spacing_deg().is_err());
        assert!(walker.mean_anomaly_deg(0, 0).is_err());
    }

    #[test]
    fn test_plane_elements() {
        let halo = WalkerDelta::halo_constellation();
        let p0 = halo.plane_elements(0).unwrap();
        let p2 = halo.plane_elements(2).unwrap();
        assert_eq!(p2.raan_deg, 240.0);
        assert_eq!(p2.inclination_deg, 55.0);
        assert!(!same_orbital_plane(&p0, &p2));
        assert!(same_orbital_plane(&p2, &halo.plane_elements(2).unwrap()));
        assert!(matches!(
            halo.plane_elements(3),
            Err(OrbitalError::IndexOutOfRange { index: 3, total: 3 })
        ));
    }

    #[test]
    fn test_mean_anomaly_wraps() {
        let halo = WalkerDelta::halo_constellation();
        assert_eq!(halo.mean_anomaly_deg(0, 0).unwrap(), 0.0);
        assert_eq!(halo.mean_anomaly_deg(1, 0).unwrap(), 120.0);
        assert_eq!(halo.mean_anomaly_deg(2, 3).unwrap(), 150.0);
        assert!(halo.mean_anomaly_deg(3, 0).is_err());
        assert!(matches!(
            halo.mean_anomaly_deg(0, 4),
            Err(OrbitalError::IndexOutOfRange { index: 4, total: 4 })
        ));
    }
}
