//! Inter-satellite link topology
//!
//! Satellites are numbered plane by plane: index = plane · spp + slot, where
//! spp is satellites per plane. Each plane is a ring (neighbouring slots link,
//! and the first and last slots close the ring) and neighbouring planes are
//! joined by rungs between equal slots. Nothing else links.

use crate::{OrbitalError, Result};
use serde::{Deserialize, Serialize};

/// Static plane/size parameters of a Walker-style grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawShape")]
pub struct ConstellationShape {
    plane_count: usize,
    satellites_per_plane: usize,
}

#[derive(Deserialize)]
struct RawShape {
    plane_count: usize,
    satellites_per_plane: usize,
}

impl TryFrom<RawShape> for ConstellationShape {
    type Error = OrbitalError;

    fn try_from(raw: RawShape) -> Result<Self> {
        ConstellationShape::new(raw.plane_count, raw.satellites_per_plane)
    }
}

/// Position of a satellite within the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatelliteSlot {
    pub plane: usize,
    pub slot: usize,
}

/// How two plane numbers relate for rung eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneRelation {
    Same,
    /// Plane numbers differ by one
    Adjacent,
    /// One plane number equals `plane_count` and the other is 0.
    ///
    /// Plane numbers derived from valid indices stop at `plane_count - 1`, so
    /// this never occurs for validated input. It is kept as written rather
    /// than reinterpreted as a seam between the last and first planes.
    Wrapped,
    Distant,
}

impl ConstellationShape {
    /// Three planes of four
    pub const HALO: ConstellationShape = ConstellationShape {
        plane_count: 3,
        satellites_per_plane: 4,
    };

    pub fn new(plane_count: usize, satellites_per_plane: usize) -> Result<Self> {
        if plane_count == 0 || satellites_per_plane == 0 {
            return Err(OrbitalError::InvalidShape(format!(
                "{} planes x {} satellites per plane",
                plane_count, satellites_per_plane
            )));
        }
        plane_count.checked_mul(satellites_per_plane).ok_or_else(|| {
            OrbitalError::InvalidShape("satellite count overflows usize".to_string())
        })?;
        Ok(Self {
            plane_count,
            satellites_per_plane,
        })
    }

    pub fn plane_count(&self) -> usize {
        self.plane_count
    }

    pub fn satellites_per_plane(&self) -> usize {
        self.satellites_per_plane
    }

    pub fn total_satellites(&self) -> usize {
        self.plane_count * self.satellites_per_plane
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let total = self.total_satellites();
        if index >= total {
            return Err(OrbitalError::IndexOutOfRange { index, total });
        }
        Ok(())
    }

    pub fn slot_of(&self, index: usize) -> Result<SatelliteSlot> {
        self.check_index(index)?;
        let plane = index / self.satellites_per_plane;
        Ok(SatelliteSlot {
            plane,
            slot: self.slot_in_plane(index, plane),
        })
    }

    pub fn index_of(&self, slot: SatelliteSlot) -> Result<usize> {
        if slot.plane >= self.plane_count || slot.slot >= self.satellites_per_plane {
            return Err(OrbitalError::InvalidCoordinates(format!(
                "slot {:?} outside {} x {} grid",
                slot, self.plane_count, self.satellites_per_plane
            )));
        }
        Ok(slot.plane * self.satellites_per_plane + slot.slot)
    }

    fn slot_in_plane(&self, index: usize, plane: usize) -> usize {
        (index % self.total_satellites()) - self.satellites_per_plane * plane
    }

    pub fn plane_relation(&self, plane_a: usize, plane_b: usize) -> PlaneRelation {
        if plane_a == plane_b {
            PlaneRelation::Same
        } else if plane_a.abs_diff(plane_b) == 1 {
            PlaneRelation::Adjacent
        } else if (plane_a == self.plane_count && plane_b == 0)
            || (plane_a == 0 && plane_b == self.plane_count)
        {
            PlaneRelation::Wrapped
        } else {
            PlaneRelation::Distant
        }
    }

    /// Whether satellites `a` and `b` may form an inter-satellite link.
    ///
    /// Out-of-range indices are an error. A satellite never links to itself.
    pub fn is_inter_satellite_link(&self, a: usize, b: usize) -> Result<bool> {
        self.check_index(a)?;
        self.check_index(b)?;
        if a == b {
            return Ok(false);
        }

        let spp = self.satellites_per_plane;
        let plane_a = a / spp;
        let plane_b = b / spp;

        match self.plane_relation(plane_a, plane_b) {
            PlaneRelation::Same => {
                let min = spp * plane_a;
                let max = min + (spp - 1);
                let ring_neighbour = a.abs_diff(b) == 1;
                let ring_seam = (a == max && b == min) || (a == min && b == max);
                Ok(ring_neighbour || ring_seam)
            }
            PlaneRelation::Adjacent | PlaneRelation::Wrapped => {
                Ok(self.slot_in_plane(a, plane_a) == self.slot_in_plane(b, plane_b))
            }
            PlaneRelation::Distant => Ok(false),
        }
    }

    /// Every satellite `index` may link with, ascending
    pub fn link_partners(&self, index: usize) -> Result<Vec<usize>> {
        self.check_index(index)?;
        let mut partners = Vec::new();
        for other in 0..self.total_satellites() {
            if self.is_inter_satellite_link(index, other)? {
                partners.push(other);
            }
        }
        Ok(partners)
    }

    /// All eligible links as unordered pairs `(low, high)`
    pub fn links(&self) -> Vec<(usize, usize)> {
        let total = self.total_satellites();
        let mut links = Vec::new();
        for a in 0..total {
            for b in (a + 1)..total {
                if matches!(self.is_inter_satellite_link(a, b), Ok(true)) {
                    links.push((a, b));
                }
            }
        }
        links
    }
}

/// Free-function form of [`ConstellationShape::is_inter_satellite_link`]
pub fn is_inter_satellite_link(
    self_index: usize,
    other_index: usize,
    shape: &ConstellationShape,
) -> Result<bool> {
    shape.is_inter_satellite_link(self_index, other_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_6x10() -> ConstellationShape {
        ConstellationShape::new(6, 10).unwrap()
    }

    #[test]
    fn test_adjacent_same_plane() {
        let shape = shape_6x10();
        assert!(is_inter_satellite_link(3, 4, &shape).unwrap());
        assert!(is_inter_satellite_link(4, 3, &shape).unwrap());
        assert!(!is_inter_satellite_link(3, 5, &shape).unwrap());
    }

    #[test]
    fn test_same_plane_ring_seam() {
        let shape = shape_6x10();
        assert!(is_inter_satellite_link(0, 9, &shape).unwrap());
        assert!(is_inter_satellite_link(9, 0, &shape).unwrap());
        assert!(is_inter_satellite_link(50, 59, &shape).unwrap());
    }

    #[test]
    fn test_plane_boundary_is_not_a_ring_neighbour() {
        // 9 and 10 differ by one but sit in different planes with different slots.
        let shape = shape_6x10();
        assert!(!is_inter_satellite_link(9, 10, &shape).unwrap());
    }

    #[test]
    fn test_cross_plane_alignment() {
        let shape = shape_6x10();
        assert!(is_inter_satellite_link(3, 13, &shape).unwrap());
        assert!(is_inter_satellite_link(23, 13, &shape).unwrap());
        assert!(!is_inter_satellite_link(3, 14, &shape).unwrap());
    }

    #[test]
    fn test_non_adjacent_planes() {
        let shape = shape_6x10();
        assert!(!is_inter_satellite_link(3, 45, &shape).unwrap());
        assert!(!is_inter_satellite_link(3, 23, &shape).unwrap());
    }

    #[test]
    fn test_first_and_last_plane_do_not_link() {
        let shape = shape_6x10();
        assert!(!is_inter_satellite_link(3, 53, &shape).unwrap());
    }

    #[test]
    fn test_self_link_rejected() {
        let single = ConstellationShape::new(3, 1).unwrap();
        assert!(!single.is_inter_satellite_link(1, 1).unwrap());
        assert!(!shape_6x10().is_inter_satellite_link(7, 7).unwrap());
    }

    #[test]
    fn test_out_of_range_index() {
        let shape = shape_6x10();
        assert!(matches!(
            shape.is_inter_satellite_link(3, 60),
            Err(OrbitalError::IndexOutOfRange { index: 60, total: 60 })
        ));
        assert!(shape.slot_of(1_000).is_err());
    }

    #[test]
    fn test_invalid_shape() {
        assert!(ConstellationShape::new(0, 10).is_err());
        assert!(ConstellationShape::new(6, 0).is_err());
        assert!(ConstellationShape::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_symmetry_exhaustive() {
        for (planes, spp) in [(6, 10), (3, 4), (1, 1), (1, 2), (2, 2), (5, 1), (4, 7)] {
            let shape = ConstellationShape::new(planes, spp).unwrap();
            let total = shape.total_satellites();
            for i in 0..total {
                for j in 0..total {
                    assert_eq!(
                        shape.is_inter_satellite_link(i, j).unwrap(),
                        shape.is_inter_satellite_link(j, i).unwrap(),
                        "{}x{} ({}, {})",
                        planes,
                        spp,
                        i,
                        j
                    );
                }
            }
        }
    }

    #[test]
    fn test_wrapped_relation_unreachable_from_valid_indices() {
        for (planes, spp) in [(6, 10), (3, 4), (2, 5), (1, 3)] {
            let shape = ConstellationShape::new(planes, spp).unwrap();
            let total = shape.total_satellites();
            for i in 0..total {
                for j in 0..total {
                    let (pa, pb) = (shape.slot_of(i).unwrap().plane, shape.slot_of(j).unwrap().plane);
                    assert_ne!(shape.plane_relation(pa, pb), PlaneRelation::Wrapped);
                }
            }
        }

        // The branch only exists for a plane number one past the last plane.
        let shape = shape_6x10();
        assert_eq!(shape.plane_relation(6, 0), PlaneRelation::Wrapped);
        assert_eq!(shape.plane_relation(0, 5), PlaneRelation::Distant);
    }

    #[test]
    fn test_slot_round_trip() {
        let shape = shape_6x10();
        let slot = shape.slot_of(47).unwrap();
        assert_eq!(slot, SatelliteSlot { plane: 4, slot: 7 });
        assert_eq!(shape.index_of(slot).unwrap(), 47);
        assert!(shape.index_of(SatelliteSlot { plane: 6, slot: 0 }).is_err());
    }

    #[test]
    fn test_link_partners() {
        let shape = shape_6x10();
        assert_eq!(shape.link_partners(3).unwrap(), vec![2, 4, 13]);
        assert_eq!(shape.link_partners(10).unwrap(), vec![0, 11, 19, 20]);
        assert_eq!(shape.link_partners(59).unwrap(), vec![49, 50, 58]);
    }

    #[test]
    fn test_halo_ring_and_rungs() {
        // 12 satellites, 3 planes of 4: three rings of 4 plus two rung layers of 4.
        let shape = ConstellationShape::new(3, 4).unwrap();
        let links = shape.links();

        assert_eq!(links.len(), 12 + 8);
        assert!(links.contains(&(0, 3)));
        assert!(links.contains(&(0, 4)));
        assert!(links.contains(&(7, 11)));
        assert!(!links.contains(&(0, 8)));
    }

    #[test]
    fn test_two_satellite_plane() {
        // Neighbour and seam coincide; the pair still links exactly once.
        let shape = ConstellationShape::new(1, 2).unwrap();
        assert_eq!(shape.links(), vec![(0, 1)]);
    }

    #[test]
    fn test_shape_from_json_validates() {
        let ok: ConstellationShape =
            serde_json::from_str(r#"{"plane_count": 6, "satellites_per_plane": 10}"#).unwrap();
        assert_eq!(ok.total_satellites(), 60);

        let bad = serde_json::from_str::<ConstellationShape>(
            r#"{"plane_count": 0, "satellites_per_plane": 10}"#,
        );
        assert!(bad.is_err());
    }
}
