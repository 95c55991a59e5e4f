//! Strategies for the geometry domain

use constellation_geometry::{ConstellationShape, GeodeticPosition, Vector3};
use proptest::prelude::*;

// ============================================================================
// Geodetic Generators
// ============================================================================

/// Latitude, full range [-90, 90] degrees
pub fn latitude_deg() -> impl Strategy<Value = f64> {
    -90.0f64..=90.0
}

/// Latitude away from the poles [-89, 89] degrees
pub fn latitude_off_pole_deg() -> impl Strategy<Value = f64> {
    -89.0f64..=89.0
}

/// Longitude [-180, 180] degrees
pub fn longitude_deg() -> impl Strategy<Value = f64> {
    -180.0f64..=180.0
}

/// Altitude from the surface to 2000 km, in meters
pub fn altitude_m() -> impl Strategy<Value = f64> {
    0.0f64..=2_000_000.0
}

/// Orbital altitude, LEO to GEO, in km
pub fn altitude_km() -> impl Strategy<Value = f64> {
    200.0f64..=42_000.0
}

/// HALO constellation altitude (~10,500 km)
pub fn altitude_halo_km() -> impl Strategy<Value = f64> {
    10_000.0f64..=11_000.0
}

/// RAAN, [0, 360) degrees
pub fn raan_deg() -> impl Strategy<Value = f64> {
    0.0f64..360.0
}

/// Inclination, [0, 180] degrees
pub fn inclination_deg() -> impl Strategy<Value = f64> {
    0.0f64..=180.0
}

/// Position in the round-trip domain: off-pole latitude, altitude up to 2000 km
pub fn geodetic_position() -> impl Strategy<Value = GeodeticPosition> {
    (latitude_off_pole_deg(), longitude_deg(), altitude_m())
        .prop_map(|(lat, lon, alt)| GeodeticPosition::new(lat, lon, alt))
}

// ============================================================================
// Vector Generators
// ============================================================================

/// One Cartesian component, meters, within GEO distance
pub fn component_m() -> impl Strategy<Value = f64> {
    -4.5e7f64..=4.5e7
}

/// Any vector in the GEO cube, zero included
pub fn ecef_vector() -> impl Strategy<Value = Vector3> {
    (component_m(), component_m(), component_m()).prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

/// Vector with magnitude of at least 1 km
pub fn nonzero_vector() -> impl Strategy<Value = Vector3> {
    ecef_vector().prop_filter("magnitude below 1 km", |v| v.magnitude() >= 1_000.0)
}

/// Rotation angle, [-2π, 2π]
pub fn angle_rad() -> impl Strategy<Value = f64> {
    -std::f64::consts::TAU..=std::f64::consts::TAU
}

// ============================================================================
// Constellation Generators
// ============================================================================

/// Planes 1..=12 by 1..=24 satellites per plane
pub fn constellation_shape() -> impl Strategy<Value = ConstellationShape> {
    (1usize..=12, 1usize..=24).prop_filter_map("shape must be valid", |(planes, spp)| {
        ConstellationShape::new(planes, spp).ok()
    })
}

/// A shape with two indices valid inside it
pub fn shape_with_pair() -> impl Strategy<Value = (ConstellationShape, usize, usize)> {
    constellation_shape().prop_flat_map(|shape| {
        let total = shape.total_satellites();
        (Just(shape), 0..total, 0..total)
    })
}

/// Footprint point count, [4, 360]
pub fn footprint_points() -> impl Strategy<Value = usize> {
    4usize..=360
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Longitude difference folded into [-180, 180)
pub fn wrap_longitude_diff(a: f64, b: f64) -> f64 {
    (a - b + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_latitude_bounds(v in latitude_deg()) {
            prop_assert!((-90.0..=90.0).contains(&v));
        }

        #[test]
        fn test_nonzero_vector_magnitude(v in nonzero_vector()) {
            prop_assert!(v.magnitude() >= 1_000.0);
        }

        #[test]
        fn test_pair_in_range((shape, a, b) in shape_with_pair()) {
            prop_assert!(a < shape.total_satellites());
            prop_assert!(b < shape.total_satellites());
        }
    }

    #[test]
    fn test_wrap_longitude_diff() {
        assert_eq!(wrap_longitude_diff(179.0, -179.0), -2.0);
        assert_eq!(wrap_longitude_diff(-179.0, 179.0), 2.0);
        assert_eq!(wrap_longitude_diff(10.0, 5.0), 5.0);
    }
}
