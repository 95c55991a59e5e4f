//! 3-D vectors and axis-angle rotation
//!
//! Thin value wrappers over `nalgebra`. Every fallible operation reports
//! [`OrbitalError::ZeroVector`] instead of letting a NaN escape.

use crate::{OrbitalError, Result};
use nalgebra::{Unit, UnitQuaternion};
use std::ops::{Add, Mul, Neg, Sub};
use tracing::debug;

/// Angles below this are treated as no rotation at all
const ANGLE_EPSILON_RAD: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3(nalgebra::Vector3<f64>);

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(nalgebra::Vector3::new(x, y, z))
    }

    pub fn zero() -> Self {
        Self(nalgebra::Vector3::zeros())
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.0.dot(&other.0)
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Self(self.0.cross(&other.0))
    }

    pub fn magnitude(&self) -> f64 {
        self.0.norm()
    }

    /// Unit vector in the same direction
    pub fn normalize(&self) -> Result<Vector3> {
        let mag = self.magnitude();
        if mag == 0.0 || !mag.is_finite() {
            return Err(OrbitalError::ZeroVector);
        }
        Ok(Self(self.0 / mag))
    }

    /// Normalize in place; `self` is untouched on error
    pub fn normalize_mut(&mut self) -> Result<()> {
        *self = self.normalize()?;
        Ok(())
    }

    /// Angle to `other` in radians, in [0, π].
    ///
    /// atan2(|u × v|, u · v), accurate near 0 and π where acos is not.
    pub fn angle_between(&self, other: &Vector3) -> Result<f64> {
        if self.magnitude() == 0.0 || other.magnitude() == 0.0 {
            return Err(OrbitalError::ZeroVector);
        }
        Ok(self.cross(other).magnitude().atan2(self.dot(other)))
    }

    /// Some unit vector perpendicular to this one
    fn any_perpendicular(&self) -> Result<Vector3> {
        let (ax, ay, az) = (self.0.x.abs(), self.0.y.abs(), self.0.z.abs());
        let basis = if ax <= ay && ax <= az {
            Vector3::new(1.0, 0.0, 0.0)
        } else if ay <= az {
            Vector3::new(0.0, 1.0, 0.0)
        } else {
            Vector3::new(0.0, 0.0, 1.0)
        };
        self.cross(&basis).normalize()
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3 {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self(v)
    }
}

impl From<Vector3> for nalgebra::Vector3<f64> {
    fn from(v: Vector3) -> Self {
        v.0
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        Self(self.0 * rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Self(-self.0)
    }
}

/// Rotation by `angle_rad` about a unit `axis` (right-hand rule).
///
/// Applies v' = v·cosθ + (k × v)·sinθ + k·(k·v)·(1 − cosθ) through the
/// equivalent unit quaternion. Rotations do not compose; each use derives its
/// own axis and angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngleRotation {
    axis: Unit<nalgebra::Vector3<f64>>,
    angle_rad: f64,
    rotation: UnitQuaternion<f64>,
}

impl AxisAngleRotation {
    pub fn new(axis: Vector3, angle_rad: f64) -> Result<Self> {
        if !angle_rad.is_finite() {
            return Err(OrbitalError::InvalidCoordinates(format!(
                "rotation angle {} is not finite",
                angle_rad
            )));
        }
        let unit = axis.normalize()?;
        let axis = Unit::new_unchecked(unit.0);
        Ok(Self {
            axis,
            angle_rad,
            rotation: UnitQuaternion::from_axis_angle(&axis, angle_rad),
        })
    }

    pub fn identity() -> Self {
        Self {
            axis: nalgebra::Vector3::z_axis(),
            angle_rad: 0.0,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// The single rotation that carries the direction of `from` onto the
    /// direction of `to`.
    ///
    /// Coincident directions give the identity without normalizing the zero
    /// cross product; opposite directions rotate by π about an arbitrary axis
    /// perpendicular to `from`.
    pub fn between(from: &Vector3, to: &Vector3) -> Result<Self> {
        let angle = from.angle_between(to)?;
        if angle < ANGLE_EPSILON_RAD {
            debug!("directions coincide, using identity rotation");
            return Ok(Self::identity());
        }

        let cross = from.cross(to);
        let axis = match cross.normalize() {
            Ok(axis) if std::f64::consts::PI - angle > ANGLE_EPSILON_RAD => axis,
            _ => {
                debug!(angle_rad = angle, "antipodal directions, picking perpendicular axis");
                from.any_perpendicular()?
            }
        };
        Self::new(axis, angle)
    }

    pub fn axis(&self) -> Vector3 {
        Vector3(self.axis.into_inner())
    }

    pub fn angle_rad(&self) -> f64 {
        self.angle_rad
    }

    pub fn apply(&self, v: &Vector3) -> Vector3 {
        Vector3(self.rotation * v.0)
    }
}

impl Default for AxisAngleRotation {
    fn default() -> Self {
        Self::identity()
    }
}
