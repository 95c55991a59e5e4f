//! Constellation Geometry Library
//!
//! Geodetic/ECEF coordinate transforms, inter-satellite link topology for
//! Walker-style grids, and ground-visibility footprints for display.
//!
//! ```text
//! propagator ──► sub-satellite point ──► GeoEcefTransform ──► FootprintGenerator
//!     │                                                        │
//!     └──► look angles from a ground site                      ▼
//!                                                         MapCanvas / GeoJSON
//!          ConstellationShape (ISL eligibility)
//! ```
//!
//! Units are carried in field and argument names: `_m` for meters, `_km` for
//! kilometers, `_deg` / `_rad` for angles. RAAN and inclination cross the
//! propagator boundary in degrees.

use thiserror::Error;

pub mod canvas;
pub mod config;
pub mod ellipsoid;
pub mod footprint;
pub mod propagation;
pub mod topology;
pub mod transforms;
pub mod vector;
pub mod visibility;
pub mod walker;

pub use canvas::{CanvasPoint, MapCanvas};
pub use config::GeometryConfig;
pub use ellipsoid::Ellipsoid;
pub use footprint::{FootprintGenerator, FootprintPolygon};
pub use propagation::{OrbitalPlaneInfo, PlaneElements, Propagator, Sgp4Propagator};
pub use topology::{is_inter_satellite_link, ConstellationShape, PlaneRelation, SatelliteSlot};
pub use transforms::{EcefPosition, GeoEcefTransform, GeodeticPosition};
pub use vector::{AxisAngleRotation, Vector3};
pub use visibility::{look_angles, look_angles_at, LookAngles};
pub use walker::WalkerDelta;

#[derive(Error, Debug)]
pub enum OrbitalError {
    #[error("Invalid TLE format: {0}")]
    InvalidTle(String),
    #[error("Propagation failed: {0}")]
    PropagationFailed(String),
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
    #[error("Degenerate ECEF position at the Earth's center has no geodetic equivalent")]
    DegeneratePosition,
    #[error("Cannot normalize a zero-magnitude vector")]
    ZeroVector,
    #[error("Satellite index {index} outside constellation of {total}")]
    IndexOutOfRange { index: usize, total: usize },
    #[error("Invalid constellation shape: {0}")]
    InvalidShape(String),
    #[error("Footprint needs at least {min} points, got {got}")]
    InvalidPointCount { min: usize, got: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OrbitalError>;
