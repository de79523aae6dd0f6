//! Unit propagation directions

use nalgebra::Vector3;

use crate::error::{AnisotropyError, Result};
use crate::utils::units::rad_to_deg;

/// Below this norm a direction vector is treated as zero
///
/// A direction carries no physical scale, so only vectors whose norm is zero
/// or subnormal are rejected.
pub const MIN_DIRECTION_NORM: f64 = f64::MIN_POSITIVE;

/// Unit 3-vector along which a plane wave propagates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction(Vector3<f64>);

impl Direction {
    /// Normalize any finite, non-zero vector
    pub fn new(v: Vector3<f64>) -> Result<Self> {
        let norm = v.norm();
        if !norm.is_finite() || norm < MIN_DIRECTION_NORM {
            return Err(AnisotropyError::ZeroDirection { norm });
        }
        Ok(Self(v / norm))
    }

    pub fn from_components(x: f64, y: f64, z: f64) -> Result<Self> {
        Self::new(Vector3::new(x, y, z))
    }

    pub fn as_vector(&self) -> &Vector3<f64> {
        &self.0
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.0.x, self.0.y, self.0.z]
    }

    /// Azimuth from +x in the xy-plane and inclination from +z, both in degrees
    pub fn azimuth_inclination_deg(&self) -> (f64, f64) {
        let azimuth = rad_to_deg(self.0.y.atan2(self.0.x));
        let inclination = rad_to_deg(self.0.z.clamp(-1.0, 1.0).acos());
        (azimuth, inclination)
    }
}
