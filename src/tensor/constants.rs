//! Single-crystal elastic constants in the fixed 21-slot order
//!
//! Higher symmetries are expressed by zeroing (or equating) constants of the
//! general triclinic set; see [`SymmetryClass`] for the patterns recognized.

use serde::{Deserialize, Serialize};

use super::voigt::{is_odd_under, CONSTANT_LAYOUT, NUM_CONSTANTS};
use crate::error::{AnisotropyError, Result};

/// Relative tolerance used when comparing constants for symmetry patterns
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// The 21 independent elastic constants of an arbitrary-symmetry crystal
///
/// Slot order is `[c11,c22,c33,c44,c55,c66,c12,c13,c23,c15,c25,c35,c46,
/// c14,c16,c24,c26,c34,c36,c45,c56]`. The same shape carries per-constant
/// uncertainties, which are all zero when uncertainty is not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ElasticConstants {
    values: [f64; NUM_CONSTANTS],
}

impl ElasticConstants {
    /// Wrap 21 constants in slot order
    pub fn new(values: [f64; NUM_CONSTANTS]) -> Self {
        Self { values }
    }

    /// All-zero set, used as "no uncertainty"
    pub fn zeros() -> Self {
        Self {
            values: [0.0; NUM_CONSTANTS],
        }
    }

    /// Build from a slice, checking the length
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let values: [f64; NUM_CONSTANTS] =
            values
                .try_into()
                .map_err(|_| AnisotropyError::InvalidConstantCount {
                    expected: NUM_CONSTANTS,
                    found: values.len(),
                })?;
        Ok(Self { values })
    }

    /// Isotropic medium from two constants; c44 = (c11 - c12) / 2
    pub fn isotropic(c11: f64, c12: f64) -> Self {
        Self::cubic(c11, c12, 0.5 * (c11 - c12))
    }

    /// Cubic crystal: c11=c22=c33, c12=c13=c23, c44=c55=c66
    pub fn cubic(c11: f64, c12: f64, c44: f64) -> Self {
        Self::orthorhombic([c11, c11, c11, c44, c44, c44, c12, c12, c12])
    }

    /// Orthorhombic crystal from `[c11,c22,c33,c44,c55,c66,c12,c13,c23]`
    pub fn orthorhombic(nine: [f64; 9]) -> Self {
        let mut values = [0.0; NUM_CONSTANTS];
        values[..9].copy_from_slice(&nine);
        Self { values }
    }

    /// Return a copy with one slot replaced
    pub fn with(mut self, slot: usize, value: f64) -> Self {
        self.values[slot] = value;
        self
    }

    /// Constants in slot order
    pub fn as_array(&self) -> &[f64; NUM_CONSTANTS] {
        &self.values
    }

    /// Constant at Voigt position (row, col), 0-based, either triangle
    pub fn at(&self, row: usize, col: usize) -> f64 {
        let key = if row <= col { (row, col) } else { (col, row) };
        CONSTANT_LAYOUT
            .iter()
            .position(|&pos| pos == key)
            .map_or(0.0, |slot| self.values[slot])
    }

    /// Reject NaN or infinite entries
    pub fn ensure_finite(&self, what: &str) -> Result<()> {
        match self.values.iter().position(|v| !v.is_finite()) {
            Some(slot) => Err(AnisotropyError::InvalidInput(format!(
                "{} slot {} is not finite ({})",
                what, slot, self.values[slot]
            ))),
            None => Ok(()),
        }
    }

    /// Reject negative or non-finite uncertainties
    pub fn ensure_valid_uncertainty(&self) -> Result<()> {
        self.ensure_finite("uncertainty")?;
        match self.values.iter().position(|v| *v < 0.0) {
            Some(slot) => Err(AnisotropyError::InvalidInput(format!(
                "uncertainty slot {} is negative ({})",
                slot, self.values[slot]
            ))),
            None => Ok(()),
        }
    }

    /// True when every constant odd under z → -z vanishes
    ///
    /// Only then are velocities along (nx, ny, nz) and (nx, ny, -nz) equal.
    pub fn has_z_mirror(&self) -> bool {
        let scale = self.scale();
        (0..NUM_CONSTANTS)
            .filter(|&slot| is_odd_under(slot, 2))
            .all(|slot| is_zero(self.values[slot], scale))
    }

    /// Classify the zero/equality pattern of the constants
    pub fn symmetry_class(&self) -> SymmetryClass {
        let scale = self.scale();
        let c = |r: usize, s: usize| self.at(r - 1, s - 1);
        let eq = |a: f64, b: f64| is_zero(a - b, scale);

        // An off-block constant is odd under exactly two reflections; it is
        // compatible with a 2-fold axis along the remaining one
        let mut coupled = [false; 3];
        for slot in 0..NUM_CONSTANTS {
            let odd = [0, 1, 2].map(|axis| is_odd_under(slot, axis));
            if !odd.iter().any(|&o| o) || is_zero(self.values[slot], scale) {
                continue;
            }
            if let Some(diad) = odd.iter().position(|&o| !o) {
                coupled[diad] = true;
            }
        }

        match coupled.iter().filter(|&&flag| flag).count() {
            0 => {}
            1 => return SymmetryClass::Monoclinic,
            _ => return SymmetryClass::Triclinic,
        }

        let cubic = eq(c(1, 1), c(2, 2))
            && eq(c(1, 1), c(3, 3))
            && eq(c(4, 4), c(5, 5))
            && eq(c(4, 4), c(6, 6))
            && eq(c(1, 2), c(1, 3))
            && eq(c(1, 2), c(2, 3));
        if cubic {
            return if eq(c(4, 4), 0.5 * (c(1, 1) - c(1, 2))) {
                SymmetryClass::Isotropic
            } else {
                SymmetryClass::Cubic
            };
        }

        if eq(c(1, 1), c(2, 2)) && eq(c(1, 3), c(2, 3)) && eq(c(4, 4), c(5, 5)) {
            return if eq(c(6, 6), 0.5 * (c(1, 1) - c(1, 2))) {
                SymmetryClass::Hexagonal
            } else {
                SymmetryClass::Tetragonal
            };
        }

        SymmetryClass::Orthorhombic
    }

    fn scale(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
    }
}

impl TryFrom<Vec<f64>> for ElasticConstants {
    type Error = AnisotropyError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::from_slice(&values)
    }
}

impl From<ElasticConstants> for Vec<f64> {
    fn from(constants: ElasticConstants) -> Self {
        constants.values.to_vec()
    }
}

fn is_zero(value: f64, scale: f64) -> bool {
    value.abs() <= SYMMETRY_TOLERANCE * scale.max(f64::MIN_POSITIVE)
}

/// Crystal symmetry inferred from which constants vanish or coincide
///
/// Assumes the crystal axes coincide with the reference frame; a rotated
/// orthorhombic tensor reads as triclinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymmetryClass {
    Isotropic,
    Cubic,
    Hexagonal,
    Tetragonal,
    Orthorhombic,
    Monoclinic,
    Triclinic,
}

impl SymmetryClass {
    /// Number of independent constants for the class
    pub fn independent_constants(&self) -> usize {
        match self {
            SymmetryClass::Isotropic => 2,
            SymmetryClass::Cubic => 3,
            SymmetryClass::Hexagonal => 5,
            SymmetryClass::Tetragonal => 6,
            SymmetryClass::Orthorhombic => 9,
            SymmetryClass::Monoclinic => 13,
            SymmetryClass::Triclinic => 21,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn olivine() -> ElasticConstants {
        ElasticConstants::orthorhombic([320.5, 196.5, 233.5, 64.0, 77.0, 78.7, 68.1, 71.6, 76.8])
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        let err = ElasticConstants::from_slice(&[1.0; 9]).unwrap_err();
        assert!(matches!(
            err,
            AnisotropyError::InvalidConstantCount { expected: 21, found: 9 }
        ));
    }

    #[test]
    fn test_at_reads_both_triangles() {
        let c = olivine().with(9, 5.0);
        assert_eq!(c.at(0, 4), 5.0);
        assert_eq!(c.at(4, 0), 5.0);
        assert_eq!(c.at(1, 2), 76.8);
    }

    #[test]
    fn test_symmetry_classes() {
        assert_eq!(ElasticConstants::isotropic(200.0, 100.0).symmetry_class(), SymmetryClass::Isotropic);
        assert_eq!(ElasticConstants::cubic(200.0, 100.0, 100.0).symmetry_class(), SymmetryClass::Cubic);
        assert_eq!(olivine().symmetry_class(), SymmetryClass::Orthorhombic);
        assert_eq!(olivine().with(9, 8.0).with(11, -3.0).symmetry_class(), SymmetryClass::Monoclinic);
        assert_eq!(olivine().with(9, 8.0).with(13, 4.0).symmetry_class(), SymmetryClass::Triclinic);

        let hexagonal = ElasticConstants::orthorhombic([300.0, 300.0, 250.0, 80.0, 80.0, 100.0, 100.0, 90.0, 90.0]);
        assert_eq!(hexagonal.symmetry_class(), SymmetryClass::Hexagonal);
        let tetragonal = hexagonal.with(5, 120.0);
        assert_eq!(tetragonal.symmetry_class(), SymmetryClass::Tetragonal);
    }

    #[test]
    fn test_z_mirror() {
        assert!(olivine().has_z_mirror());
        // c16 and c45 survive z → -z
        assert!(olivine().with(14, 6.0).with(19, 2.0).has_z_mirror());
        assert!(!olivine().with(13, 6.0).has_z_mirror());
        assert!(!olivine().with(9, 6.0).has_z_mirror());
    }

    #[test]
    fn test_uncertainty_validation() {
        assert!(ElasticConstants::zeros().ensure_valid_uncertainty().is_ok());
        assert!(ElasticConstants::zeros().with(3, -1.0).ensure_valid_uncertainty().is_err());
        assert!(olivine().with(0, f64::NAN).ensure_finite("constants").is_err());
    }

    #[test]
    fn test_serde_round_trip_through_vec() {
        let c = olivine();
        let v: Vec<f64> = c.into();
        assert_eq!(ElasticConstants::try_from(v).unwrap(), c);
    }
}
