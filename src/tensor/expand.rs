//! Expansion of the 21 constants into matrix and fourth-rank tensor form
//!
//! ```text
//! constants ──place+mirror──▶ C (6×6) ──invert──▶ S (6×6)
//!                               │
//!                               └──Voigt pairs──▶ C_ijkl (3×3×3×3)
//! ```
//!
//! The reshape steps are exact: no arithmetic touches the values, so
//! compressing back reproduces the input bit for bit.

use nalgebra::Matrix6;
use tracing::debug;

use super::constants::ElasticConstants;
use super::voigt::{CONSTANT_LAYOUT, NUM_CONSTANTS, VOIGT_PAIRS};
use crate::error::{AnisotropyError, Result};

/// Above this Frobenius condition estimate the stiffness matrix is treated as singular
pub const MAX_CONDITION: f64 = 1e12;

/// Symmetric 6×6 stiffness matrix C_rs in Voigt notation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoigtMatrix(Matrix6<f64>);

/// Symmetric 6×6 compliance matrix S_rs = C_rs⁻¹
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplianceMatrix(Matrix6<f64>);

/// Fourth-rank stiffness tensor C_ijkl with full minor symmetry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StiffnessTensor4 {
    c: [[[[f64; 3]; 3]; 3]; 3],
}

/// Everything derived from one set of constants
#[derive(Debug, Clone, Copy)]
pub struct ExpandedTensor {
    pub voigt: VoigtMatrix,
    pub compliance: ComplianceMatrix,
    pub tensor: StiffnessTensor4,
}

impl VoigtMatrix {
    /// Place each constant at its Voigt position, then mirror the upper triangle
    pub fn from_constants(constants: &ElasticConstants) -> Self {
        let mut m = Matrix6::<f64>::zeros();
        for (&(r, c), &value) in CONSTANT_LAYOUT.iter().zip(constants.as_array().iter()) {
            m[(r, c)] = value;
        }
        for r in 0..6 {
            for c in 0..r {
                m[(r, c)] = m[(c, r)];
            }
        }
        Self(m)
    }

    /// Read the 21 constants back out of the upper triangle
    pub fn compress(&self) -> ElasticConstants {
        ElasticConstants::new(upper_triangle(&self.0))
    }

    /// Invert into the compliance matrix
    ///
    /// # Errors
    /// `SingularTensor` when the matrix has no inverse or is too badly
    /// conditioned for the inverse to mean anything.
    pub fn invert(&self) -> Result<ComplianceMatrix> {
        let inverse = self
            .0
            .try_inverse()
            .ok_or(AnisotropyError::SingularTensor {
                condition: f64::INFINITY,
            })?;

        let condition = self.0.norm() * inverse.norm();
        debug!(condition, "inverted stiffness matrix");
        if !condition.is_finite() || condition > MAX_CONDITION {
            return Err(AnisotropyError::SingularTensor { condition });
        }

        // Round-off leaves the inverse a few ulps away from symmetric
        let symmetric = (inverse + inverse.transpose()) * 0.5;
        Ok(ComplianceMatrix(symmetric))
    }

    pub fn matrix(&self) -> &Matrix6<f64> {
        &self.0
    }

    /// Entry (r, c), 0-based
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.0[(r, c)]
    }
}

impl ComplianceMatrix {
    pub fn matrix(&self) -> &Matrix6<f64> {
        &self.0
    }

    /// Entry (r, c), 0-based
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.0[(r, c)]
    }

    /// The 21 compliance constants s_ij in the same slot order as the stiffness constants
    pub fn to_array(&self) -> [f64; NUM_CONSTANTS] {
        upper_triangle(&self.0)
    }
}

impl StiffnessTensor4 {
    /// Spread each C_rs over the four index orderings its Voigt pairs imply
    pub fn from_voigt(voigt: &VoigtMatrix) -> Self {
        let mut c = [[[[0.0; 3]; 3]; 3]; 3];
        for (r, &(i, j)) in VOIGT_PAIRS.iter().enumerate() {
            for (s, &(k, l)) in VOIGT_PAIRS.iter().enumerate() {
                let value = voigt.get(r, s);
                c[i][j][k][l] = value;
                c[j][i][k][l] = value;
                c[i][j][l][k] = value;
                c[j][i][l][k] = value;
            }
        }
        Self { c }
    }

    /// Collapse back to the 6×6 Voigt matrix
    pub fn to_voigt(&self) -> VoigtMatrix {
        let mut m = Matrix6::<f64>::zeros();
        for (r, &(i, j)) in VOIGT_PAIRS.iter().enumerate() {
            for (s, &(k, l)) in VOIGT_PAIRS.iter().enumerate() {
                m[(r, s)] = self.c[i][j][k][l];
            }
        }
        VoigtMatrix(m)
    }

    /// Component C_ijkl, 0-based
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize, l: usize) -> f64 {
        self.c[i][j][k][l]
    }
}

/// Expand constants into (C, S, C_ijkl)
///
/// Fails before producing anything if the constants are not finite or the
/// stiffness matrix cannot be inverted.
pub fn expand(constants: &ElasticConstants) -> Result<ExpandedTensor> {
    constants.ensure_finite("elastic constants")?;

    let voigt = VoigtMatrix::from_constants(constants);
    let compliance = voigt.invert()?;
    let tensor = StiffnessTensor4::from_voigt(&voigt);

    Ok(ExpandedTensor {
        voigt,
        compliance,
        tensor,
    })
}

fn upper_triangle(m: &Matrix6<f64>) -> [f64; NUM_CONSTANTS] {
    let mut out = [0.0; NUM_CONSTANTS];
    for (slot, &(r, c)) in CONSTANT_LAYOUT.iter().enumerate() {
        out[slot] = m[(r, c)];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::voigt::voigt_index;
    use approx::assert_relative_eq;

    /// Triclinic test set: every slot populated, strongly diagonal so it stays positive-definite
    fn triclinic() -> ElasticConstants {
        ElasticConstants::new([
            250.0, 230.0, 210.0, 70.0, 80.0, 90.0, 60.0, 55.0, 50.0, 3.1, -2.2, 1.7, 0.9, 2.4,
            -1.3, 0.6, 1.1, -0.8, 0.5, 1.9, -0.4,
        ])
    }

    #[test]
    fn test_compress_round_trip_is_exact() {
        let c = triclinic();
        let expanded = expand(&c).unwrap();
        assert_eq!(expanded.voigt.compress(), c);
    }

    #[test]
    fn test_voigt_matrix_is_symmetric() {
        let m = VoigtMatrix::from_constants(&triclinic());
        for r in 0..6 {
            for c in 0..6 {
                assert_eq!(m.get(r, c), m.get(c, r));
            }
        }
    }

    #[test]
    fn test_tensor_minor_symmetry_and_reshape() {
        let expanded = expand(&triclinic()).unwrap();
        let t = expanded.tensor;
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    for l in 0..3 {
                        let v = t.get(i, j, k, l);
                        assert_eq!(v, t.get(j, i, k, l));
                        assert_eq!(v, t.get(i, j, l, k));
                        assert_eq!(v, t.get(j, i, l, k));
                        assert_eq!(v, expanded.voigt.get(voigt_index(i, j), voigt_index(k, l)));
                    }
                }
            }
        }
        assert_eq!(t.to_voigt(), expanded.voigt);
    }

    #[test]
    fn test_compliance_is_inverse() {
        let expanded = expand(&triclinic()).unwrap();
        let product = expanded.voigt.matrix() * expanded.compliance.matrix();
        for r in 0..6 {
            for c in 0..6 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert_relative_eq!(product[(r, c)], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_compliance_constants_of_isotropic_medium() {
        // λ = 100, μ = 50: s11 = 1/E, s12 = -ν/E, s44 = 1/μ
        let expanded = expand(&ElasticConstants::isotropic(200.0, 100.0)).unwrap();
        let s = expanded.compliance.to_array();
        let e = 50.0 * (3.0 * 100.0 + 2.0 * 50.0) / (100.0 + 50.0);
        let nu = 100.0 / (2.0 * (100.0 + 50.0));
        assert_relative_eq!(s[0], 1.0 / e, epsilon = 1e-14);
        assert_relative_eq!(s[6], -nu / e, epsilon = 1e-14);
        assert_relative_eq!(s[3], 1.0 / 50.0, epsilon = 1e-14);
        assert_relative_eq!(s[9], 0.0, epsilon = 1e-16);
    }

    #[test]
    fn test_singular_matrix_is_rejected() {
        // c11 = c12 makes the normal block rank one
        let c = ElasticConstants::orthorhombic([100.0, 100.0, 100.0, 50.0, 50.0, 50.0, 100.0, 100.0, 100.0]);
        assert!(matches!(expand(&c), Err(AnisotropyError::SingularTensor { .. })));
    }

    #[test]
    fn test_zero_tensor_is_singular() {
        assert!(matches!(
            expand(&ElasticConstants::zeros()),
            Err(AnisotropyError::SingularTensor { .. })
        ));
    }

    #[test]
    fn test_non_finite_constants_are_rejected() {
        let c = triclinic().with(4, f64::INFINITY);
        assert!(matches!(expand(&c), Err(AnisotropyError::InvalidInput(_))));
    }
}
