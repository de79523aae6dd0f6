//! Plane-wave velocities from the Christoffel equation
//!
//! For a unit propagation direction n the Christoffel matrix is
//!
//! ```text
//! Γ_ik = Σ_jl C_ijkl · n_j · n_l
//! ```
//!
//! and the plane-wave solutions satisfy (Γ - ρv²I)·u = 0, so each
//! eigenpair (E, u) of Γ gives a velocity v = √(E/ρ) with polarization u.
//! Γ is real symmetric for any tensor with minor symmetry; a positive-definite
//! stiffness makes it positive-definite too.
//!
//! Modes are returned fastest first and labeled P, S-fast, S-slow. No attempt
//! is made to decide which shear mode is vertically or horizontally polarized.
//!
//! # References
//! - Auld (1973), "Acoustic Fields and Waves in Solids", Vol. 1, Ch. 7
//! - Mainprice (1990), "A FORTRAN program to calculate seismic anisotropy"

use nalgebra::{Matrix3, SymmetricEigen, Vector3};
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::averaging::check_density;
use crate::error::{AnisotropyError, Result};
use crate::tensor::StiffnessTensor4;

/// Negative eigenvalues within this fraction of max|E| are round-off
pub const NEGATIVE_EIGENVALUE_TOLERANCE: f64 = 1e-12;

/// Settings for the symmetric eigen solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EigenConfig {
    /// Convergence tolerance of the QR sweeps
    pub tolerance: f64,
    /// Iteration cap; 0 means unlimited
    pub max_iterations: usize,
}

impl Default for EigenConfig {
    fn default() -> Self {
        Self {
            tolerance: f64::EPSILON,
            max_iterations: 1000,
        }
    }
}

/// One plane-wave mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveMode {
    /// Phase velocity, ≥ 0
    pub velocity: f64,
    /// Unit particle-motion direction
    pub polarization: Vector3<f64>,
}

/// The three modes along one direction, ordered P, S-fast, S-slow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSolution {
    pub modes: [WaveMode; 3],
}

impl WaveSolution {
    /// Quasi-compressional mode
    pub fn p(&self) -> &WaveMode {
        &self.modes[0]
    }

    /// Faster quasi-shear mode
    pub fn s_fast(&self) -> &WaveMode {
        &self.modes[1]
    }

    /// Slower quasi-shear mode
    pub fn s_slow(&self) -> &WaveMode {
        &self.modes[2]
    }

    /// Shear-wave splitting ΔVs = Vs1 - Vs2
    pub fn splitting(&self) -> f64 {
        self.modes[1].velocity - self.modes[2].velocity
    }

    pub fn velocities(&self) -> [f64; 3] {
        [self.modes[0].velocity, self.modes[1].velocity, self.modes[2].velocity]
    }
}

/// Build Γ_ik = Σ_jl C_ijkl n_j n_l
pub fn christoffel_matrix(tensor: &StiffnessTensor4, direction: &Direction) -> Matrix3<f64> {
    let n = direction.as_vector();
    let mut gamma = Matrix3::<f64>::zeros();
    for i in 0..3 {
        for k in 0..3 {
            let mut sum = 0.0;
            for j in 0..3 {
                for l in 0..3 {
                    sum += tensor.get(i, j, k, l) * n[j] * n[l];
                }
            }
            gamma[(i, k)] = sum;
        }
    }
    gamma
}

/// Christoffel eigenproblem solver
#[derive(Debug, Clone, Copy, Default)]
pub struct ChristoffelSolver {
    config: EigenConfig,
}

impl ChristoffelSolver {
    pub fn new(config: EigenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EigenConfig {
        &self.config
    }

    /// Velocities and polarizations along `direction` (normalized here)
    ///
    /// # Errors
    /// - `ZeroDirection` if `direction` has (near) zero length
    /// - `NonPositiveDensity` if ρ ≤ 0
    /// - `Eigendecomposition` if the eigen solver does not converge
    /// - `NegativeEigenvalue` if Γ has a genuinely negative eigenvalue
    pub fn solve(
        &self,
        tensor: &StiffnessTensor4,
        direction: &Vector3<f64>,
        density: f64,
    ) -> Result<WaveSolution> {
        let direction = Direction::new(*direction)?;
        self.solve_unit(tensor, &direction, density)
    }

    /// Same as [`solve`](Self::solve) for an already normalized direction
    pub fn solve_unit(
        &self,
        tensor: &StiffnessTensor4,
        direction: &Direction,
        density: f64,
    ) -> Result<WaveSolution> {
        check_density(density, 0.0)?;

        let gamma = christoffel_matrix(tensor, direction);
        let eigen = SymmetricEigen::try_new(gamma, self.config.tolerance, self.config.max_iterations)
            .ok_or(AnisotropyError::Eigendecomposition {
                direction: direction.to_array(),
            })?;

        let scale = eigen.eigenvalues.iter().fold(0.0_f64, |m, e| m.max(e.abs()));
        let mut modes = [WaveMode {
            velocity: 0.0,
            polarization: Vector3::zeros(),
        }; 3];
        for (mode, (k, &eigenvalue)) in modes.iter_mut().zip(eigen.eigenvalues.iter().enumerate()) {
            if !eigenvalue.is_finite() {
                return Err(AnisotropyError::Eigendecomposition {
                    direction: direction.to_array(),
                });
            }
            if eigenvalue < -NEGATIVE_EIGENVALUE_TOLERANCE * scale {
                return Err(AnisotropyError::NegativeEigenvalue {
                    eigenvalue,
                    direction: direction.to_array(),
                });
            }
            *mode = WaveMode {
                velocity: (eigenvalue.max(0.0) / density).sqrt(),
                polarization: canonical_sign(eigen.eigenvectors.column(k).normalize()),
            };
        }

        // Stable sort keeps the solver's order among degenerate modes
        modes.sort_by(|a, b| b.velocity.total_cmp(&a.velocity));

        Ok(WaveSolution { modes })
    }
}

/// Solve with default eigen settings
pub fn solve(tensor: &StiffnessTensor4, direction: &Vector3<f64>, density: f64) -> Result<WaveSolution> {
    ChristoffelSolver::default().solve(tensor, direction, density)
}

/// Flip u so its first non-negligible component is positive
fn canonical_sign(u: Vector3<f64>) -> Vector3<f64> {
    match u.iter().find(|c| c.abs() > 1e-12) {
        Some(&c) if c < 0.0 => -u,
        _ => u,
    }
}
