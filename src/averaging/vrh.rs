//! Voigt-Reuss-Hill averaging of single-crystal constants
//!
//! **Bounds** (Hill 1952):
//!
//! ```text
//! Voigt (uniform strain, upper bound):
//!   Kv = [(c11+c22+c33) + 2(c12+c13+c23)] / 9
//!   Gv = [(c11+c22+c33) - (c12+c13+c23) + 3(c44+c55+c66)] / 15
//!
//! Reuss (uniform stress, lower bound):
//!   Kr = 1 / [(s11+s22+s33) + 2(s12+s13+s23)]
//!   Gr = 15 / [4(s11+s22+s33) - 4(s12+s13+s23) + 3(s44+s55+s66)]
//!
//! Hill:  Kvrh = (Kv+Kr)/2,  Gvrh = (Gv+Gr)/2
//!        Vp = √((Kvrh + 4/3·Gvrh)/ρ),  Vs = √(Gvrh/ρ)
//! ```
//!
//! **Uncertainty**: first-order propagation that treats every constant and
//! the density as independent. They are not independent in practice, so the
//! numbers are an explicit first-order bound rather than a full error model.
//!
//! # References
//! - Hill (1952), "The elastic behaviour of a crystalline aggregate"
//! - Taylor (1997), "An Introduction to Error Analysis", Ch. 3

use serde::{Deserialize, Serialize};

use crate::error::{AnisotropyError, Result};
use crate::tensor::{ComplianceMatrix, ElasticConstants, VoigtMatrix};

/// Aggregate moduli and isotropic velocities of a polycrystal
///
/// Units follow the inputs: moduli in GPa with density in g/cm³ gives
/// velocities in km/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateModuli {
    /// Voigt bulk modulus
    pub kv: f64,
    /// Reuss bulk modulus
    pub kr: f64,
    /// Hill bulk modulus
    pub kvrh: f64,
    /// Voigt shear modulus
    pub gv: f64,
    /// Reuss shear modulus
    pub gr: f64,
    /// Hill shear modulus
    pub gvrh: f64,
    /// Aggregate compressional velocity
    pub vp: f64,
    /// Aggregate shear velocity
    pub vs: f64,
}

/// One-sigma uncertainties, field for field with [`AggregateModuli`]
///
/// The Voigt and Reuss fields both carry the per-bound estimate propagated
/// from the Voigt formulas; the Hill fields add half the bound spread.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateUncertainty {
    pub kv: f64,
    pub kr: f64,
    pub kvrh: f64,
    pub gv: f64,
    pub gr: f64,
    pub gvrh: f64,
    pub vp: f64,
    pub vs: f64,
}

/// Result of one averaging pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VrhAverage {
    pub moduli: AggregateModuli,
    pub uncertainty: AggregateUncertainty,
}

impl AggregateModuli {
    /// Vp/Vs ratio of the aggregate
    pub fn vp_vs_ratio(&self) -> f64 {
        self.vp / self.vs
    }

    /// Isotropic Poisson's ratio implied by Kvrh and Gvrh
    pub fn poisson_ratio(&self) -> f64 {
        (3.0 * self.kvrh - 2.0 * self.gvrh) / (2.0 * (3.0 * self.kvrh + self.gvrh))
    }
}

/// Voigt positions entering the VRH sums: c11 c22 c33
const NORMAL: [(usize, usize); 3] = [(0, 0), (1, 1), (2, 2)];
/// c12 c13 c23
const OFF_DIAGONAL: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];
/// c44 c55 c66
const SHEAR: [(usize, usize); 3] = [(3, 3), (4, 4), (5, 5)];

/// Validate density and its uncertainty
pub fn check_density(density: f64, density_uncertainty: f64) -> Result<()> {
    if !(density.is_finite() && density > 0.0) {
        return Err(AnisotropyError::NonPositiveDensity(density));
    }
    if !(density_uncertainty.is_finite() && density_uncertainty >= 0.0) {
        return Err(AnisotropyError::InvalidInput(format!(
            "density uncertainty must be non-negative, got {}",
            density_uncertainty
        )));
    }
    Ok(())
}

/// Compute VRH moduli, velocities and their propagated uncertainties
///
/// # Arguments
/// * `voigt` - Stiffness matrix C
/// * `compliance` - Its inverse S
/// * `uncertainty` - One-sigma errors on the 21 constants (zeros if unknown)
/// * `density` - Density ρ, must be > 0
/// * `density_uncertainty` - One-sigma error on ρ, must be ≥ 0
///
/// # Errors
/// - `NonPositiveDensity` if ρ ≤ 0
/// - `NonPositiveModulus` if a Reuss or Hill modulus is ≤ 0
#[allow(non_snake_case)]
pub fn average(
    voigt: &VoigtMatrix,
    compliance: &ComplianceMatrix,
    uncertainty: &ElasticConstants,
    density: f64,
    density_uncertainty: f64,
) -> Result<VrhAverage> {
    check_density(density, density_uncertainty)?;
    uncertainty.ensure_valid_uncertainty()?;

    let c = |block: &[(usize, usize)]| block.iter().map(|&(r, q)| voigt.get(r, q)).sum::<f64>();
    let s = |block: &[(usize, usize)]| block.iter().map(|&(r, q)| compliance.get(r, q)).sum::<f64>();

    let normal_c = c(&NORMAL);
    let off_c = c(&OFF_DIAGONAL);
    let shear_c = c(&SHEAR);

    let normal_s = s(&NORMAL);
    let off_s = s(&OFF_DIAGONAL);
    let shear_s = s(&SHEAR);

    let Kv = (normal_c + 2.0 * off_c) / 9.0;
    let Gv = (normal_c - off_c + 3.0 * shear_c) / 15.0;
    let Kr = 1.0 / (normal_s + 2.0 * off_s);
    let Gr = 15.0 / (4.0 * normal_s - 4.0 * off_s + 3.0 * shear_s);

    // The Reuss bounds divide into AU, so they must be physical on their own
    ensure_positive("Reuss bulk modulus", Kr)?;
    ensure_positive("Reuss shear modulus", Gr)?;

    let Kvrh = 0.5 * (Kv + Kr);
    let Gvrh = 0.5 * (Gv + Gr);

    ensure_positive("Hill bulk modulus", Kvrh)?;
    ensure_positive("Hill shear modulus", Gvrh)?;

    let M = Kvrh + 4.0 / 3.0 * Gvrh;
    let Vp = (M / density).sqrt();
    let Vs = (Gvrh / density).sqrt();

    // Per-bound errors from the Voigt formulas
    let sq = |block: &[(usize, usize)]| {
        block
            .iter()
            .map(|&(r, q)| uncertainty.at(r, q).powi(2))
            .sum::<f64>()
    };
    let K_bound = ((sq(&NORMAL) + 4.0 * sq(&OFF_DIAGONAL)) / 81.0).sqrt();
    let G_bound = ((sq(&NORMAL) + sq(&OFF_DIAGONAL) + 9.0 * sq(&SHEAR)) / 225.0).sqrt();

    let K_err = hill_uncertainty(Kv, Kr, K_bound);
    let G_err = hill_uncertainty(Gv, Gr, G_bound);

    let rel_density = density_uncertainty / density;
    let Vp_err = 0.5
        * Vp
        * ((K_err.powi(2) + 16.0 / 9.0 * G_err.powi(2)) / M.powi(2) + rel_density.powi(2)).sqrt();
    let Vs_err = 0.5 * Vs * (G_err.powi(2) / Gvrh.powi(2) + rel_density.powi(2)).sqrt();

    Ok(VrhAverage {
        moduli: AggregateModuli {
            kv: Kv,
            kr: Kr,
            kvrh: Kvrh,
            gv: Gv,
            gr: Gr,
            gvrh: Gvrh,
            vp: Vp,
            vs: Vs,
        },
        uncertainty: AggregateUncertainty {
            kv: K_bound,
            kr: K_bound,
            kvrh: K_err,
            gv: G_bound,
            gr: G_bound,
            gvrh: G_err,
            vp: Vp_err,
            vs: Vs_err,
        },
    })
}

/// Hill-average error: half the bound spread plus the two bound errors in quadrature
fn hill_uncertainty(voigt: f64, reuss: f64, bound: f64) -> f64 {
    0.5 * (voigt - reuss).abs() + (0.25 * bound * bound + 0.25 * bound * bound).sqrt()
}

fn ensure_positive(modulus: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AnisotropyError::NonPositiveModulus { modulus, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::expand;
    use approx::assert_relative_eq;

    fn run(constants: &ElasticConstants, errors: &ElasticConstants, rho: f64, rho_err: f64) -> Result<VrhAverage> {
        let t = expand(constants)?;
        average(&t.voigt, &t.compliance, errors, rho, rho_err)
    }

    #[test]
    fn test_isotropic_bounds_coincide() {
        let avg = run(&ElasticConstants::isotropic(200.0, 100.0), &ElasticConstants::zeros(), 3000.0, 0.0).unwrap();
        let m = avg.moduli;
        assert_relative_eq!(m.kv, 400.0 / 3.0, epsilon = 1e-10);
        assert_relative_eq!(m.kr, m.kv, epsilon = 1e-10);
        assert_relative_eq!(m.gv, 50.0, epsilon = 1e-10);
        assert_relative_eq!(m.gr, m.gv, epsilon = 1e-10);
        assert_relative_eq!(m.vp, (200.0_f64 / 3000.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(m.vs, (50.0_f64 / 3000.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(m.poisson_ratio(), 1.0 / 3.0, epsilon = 1e-12);
        assert_eq!(avg.uncertainty.vp, 0.0);
    }

    #[test]
    fn test_cubic_moduli() {
        // Bulk modulus of a cubic crystal has no Voigt-Reuss spread
        let avg = run(&ElasticConstants::cubic(200.0, 100.0, 100.0), &ElasticConstants::zeros(), 3000.0, 0.0).unwrap();
        let m = avg.moduli;
        assert_relative_eq!(m.kv, 133.333_333_333, epsilon = 1e-8);
        assert_relative_eq!(m.kr, m.kv, epsilon = 1e-10);
        assert_relative_eq!(m.kvrh, m.kv, epsilon = 1e-10);
        assert_relative_eq!(m.gv, 80.0, epsilon = 1e-10);
        // Gr = 5·c44·(c11-c12) / (4·c44 + 3·(c11-c12))
        assert_relative_eq!(m.gr, 500.0 / 7.0, epsilon = 1e-10);
        assert_relative_eq!(m.gvrh, 0.5 * (80.0 + 500.0 / 7.0), epsilon = 1e-10);
        assert!(m.gv > m.gr);
    }

    #[test]
    fn test_uncertainty_propagation() {
        let mut errors = ElasticConstants::zeros();
        for slot in 0..9 {
            errors = errors.with(slot, 1.0);
        }
        let avg = run(&ElasticConstants::isotropic(200.0, 100.0), &errors, 3.0, 0.03).unwrap();
        let u = avg.uncertainty;
        let k_bound = (15.0_f64 / 81.0).sqrt();
        let g_bound = (33.0_f64 / 225.0).sqrt();
        assert_relative_eq!(u.kv, k_bound, epsilon = 1e-12);
        assert_relative_eq!(u.kr, k_bound, epsilon = 1e-12);
        // Isotropic: no bound spread, only the symmetric term
        assert_relative_eq!(u.kvrh, k_bound / 2.0_f64.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(u.gvrh, g_bound / 2.0_f64.sqrt(), epsilon = 1e-10);

        let m = avg.moduli;
        let modulus = m.kvrh + 4.0 / 3.0 * m.gvrh;
        let expected_vp = 0.5 * m.vp
            * ((u.kvrh.powi(2) + 16.0 / 9.0 * u.gvrh.powi(2)) / modulus.powi(2) + 0.01_f64.powi(2)).sqrt();
        assert_relative_eq!(u.vp, expected_vp, epsilon = 1e-14);
        assert!(u.vs > 0.5 * m.vs * 0.01);
    }

    #[test]
    fn test_hill_uncertainty_includes_bound_spread() {
        let avg = run(&ElasticConstants::cubic(200.0, 100.0, 100.0), &ElasticConstants::zeros(), 3000.0, 0.0).unwrap();
        let m = avg.moduli;
        assert_relative_eq!(avg.uncertainty.gvrh, 0.5 * (m.gv - m.gr), epsilon = 1e-12);
        assert_relative_eq!(avg.uncertainty.kvrh, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_non_positive_density() {
        let c = ElasticConstants::isotropic(200.0, 100.0);
        let zeros = ElasticConstants::zeros();
        assert!(matches!(run(&c, &zeros, 0.0, 0.0), Err(AnisotropyError::NonPositiveDensity(_))));
        assert!(matches!(run(&c, &zeros, -1.0, 0.0), Err(AnisotropyError::NonPositiveDensity(_))));
        assert!(matches!(run(&c, &zeros, 3.0, -0.1), Err(AnisotropyError::InvalidInput(_))));
    }

    #[test]
    fn test_negative_definite_tensor_reports_modulus() {
        // Invertible but negative-definite: every modulus flips sign
        let c = ElasticConstants::isotropic(-200.0, -100.0);
        match run(&c, &ElasticConstants::zeros(), 3.0, 0.0) {
            Err(AnisotropyError::NonPositiveModulus { modulus, value }) => {
                assert_eq!(modulus, "Reuss bulk modulus");
                assert_relative_eq!(value, -400.0 / 3.0, epsilon = 1e-10);
            }
            other => panic!("expected a non-positive modulus, got {other:?}"),
        }
    }

    #[test]
    fn test_uncertainty_is_read_by_voigt_position() {
        let c = ElasticConstants::isotropic(200.0, 100.0);

        // c13 enters Kv with weight 2/9
        let c13 = ElasticConstants::zeros().with(7, 0.9);
        let avg = run(&c, &c13, 3.0, 0.0).unwrap();
        assert_relative_eq!(avg.uncertainty.kv, 2.0 * 0.9 / 9.0, epsilon = 1e-14);
        assert_relative_eq!(avg.uncertainty.gv, 0.9 / 15.0, epsilon = 1e-14);

        // c55 only enters Gv, with weight 3/15
        let c55 = ElasticConstants::zeros().with(4, 0.5);
        let avg = run(&c, &c55, 3.0, 0.0).unwrap();
        assert_eq!(avg.uncertainty.kv, 0.0);
        assert_relative_eq!(avg.uncertainty.gv, 3.0 * 0.5 / 15.0, epsilon = 1e-14);

        // Off-block constants are outside the VRH sums
        let c15 = ElasticConstants::zeros().with(9, 2.0);
        let avg = run(&c, &c15, 3.0, 0.0).unwrap();
        assert_eq!(avg.uncertainty.kv, 0.0);
        assert_eq!(avg.uncertainty.gv, 0.0);
    }
}
