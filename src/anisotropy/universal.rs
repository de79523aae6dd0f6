//! Universal elastic anisotropy index
//!
//! AU = 5·Gv/Gr + Kv/Kr - 6 (Ranganathan & Ostoja-Starzewski, 2008). It is
//! zero only for a locally isotropic crystal and grows with the spread
//! between the Voigt and Reuss bounds.
//!
//! The uncertainty treats Kv, Kr, Gv and Gr as independent, which they are
//! not; it is a first-order bound.

use serde::{Deserialize, Serialize};

use crate::averaging::{AggregateModuli, AggregateUncertainty};
use crate::error::{AnisotropyError, Result};

/// AU with its propagated one-sigma uncertainty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniversalAnisotropy {
    pub value: f64,
    pub uncertainty: f64,
}

/// Compute AU and its uncertainty from VRH output
pub fn universal_anisotropy(
    moduli: &AggregateModuli,
    uncertainty: &AggregateUncertainty,
) -> Result<UniversalAnisotropy> {
    for (modulus, value) in [
        ("Voigt bulk modulus", moduli.kv),
        ("Reuss bulk modulus", moduli.kr),
        ("Voigt shear modulus", moduli.gv),
        ("Reuss shear modulus", moduli.gr),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(AnisotropyError::NonPositiveModulus { modulus, value });
        }
    }

    let g_ratio = moduli.gv / moduli.gr;
    let k_ratio = moduli.kv / moduli.kr;
    let value = 5.0 * g_ratio + k_ratio - 6.0;

    let rel2 = |err: f64, x: f64| (err / x).powi(2);
    let uncertainty = (25.0
        * g_ratio.powi(2)
        * (rel2(uncertainty.gv, moduli.gv) + rel2(uncertainty.gr, moduli.gr))
        + k_ratio.powi(2) * (rel2(uncertainty.kv, moduli.kv) + rel2(uncertainty.kr, moduli.kr)))
    .sqrt();

    Ok(UniversalAnisotropy { value, uncertainty })
}
