//! Unit conversions for elastic constants, densities and velocities
//!
//! The pipeline is unit-agnostic: velocities come out as √(modulus/density)
//! in whatever units went in. The usual mineral-physics choice is moduli in
//! GPa with density in g/cm³, which yields km/s directly:
//!
//! ```text
//! √(1 GPa / 1 g/cm³) = √(1e9 Pa / 1e3 kg/m³) = 1e3 m/s = 1 km/s
//! ```

// ============================================================================
// Modulus Conversions
// ============================================================================

/// Gigapascals to pascals conversion factor
pub const GPA_TO_PA: f64 = 1e9;

/// Pascals to gigapascals conversion factor
pub const PA_TO_GPA: f64 = 1e-9;

/// Convert gigapascals to pascals
///
/// # Examples
/// ```
/// use seismic_aniso::utils::units::gpa_to_pa;
/// let c11 = gpa_to_pa(320.5); // olivine c11
/// ```
#[inline]
pub fn gpa_to_pa(gpa: f64) -> f64 {
    gpa * GPA_TO_PA
}

/// Convert pascals to gigapascals
#[inline]
pub fn pa_to_gpa(pa: f64) -> f64 {
    pa * PA_TO_GPA
}

// ============================================================================
// Density Conversions
// ============================================================================

/// g/cm³ to kg/m³ conversion factor
pub const G_PER_CM3_TO_KG_PER_M3: f64 = 1e3;

/// Convert g/cm³ to kg/m³
#[inline]
pub fn g_per_cm3_to_kg_per_m3(density: f64) -> f64 {
    density * G_PER_CM3_TO_KG_PER_M3
}

/// Convert kg/m³ to g/cm³
#[inline]
pub fn kg_per_m3_to_g_per_cm3(density: f64) -> f64 {
    density / G_PER_CM3_TO_KG_PER_M3
}

// ============================================================================
// Velocity Conversions
// ============================================================================

/// Convert m/s to km/s
#[inline]
pub fn m_per_s_to_km_per_s(v: f64) -> f64 {
    v * 1e-3
}

/// Convert km/s to m/s
#[inline]
pub fn km_per_s_to_m_per_s(v: f64) -> f64 {
    v * 1e3
}

// ============================================================================
// Angle Conversions
// ============================================================================

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * RAD_TO_DEG
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_si_and_mineral_units_agree() {
        // Same medium in SI and in GPa, g/cm³
        let modulus_gpa: f64 = 200.0;
        let density_g_cm3: f64 = 3.3;

        let v_km_s = (modulus_gpa / density_g_cm3).sqrt();
        let v_m_s = (gpa_to_pa(modulus_gpa) / g_per_cm3_to_kg_per_m3(density_g_cm3)).sqrt();

        assert_relative_eq!(m_per_s_to_km_per_s(v_m_s), v_km_s, epsilon = 1e-12);
        assert_relative_eq!(km_per_s_to_m_per_s(v_km_s), v_m_s, epsilon = 1e-9);
    }

    #[test]
    fn test_round_trips() {
        assert_relative_eq!(pa_to_gpa(gpa_to_pa(77.0)), 77.0, epsilon = 1e-12);
        assert_relative_eq!(kg_per_m3_to_g_per_cm3(3300.0), 3.3, epsilon = 1e-12);
        assert_relative_eq!(rad_to_deg(deg_to_rad(35.0)), 35.0, epsilon = 1e-12);
    }
}
