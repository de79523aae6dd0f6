//! Utility modules
//!
//! Helpers shared by the pipeline stages and the binaries.

pub mod units;

// Re-export commonly used items
pub use units::{
    gpa_to_pa, pa_to_gpa,
    g_per_cm3_to_kg_per_m3, kg_per_m3_to_g_per_cm3,
    m_per_s_to_km_per_s, km_per_s_to_m_per_s,
    deg_to_rad, rad_to_deg,
};
