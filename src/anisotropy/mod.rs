//! Anisotropy indices
//!
//! - Universal anisotropy AU from the VRH bounds
//! - Azimuthal Vp/Vs anisotropy and shear-wave splitting from a survey

pub mod universal;
pub mod directional;

pub use universal::{universal_anisotropy, UniversalAnisotropy};
pub use directional::{
    directional_anisotropy, DirectionalAnisotropy, Extremum, SplittingAnisotropy, VpAnisotropy,
    VsAnisotropy,
};
