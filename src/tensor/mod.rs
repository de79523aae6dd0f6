//! Elastic tensor representations
//!
//! This module provides:
//! - The shared Voigt index map consumed by every later stage
//! - The 21-constant input type and symmetry classification
//! - Expansion into the 6×6 stiffness/compliance matrices and the 3×3×3×3 tensor

pub mod voigt;
pub mod constants;
pub mod expand;

pub use voigt::{voigt_index, CONSTANT_LABELS, CONSTANT_LAYOUT, NUM_CONSTANTS, VOIGT_PAIRS};
pub use constants::{ElasticConstants, SymmetryClass};
pub use expand::{expand, ComplianceMatrix, ExpandedTensor, StiffnessTensor4, VoigtMatrix};
