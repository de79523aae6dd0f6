//! Plane-wave propagation in anisotropic crystals
//!
//! This module provides:
//! - Unit propagation directions
//! - The Christoffel eigenproblem solver (P, S-fast, S-slow)
//! - The directional survey over a hemisphere grid

pub mod direction;
pub mod christoffel;
pub mod survey;

pub use direction::Direction;
pub use christoffel::{christoffel_matrix, solve, ChristoffelSolver, EigenConfig, WaveMode, WaveSolution};
pub use survey::{survey, FailurePolicy, SurveyConfig, SurveyFailure, SurveyGrid, SurveyPoint, SurveySet, Surveyor};
