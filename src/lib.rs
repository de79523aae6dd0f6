pub mod error;
pub mod tensor;     // Voigt map, constants, expansion
pub mod averaging;  // Voigt-Reuss-Hill
pub mod wave;       // Christoffel solver and directional survey
pub mod anisotropy;
pub mod analysis;
pub mod config;
pub mod utils;

pub use error::{AnisotropyError, Result};
pub use tensor::{expand, ElasticConstants, SymmetryClass, VoigtMatrix, ComplianceMatrix, StiffnessTensor4, ExpandedTensor, VOIGT_PAIRS, CONSTANT_LAYOUT, NUM_CONSTANTS};
pub use averaging::{average, AggregateModuli, AggregateUncertainty, VrhAverage};
pub use wave::{solve, survey, christoffel_matrix, ChristoffelSolver, Direction, EigenConfig, FailurePolicy, SurveyConfig, SurveyGrid, SurveyPoint, SurveySet, Surveyor, WaveMode, WaveSolution};
pub use anisotropy::{universal_anisotropy, directional_anisotropy, UniversalAnisotropy, DirectionalAnisotropy, Extremum, VpAnisotropy, VsAnisotropy, SplittingAnisotropy};
pub use analysis::{analyze, universal_anisotropy_from_constants, AnisotropyReport};
pub use config::{AnalysisConfig, CrystalSample};
pub use utils::units;
