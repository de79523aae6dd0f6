//! Configuration management for anisotropy analyses
//!
//! Reads TOML files describing a crystal sample (constants, uncertainties,
//! density) and the numerical settings of the survey and eigen solver.
//!
//! ```toml
//! name = "olivine"
//! constants = [320.5, 196.5, 233.5, 64.0, 77.0, 78.7, 68.1, 71.6, 76.8,
//!              0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
//! density = 3.355
//! density_uncertainty = 0.003
//!
//! [analysis.survey]
//! resolution = 30
//! failure_policy = "skip"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::averaging::check_density;
use crate::error::Result;
use crate::tensor::ElasticConstants;
use crate::wave::{EigenConfig, SurveyConfig};

/// Numerical settings for one analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub survey: SurveyConfig,
    pub eigen: EigenConfig,
}

impl AnalysisConfig {
    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// A single crystal to analyze
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrystalSample {
    #[serde(default)]
    pub name: Option<String>,
    /// The 21 constants in slot order
    pub constants: ElasticConstants,
    /// One-sigma errors on the constants
    #[serde(default = "ElasticConstants::zeros")]
    pub uncertainties: ElasticConstants,
    pub density: f64,
    #[serde(default)]
    pub density_uncertainty: f64,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl CrystalSample {
    pub fn new(constants: ElasticConstants, density: f64) -> Self {
        Self {
            name: None,
            constants,
            uncertainties: ElasticConstants::zeros(),
            density,
            density_uncertainty: 0.0,
            analysis: AnalysisConfig::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_uncertainties(mut self, uncertainties: ElasticConstants, density_uncertainty: f64) -> Self {
        self.uncertainties = uncertainties;
        self.density_uncertainty = density_uncertainty;
        self
    }

    /// Load a sample from a TOML file and validate it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let sample: CrystalSample = toml::from_str(contents)?;
        sample.validate()?;
        Ok(sample)
    }

    /// Check everything that can be checked before expansion
    pub fn validate(&self) -> Result<()> {
        self.constants.ensure_finite("elastic constants")?;
        self.uncertainties.ensure_valid_uncertainty()?;
        check_density(self.density, self.density_uncertainty)
    }
}
