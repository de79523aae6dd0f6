//! Directional survey of wave velocities over a discretized hemisphere
//!
//! **Grid**: for resolution m, index triples
//!
//! ```text
//! nx ∈ [0, m],  ny ∈ [0, m],  nz ∈ [1, m]
//! ```
//!
//! each giving two directions (nx, ny, nz)/m and (nx, ny, -nz)/m. The
//! reflected half is needed because only orthorhombic or higher symmetry
//! makes velocities invariant under z → -z; a monoclinic crystal gives
//! different velocities on the two sides. Total points: (m+1)²·m·2.
//!
//! **Execution**: the direction list is enumerated up front and each entry is
//! solved independently, optionally in parallel. Results land in their
//! enumeration slot, so the output order never depends on scheduling.

use nalgebra::Vector3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::christoffel::{ChristoffelSolver, EigenConfig, WaveSolution};
use super::direction::Direction;
use crate::averaging::check_density;
use crate::error::{AnisotropyError, Result};
use crate::tensor::StiffnessTensor4;

/// What to do when a single direction cannot be solved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Return the first failure in enumeration order
    #[default]
    Abort,
    /// Record the failure in the survey and keep going
    Skip,
}

/// Survey settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Grid resolution m (directions per axis); cost grows like m³
    pub resolution: usize,
    /// Solve directions on the rayon thread pool
    pub parallel: bool,
    /// Per-direction failure handling
    pub failure_policy: FailurePolicy,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            resolution: 20,
            parallel: true,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

/// Enumeration of the sampled direction grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyGrid {
    resolution: usize,
}

impl SurveyGrid {
    pub fn new(resolution: usize) -> Result<Self> {
        if resolution == 0 {
            return Err(AnisotropyError::InvalidResolution(resolution));
        }
        Ok(Self { resolution })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Number of sampled directions, (m+1)²·m·2
    pub fn len(&self) -> usize {
        let m = self.resolution;
        (m + 1) * (m + 1) * m * 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index triples in enumeration order; each positive nz is followed by its reflection
    pub fn indices(&self) -> impl Iterator<Item = [i64; 3]> {
        let m = self.resolution as i64;
        (0..=m).flat_map(move |nx| {
            (0..=m).flat_map(move |ny| {
                (1..=m).flat_map(move |nz| [[nx, ny, nz], [nx, ny, -nz]])
            })
        })
    }

    /// Unnormalized direction vector of an index triple
    pub fn vector(&self, index: [i64; 3]) -> Vector3<f64> {
        let m = self.resolution as f64;
        Vector3::new(index[0] as f64, index[1] as f64, index[2] as f64) / m
    }
}

/// One solved direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurveyPoint {
    /// Grid index triple (nz negative for the reflected half)
    pub index: [i64; 3],
    pub direction: Direction,
    pub solution: WaveSolution,
}

/// One direction that could not be solved
#[derive(Debug)]
pub struct SurveyFailure {
    pub index: [i64; 3],
    pub direction: [f64; 3],
    pub error: AnisotropyError,
}

impl SurveyFailure {
    pub fn into_error(self) -> AnisotropyError {
        AnisotropyError::DirectionFailed {
            index: self.index,
            direction: self.direction,
            source: Box::new(self.error),
        }
    }
}

/// All solved directions of one survey, in grid enumeration order
#[derive(Debug, Default)]
pub struct SurveySet {
    pub resolution: usize,
    pub points: Vec<SurveyPoint>,
    /// Directions skipped under [`FailurePolicy::Skip`]
    pub failures: Vec<SurveyFailure>,
}

impl SurveySet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SurveyPoint> {
        self.points.iter()
    }
}

/// Drives the Christoffel solver over a [`SurveyGrid`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Surveyor {
    config: SurveyConfig,
    solver: ChristoffelSolver,
}

impl Surveyor {
    pub fn new(config: SurveyConfig, eigen: EigenConfig) -> Self {
        Self {
            config,
            solver: ChristoffelSolver::new(eigen),
        }
    }

    pub fn config(&self) -> &SurveyConfig {
        &self.config
    }

    /// Solve every grid direction
    ///
    /// # Errors
    /// - `InvalidResolution` for resolution 0
    /// - `NonPositiveDensity` if ρ ≤ 0
    /// - `DirectionFailed` for the first failing direction under `Abort`
    pub fn run(&self, tensor: &StiffnessTensor4, density: f64) -> Result<SurveySet> {
        check_density(density, 0.0)?;
        let grid = SurveyGrid::new(self.config.resolution)?;

        debug!(
            resolution = grid.resolution(),
            directions = grid.len(),
            parallel = self.config.parallel,
            z_mirror = tensor.to_voigt().compress().has_z_mirror(),
            "starting directional survey"
        );

        let indices: Vec<[i64; 3]> = grid.indices().collect();
        let solve_one = |index: &[i64; 3]| -> std::result::Result<SurveyPoint, SurveyFailure> {
            let v = grid.vector(*index);
            Direction::new(v)
                .and_then(|direction| {
                    self.solver
                        .solve_unit(tensor, &direction, density)
                        .map(|solution| SurveyPoint {
                            index: *index,
                            direction,
                            solution,
                        })
                })
                .map_err(|error| SurveyFailure {
                    index: *index,
                    direction: [v.x, v.y, v.z],
                    error,
                })
        };

        let results: Vec<_> = if self.config.parallel {
            indices.par_iter().map(solve_one).collect()
        } else {
            indices.iter().map(solve_one).collect()
        };

        let mut set = SurveySet {
            resolution: grid.resolution(),
            points: Vec::with_capacity(results.len()),
            failures: Vec::new(),
        };
        for result in results {
            match result {
                Ok(point) => set.points.push(point),
                Err(failure) => match self.config.failure_policy {
                    FailurePolicy::Abort => return Err(failure.into_error()),
                    FailurePolicy::Skip => {
                        warn!(index = ?failure.index, error = %failure.error, "skipping survey direction");
                        set.failures.push(failure);
                    }
                },
            }
        }

        debug!(solved = set.points.len(), failed = set.failures.len(), "survey finished");
        Ok(set)
    }
}

/// Survey with default settings at the given resolution
pub fn survey(tensor: &StiffnessTensor4, density: f64, resolution: usize) -> Result<SurveySet> {
    let config = SurveyConfig {
        resolution,
        ..SurveyConfig::default()
    };
    Surveyor::new(config, EigenConfig::default()).run(tensor, density)
}
