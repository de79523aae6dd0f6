//! Azimuthal and splitting anisotropy from a directional survey
//!
//! ```text
//! AVp = (Vp_max - Vp_min) / Vp_vrh
//! AVs = (Vs1_max - Vs2_min) / Vs_vrh      extrema taken independently
//! DVs = max(Vs1 - Vs2) / Vs_vrh           at a single direction
//! ```
//!
//! Each index keeps the survey point(s) that produced it. When several
//! directions reach the same extremum the first in grid order wins.

use crate::error::{AnisotropyError, Result};
use crate::wave::{Direction, SurveyPoint, SurveySet, WaveMode};

/// Velocity extremum and where it was found
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub grid_index: [i64; 3],
    pub direction: Direction,
    pub mode: WaveMode,
}

impl Extremum {
    fn new(point: &SurveyPoint, mode: usize) -> Self {
        Self {
            grid_index: point.index,
            direction: point.direction,
            mode: point.solution.modes[mode],
        }
    }

    pub fn velocity(&self) -> f64 {
        self.mode.velocity
    }
}

/// P-wave azimuthal anisotropy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VpAnisotropy {
    pub value: f64,
    pub max: Extremum,
    pub min: Extremum,
}

/// Shear-wave azimuthal anisotropy: fastest S-fast against slowest S-slow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VsAnisotropy {
    pub value: f64,
    pub max: Extremum,
    pub min: Extremum,
}

/// Maximum shear-wave splitting at a single direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplittingAnisotropy {
    pub value: f64,
    /// Vs1 - Vs2 at the splitting maximum
    pub delta_vs: f64,
    pub grid_index: [i64; 3],
    pub direction: Direction,
    pub fast: WaveMode,
    pub slow: WaveMode,
}

/// The three directional indices of one survey
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalAnisotropy {
    pub vp: VpAnisotropy,
    pub vs: VsAnisotropy,
    pub splitting: SplittingAnisotropy,
}

/// Scan a survey for AVp, AVs and DVs
///
/// # Arguments
/// * `survey` - Solved directions
/// * `vp_vrh` - Aggregate P velocity used as the normalizer
/// * `vs_vrh` - Aggregate S velocity used as the normalizer
///
/// # Errors
/// - `EmptySurvey` when no direction was solved
/// - `InvalidInput` for a non-positive reference velocity
pub fn directional_anisotropy(
    survey: &SurveySet,
    vp_vrh: f64,
    vs_vrh: f64,
) -> Result<DirectionalAnisotropy> {
    for (name, v) in [("Vp_vrh", vp_vrh), ("Vs_vrh", vs_vrh)] {
        if !(v.is_finite() && v > 0.0) {
            return Err(AnisotropyError::InvalidInput(format!(
                "reference velocity {} must be positive, got {}",
                name, v
            )));
        }
    }

    let mut points = survey.iter();
    let first = points.next().ok_or(AnisotropyError::EmptySurvey)?;

    let mut vp_max = first;
    let mut vp_min = first;
    let mut vs_max = first;
    let mut vs_min = first;
    let mut split_max = first;

    for point in points {
        let w = &point.solution;
        if w.p().velocity > vp_max.solution.p().velocity {
            vp_max = point;
        }
        if w.p().velocity < vp_min.solution.p().velocity {
            vp_min = point;
        }
        if w.s_fast().velocity > vs_max.solution.s_fast().velocity {
            vs_max = point;
        }
        if w.s_slow().velocity < vs_min.solution.s_slow().velocity {
            vs_min = point;
        }
        if w.splitting() > split_max.solution.splitting() {
            split_max = point;
        }
    }

    let vp = VpAnisotropy {
        value: (vp_max.solution.p().velocity - vp_min.solution.p().velocity) / vp_vrh,
        max: Extremum::new(vp_max, 0),
        min: Extremum::new(vp_min, 0),
    };
    let vs = VsAnisotropy {
        value: (vs_max.solution.s_fast().velocity - vs_min.solution.s_slow().velocity) / vs_vrh,
        max: Extremum::new(vs_max, 1),
        min: Extremum::new(vs_min, 2),
    };
    let delta_vs = split_max.solution.splitting();
    let splitting = SplittingAnisotropy {
        value: delta_vs / vs_vrh,
        delta_vs,
        grid_index: split_max.index,
        direction: split_max.direction,
        fast: *split_max.solution.s_fast(),
        slow: *split_max.solution.s_slow(),
    };

    Ok(DirectionalAnisotropy { vp, vs, splitting })
}
