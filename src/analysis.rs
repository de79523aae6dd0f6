//! End-to-end anisotropy analysis of a single crystal
//!
//! ```text
//! constants ─▶ expand ─┬─▶ average ──────────────┬─▶ universal AU
//!                      │                         │
//!                      └─▶ survey (Christoffel) ─┴─▶ AVp, AVs, DVs
//! ```

use tracing::{info, info_span};

use crate::anisotropy::{
    directional_anisotropy, universal_anisotropy, DirectionalAnisotropy, UniversalAnisotropy,
};
use crate::averaging::{average, VrhAverage};
use crate::config::{AnalysisConfig, CrystalSample};
use crate::error::Result;
use crate::tensor::{expand, ElasticConstants, SymmetryClass, NUM_CONSTANTS};
use crate::wave::Surveyor;

/// Everything computed for one crystal
#[derive(Debug, Clone)]
pub struct AnisotropyReport {
    pub name: Option<String>,
    pub symmetry: SymmetryClass,
    /// Compliance constants s_ij in slot order
    pub compliance: [f64; NUM_CONSTANTS],
    pub average: VrhAverage,
    pub universal: UniversalAnisotropy,
    pub directional: DirectionalAnisotropy,
    /// Directions solved by the survey
    pub survey_points: usize,
    /// Directions skipped under the `skip` failure policy
    pub skipped_directions: usize,
}

/// Universal anisotropy straight from constants: expand, average, AU
pub fn universal_anisotropy_from_constants(
    constants: &ElasticConstants,
    uncertainties: &ElasticConstants,
    density: f64,
    density_uncertainty: f64,
) -> Result<UniversalAnisotropy> {
    let expanded = expand(constants)?;
    let avg = average(
        &expanded.voigt,
        &expanded.compliance,
        uncertainties,
        density,
        density_uncertainty,
    )?;
    universal_anisotropy(&avg.moduli, &avg.uncertainty)
}

/// Run the full pipeline
///
/// The directional indices are normalized by the Hill velocities of the
/// same averaging pass.
pub fn analyze(
    constants: &ElasticConstants,
    uncertainties: &ElasticConstants,
    density: f64,
    density_uncertainty: f64,
    config: &AnalysisConfig,
) -> Result<AnisotropyReport> {
    let expanded = expand(constants)?;
    let avg = average(
        &expanded.voigt,
        &expanded.compliance,
        uncertainties,
        density,
        density_uncertainty,
    )?;
    let universal = universal_anisotropy(&avg.moduli, &avg.uncertainty)?;

    let survey = Surveyor::new(config.survey, config.eigen).run(&expanded.tensor, density)?;
    let directional = directional_anisotropy(&survey, avg.moduli.vp, avg.moduli.vs)?;

    Ok(AnisotropyReport {
        name: None,
        symmetry: constants.symmetry_class(),
        compliance: expanded.compliance.to_array(),
        average: avg,
        universal,
        directional,
        survey_points: survey.len(),
        skipped_directions: survey.failures.len(),
    })
}

impl CrystalSample {
    /// Analyze this sample with its own settings
    pub fn analyze(&self) -> Result<AnisotropyReport> {
        let span = info_span!("analysis", sample = self.name.as_deref().unwrap_or("unnamed"));
        let _guard = span.enter();

        self.validate()?;
        let mut report = analyze(
            &self.constants,
            &self.uncertainties,
            self.density,
            self.density_uncertainty,
            &self.analysis,
        )?;
        report.name = self.name.clone();

        info!(
            symmetry = ?report.symmetry,
            au = report.universal.value,
            avp = report.directional.vp.value,
            avs = report.directional.vs.value,
            dvs = report.directional.splitting.value,
            "analysis complete"
        );
        Ok(report)
    }
}

impl AnisotropyReport {
    /// Print a human-readable summary
    pub fn print_summary(&self) {
        let m = &self.average.moduli;
        let u = &self.average.uncertainty;
        let d = &self.directional;

        println!("═══════════════════════════════════════════════════════════════");
        println!("  Anisotropy Report: {}", self.name.as_deref().unwrap_or("unnamed sample"));
        println!("═══════════════════════════════════════════════════════════════");
        println!(
            "Symmetry: {:?} ({} independent constants)",
            self.symmetry,
            self.symmetry.independent_constants()
        );

        println!("\nVRH Average:");
        println!("  K: Voigt {:.3}  Reuss {:.3}  Hill {:.3} ± {:.3}", m.kv, m.kr, m.kvrh, u.kvrh);
        println!("  G: Voigt {:.3}  Reuss {:.3}  Hill {:.3} ± {:.3}", m.gv, m.gr, m.gvrh, u.gvrh);
        println!("  Vp = {:.4} ± {:.4},  Vs = {:.4} ± {:.4}", m.vp, u.vp, m.vs, u.vs);
        println!("  Vp/Vs = {:.4},  ν = {:.4}", m.vp_vs_ratio(), m.poisson_ratio());

        println!("\nUniversal anisotropy:");
        println!("  AU = {:.5} ± {:.5}", self.universal.value, self.universal.uncertainty);

        println!(
            "\nDirectional survey ({} directions, {} skipped):",
            self.survey_points, self.skipped_directions
        );
        let (az, inc) = d.vp.max.direction.azimuth_inclination_deg();
        println!("  AVp = {:.2}%", 100.0 * d.vp.value);
        println!("    Vp max {:.4} at az {:.1}°, inc {:.1}°", d.vp.max.velocity(), az, inc);
        let (az, inc) = d.vp.min.direction.azimuth_inclination_deg();
        println!("    Vp min {:.4} at az {:.1}°, inc {:.1}°", d.vp.min.velocity(), az, inc);

        println!("  AVs = {:.2}%", 100.0 * d.vs.value);
        let (az, inc) = d.vs.max.direction.azimuth_inclination_deg();
        println!("    Vs1 max {:.4} at az {:.1}°, inc {:.1}°", d.vs.max.velocity(), az, inc);
        let (az, inc) = d.vs.min.direction.azimuth_inclination_deg();
        println!("    Vs2 min {:.4} at az {:.1}°, inc {:.1}°", d.vs.min.velocity(), az, inc);

        let (az, inc) = d.splitting.direction.azimuth_inclination_deg();
        println!("  DVs = {:.2}%", 100.0 * d.splitting.value);
        println!(
            "    ΔVs {:.4} (Vs1 {:.4}, Vs2 {:.4}) at az {:.1}°, inc {:.1}°",
            d.splitting.delta_vs, d.splitting.fast.velocity, d.splitting.slow.velocity, az, inc
        );
        println!("═══════════════════════════════════════════════════════════════\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_universal_from_constants_cubic() {
        let au = universal_anisotropy_from_constants(
            &ElasticConstants::cubic(200.0, 100.0, 100.0),
            &ElasticConstants::zeros(),
            3000.0,
            0.0,
        )
        .unwrap();
        assert_relative_eq!(au.value, 0.6, epsilon = 1e-10);
    }

    #[test]
    fn test_sample_analysis_keeps_name() {
        let mut sample = CrystalSample::new(ElasticConstants::cubic(200.0, 100.0, 100.0), 3.0)
            .with_name("cubic test");
        sample.analysis.survey.resolution = 4;
        let report = sample.analyze().unwrap();
        assert_eq!(report.name.as_deref(), Some("cubic test"));
        assert_eq!(report.symmetry, SymmetryClass::Cubic);
        assert_eq!(report.survey_points, 5 * 5 * 4 * 2);
        assert_eq!(report.skipped_directions, 0);
        assert!(report.directional.vp.value > 0.0);
    }
}
