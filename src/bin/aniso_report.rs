//! Anisotropy report for a single crystal
//!
//! ```text
//! aniso_report [sample.toml]
//! ```
//!
//! Without an argument a built-in olivine sample is analyzed. Set `RUST_LOG`
//! (e.g. `RUST_LOG=seismic_aniso=debug`) for stage-level logging.

use seismic_aniso::{CrystalSample, ElasticConstants};
use tracing_subscriber::EnvFilter;

fn builtin_olivine() -> CrystalSample {
    let constants = ElasticConstants::orthorhombic([320.5, 196.5, 233.5, 64.0, 77.0, 78.7, 68.1, 71.6, 76.8]);
    let errors = ElasticConstants::orthorhombic([0.9, 0.6, 0.6, 0.2, 0.2, 0.2, 0.6, 0.6, 0.6]);
    CrystalSample::new(constants, 3.355)
        .with_name("olivine (built-in)")
        .with_uncertainties(errors, 0.003)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let sample = match std::env::args().nth(1) {
        Some(path) => match CrystalSample::from_file(&path) {
            Ok(sample) => sample,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => builtin_olivine(),
    };

    println!("=== Seismic Anisotropy Report ===\n");
    println!("Input constants (GPa):");
    for (label, value) in seismic_aniso::tensor::CONSTANT_LABELS
        .iter()
        .zip(sample.constants.as_array().iter())
        .filter(|(_, v)| **v != 0.0)
    {
        println!("  {} = {:.2}", label, value);
    }
    println!(
        "  density = {:.3} g/cm³ ({:.0} kg/m³)\n",
        sample.density,
        seismic_aniso::units::g_per_cm3_to_kg_per_m3(sample.density)
    );

    match sample.analyze() {
        Ok(report) => report.print_summary(),
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            std::process::exit(1);
        }
    }
}
