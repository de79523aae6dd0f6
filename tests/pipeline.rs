use seismic_aniso::*;
use std::path::PathBuf;

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples").join(name)
}

#[test]
fn test_olivine_sample_report() {
    let sample = CrystalSample::from_file(sample_path("olivine.toml")).unwrap();
    let report = sample.analyze().unwrap();

    assert_eq!(report.name.as_deref(), Some("olivine"));
    assert_eq!(report.symmetry, SymmetryClass::Orthorhombic);
    assert_eq!(report.survey_points, 21 * 21 * 20 * 2);
    assert_eq!(report.skipped_directions, 0);

    let m = &report.average.moduli;
    assert!(m.kr <= m.kvrh && m.kvrh <= m.kv);
    assert!(m.gr <= m.gvrh && m.gvrh <= m.gv);
    assert!(report.average.uncertainty.kvrh > 0.0);
    assert!(report.average.uncertainty.vp > 0.0);

    assert!(report.universal.value > 0.0);
    assert!(report.universal.uncertainty > 0.0);

    let d = &report.directional;
    assert!(d.vp.value > 0.2 && d.vp.value < 0.3, "AVp = {}", d.vp.value);
    assert!(d.vs.value > 0.0);
    assert!(d.splitting.value > 0.0 && d.splitting.value <= d.vs.value);

    // Fastest P sits close to the a axis, slowest close to b
    let fast = d.vp.max.direction.as_vector();
    let slow = d.vp.min.direction.as_vector();
    assert!(fast.x.abs() > 0.9, "Vp max along {fast:?}");
    assert!(slow.y.abs() > 0.9, "Vp min along {slow:?}");
}

#[test]
fn test_diopside_sample_report() {
    let sample = CrystalSample::from_file(sample_path("diopside.toml")).unwrap();
    assert!(!sample.constants.has_z_mirror());

    let report = sample.analyze().unwrap();
    assert_eq!(report.symmetry, SymmetryClass::Monoclinic);
    assert!(report.universal.value > 0.0);
    assert!(report.directional.vp.value > 0.0);
}

#[test]
fn test_universal_shortcut_matches_full_pipeline() {
    let sample = CrystalSample::from_file(sample_path("olivine.toml")).unwrap();
    let au = universal_anisotropy_from_constants(
        &sample.constants,
        &sample.uncertainties,
        sample.density,
        sample.density_uncertainty,
    )
    .unwrap();

    let mut config = sample.analysis;
    config.survey.resolution = 3;
    let report = analyze(
        &sample.constants,
        &sample.uncertainties,
        sample.density,
        sample.density_uncertainty,
        &config,
    )
    .unwrap();

    assert_eq!(au, report.universal);
}
