use std::path::Path;

use anyhow::{Context, Result};

use super::model::{MagneticMode, Measurement, MeasurementKind};
use crate::analysis::analyze;
use crate::config::AnalysisConfig;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and analyse a measurement file.
///
/// Any text file with two numeric columns works; the extension does not
/// matter. The measurement name is the file name.
pub fn load_file(path: &Path, kind: MeasurementKind, config: &AnalysisConfig) -> Result<Measurement> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let measurement = analyze(&name, &bytes, kind, config)?;
    Ok(measurement)
}

/// Load a file, guessing its kind from the name and falling back to `fallback`.
pub fn load_file_auto(path: &Path, fallback: MeasurementKind, config: &AnalysisConfig) -> Result<Measurement> {
    let kind = infer_kind(path).unwrap_or(fallback);
    load_file(path, kind, config)
}

// ---------------------------------------------------------------------------
// Kind inference
// ---------------------------------------------------------------------------

/// Guess the measurement kind from a file name.
///
/// * `.xy` / `.xye` / `.uxd`, or names containing `xrd` → diffraction
/// * names containing `mt` / `m-t` / `zfc` / `fc` → M-T
/// * names containing `mh` / `m-h` / `loop` / `vsm` / `hyst…` → M-H
pub fn infer_kind(path: &Path) -> Option<MeasurementKind> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if matches!(ext.as_str(), "xy" | "xye" | "uxd") {
        return Some(MeasurementKind::Diffraction);
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let words: Vec<&str> = stem
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '-')
        .filter(|w| !w.is_empty())
        .collect();
    let has = |names: &[&str]| words.iter().any(|w| names.contains(w));

    if stem.contains("xrd") {
        Some(MeasurementKind::Diffraction)
    } else if has(&["mt", "m-t", "zfc", "fc"]) {
        Some(MeasurementKind::Magnetic(MagneticMode::TemperatureSweep))
    } else if has(&["mh", "m-h", "loop", "vsm"]) || stem.contains("hyst") {
        Some(MeasurementKind::Magnetic(MagneticMode::FieldSweep))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_infer_kind() {
        assert_eq!(infer_kind(Path::new("run1.xy")), Some(MeasurementKind::Diffraction));
        assert_eq!(infer_kind(Path::new("Fe3O4_XRD.txt")), Some(MeasurementKind::Diffraction));
        assert_eq!(
            infer_kind(Path::new("sample_mh_loop.dat")),
            Some(MeasurementKind::Magnetic(MagneticMode::FieldSweep))
        );
        assert_eq!(
            infer_kind(Path::new("NiO ZFC 100Oe.csv")),
            Some(MeasurementKind::Magnetic(MagneticMode::TemperatureSweep))
        );
        assert_eq!(
            infer_kind(Path::new("hysteresis-300K.txt")),
            Some(MeasurementKind::Magnetic(MagneticMode::FieldSweep))
        );
        assert_eq!(infer_kind(Path::new("data.txt")), None);
    }

    #[test]
    fn test_load_file_names_measurement() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pattern.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "! exported by diffractometer").unwrap();
        for i in 0..30 {
            let y = if i == 12 { 100.0 } else { 1.0 };
            writeln!(file, "{}\t{}", 10.0 + i as f64 * 0.5, y).unwrap();
        }
        drop(file);

        let m = load_file(&path, MeasurementKind::Diffraction, &AnalysisConfig::default()).unwrap();
        assert_eq!(m.name, "pattern.txt");
        assert_eq!(m.len(), 30);
        assert_eq!(m.features.peaks().len(), 1);
        assert_eq!(m.features.peaks()[0].angle, 16.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file(
            Path::new("/no/such/file.xy"),
            MeasurementKind::Diffraction,
            &AnalysisConfig::default(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("reading /no/such/file.xy"));
    }

    #[test]
    fn test_load_auto_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::write(&path, "-1 -1\n-0.5 -0.5\n0 0.2\n0.5 0.5\n1 1\n").unwrap();
        let kind = MeasurementKind::Magnetic(MagneticMode::FieldSweep);
        let m = load_file_auto(&path, kind, &AnalysisConfig::default()).unwrap();
        assert_eq!(m.kind, kind);
        assert_eq!(m.features.magnetic().unwrap().mr, 0.2);
    }
}
