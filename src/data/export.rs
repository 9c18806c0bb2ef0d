use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{MagneticProperties, Measurement, Peak, Series};
use crate::chem::MassCalculation;

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Write the series as two named columns (`angle,intensity`, `field,moment`
/// or `temperature,moment`).
pub fn write_series_csv<W: Write>(series: &Series, headers: (&str, &str), out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([headers.0, headers.1])?;
    for s in series {
        writer.write_record([s.x.to_string(), s.y.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_peaks_csv<W: Write>(peaks: &[Peak], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for peak in peaks {
        writer.serialize(peak)?;
    }
    // serialize() only emits a header together with the first row
    if peaks.is_empty() {
        writer.write_record(["index", "angle", "intensity", "prominence"])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_properties_csv<W: Write>(props: &MagneticProperties, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.serialize(props)?;
    writer.flush()?;
    Ok(())
}

/// Write `<stem>.csv` with the series and `<stem>_peaks.csv` or
/// `<stem>_properties.csv` with the features next to it.
pub fn save_csv(measurement: &Measurement, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_series_csv(&measurement.series, measurement.kind.axis_labels(), file)
        .with_context(|| format!("writing {}", path.display()))?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("measurement");

    if let Some(props) = measurement.features.magnetic() {
        let features_path = path.with_file_name(format!("{stem}_properties.csv"));
        let file = std::fs::File::create(&features_path)
            .with_context(|| format!("creating {}", features_path.display()))?;
        write_properties_csv(props, file)?;
    } else {
        let features_path = path.with_file_name(format!("{stem}_peaks.csv"));
        let file = std::fs::File::create(&features_path)
            .with_context(|| format!("creating {}", features_path.display()))?;
        write_peaks_csv(measurement.features.peaks(), file)?;
    }

    log::info!("Exported {} as CSV to {}", measurement.name, path.display());
    Ok(())
}

/// Weighing sheet: one row per element, a blank line, then the total.
pub fn write_calculation_csv<W: Write>(calc: &MassCalculation, mut out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(&mut out);
    writer.write_record(["Element", "Stoichiometry", "Atomic Mass", "Required Mass (g)", "Weight %"])?;
    for row in &calc.elements {
        writer.write_record([
            row.symbol.to_string(),
            row.stoichiometry.to_string(),
            format!("{:.3}", row.atomic_mass),
            format!("{:.6}", row.mass),
            format!("{:.2}", calc.weight_percent(row)),
        ])?;
    }
    writer.flush()?;
    drop(writer);

    // csv writes an empty record as `""`, so the spacer line goes in raw
    writeln!(out)?;

    let mut writer = csv::Writer::from_writer(&mut out);
    writer.write_record(["Total Mass", "", "", format!("{:.6}", calc.total).as_str(), "100.00"])?;
    writer.flush()?;
    Ok(())
}

/// `<name>_calculation.csv`, whitespace in the name replaced by `_`.
pub fn calculation_file_name(calc: &MassCalculation) -> String {
    let name: String = calc
        .name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{name}_calculation.csv")
}

pub fn save_calculation_csv(calc: &MassCalculation, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_calculation_csv(calc, file).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} weighing sheet to {}", calc.formula, path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

pub fn to_json_string(measurement: &Measurement) -> Result<String> {
    serde_json::to_string_pretty(measurement).context("serialising measurement")
}

pub fn save_json(measurement: &Measurement, path: &Path) -> Result<()> {
    let json = to_json_string(measurement)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} as JSON to {}", measurement.name, path.display());
    Ok(())
}
