//! Feature extraction and the bytes → measurement pipeline.
//!
//! ```text
//!   raw bytes ──lossy utf-8──▶ parser ──▶ Series
//!                                          │
//!                     ┌────────────────────┴───────────────────┐
//!                     ▼                                        ▼
//!              peaks (XRD)                         magnetic (M-H / M-T)
//!                     └────────────────────┬───────────────────┘
//!                                          ▼
//!                                     Measurement
//! ```

pub mod magnetic;
pub mod peaks;

use thiserror::Error;

use crate::config::AnalysisConfig;
use crate::data::model::{Features, Measurement, MeasurementKind, Series};
use crate::data::parser::parse_with;

pub use magnetic::{estimate_magnetic_properties, has_sign_change, interpolate};
pub use peaks::{detect_peaks, detect_peaks_with};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a file cannot be turned into a measurement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(
        "{name}: found {found} numeric samples, need at least {required}. \
         Make sure the file has two columns of numbers ({x} vs {y})."
    )]
    InsufficientData {
        name: String,
        found: usize,
        required: usize,
        x: &'static str,
        y: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Decode, parse and analyse one uploaded file.
///
/// Invalid UTF-8 is replaced rather than rejected; malformed lines are
/// dropped by the parser. The only failure is too few samples.
pub fn analyze(
    name: &str,
    bytes: &[u8],
    kind: MeasurementKind,
    config: &AnalysisConfig,
) -> Result<Measurement, AnalysisError> {
    let text = String::from_utf8_lossy(bytes);
    let (series, report) = parse_with(&text, &config.line_filter());

    log::info!("{name}: parsed {} points as {kind}", series.len());

    if series.len() < config.min_samples {
        let (x, y) = kind.axis_labels();
        log::warn!(
            "{name}: rejected, {} samples below minimum {}",
            series.len(),
            config.min_samples
        );
        return Err(AnalysisError::InsufficientData {
            name: name.to_string(),
            found: series.len(),
            required: config.min_samples,
            x,
            y,
        });
    }

    let features = extract_features(&series, kind, config);
    if let Features::Diffraction { peaks } = &features {
        log::info!("{name}: {} peaks", peaks.len());
    }

    Ok(Measurement {
        name: name.to_string(),
        kind,
        series,
        features,
        report,
        sample_id: None,
        notes: None,
    })
}

/// Run the extractor matching `kind`. No sample-count check.
pub fn extract_features(series: &Series, kind: MeasurementKind, config: &AnalysisConfig) -> Features {
    match kind {
        MeasurementKind::Diffraction => Features::Diffraction {
            peaks: detect_peaks_with(series, &config.peaks),
        },
        MeasurementKind::Magnetic(_) => Features::Magnetic {
            properties: estimate_magnetic_properties(series),
        },
    }
}
