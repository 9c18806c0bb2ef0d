//! Tolerant parsing and feature extraction for X-ray diffraction patterns
//! and magnetic hysteresis measurements.
//!
//! The core is three pure functions:
//! [`parse`] turns loosely formatted text into a [`Series`],
//! [`detect_peaks`] finds diffraction peaks and
//! [`estimate_magnetic_properties`] derives Ms, Mr and Hc.
//! [`analyze`] chains them for one uploaded file.
//!
//! [`chem`] holds the weighing-sheet calculator used to prepare the samples
//! that end up in those files.

pub mod analysis;
pub mod chem;
pub mod config;
pub mod data;

pub use analysis::{analyze, detect_peaks, detect_peaks_with, estimate_magnetic_properties, AnalysisError};
pub use chem::{calculate, parse_formula, ChemError, MassCalculation};
pub use config::{AnalysisConfig, PeakConfig};
pub use data::model::{
    Features, MagneticMode, MagneticProperties, Measurement, MeasurementKind, Peak, Sample, Series,
};
pub use data::parser::{parse, parse_with, tokenize};
