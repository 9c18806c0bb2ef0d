use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sample / Series – the parsed numeric content of one file
// ---------------------------------------------------------------------------

/// One measurement point, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Sample { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Ordered samples of a single file.
///
/// Never holds NaN or infinite values: `push` refuses them, so every
/// constructor upholds the invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from raw pairs, dropping any non-finite pair.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut series = Series::new();
        for (x, y) in pairs {
            series.push(Sample::new(x, y));
        }
        series
    }

    /// Append a sample. Returns `false` (and keeps the series unchanged)
    /// when the sample is not finite.
    pub fn push(&mut self, sample: Sample) -> bool {
        if !sample.is_finite() {
            return false;
        }
        self.samples.push(sample);
        true
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.y).collect()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

// ---------------------------------------------------------------------------
// Extracted features
// ---------------------------------------------------------------------------

/// A diffraction peak: a local maximum of the intensity series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Position of the peak in the source series.
    pub index: usize,
    /// 2θ of the peak (x).
    pub angle: f64,
    /// Intensity at the peak (y).
    pub intensity: f64,
    /// Drop to the higher of the two bases around the peak.
    pub prominence: f64,
}

/// Saturation, remanence and coercivity of a hysteresis loop.
/// All three are absolute values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MagneticProperties {
    #[serde(rename = "Ms")]
    pub ms: f64,
    #[serde(rename = "Mr")]
    pub mr: f64,
    #[serde(rename = "Hc")]
    pub hc: f64,
}

// ---------------------------------------------------------------------------
// MeasurementKind – how a series is interpreted
// ---------------------------------------------------------------------------

/// Sweep variable of a magnetic measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagneticMode {
    /// Moment versus applied field ("M-H").
    #[default]
    #[serde(rename = "M-H")]
    FieldSweep,
    /// Moment versus temperature ("M-T").
    #[serde(rename = "M-T")]
    TemperatureSweep,
}

impl MagneticMode {
    pub fn label(&self) -> &'static str {
        match self {
            MagneticMode::FieldSweep => "M-H",
            MagneticMode::TemperatureSweep => "M-T",
        }
    }
}

/// What a file contains, and therefore which extractor runs on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementKind {
    #[default]
    Diffraction,
    Magnetic(MagneticMode),
}

impl MeasurementKind {
    /// Axis names used for plots and CSV headers.
    pub fn axis_labels(&self) -> (&'static str, &'static str) {
        match self {
            MeasurementKind::Diffraction => ("angle", "intensity"),
            MeasurementKind::Magnetic(MagneticMode::FieldSweep) => ("field", "moment"),
            MeasurementKind::Magnetic(MagneticMode::TemperatureSweep) => ("temperature", "moment"),
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementKind::Diffraction => write!(f, "XRD"),
            MeasurementKind::Magnetic(mode) => write!(f, "Magnetic ({})", mode.label()),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse bookkeeping
// ---------------------------------------------------------------------------

/// Why the parser dropped a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkipReason {
    Blank,
    Comment,
    HeaderKeyword,
    TooFewTokens,
    NotNumeric,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::Blank => "blank",
            SkipReason::Comment => "comment",
            SkipReason::HeaderKeyword => "header keyword",
            SkipReason::TooFewTokens => "too few columns",
            SkipReason::NotNumeric => "not numeric",
        };
        write!(f, "{s}")
    }
}

/// Line statistics of one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    pub lines: usize,
    pub accepted: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl ParseReport {
    pub fn record_skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_default() += 1;
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

// ---------------------------------------------------------------------------
// Measurement – the result record of one analysed file
// ---------------------------------------------------------------------------

/// Features derived from a series, depending on its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Features {
    Diffraction { peaks: Vec<Peak> },
    Magnetic { properties: MagneticProperties },
}

impl Features {
    pub fn peaks(&self) -> &[Peak] {
        match self {
            Features::Diffraction { peaks } => peaks,
            Features::Magnetic { .. } => &[],
        }
    }

    pub fn magnetic(&self) -> Option<&MagneticProperties> {
        match self {
            Features::Magnetic { properties } => Some(properties),
            Features::Diffraction { .. } => None,
        }
    }
}

/// A fully analysed measurement file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// File name (or any caller-chosen label).
    pub name: String,
    pub kind: MeasurementKind,
    pub series: Series,
    pub features: Features,
    pub report: ParseReport,
    /// Synthesised sample the file was measured on.
    pub sample_id: Option<String>,
    pub notes: Option<String>,
}

impl Measurement {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Set or clear (blank input) the sample link.
    pub fn set_sample_id(&mut self, sample_id: &str) {
        self.sample_id = non_blank(sample_id);
    }

    /// Set or clear (blank input) the free-text notes.
    pub fn set_notes(&mut self, notes: &str) {
        self.notes = non_blank(notes);
    }
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
