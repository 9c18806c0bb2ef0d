use std::path::Path;

use rusty_lattice::chem::{calculate, parse_mass, MassCalculation};
use rusty_lattice::config::AnalysisConfig;
use rusty_lattice::data::loader::{load_file, load_file_auto};
use rusty_lattice::data::model::{Measurement, MeasurementKind};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// What the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Calculator,
    Measurements,
}

/// Inputs and results of the weighing-sheet calculator.
pub struct CalculatorForm {
    pub formula: String,
    pub target: String,
    pub target_mass: String,
    pub sample_name: String,
    pub result: Option<MassCalculation>,
    pub error: Option<String>,
    /// Calculations kept for this session, newest first.
    pub history: Vec<MassCalculation>,
}

impl Default for CalculatorForm {
    fn default() -> Self {
        Self {
            formula: "Fe2MoGe".into(),
            target: "Ge".into(),
            target_mass: "1".into(),
            sample_name: String::new(),
            result: None,
            error: None,
            history: Vec::new(),
        }
    }
}

impl CalculatorForm {
    /// Run the calculation on the current inputs, replacing the previous
    /// result or error.
    pub fn calculate(&mut self) {
        self.result = None;
        self.error = None;

        let outcome = parse_mass(&self.target_mass)
            .and_then(|mass| calculate(&self.formula, &self.target, mass));
        match outcome {
            Ok(mut calc) => {
                let name = self.sample_name.trim();
                if !name.is_empty() {
                    calc.name = name.to_string();
                }
                self.result = Some(calc);
            }
            Err(e) => {
                log::warn!("Calculation rejected: {e}");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Keep the current result in the session history.
    pub fn save(&mut self) {
        if let Some(calc) = &self.result {
            self.history.insert(0, calc.clone());
            self.sample_name.clear();
        }
    }

    /// Put a history entry back into the form.
    pub fn load(&mut self, index: usize) {
        let Some(calc) = self.history.get(index) else {
            return;
        };
        self.formula = calc.formula.clone();
        self.target = calc.target.clone();
        self.target_mass = calc.target_mass.to_string();
        self.result = Some(calc.clone());
        self.error = None;
    }

    pub fn delete(&mut self, index: usize) {
        if index < self.history.len() {
            self.history.remove(index);
        }
    }
}

/// A loaded measurement plus its display toggle.
pub struct Entry {
    pub measurement: Measurement,
    pub visible: bool,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Analysis settings used for every file opened in this session.
    pub config: AnalysisConfig,

    /// Loaded measurements, in opening order.
    pub entries: Vec<Entry>,

    /// Entry whose features are shown in the side panel.
    pub selected: Option<usize>,

    /// One colour per entry.
    pub color_map: ColorMap,

    /// Normalise every curve to [0, 1] before plotting.
    pub minmax_scaling: bool,

    /// Draw peak markers / property guides.
    pub show_features: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub view: View,
    pub calculator: CalculatorForm,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl AppState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            selected: None,
            color_map: ColorMap::default(),
            minmax_scaling: false,
            show_features: true,
            status_message: None,
            view: View::default(),
            calculator: CalculatorForm::default(),
        }
    }

    /// Load a file as `kind` and add it on success; on failure the error
    /// becomes the status message.
    pub fn open_path(&mut self, path: &Path, kind: MeasurementKind) {
        let result = load_file(path, kind, &self.config);
        self.ingest(result);
    }

    /// Load a file whose kind is guessed from its name (command line).
    pub fn open_path_auto(&mut self, path: &Path) {
        let result = load_file_auto(path, MeasurementKind::default(), &self.config);
        self.ingest(result);
    }

    fn ingest(&mut self, result: anyhow::Result<Measurement>) {
        match result {
            Ok(measurement) => {
                log::info!(
                    "Loaded {} ({}, {} points)",
                    measurement.name,
                    measurement.kind,
                    measurement.len()
                );
                self.add_measurement(measurement);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly analysed measurement and select it.
    pub fn add_measurement(&mut self, measurement: Measurement) {
        self.entries.push(Entry {
            measurement,
            visible: true,
        });
        self.selected = Some(self.entries.len() - 1);
        self.rebuild_color_map();
        self.status_message = None;
        self.view = View::Measurements;
    }

    /// Drop an entry, keeping the selection on the same measurement when
    /// possible.
    pub fn remove(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        self.entries.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => {
                if self.entries.is_empty() {
                    None
                } else {
                    Some(index.min(self.entries.len() - 1))
                }
            }
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        self.rebuild_color_map();
    }

    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = Some(index);
        }
    }

    pub fn selected_measurement(&self) -> Option<&Measurement> {
        self.selected
            .and_then(|i| self.entries.get(i))
            .map(|e| &e.measurement)
    }

    pub fn selected_measurement_mut(&mut self) -> Option<&mut Measurement> {
        self.selected
            .and_then(|i| self.entries.get_mut(i))
            .map(|e| &mut e.measurement)
    }

    /// Entries drawn in the plot: visible ones sharing the selected
    /// measurement's kind, since axes differ between kinds.
    pub fn plotted_indices(&self) -> Vec<usize> {
        let Some(kind) = self.plot_kind() else {
            return Vec::new();
        };
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.visible && e.measurement.kind == kind)
            .map(|(i, _)| i)
            .collect()
    }

    /// Kind of the current plot: the selection's, else the first visible.
    pub fn plot_kind(&self) -> Option<MeasurementKind> {
        self.selected_measurement()
            .map(|m| m.kind)
            .or_else(|| self.entries.iter().find(|e| e.visible).map(|e| e.measurement.kind))
    }

    fn rebuild_color_map(&mut self) {
        self.color_map = ColorMap::new(self.entries.len());
    }
}
