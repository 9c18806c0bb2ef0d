use std::path::PathBuf;

use eframe::egui;
use rusty_lattice::config::AnalysisConfig;

use crate::state::{AppState, View};
use crate::ui::{calculator, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyLatticeApp {
    pub state: AppState,
}

impl RustyLatticeApp {
    /// Start-up from the process environment: analysis settings from
    /// `RUSTY_LATTICE_CONFIG`, measurement files from the command line.
    pub fn from_env() -> Self {
        let config = AnalysisConfig::from_env().unwrap_or_else(|e| {
            log::error!("Ignoring analysis config: {e:#}");
            AnalysisConfig::default()
        });
        Self::with_files(config, std::env::args_os().skip(1).map(PathBuf::from))
    }

    /// Open every file up front, guessing each kind from its name. Files
    /// that fail to load leave their error in the status bar.
    pub fn with_files<I>(config: AnalysisConfig, files: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut state = AppState::new(config);
        for path in files {
            state.open_path_auto(&path);
        }
        if !state.entries.is_empty() {
            log::info!("Opened {} file(s) from the command line", state.entries.len());
        }
        Self { state }
    }
}

impl eframe::App for RustyLatticeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // The measurement list stays visible in both views so files can be
        // picked from the calculator too.
        egui::SidePanel::left("measurement_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Calculator => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    calculator::calculator_view(ui, &mut self.state);
                });
            }
            View::Measurements => plot::measurement_plot(ui, &self.state),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_files_are_opened() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("fe3o4_loop.dat");
        std::fs::write(&good, "Field Moment\n-2 -4\n-1 -2\n0 0.5\n1 2\n2 4\n").unwrap();
        let missing = dir.path().join("missing.xy");

        let app = RustyLatticeApp::with_files(AnalysisConfig::default(), [good, missing]);
        let state = &app.state;
        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.view, View::Measurements);
        assert_eq!(state.entries[0].measurement.features.magnetic().map(|p| p.mr), Some(0.5));
        assert!(state.status_message.as_deref().unwrap().contains("missing.xy"));
    }

    #[test]
    fn no_files_starts_on_the_calculator() {
        let app = RustyLatticeApp::with_files(AnalysisConfig::default(), Vec::new());
        assert!(app.state.entries.is_empty());
        assert_eq!(app.state.view, View::Calculator);
    }
}
