use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use rusty_lattice::data::export::{save_csv, save_json};
use rusty_lattice::data::model::{MagneticMode, Measurement, MeasurementKind};

use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – measurement list and features
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Measurements");
    ui.separator();

    if state.entries.is_empty() {
        ui.label("No measurement loaded.");
        return;
    }

    let mut to_select = None;
    let mut to_remove = None;

    ScrollArea::vertical()
        .id_salt("measurement_list")
        .max_height(ui.available_height() * 0.4)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for (i, entry) in state.entries.iter_mut().enumerate() {
                let color = state.color_map.color_for(i);
                ui.horizontal(|ui: &mut Ui| {
                    ui.checkbox(&mut entry.visible, "");
                    let text = RichText::new(&entry.measurement.name).color(color);
                    if ui
                        .selectable_label(state.selected == Some(i), text)
                        .on_hover_text(entry.measurement.kind.to_string())
                        .clicked()
                    {
                        to_select = Some(i);
                    }
                    if ui.small_button("✖").on_hover_text("Remove").clicked() {
                        to_remove = Some(i);
                    }
                });
            }
        });

    if let Some(i) = to_select {
        state.select(i);
    }
    if let Some(i) = to_remove {
        state.remove(i);
    }

    ui.separator();

    if let Some(m) = state.selected_measurement_mut() {
        features_view(ui, m);
    }
}

fn features_view(ui: &mut Ui, m: &mut Measurement) {
    ui.strong(&m.name);
    ui.label(format!(
        "{} · {} points · {} lines skipped",
        m.kind,
        m.len(),
        m.report.skipped_total()
    ));
    ui.add_space(4.0);
    annotations(ui, m);
    ui.add_space(4.0);

    if let Some(props) = m.features.magnetic() {
        egui::Grid::new("magnetic_properties")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui: &mut Ui| {
                ui.label("Saturation Ms");
                ui.monospace(format!("{:.4}", props.ms));
                ui.end_row();
                ui.label("Remanence Mr");
                ui.monospace(format!("{:.4}", props.mr));
                ui.end_row();
                ui.label("Coercivity Hc");
                ui.monospace(format!("{:.4}", props.hc));
                ui.end_row();
            });
        return;
    }

    let peaks = m.features.peaks();
    ui.label(format!("{} peaks", peaks.len()));
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .columns(Column::remainder(), 2)
        .max_scroll_height(400.0)
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("#");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("2θ");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Intensity");
            });
        })
        .body(|mut body| {
            for (n, peak) in peaks.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label((n + 1).to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.monospace(format!("{:.3}", peak.angle));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.monospace(format!("{:.1}", peak.intensity));
                    });
                });
            }
        });
}

/// Sample id and notes, edited in place.
fn annotations(ui: &mut Ui, m: &mut Measurement) {
    let mut sample_id = m.sample_id.clone().unwrap_or_default();
    let mut notes = m.notes.clone().unwrap_or_default();

    egui::Grid::new("measurement_annotations")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Sample");
            if ui
                .add(egui::TextEdit::singleline(&mut sample_id).hint_text("sample id"))
                .changed()
            {
                m.set_sample_id(&sample_id);
            }
            ui.end_row();

            ui.label("Notes");
            if ui
                .add(egui::TextEdit::multiline(&mut notes).desired_rows(2))
                .changed()
            {
                m.set_notes(&notes);
            }
            ui.end_row();
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.selectable_value(&mut state.view, View::Calculator, "Calculator");
        ui.selectable_value(&mut state.view, View::Measurements, "Measurements");
        ui.separator();

        ui.menu_button("File", |ui: &mut Ui| {
            let kinds = [
                ("Open XRD…", MeasurementKind::Diffraction),
                ("Open M-H loop…", MeasurementKind::Magnetic(MagneticMode::FieldSweep)),
                ("Open M-T curve…", MeasurementKind::Magnetic(MagneticMode::TemperatureSweep)),
            ];
            for (label, kind) in kinds {
                if ui.button(label).clicked() {
                    open_file_dialog(state, kind);
                    ui.close_menu();
                }
            }

            ui.separator();

            let has_selection = state.selected_measurement().is_some();
            if ui.add_enabled(has_selection, egui::Button::new("Export CSV…")).clicked() {
                export_dialog(state, ExportFormat::Csv);
                ui.close_menu();
            }
            if ui.add_enabled(has_selection, egui::Button::new("Export JSON…")).clicked() {
                export_dialog(state, ExportFormat::Json);
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.entries.is_empty() {
            ui.label(format!(
                "{} loaded, {} plotted",
                state.entries.len(),
                state.plotted_indices().len()
            ));
            ui.separator();
        }

        if ui
            .selectable_label(state.minmax_scaling, "Min-Max Scaling")
            .clicked()
        {
            state.minmax_scaling = !state.minmax_scaling;
        }
        if ui
            .selectable_label(state.show_features, "Features")
            .on_hover_text("Peak markers / Ms, Mr, Hc guides")
            .clicked()
        {
            state.show_features = !state.show_features;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, kind: MeasurementKind) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Open {kind} data"))
        .add_filter("Measurement files", &["xy", "xye", "uxd", "dat", "txt", "csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path, kind);
    }
}

enum ExportFormat {
    Csv,
    Json,
}

fn export_dialog(state: &mut AppState, format: ExportFormat) {
    let Some(m) = state.selected_measurement() else {
        return;
    };
    let stem = std::path::Path::new(&m.name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("measurement")
        .to_string();

    let (ext, label) = match format {
        ExportFormat::Csv => ("csv", "CSV"),
        ExportFormat::Json => ("json", "JSON"),
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title(format!("Export {label}"))
        .set_file_name(format!("{stem}.{ext}"))
        .add_filter(label, &[ext])
        .save_file()
    else {
        return;
    };

    let result = match format {
        ExportFormat::Csv => save_csv(m, &path),
        ExportFormat::Json => save_json(m, &path),
    };
    if let Err(e) = result {
        log::error!("Export failed: {e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    }
}
