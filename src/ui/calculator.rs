use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};

use rusty_lattice::chem::MassCalculation;
use rusty_lattice::data::export::{calculation_file_name, save_calculation_csv};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Weighing-sheet calculator (central panel)
// ---------------------------------------------------------------------------

pub fn calculator_view(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Stoichiometry calculator");
    ui.add_space(6.0);

    let form = &mut state.calculator;
    egui::Grid::new("calculator_inputs")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Formula");
            ui.add(TextEdit::singleline(&mut form.formula).hint_text("Fe2MoGe"));
            ui.end_row();

            ui.label("Target element");
            ui.add(TextEdit::singleline(&mut form.target).hint_text("Ge or germanium"));
            ui.end_row();

            ui.label("Target mass (g)");
            ui.add(TextEdit::singleline(&mut form.target_mass).hint_text("1.0"));
            ui.end_row();

            ui.label("Sample name");
            ui.add(TextEdit::singleline(&mut form.sample_name).hint_text("optional"));
            ui.end_row();
        });

    ui.add_space(4.0);
    if ui.button("Calculate").clicked() {
        form.calculate();
    }
    if let Some(err) = &form.error {
        ui.label(RichText::new(err).color(Color32::RED));
    }

    let mut export = false;
    let mut save = false;
    if let Some(calc) = &form.result {
        ui.separator();
        result_table(ui, calc);

        ui.horizontal(|ui: &mut Ui| {
            if ui.button("Copy").clicked() {
                ui.ctx().copy_text(calc.summary());
            }
            export = ui.button("Export CSV…").clicked();
            save = ui.button("Save to history").clicked();
        });
    }
    if save {
        form.save();
    }
    if export {
        export_calculation(state);
    }

    history_list(ui, state);
}

fn result_table(ui: &mut Ui, calc: &MassCalculation) {
    ui.strong(format!(
        "{}: {} g {} → {:.6} g total",
        calc.name, calc.target_mass, calc.target, calc.total
    ));

    TableBuilder::new(ui)
        .id_salt("weighing_sheet")
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().at_least(70.0), 5)
        .header(20.0, |mut header| {
            for title in ["Element", "Stoich.", "Atomic mass", "Mass (g)", "wt %"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in &calc.elements {
                body.row(18.0, |mut cells| {
                    cells.col(|ui: &mut Ui| {
                        ui.label(row.symbol);
                    });
                    cells.col(|ui: &mut Ui| {
                        ui.monospace(row.stoichiometry.to_string());
                    });
                    cells.col(|ui: &mut Ui| {
                        ui.monospace(format!("{:.3}", row.atomic_mass));
                    });
                    cells.col(|ui: &mut Ui| {
                        ui.monospace(format!("{:.6}", row.mass));
                    });
                    cells.col(|ui: &mut Ui| {
                        ui.monospace(format!("{:.2}", calc.weight_percent(row)));
                    });
                });
            }
        });
}

fn history_list(ui: &mut Ui, state: &mut AppState) {
    let form = &mut state.calculator;
    if form.history.is_empty() {
        return;
    }

    ui.separator();
    ui.strong("History");

    let mut to_load = None;
    let mut to_delete = None;
    ScrollArea::vertical()
        .id_salt("calculation_history")
        .max_height(200.0)
        .show(ui, |ui: &mut Ui| {
            for (i, calc) in form.history.iter().enumerate() {
                ui.horizontal(|ui: &mut Ui| {
                    if ui
                        .link(format!("{} ({}, {} g {})", calc.name, calc.formula, calc.target_mass, calc.target))
                        .clicked()
                    {
                        to_load = Some(i);
                    }
                    if ui.small_button("✖").on_hover_text("Delete").clicked() {
                        to_delete = Some(i);
                    }
                });
            }
        });

    if let Some(i) = to_load {
        form.load(i);
    }
    if let Some(i) = to_delete {
        form.delete(i);
    }
}

fn export_calculation(state: &mut AppState) {
    let Some(calc) = &state.calculator.result else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export weighing sheet")
        .set_file_name(calculation_file_name(calc))
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    if let Err(e) = save_calculation_csv(calc, &path) {
        log::error!("Export failed: {e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    }
}
