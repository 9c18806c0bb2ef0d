use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{HLine, Line, LineStyle, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text, VLine};

use rusty_lattice::data::model::{Features, Measurement};

use crate::color::marker_shade;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Measurement plot (central panel)
// ---------------------------------------------------------------------------

/// Render the plot in the central panel.
pub fn measurement_plot(ui: &mut Ui, state: &AppState) {
    let Some(kind) = state.plot_kind() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a measurement to plot it  (File → Open…)");
        });
        return;
    };

    let (x_label, y_label) = kind.axis_labels();
    let plotted = state.plotted_indices();

    Plot::new("measurement_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for &idx in &plotted {
                let m = &state.entries[idx].measurement;
                let color = state.color_map.color_for(idx);
                let scale = YScale::for_measurement(m, state.minmax_scaling);

                let points: PlotPoints = m
                    .series
                    .iter()
                    .map(|s| [s.x, scale.apply(s.y)])
                    .collect();
                plot_ui.line(Line::new(points).name(&m.name).color(color).width(1.5));

                if !state.show_features {
                    continue;
                }

                match &m.features {
                    Features::Diffraction { peaks } => {
                        let shade = marker_shade(color);
                        let markers: PlotPoints = peaks
                            .iter()
                            .map(|p| [p.angle, scale.apply(p.intensity)])
                            .collect();
                        plot_ui.points(
                            Points::new(markers)
                                .shape(MarkerShape::Diamond)
                                .radius(4.0)
                                .color(shade)
                                .name(format!("{} peaks", m.name)),
                        );
                        for p in peaks {
                            let label = RichText::new(format!("{:.2}", p.angle)).small().color(shade);
                            plot_ui.text(
                                Text::new(PlotPoint::new(p.angle, scale.apply(p.intensity)), label)
                                    .anchor(Align2::CENTER_BOTTOM),
                            );
                        }
                    }
                    Features::Magnetic { properties } => {
                        // Only selected loop gets guides, otherwise they pile up.
                        if state.selected != Some(idx) {
                            continue;
                        }
                        let guide = Color32::from_gray(140);
                        for ms in [properties.ms, -properties.ms] {
                            plot_ui.hline(
                                HLine::new(scale.apply(ms))
                                    .color(guide)
                                    .style(LineStyle::dashed_loose())
                                    .name("±Ms"),
                            );
                        }
                        for hc in [properties.hc, -properties.hc] {
                            plot_ui.vline(
                                VLine::new(hc)
                                    .color(guide)
                                    .style(LineStyle::dashed_dense())
                                    .name("±Hc"),
                            );
                        }
                        let mr = [
                            [0.0, scale.apply(properties.mr)],
                            [0.0, scale.apply(-properties.mr)],
                        ];
                        plot_ui.points(
                            Points::new(PlotPoints::from(mr.to_vec()))
                                .shape(MarkerShape::Circle)
                                .radius(4.0)
                                .color(marker_shade(color))
                                .name("±Mr"),
                        );
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Y scaling
// ---------------------------------------------------------------------------

/// Affine map applied to y values before plotting.
#[derive(Debug, Clone, Copy, PartialEq)]
struct YScale {
    offset: f64,
    factor: f64,
}

impl YScale {
    const IDENTITY: YScale = YScale {
        offset: 0.0,
        factor: 1.0,
    };

    /// Min-max normalisation to [0, 1]; a flat series maps to 0.
    fn for_measurement(m: &Measurement, minmax: bool) -> Self {
        if !minmax || m.is_empty() {
            return Self::IDENTITY;
        }
        let min = m.series.iter().map(|s| s.y).fold(f64::INFINITY, f64::min);
        let max = m.series.iter().map(|s| s.y).fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        if range.abs() < f64::EPSILON {
            YScale {
                offset: min,
                factor: 0.0,
            }
        } else {
            YScale {
                offset: min,
                factor: 1.0 / range,
            }
        }
    }

    fn apply(&self, y: f64) -> f64 {
        (y - self.offset) * self.factor
    }
}
