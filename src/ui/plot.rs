use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use crate::chart::{Chart, Geometry};
use crate::color::{fill_color, panel_color};
use crate::state::PanelView;

// ---------------------------------------------------------------------------
// Chart area of one panel
// ---------------------------------------------------------------------------

/// Render whatever panel `index` currently shows.
pub fn panel_view(ui: &mut Ui, index: usize, view: &PanelView, height: f32) {
    match view {
        PanelView::Empty => {
            ui.allocate_ui(egui_size(ui, height), |ui: &mut Ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.weak("Press “Update charts” to draw this chart");
                });
            });
        }
        PanelView::Error(message) => {
            ui.allocate_ui(egui_size(ui, height), |ui: &mut Ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label(RichText::new(message).color(Color32::RED));
                });
            });
        }
        PanelView::Chart(chart) => chart_plot(ui, index, chart, height),
    }
}

fn egui_size(ui: &Ui, height: f32) -> eframe::egui::Vec2 {
    eframe::egui::vec2(ui.available_width(), height)
}

/// Largest marker radius, for the biggest rate in view.
const MAX_BUBBLE_RADIUS: f32 = 14.0;

fn bubble_radius(size: f64, max_size: f64) -> f32 {
    if max_size <= 0.0 || size <= 0.0 {
        return 2.0;
    }
    2.0 + MAX_BUBBLE_RADIUS * (size / max_size) as f32
}

fn chart_plot(ui: &mut Ui, index: usize, chart: &Chart, height: f32) {
    let color = panel_color(index);
    let fill = fill_color(index);
    let name = chart.label.as_str();

    ui.label(RichText::new(&chart.title).strong());

    Plot::new(("panel_chart", index))
        .height(height)
        .legend(Legend::default())
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| match &chart.geometry {
            Geometry::Line { segments } => {
                for segment in segments {
                    let points: PlotPoints = segment.iter().copied().collect();
                    plot_ui.line(Line::new(points).name(name).color(color).width(2.0));
                }
            }
            Geometry::Area { segments } => {
                for segment in segments {
                    let points: PlotPoints = segment.iter().copied().collect();
                    plot_ui.line(
                        Line::new(points)
                            .name(name)
                            .color(color)
                            .fill(0.0_f32)
                            .width(1.5),
                    );
                }
            }
            Geometry::Bar { bars } => {
                let bars: Vec<Bar> = bars.iter().map(|p| Bar::new(p[0], p[1]).width(0.8)).collect();
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(name));
            }
            Geometry::Bubble { points, sizes } => {
                let max_size = sizes.iter().copied().fold(0.0, f64::max);
                for (point, size) in points.iter().zip(sizes) {
                    plot_ui.points(
                        Points::new(vec![*point])
                            .radius(bubble_radius(*size, max_size))
                            .color(fill)
                            .filled(true)
                            .name(name),
                    );
                }
            }
            Geometry::Histogram { bins } => {
                let bars: Vec<Bar> = bins
                    .iter()
                    .map(|b| Bar::new(b.center(), b.count as f64).width(b.width()))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(name));
            }
            Geometry::BoxPlot { boxes } => {
                let elems: Vec<BoxElem> = boxes
                    .iter()
                    .map(|b| {
                        BoxElem::new(
                            b.x,
                            BoxSpread::new(b.lower_whisker, b.q1, b.median, b.q3, b.upper_whisker),
                        )
                        .box_width(0.6)
                        .fill(fill)
                        .stroke(Stroke::new(1.5, color))
                    })
                    .collect();
                plot_ui.box_plot(BoxPlot::new(elems).name(name));

                let outliers: Vec<[f64; 2]> = boxes
                    .iter()
                    .flat_map(|b| b.outliers.iter().map(move |&y| [b.x, y]))
                    .collect();
                if !outliers.is_empty() {
                    plot_ui.points(Points::new(outliers).radius(2.5).color(color));
                }
            }
        });
}
