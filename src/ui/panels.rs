use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::chart::ChartKind;
use crate::data::model::DateRange;
use crate::state::{PanelState, PanelView, Session};
use crate::visibility::VisibleSet;

use super::plot;

/// A button press the app has to act on after drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    UpdateAll,
    ShowSet(VisibleSet),
    Open(PathBuf),
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, session: &Session, summary: &str) -> Option<UiAction> {
    let mut action = None;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                action = open_file_dialog().map(UiAction::Open);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(summary);

        if let Some(msg) = &session.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
    action
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open unemployment data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}

// ---------------------------------------------------------------------------
// Panel cards
// ---------------------------------------------------------------------------

/// Render one panel: title, chart-kind dropdown, date range, chart.
pub fn panel_card(
    ui: &mut Ui,
    panel: &mut PanelState,
    bounds: &DateRange,
    view: &PanelView,
    chart_height: f32,
) {
    ui.group(|ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.heading(&panel.title);

        ui.horizontal(|ui: &mut Ui| {
            ui.label("Chart type:");
            egui::ComboBox::from_id_salt(("chart_kind", panel.index))
                .selected_text(panel.kind.name())
                .show_ui(ui, |ui: &mut Ui| {
                    for kind in ChartKind::ALL {
                        ui.selectable_value(&mut panel.kind, kind, kind.name());
                    }
                });
        });

        let start_id = format!("start_date_{}", panel.index);
        let end_id = format!("end_date_{}", panel.index);
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Date range:");
            ui.add(DatePickerButton::new(&mut panel.range.start).id_salt(&start_id));
            ui.label("to");
            ui.add(DatePickerButton::new(&mut panel.range.end).id_salt(&end_id));
        });
        panel.range = panel.range.clamped_to(bounds);

        ui.add_space(4.0);
        plot::panel_view(ui, panel.index, view, chart_height);
    });
}

/// Render the visible panels two to a row.
pub fn panel_grid(ui: &mut Ui, session: &mut Session, chart_height: f32) {
    let bounds = session.bounds;
    let Session { panels, views, .. } = session;
    let mut visible: Vec<(&mut PanelState, &PanelView)> = panels
        .iter_mut()
        .zip(views.iter())
        .filter(|(p, _)| p.visible)
        .collect();

    for pair in visible.chunks_mut(2) {
        ui.columns(2, |columns: &mut [Ui]| {
            for (col, (panel, view)) in columns.iter_mut().zip(pair.iter_mut()) {
                panel_card(col, panel, &bounds, view, chart_height);
            }
        });
        ui.add_space(8.0);
    }
}

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

/// "Show set" and "update" buttons under the charts.
pub fn button_row(ui: &mut Ui) -> Option<UiAction> {
    let mut action = None;
    ui.columns(2, |columns: &mut [Ui]| {
        columns[0].vertical_centered_justified(|ui: &mut Ui| {
            if ui.button("Show charts 1 & 2").clicked() {
                action = Some(UiAction::ShowSet(VisibleSet::First));
            }
        });
        columns[1].vertical_centered_justified(|ui: &mut Ui| {
            if ui.button("Show charts 3 & 4").clicked() {
                action = Some(UiAction::ShowSet(VisibleSet::Second));
            }
        });
    });
    ui.vertical_centered_justified(|ui: &mut Ui| {
        if ui
            .button(RichText::new("Update charts").strong())
            .clicked()
        {
            action = Some(UiAction::UpdateAll);
        }
    });
    action
}
