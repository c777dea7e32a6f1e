use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui::{self, Ui};

use crate::config::DashboardConfig;
use crate::data::loader;
use crate::data::model::Dataset;
use crate::error::{DashError, DashResult};
use crate::state::Session;
use crate::ui::panels::{self, UiAction};
use crate::visibility::VisibleSet;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub config: DashboardConfig,
    /// Shared, read-only table; every update filters a private copy.
    pub dataset: Arc<Dataset>,
    pub source: PathBuf,
    pub session: Session,
}

impl DashboardApp {
    /// Build the app around a loaded dataset and draw the initial charts.
    pub fn new(config: DashboardConfig, source: PathBuf, dataset: Dataset) -> DashResult<Self> {
        let span = dataset.span().ok_or_else(|| DashError::FileLoad {
            path: source.clone(),
            reason: "file contains no rows".to_string(),
        })?;
        let mut app = Self {
            config,
            dataset: Arc::new(dataset),
            source,
            session: Session::new(span),
        };
        app.update_all();
        Ok(app)
    }

    /// Redraw every chart from the panels' current controls.
    pub fn update_all(&mut self) {
        let request = self.session.current_request();
        log::info!("dispatching update for {}", self.source.display());
        let (session, _outputs) = self.session.clone().handle_update(&self.dataset, &request);
        self.session = session;
    }

    pub fn show_set(&mut self, set: VisibleSet) {
        let (session, flags) = self.session.clone().handle_show_set(set);
        log::debug!("visibility now {flags:?}");
        self.session = session;
    }

    /// Replace the dataset with the contents of `path`. On failure the
    /// current dataset stays and the error goes to the status line.
    pub fn open(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => self.install(path, dataset),
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.session.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Swap in a freshly loaded dataset and redraw every panel over its
    /// full span. A dataset without rows is refused like a failed load.
    pub fn install(&mut self, path: &Path, dataset: Dataset) {
        let Some(span) = dataset.span() else {
            log::error!("Refusing {}: no rows", path.display());
            self.session.status_message =
                Some(format!("Error: {} contains no rows", path.display()));
            return;
        };
        log::info!(
            "Loaded {} rows ({} missing) from {}",
            dataset.len(),
            dataset.missing_count(),
            path.display()
        );
        self.dataset = Arc::new(dataset);
        self.source = path.to_path_buf();
        self.session = self.session.clone().reseed(span);
        self.update_all();
    }

    fn summary(&self) -> String {
        format!(
            "{}: {} rows, {} missing, {}",
            self.source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            self.dataset.len(),
            self.dataset.missing_count(),
            self.session.bounds
        )
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::UpdateAll => self.update_all(),
            UiAction::ShowSet(set) => self.show_set(set),
            UiAction::Open(path) => self.open(&path),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();

        // ---- Top panel: menu bar ----
        let summary = self.summary();
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui: &mut Ui| {
            actions.extend(panels::top_bar(ui, &self.session, &summary));
        });

        // ---- Bottom panel: buttons + footer ----
        egui::TopBottomPanel::bottom("controls").show(ctx, |ui: &mut Ui| {
            ui.add_space(4.0);
            actions.extend(panels::button_row(ui));
            ui.vertical_centered(|ui: &mut Ui| {
                ui.weak("© 2024 Labor Dashboard");
            });
        });

        // ---- Central panel: charts ----
        let chart_height = self.config.chart_height;
        egui::CentralPanel::default().show(ctx, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading("Employment and Unemployment Data Dashboard");
            });
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::panel_grid(ui, &mut self.session, chart_height);
                });
        });

        for action in actions {
            self.apply(action);
        }
    }
}
