use crate::chart::{Chart, ChartKind};
use crate::data::model::{Dataset, DateRange};
use crate::dispatch::{UpdateRequest, update_all};
use crate::error::DashError;
use crate::impute::Strategy;
use crate::panel::{PANEL_COUNT, PanelFragment, render_all};
use crate::visibility::{ShowCounters, VisibleSet};

// ---------------------------------------------------------------------------
// Per-panel state
// ---------------------------------------------------------------------------

/// Live control values of one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub index: usize,
    pub title: String,
    pub strategy: Strategy,
    pub kind: ChartKind,
    pub range: DateRange,
    pub visible: bool,
}

impl From<PanelFragment> for PanelState {
    fn from(fragment: PanelFragment) -> Self {
        Self {
            index: fragment.index,
            title: fragment.title,
            strategy: fragment.strategy,
            kind: fragment.default_kind,
            range: fragment.default_range,
            visible: fragment.visible,
        }
    }
}

/// What a panel's chart area currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelView {
    #[default]
    Empty,
    Chart(Chart),
    /// Error shown in place of the chart.
    Error(String),
}

/// Outputs of one update, in panel order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutputs {
    pub views: [PanelView; PANEL_COUNT],
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The full dashboard state for one session, independent of rendering.
///
/// Handlers take the session by value and hand back the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub panels: [PanelState; PANEL_COUNT],
    pub counters: ShowCounters,
    pub views: [PanelView; PANEL_COUNT],
    /// Dataset span; date pickers stay inside it.
    pub bounds: DateRange,
    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Session {
    /// Fresh session with default panels over `span`.
    pub fn new(span: DateRange) -> Self {
        Self::with_counters(span, ShowCounters::default())
    }

    fn with_counters(span: DateRange, counters: ShowCounters) -> Self {
        let fragments = render_all(counters.visible().flags(), span);
        Self {
            panels: fragments.map(PanelState::from),
            counters,
            views: Default::default(),
            bounds: span,
            status_message: None,
        }
    }

    /// Re-seed panels for a newly loaded dataset, keeping the show counters.
    pub fn reseed(self, span: DateRange) -> Self {
        Self::with_counters(span, self.counters)
    }

    /// Request built from the panels' current control values.
    pub fn current_request(&self) -> UpdateRequest {
        UpdateRequest::new(
            std::array::from_fn(|i| self.panels[i].kind),
            std::array::from_fn(|i| self.panels[i].range),
        )
    }

    /// Rebuild every chart from `request`.
    ///
    /// On failure nothing is committed except the error, which replaces the
    /// failing panel's chart; other panels keep what they showed.
    pub fn handle_update(
        mut self,
        dataset: &Dataset,
        request: &UpdateRequest,
    ) -> (Self, RenderOutputs) {
        for (panel, (kind, range)) in self
            .panels
            .iter_mut()
            .zip(request.kinds.iter().zip(&request.ranges))
        {
            panel.kind = *kind;
            panel.range = *range;
        }

        match update_all(dataset, request) {
            Ok(charts) => {
                log::info!("updated {PANEL_COUNT} charts");
                self.views = charts.map(PanelView::Chart);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("update rejected: {e}");
                let message = match &e {
                    DashError::Panel { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                match e.panel() {
                    Some(index) => self.views[index - 1] = PanelView::Error(message),
                    None => self.views = std::array::from_fn(|_| PanelView::Error(message.clone())),
                }
                self.status_message = Some(e.to_string());
            }
        }
        let outputs = RenderOutputs {
            views: self.views.clone(),
        };
        (self, outputs)
    }

    /// Register a "show set" click and return the new visibility flags.
    pub fn handle_show_set(mut self, set: VisibleSet) -> (Self, [bool; PANEL_COUNT]) {
        self.counters = self.counters.click(set);
        let flags = self.counters.visible().flags();
        for (panel, visible) in self.panels.iter_mut().zip(flags) {
            panel.visible = visible;
        }
        (self, flags)
    }

    pub fn visible_panels(&self) -> impl Iterator<Item = &PanelState> {
        self.panels.iter().filter(|p| p.visible)
    }
}
