use crate::chart::ChartKind;
use crate::data::model::DateRange;
use crate::error::{DashError, DashResult};
use crate::impute::Strategy;

/// Number of chart panels on the dashboard.
pub const PANEL_COUNT: usize = 4;

/// Chart kind each panel starts with, by position.
pub const DEFAULT_KINDS: [ChartKind; PANEL_COUNT] = [
    ChartKind::Line,
    ChartKind::Bar,
    ChartKind::Bubble,
    ChartKind::Area,
];

/// Imputation strategy for the 1-based panel `index`. The assignment is
/// fixed; users cannot change it.
pub fn strategy_for(index: usize) -> DashResult<Strategy> {
    slot(index).map(|i| Strategy::ALL[i])
}

fn slot(index: usize) -> DashResult<usize> {
    if (1..=PANEL_COUNT).contains(&index) {
        Ok(index - 1)
    } else {
        Err(DashError::InvalidPanel(index))
    }
}

/// Everything needed to draw one panel's controls and chart placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelFragment {
    pub index: usize,
    pub strategy: Strategy,
    pub title: String,
    pub kind_options: [ChartKind; 6],
    pub default_kind: ChartKind,
    /// Outer bounds for the date pickers.
    pub bounds: DateRange,
    pub default_range: DateRange,
    pub visible: bool,
}

/// Control panel for panel `index` (1-based), seeded from the dataset span.
pub fn render(index: usize, visible: bool, span: DateRange) -> DashResult<PanelFragment> {
    slot(index).map(|i| fragment_at(i, visible, span))
}

/// All four panels at once, with per-panel visibility.
pub fn render_all(visible: [bool; PANEL_COUNT], span: DateRange) -> [PanelFragment; PANEL_COUNT] {
    std::array::from_fn(|i| fragment_at(i, visible[i], span))
}

fn fragment_at(slot: usize, visible: bool, span: DateRange) -> PanelFragment {
    let index = slot + 1;
    let strategy = Strategy::ALL[slot];
    PanelFragment {
        index,
        strategy,
        title: format!("Chart {index}: {}", strategy.label()),
        kind_options: ChartKind::ALL,
        default_kind: DEFAULT_KINDS[slot],
        bounds: span,
        default_range: span,
        visible,
    }
}
