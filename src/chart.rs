use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::data::model::{Dataset, DateRange, period_to_x};
use crate::error::{DashError, DashResult};

/// Number of equal-width bins in a histogram.
pub const HISTOGRAM_BINS: usize = 20;

// ---------------------------------------------------------------------------
// ChartKind – the visual encoding selected per panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Line,
    Bar,
    Bubble,
    Area,
    Histogram,
    BoxPlot,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Bubble,
        ChartKind::Area,
        ChartKind::Histogram,
        ChartKind::BoxPlot,
    ];

    /// Name shown in dropdowns and chart titles.
    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Bar => "Bar",
            ChartKind::Bubble => "Bubble",
            ChartKind::Area => "Area",
            ChartKind::Histogram => "Histogram",
            ChartKind::BoxPlot => "Box",
        }
    }

    fn title_stem(self) -> &'static str {
        match self {
            ChartKind::Histogram => "Unemployment Rate Histogram",
            ChartKind::BoxPlot => "Unemployment Rate Box Plot",
            _ => "Unemployment Rate Over Time",
        }
    }

    /// Deterministic chart title for a method label.
    pub fn title(self, label: &str) -> String {
        format!("{} ({label} - {})", self.title_stem(), self.name())
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("boxplot") || wanted.eq_ignore_ascii_case("box plot") {
            return Ok(ChartKind::BoxPlot);
        }
        ChartKind::ALL
            .into_iter()
            .find(|k| wanted.eq_ignore_ascii_case(k.name()))
            .ok_or_else(|| DashError::InvalidChartKind(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Chart – a renderable value, independent of any UI toolkit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Five-number summary of the rates sharing one period.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub x: f64,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Connected runs of `[x, y]`; a missing value starts a new run.
    Line { segments: Vec<Vec<[f64; 2]>> },
    /// Like `Line`, filled down to zero.
    Area { segments: Vec<Vec<[f64; 2]>> },
    Bar { bars: Vec<[f64; 2]> },
    /// Markers whose size is the rate itself.
    Bubble { points: Vec<[f64; 2]>, sizes: Vec<f64> },
    Histogram { bins: Vec<HistogramBin> },
    BoxPlot { boxes: Vec<BoxSummary> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub label: String,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Period span of the rows the chart was built from.
    pub span: Option<DateRange>,
    pub geometry: Geometry,
}

// ---------------------------------------------------------------------------
// Figure builder
// ---------------------------------------------------------------------------

/// Build one chart of `kind` over `table`, titled with the method `label`.
pub fn build(kind: ChartKind, table: &Dataset, label: &str) -> DashResult<Chart> {
    let (x_label, y_label) = match kind {
        ChartKind::Histogram => ("Unemployment Rate", "count"),
        _ => ("Year", "Unemployment Rate"),
    };

    let geometry = match kind {
        ChartKind::Line => Geometry::Line {
            segments: segments(table),
        },
        ChartKind::Area => Geometry::Area {
            segments: segments(table),
        },
        ChartKind::Bar => Geometry::Bar {
            bars: known_points(table),
        },
        ChartKind::Bubble => {
            let points = known_points(table);
            let sizes = points.iter().map(|p| p[1]).collect();
            Geometry::Bubble { points, sizes }
        }
        ChartKind::Histogram => {
            let values: Vec<f64> = table.rows.iter().filter_map(|r| r.rate).collect();
            Geometry::Histogram {
                bins: histogram(&values, HISTOGRAM_BINS),
            }
        }
        ChartKind::BoxPlot => Geometry::BoxPlot {
            boxes: box_summaries(table),
        },
    };

    Ok(Chart {
        kind,
        label: label.to_string(),
        title: kind.title(label),
        x_label,
        y_label,
        span: table.span(),
        geometry,
    })
}

/// Same as [`build`] but with the kind given by name.
pub fn build_named(kind: &str, table: &Dataset, label: &str) -> DashResult<Chart> {
    build(kind.parse()?, table, label)
}

fn known_points(table: &Dataset) -> Vec<[f64; 2]> {
    table
        .rows
        .iter()
        .filter_map(|r| r.rate.map(|y| [period_to_x(r.period), y]))
        .collect()
}

fn segments(table: &Dataset) -> Vec<Vec<[f64; 2]>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for row in &table.rows {
        match row.rate {
            Some(y) => current.push([period_to_x(row.period), y]),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Equal-width histogram over `values` with exactly `n_bins` bins.
pub fn histogram(values: &[f64], n_bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || n_bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, width) = if (max - min).abs() < f64::EPSILON {
        (min - 0.5, 1.0 / n_bins as f64)
    } else {
        (min, (max - min) / n_bins as f64)
    };

    let mut counts = vec![0usize; n_bins];
    for &v in values {
        let idx = ((v - lo) / width).floor() as usize;
        counts[idx.min(n_bins - 1)] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + i as f64 * width,
            end: lo + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

fn box_summaries(table: &Dataset) -> Vec<BoxSummary> {
    let mut groups: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for row in &table.rows {
        if let Some(rate) = row.rate {
            groups.entry(row.period).or_default().push(rate);
        }
    }
    groups
        .into_iter()
        .map(|(period, mut values)| {
            values.sort_by(f64::total_cmp);
            summarize(period_to_x(period), &values)
        })
        .collect()
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn summarize(x: f64, sorted: &[f64]) -> BoxSummary {
    let q1 = quantile(sorted, 0.25);
    let median = quantile(sorted, 0.5);
    let q3 = quantile(sorted, 0.75);
    let fence = 1.5 * (q3 - q1);
    let inside = |v: &&f64| **v >= q1 - fence && **v <= q3 + fence;
    let lower_whisker = sorted.iter().find(inside).copied().unwrap_or(q1);
    let upper_whisker = sorted.iter().rev().find(inside).copied().unwrap_or(q3);
    let outliers = sorted.iter().filter(|v| !inside(v)).copied().collect();
    BoxSummary {
        x,
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    }
}
