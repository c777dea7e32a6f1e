use chrono::NaiveDate;

use crate::chart::{self, Chart, ChartKind};
use crate::data::filter::filter_range;
use crate::data::model::{Dataset, DateRange};
use crate::error::{DashError, DashResult};
use crate::panel::{PANEL_COUNT, strategy_for};

/// Date format accepted for request values and shown in the pickers.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// UpdateRequest – current control values of all panels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub kinds: [ChartKind; PANEL_COUNT],
    pub ranges: [DateRange; PANEL_COUNT],
}

impl UpdateRequest {
    pub fn new(kinds: [ChartKind; PANEL_COUNT], ranges: [DateRange; PANEL_COUNT]) -> Self {
        Self { kinds, ranges }
    }

    /// Parse the flat control layout: 4 kinds, then 4 start dates, then
    /// 4 end dates, dates as `YYYY-MM-DD`. Errors name the offending panel.
    pub fn from_values<S: AsRef<str>>(values: &[S]) -> DashResult<Self> {
        if values.len() != 3 * PANEL_COUNT {
            return Err(DashError::MalformedRequest(format!(
                "expected {} values, got {}",
                3 * PANEL_COUNT,
                values.len()
            )));
        }
        let mut kinds = [ChartKind::Line; PANEL_COUNT];
        let mut ranges = Vec::with_capacity(PANEL_COUNT);
        for i in 0..PANEL_COUNT {
            let index = i + 1;
            kinds[i] = values[i]
                .as_ref()
                .parse()
                .map_err(|e: DashError| e.in_panel(index))?;
            let start = parse_date(values[PANEL_COUNT + i].as_ref())
                .map_err(|e| e.in_panel(index))?;
            let end = parse_date(values[2 * PANEL_COUNT + i].as_ref())
                .map_err(|e| e.in_panel(index))?;
            ranges.push(DateRange::new(start, end));
        }
        let ranges: [DateRange; PANEL_COUNT] = ranges
            .try_into()
            .map_err(|_| DashError::MalformedRequest("panel count mismatch".to_string()))?;
        Ok(Self { kinds, ranges })
    }
}

fn parse_date(s: &str) -> DashResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| DashError::MalformedRequest(format!("bad date {s:?}: {e}")))
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Build the chart for one panel from a fresh filtered copy of `dataset`.
pub fn build_panel(
    dataset: &Dataset,
    index: usize,
    kind: ChartKind,
    range: &DateRange,
) -> DashResult<Chart> {
    let strategy = strategy_for(index)?;
    let rows = filter_range(dataset, range)?;
    let imputed = rows.imputed(strategy);
    log::debug!(
        "chart {index}: {kind} over {range}, {} rows ({} after {strategy})",
        rows.len(),
        imputed.len()
    );
    chart::build(kind, &imputed, strategy.label())
}

/// Build all four charts, in panel order. The first failing panel fails
/// the whole update.
pub fn update_all(dataset: &Dataset, request: &UpdateRequest) -> DashResult<[Chart; PANEL_COUNT]> {
    let mut charts = Vec::with_capacity(PANEL_COUNT);
    for (i, (kind, range)) in request.kinds.iter().zip(&request.ranges).enumerate() {
        let index = i + 1;
        let chart = build_panel(dataset, index, *kind, range).map_err(|e| e.in_panel(index))?;
        charts.push(chart);
    }
    charts
        .try_into()
        .map_err(|_| DashError::MalformedRequest("panel count mismatch".to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;
    use crate::data::model::Observation;

    fn year(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    fn sample() -> Dataset {
        Dataset::from_rows(
            (2000..=2020)
                .map(|y| {
                    let rate = (y != 2010).then(|| 4.0 + ((y - 2000) % 6) as f64 * 0.8);
                    Observation::new(year(y), rate)
                })
                .collect(),
        )
    }

    fn full_range() -> DateRange {
        DateRange::new(year(2000), year(2020))
    }

    #[test]
    fn default_layout_yields_four_charts_over_full_span() {
        let req = UpdateRequest::new(
            [ChartKind::Line, ChartKind::Bar, ChartKind::Bubble, ChartKind::Area],
            [full_range(); PANEL_COUNT],
        );
        let charts = update_all(&sample(), &req).unwrap();
        let labels = ["Original", "Drop missing", "Fill with 0's", "Polynomial interpolation"];
        for (i, chart) in charts.iter().enumerate() {
            assert!(chart.title.contains(labels[i]), "{}", chart.title);
            assert!(chart.title.contains(req.kinds[i].name()), "{}", chart.title);
            let span = chart.span.unwrap();
            assert_eq!((span.start.year(), span.end.year()), (2000, 2020));
        }
    }

    #[test]
    fn every_kind_and_strategy_succeeds() {
        let ds = sample();
        for kind in ChartKind::ALL {
            for index in 1..=PANEL_COUNT {
                assert!(build_panel(&ds, index, kind, &full_range()).is_ok(), "{kind} / {index}");
            }
        }
    }

    #[test]
    fn failing_panel_fails_the_update_and_is_named() {
        let mut ranges = [full_range(); PANEL_COUNT];
        ranges[2] = DateRange::new(year(2015), year(2005));
        let req = UpdateRequest::new(ChartKind::ALL[..4].try_into().unwrap(), ranges);
        let err = update_all(&sample(), &req).unwrap_err();
        assert_eq!(err.panel(), Some(3));
        assert!(matches!(
            err,
            DashError::Panel { ref source, .. } if matches!(**source, DashError::DateRangeEmpty { .. })
        ));
    }

    #[test]
    fn flat_values_parse_in_kinds_starts_ends_order() {
        let values = [
            "Histogram", "Box", "Line", "Bar",
            "2000-01-01", "2001-01-01", "2002-01-01", "2003-01-01",
            "2010-01-01", "2011-01-01", "2012-01-01", "2013-01-01",
        ];
        let req = UpdateRequest::from_values(&values).unwrap();
        assert_eq!(req.kinds[1], ChartKind::BoxPlot);
        assert_eq!(req.ranges[3], DateRange::new(year(2003), year(2013)));
    }

    #[test]
    fn malformed_flat_values() {
        assert!(matches!(
            UpdateRequest::from_values(&["Line"; 11]),
            Err(DashError::MalformedRequest(_))
        ));

        let mut values = vec!["Line"; 4];
        values.extend(["2000-01-01"; 4]);
        values.extend(["2020-01-01"; 4]);
        values[1] = "Pie";
        let err = UpdateRequest::from_values(&values).unwrap_err();
        assert_eq!(err.panel(), Some(2));
        assert_eq!(
            err,
            DashError::InvalidChartKind("Pie".to_string()).in_panel(2)
        );
    }
}
