//! End-to-end scenarios through the library API: load a CSV from disk,
//! drive the session handlers, inspect the charts they produce.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use labor_dash::chart::{ChartKind, Geometry};
use labor_dash::data::filter::filter_range;
use labor_dash::data::loader::load_file;
use labor_dash::data::model::{Dataset, DateRange};
use labor_dash::dispatch::{UpdateRequest, build_panel, update_all};
use labor_dash::error::DashError;
use labor_dash::impute::Strategy;
use labor_dash::panel::PANEL_COUNT;
use labor_dash::state::{PanelView, Session};
use labor_dash::visibility::VisibleSet;

fn year(y: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
}

/// Years 2000–2020, rate missing for `gap`.
fn write_csv(dir: &Path, gap: i32) -> PathBuf {
    let path = dir.join("labor.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "Year,Labor Force,Unemployment Rate").unwrap();
    for y in 2000..=2020 {
        let rate = if y == gap {
            String::new()
        } else {
            format!("{:.1}", 4.0 + ((y - 2000) % 5) as f64 * 0.9)
        };
        writeln!(f, "{y},{},{rate}", 140_000 + (y - 2000) * 1_000).unwrap();
    }
    path
}

fn load_with_gap(gap: i32) -> (tempfile::TempDir, Dataset) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), gap);
    let ds = load_file(&path).unwrap();
    (dir, ds)
}

fn rate_for(ds: &Dataset, y: i32) -> Option<Option<f64>> {
    ds.rows.iter().find(|r| r.period.year() == y).map(|r| r.rate)
}

#[test]
fn missing_2010_under_each_strategy() {
    let (_dir, ds) = load_with_gap(2010);

    assert_eq!(rate_for(&ds.imputed(Strategy::FillZero), 2010), Some(Some(0.0)));
    assert_eq!(rate_for(&ds.imputed(Strategy::DropMissing), 2010), None);
    assert_eq!(rate_for(&ds.imputed(Strategy::Identity), 2010), Some(None));

    let interpolated = rate_for(&ds.imputed(Strategy::PolynomialInterpolate), 2010)
        .flatten()
        .unwrap();
    assert!(interpolated.is_finite());
}

#[test]
fn default_update_spans_the_whole_table() {
    let (_dir, ds) = load_with_gap(2010);
    let span = ds.span().unwrap();
    assert_eq!(span, DateRange::new(year(2000), year(2020)));

    let request = UpdateRequest::new(
        [ChartKind::Line, ChartKind::Bar, ChartKind::Bubble, ChartKind::Area],
        [span; PANEL_COUNT],
    );
    let charts = update_all(&ds, &request).unwrap();
    for (i, chart) in charts.iter().enumerate() {
        let strategy = Strategy::ALL[i];
        assert!(chart.title.contains(strategy.label()), "{}", chart.title);
        assert!(chart.title.contains(request.kinds[i].name()), "{}", chart.title);
        assert_eq!(chart.span, Some(span));
    }

    // Drop-missing bars skip 2010; fill-zero bubbles keep a zero-size one.
    let Geometry::Bar { bars } = &charts[1].geometry else {
        panic!("panel 2 should be a bar chart");
    };
    assert_eq!(bars.len(), 20);
    let Geometry::Bubble { sizes, .. } = &charts[2].geometry else {
        panic!("panel 3 should be a bubble chart");
    };
    assert_eq!(sizes.len(), 21);
    assert!(sizes.contains(&0.0));
}

#[test]
fn every_kind_with_every_strategy_on_the_shipped_sample() {
    let sample = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("Employment__Unemployment__and_Labor_Force_Data.csv");
    let ds = load_file(&sample).unwrap();
    let span = ds.span().unwrap();
    for kind in ChartKind::ALL {
        for index in 1..=PANEL_COUNT {
            let chart = build_panel(&ds, index, kind, &span);
            assert!(chart.is_ok(), "{kind} on panel {index}: {chart:?}");
        }
    }
}

#[test]
fn narrowing_the_range_never_adds_rows() {
    let (_dir, ds) = load_with_gap(2010);
    let mut last = ds.len();
    for (from, to) in [(2000, 2020), (2002, 2018), (2005, 2015), (2009, 2011), (2010, 2010)] {
        let rows = filter_range(&ds, &DateRange::new(year(from), year(to))).unwrap();
        assert!(rows.rows.iter().all(|r| (from..=to).contains(&r.period.year())));
        assert!(rows.len() <= last);
        last = rows.len();
    }
    assert_eq!(last, 1);
}

#[test]
fn session_round_trip_with_flat_request_values() {
    let (_dir, ds) = load_with_gap(2010);
    let session = Session::new(ds.span().unwrap());

    let values = [
        "Histogram", "Box", "Line", "Area",
        "2000-01-01", "2005-01-01", "2000-01-01", "2008-01-01",
        "2020-01-01", "2015-01-01", "2020-01-01", "2012-01-01",
    ];
    let request = UpdateRequest::from_values(&values).unwrap();
    let (session, outputs) = session.handle_update(&ds, &request);
    assert!(outputs.views.iter().all(|v| matches!(v, PanelView::Chart(_))));

    let PanelView::Chart(histogram) = &outputs.views[0] else {
        unreachable!()
    };
    let Geometry::Histogram { bins } = &histogram.geometry else {
        panic!("panel 1 should be a histogram");
    };
    assert_eq!(bins.len(), 20);
    // Identity keeps 2010 missing, so 20 of 21 years are counted.
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 20);

    let (session, flags) = session.handle_show_set(VisibleSet::Second);
    assert_eq!(flags, [false, false, true, true]);
    assert_eq!(session.panels[3].range, DateRange::new(year(2008), year(2012)));
}

#[test]
fn bad_range_surfaces_on_its_panel() {
    let (_dir, ds) = load_with_gap(2010);
    let session = Session::new(ds.span().unwrap());
    let mut request = session.current_request();
    request.ranges[3] = DateRange::new(year(2019), year(2001));

    let (session, outputs) = session.handle_update(&ds, &request);
    assert!(matches!(outputs.views[3], PanelView::Error(_)));
    assert!(outputs.views[..3].iter().all(|v| *v == PanelView::Empty));
    assert!(session.status_message.is_some());

    let err = update_all(&ds, &request).unwrap_err();
    assert_eq!(err.panel(), Some(4));
}

#[test]
fn unreadable_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labor.csv");
    std::fs::write(&path, "Year,Unemployment Rate\nnineteen,4.0\n").unwrap();
    assert!(matches!(load_file(&path), Err(DashError::FileLoad { .. })));
}
