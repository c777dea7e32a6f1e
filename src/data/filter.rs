use super::model::{Dataset, DateRange};
use crate::error::{DashError, DashResult};

// ---------------------------------------------------------------------------
// Date-range filter
// ---------------------------------------------------------------------------

/// Return a private copy of the rows whose period lies in `range` (inclusive).
///
/// Fails with [`DashError::DateRangeEmpty`] when `start > end` or when no
/// row falls inside the range.
pub fn filter_range(dataset: &Dataset, range: &DateRange) -> DashResult<Dataset> {
    let empty = || DashError::DateRangeEmpty {
        start: range.start,
        end: range.end,
    };
    if range.start > range.end {
        return Err(empty());
    }
    let rows: Vec<_> = dataset
        .rows
        .iter()
        .filter(|row| range.contains(row.period))
        .copied()
        .collect();
    if rows.is_empty() {
        return Err(empty());
    }
    Ok(Dataset::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate};

    use super::*;
    use crate::data::model::Observation;

    fn year(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    fn yearly(from: i32, to: i32) -> Dataset {
        Dataset::from_rows(
            (from..=to)
                .map(|y| Observation::new(year(y), Some(4.0 + (y % 7) as f64)))
                .collect(),
        )
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let ds = yearly(2000, 2020);
        let out = filter_range(&ds, &DateRange::new(year(2005), year(2008))).unwrap();
        let years: Vec<i32> = out.rows.iter().map(|r| r.period.year()).collect();
        assert_eq!(years, vec![2005, 2006, 2007, 2008]);
    }

    #[test]
    fn narrowing_never_adds_rows() {
        let ds = yearly(2000, 2020);
        let mut previous = usize::MAX;
        for shrink in 0..=10 {
            let range = DateRange::new(year(2000 + shrink), year(2020 - shrink));
            let n = filter_range(&ds, &range).unwrap().len();
            assert!(n <= previous, "{n} rows after narrowing to {range}");
            previous = n;
        }
        assert_eq!(previous, 1);
    }

    #[test]
    fn inverted_or_vacant_range_is_an_error() {
        let ds = yearly(2000, 2010);
        let inverted = DateRange::new(year(2008), year(2002));
        assert!(matches!(
            filter_range(&ds, &inverted),
            Err(DashError::DateRangeEmpty { .. })
        ));

        let mid_year = DateRange::new(
            NaiveDate::from_ymd_opt(2003, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2003, 12, 1).unwrap(),
        );
        assert!(matches!(
            filter_range(&ds, &mid_year),
            Err(DashError::DateRangeEmpty { .. })
        ));
    }
}
