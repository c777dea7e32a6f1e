use std::fmt;
use std::str::FromStr;

use crate::error::DashError;

// ---------------------------------------------------------------------------
// Strategy – how missing values are treated before charting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Identity,
    DropMissing,
    FillZero,
    /// Quadratic fit through the known neighbours of each missing run.
    PolynomialInterpolate,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Identity,
        Strategy::DropMissing,
        Strategy::FillZero,
        Strategy::PolynomialInterpolate,
    ];

    /// Human-readable method label used in panel and chart titles.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Identity => "Original",
            Strategy::DropMissing => "Drop missing",
            Strategy::FillZero => "Fill with 0's",
            Strategy::PolynomialInterpolate => "Polynomial interpolation (degree 2)",
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            Strategy::Identity => "identity",
            Strategy::DropMissing => "dropna",
            Strategy::FillZero => "fillzero",
            Strategy::PolynomialInterpolate => "poly2",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Strategy {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Strategy::ALL
            .into_iter()
            .find(|st| {
                wanted.eq_ignore_ascii_case(st.label()) || wanted.eq_ignore_ascii_case(st.short_name())
            })
            .ok_or_else(|| DashError::InvalidStrategy(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Column transforms
// ---------------------------------------------------------------------------

/// Apply `strategy` to a column. `DropMissing` may shorten the output.
pub fn apply(strategy: Strategy, column: &[Option<f64>]) -> Vec<Option<f64>> {
    match strategy {
        Strategy::Identity => column.to_vec(),
        Strategy::DropMissing => column.iter().copied().filter(Option::is_some).collect(),
        Strategy::FillZero => column.iter().map(|v| Some(v.unwrap_or(0.0))).collect(),
        Strategy::PolynomialInterpolate => interpolate_quadratic(column),
    }
}

/// Fill interior missing runs with the quadratic through three known
/// neighbours bracketing the run (linear when only one exists per side).
/// Leading and trailing runs are left missing.
fn interpolate_quadratic(column: &[Option<f64>]) -> Vec<Option<f64>> {
    let known: Vec<(f64, f64)> = column
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|y| (i as f64, y)))
        .collect();

    let mut out = column.to_vec();
    let mut i = 0;
    while i < column.len() {
        if column[i].is_some() {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < column.len() && column[i].is_none() {
            i += 1;
        }
        let run_end = i; // exclusive

        // Number of known points left of the run.
        let split = known.partition_point(|&(x, _)| x < run_start as f64);
        let (left, right) = known.split_at(split);
        if left.is_empty() || right.is_empty() {
            continue;
        }
        let anchors: Vec<(f64, f64)> = if left.len() >= 2 {
            vec![left[left.len() - 2], left[left.len() - 1], right[0]]
        } else if right.len() >= 2 {
            vec![left[left.len() - 1], right[0], right[1]]
        } else {
            vec![left[left.len() - 1], right[0]]
        };

        for (pos, slot) in out.iter_mut().enumerate().take(run_end).skip(run_start) {
            *slot = Some(lagrange(&anchors, pos as f64));
        }
    }
    out
}

fn lagrange(points: &[(f64, f64)], x: f64) -> f64 {
    points
        .iter()
        .enumerate()
        .map(|(j, &(xj, yj))| {
            let basis: f64 = points
                .iter()
                .enumerate()
                .filter(|&(m, _)| m != j)
                .map(|(_, &(xm, _))| (x - xm) / (xj - xm))
                .product();
            yj * basis
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn identity_is_a_no_op() {
        let col = vec![Some(4.0), None, Some(5.5), None];
        assert_eq!(apply(Strategy::Identity, &col), col);
        assert_eq!(apply(Strategy::Identity, &apply(Strategy::Identity, &col)), col);
    }

    #[test]
    fn drop_missing_never_grows() {
        let col = vec![None, Some(1.0), None, Some(2.0)];
        let out = apply(Strategy::DropMissing, &col);
        assert_eq!(out, vec![Some(1.0), Some(2.0)]);
        assert!(apply(Strategy::DropMissing, &[]).is_empty());
    }

    #[test]
    fn fill_zero_replaces_only_gaps() {
        let col = vec![Some(3.0), None, Some(7.0)];
        assert_eq!(apply(Strategy::FillZero, &col), vec![Some(3.0), Some(0.0), Some(7.0)]);
    }

    #[test]
    fn quadratic_data_is_recovered_exactly() {
        let col: Vec<Option<f64>> = (0..7)
            .map(|x| (x != 3 && x != 4).then(|| (x * x) as f64 + 1.0))
            .collect();
        let out = apply(Strategy::PolynomialInterpolate, &col);
        assert!(close(out[3], 10.0), "{:?}", out[3]);
        assert!(close(out[4], 17.0), "{:?}", out[4]);
    }

    #[test]
    fn single_neighbours_fall_back_to_linear() {
        let col = vec![Some(1.0), None, None, Some(4.0)];
        let out = apply(Strategy::PolynomialInterpolate, &col);
        assert!(close(out[1], 2.0));
        assert!(close(out[2], 3.0));
    }

    #[test]
    fn right_heavy_anchors_when_left_is_short() {
        // y = 2x^2, gap at x=1 with only x=0 known on the left.
        let col = vec![Some(0.0), None, Some(8.0), Some(18.0)];
        let out = apply(Strategy::PolynomialInterpolate, &col);
        assert!(close(out[1], 2.0), "{:?}", out[1]);
    }

    #[test]
    fn boundary_runs_stay_missing() {
        let col = vec![None, Some(2.0), None, Some(4.0), None];
        let out = apply(Strategy::PolynomialInterpolate, &col);
        assert_eq!(out[0], None);
        assert!(close(out[2], 3.0));
        assert_eq!(out[4], None);
    }

    #[test]
    fn strategy_names_parse_or_fail() {
        assert_eq!("poly2".parse::<Strategy>().unwrap(), Strategy::PolynomialInterpolate);
        assert_eq!("original".parse::<Strategy>().unwrap(), Strategy::Identity);
        assert_eq!(" Fill with 0's ".parse::<Strategy>().unwrap(), Strategy::FillZero);
        assert_eq!(
            "mean".parse::<Strategy>(),
            Err(DashError::InvalidStrategy("mean".to_string()))
        );
    }
}
