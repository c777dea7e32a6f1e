use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, Date32Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Observation};
use crate::error::{DashError, DashResult};

/// Column holding the reporting year.
pub const YEAR_COLUMN: &str = "Year";
/// Column holding the unemployment rate.
pub const RATE_COLUMN: &str = "Unemployment Rate";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the unemployment table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Year` and `Unemployment Rate` columns
/// * `.json`    – `[{ "Year": 2000, "Unemployment Rate": 4.0, ... }, ...]`
/// * `.parquet` – the same two columns, integer/string/date `Year`
///
/// Other columns are ignored. Empty files are rejected.
pub fn load_file(path: &Path) -> DashResult<Dataset> {
    load_any(path).map_err(|e| DashError::FileLoad {
        path: path.to_path_buf(),
        reason: format!("{e:#}"),
    })
}

fn load_any(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    if dataset.is_empty() {
        bail!("file contains no rows");
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

/// Parse a `Year` cell: a bare 4-digit year maps to January 1st, a full
/// `YYYY-MM-DD` date is kept as is.
pub fn parse_period(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year: i64 = s.parse().context("year out of range")?;
        return year_start(year);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("'{s}' is neither a 4-digit year nor YYYY-MM-DD"))
}

fn year_start(year: i64) -> Result<NaiveDate> {
    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
        .with_context(|| format!("year {year} out of range"))
}

/// Parse a `Unemployment Rate` cell. Empty, `NA`, `NaN` and `null` are
/// missing; so is any non-finite number.
pub fn parse_rate(s: &str) -> Result<Option<f64>> {
    let s = s.trim();
    if s.is_empty()
        || s.eq_ignore_ascii_case("na")
        || s.eq_ignore_ascii_case("nan")
        || s.eq_ignore_ascii_case("null")
    {
        return Ok(None);
    }
    let value: f64 = s
        .parse()
        .with_context(|| format!("'{s}' is not a number"))?;
    Ok(value.is_finite().then_some(value))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let year_idx = headers
        .iter()
        .position(|h| h == YEAR_COLUMN)
        .with_context(|| format!("CSV missing '{YEAR_COLUMN}' column"))?;
    let rate_idx = headers
        .iter()
        .position(|h| h == RATE_COLUMN)
        .with_context(|| format!("CSV missing '{RATE_COLUMN}' column"))?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let period = parse_period(record.get(year_idx).unwrap_or(""))
            .with_context(|| format!("CSV row {row_no}, {YEAR_COLUMN}"))?;
        let rate = parse_rate(record.get(rate_idx).unwrap_or(""))
            .with_context(|| format!("CSV row {row_no}, {RATE_COLUMN}"))?;
        rows.push(Observation::new(period, rate));
    }

    Ok(Dataset::from_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Year": 2000, "Unemployment Rate": 4.0 },
///   { "Year": "2001", "Unemployment Rate": null },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let period = match obj.get(YEAR_COLUMN) {
            Some(JsonValue::Number(n)) => {
                let year = n
                    .as_i64()
                    .with_context(|| format!("Row {i}: {YEAR_COLUMN} {n} is not an integer"))?;
                year_start(year)?
            }
            Some(JsonValue::String(s)) => {
                parse_period(s).with_context(|| format!("Row {i}, {YEAR_COLUMN}"))?
            }
            _ => bail!("Row {i}: missing or invalid '{YEAR_COLUMN}'"),
        };

        let rate = match obj.get(RATE_COLUMN) {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
            Some(JsonValue::String(s)) => {
                parse_rate(s).with_context(|| format!("Row {i}, {RATE_COLUMN}"))?
            }
            Some(other) => bail!("Row {i}: {RATE_COLUMN} has unsupported value {other}"),
        };

        rows.push(Observation::new(period, rate));
    }

    Ok(Dataset::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet table written by Pandas or Polars.
///
/// `Year` may be Int32, Int64, Utf8 or Date32; `Unemployment Rate` may be
/// Float64, Float32 or Int64. Nulls in the rate column are missing values.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let year_idx = schema
            .index_of(YEAR_COLUMN)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{YEAR_COLUMN}' column"))?;
        let rate_idx = schema
            .index_of(RATE_COLUMN)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{RATE_COLUMN}' column"))?;

        let year_col = batch.column(year_idx);
        let rate_col = batch.column(rate_idx);

        for row in 0..batch.num_rows() {
            let period = extract_period(year_col, row)
                .with_context(|| format!("Row {row}: failed to read '{YEAR_COLUMN}'"))?;
            let rate = extract_rate(rate_col, row)
                .with_context(|| format!("Row {row}: failed to read '{RATE_COLUMN}'"))?;
            rows.push(Observation::new(period, rate));
        }
    }

    Ok(Dataset::from_rows(rows))
}

// -- Parquet / Arrow helpers --

fn downcast<'a, T: 'static>(col: &'a Arc<dyn Array>) -> Result<&'a T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array layout for {:?}", col.data_type()))
}

fn extract_period(col: &Arc<dyn Array>, row: usize) -> Result<NaiveDate> {
    if col.is_null(row) {
        bail!("null year");
    }
    match col.data_type() {
        DataType::Int32 => year_start(downcast::<Int32Array>(col)?.value(row) as i64),
        DataType::Int64 => year_start(downcast::<Int64Array>(col)?.value(row)),
        DataType::Utf8 => parse_period(downcast::<StringArray>(col)?.value(row)),
        DataType::LargeUtf8 => parse_period(downcast::<LargeStringArray>(col)?.value(row)),
        DataType::Date32 => downcast::<Date32Array>(col)?
            .value_as_date(row)
            .context("date out of range"),
        other => bail!("Expected integer, string or date column, got {other:?}"),
    }
}

fn extract_rate(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(col)?.value(row),
        DataType::Float32 => downcast::<Float32Array>(col)?.value(row) as f64,
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row) as f64,
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row) as f64,
        other => bail!("Expected numeric column, got {other:?}"),
    };
    Ok(value.is_finite().then_some(value))
}
