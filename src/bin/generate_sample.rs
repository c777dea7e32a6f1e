use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Written next to, never over, the dataset the dashboard opens by default.
const SAMPLE_CSV: &str = "labor_force_sample.csv";
const SAMPLE_PARQUET: &str = "labor_force_sample.parquet";

/// Years whose rate is left blank, to exercise the imputation strategies.
const MISSING_YEARS: [i64; 3] = [2004, 2010, 2011];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in [-1, 1).
    fn jitter(&mut self) -> f64 {
        ((self.next_u64() >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    }
}

struct Row {
    year: i64,
    labor_force: f64,
    employment: f64,
    unemployment: f64,
    rate: Option<f64>,
}

/// Rough shape of the 2000s: slow rise, a 2009 spike, long recovery,
/// a 2020 jump.
fn base_rate(year: i64) -> f64 {
    match year {
        ..=2001 => 4.2,
        2002..=2007 => 5.5 - 0.2 * (year - 2002) as f64,
        2008 => 5.8,
        2009..=2010 => 9.4,
        2011..=2019 => 8.9 - 0.55 * (year - 2011) as f64,
        _ => 8.1,
    }
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<Row> {
    (2000..=2020)
        .map(|year| {
            let labor_force = 142_000.0 + 1_150.0 * (year - 2000) as f64 + 300.0 * rng.jitter();
            let rate = (base_rate(year) + 0.15 * rng.jitter()).max(0.5);
            let unemployment = labor_force * rate / 100.0;
            Row {
                year,
                labor_force: labor_force.round(),
                employment: (labor_force - unemployment).round(),
                unemployment: unemployment.round(),
                rate: (!MISSING_YEARS.contains(&year)).then(|| (rate * 10.0).round() / 10.0),
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["Year", "Labor Force", "Employment", "Unemployment", "Unemployment Rate"])?;
    for row in rows {
        writer.write_record([
            row.year.to_string(),
            row.labor_force.to_string(),
            row.employment.to_string(),
            row.unemployment.to_string(),
            row.rate.map(|r| r.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Year", DataType::Int64, false),
        Field::new("Labor Force", DataType::Float64, false),
        Field::new("Employment", DataType::Float64, false),
        Field::new("Unemployment", DataType::Float64, false),
        Field::new("Unemployment Rate", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.labor_force))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.employment))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.unemployment))),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.rate).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv(&rows, SAMPLE_CSV)?;
    write_parquet(&rows, SAMPLE_PARQUET)?;

    println!(
        "Wrote {} years ({} without a rate) to {SAMPLE_CSV} and {SAMPLE_PARQUET}",
        rows.len(),
        MISSING_YEARS.len()
    );
    Ok(())
}
