use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }
}

/// Department, head count, seniority range, starting salary, yearly raise.
const DEPARTMENTS: [(&str, usize, (i64, i64), f64, f64); 4] = [
    ("Janitorial", 30, (0, 25), 21000.0, 0.025),
    ("Production", 60, (0, 35), 28000.0, 0.035),
    ("Management", 25, (5, 38), 55000.0, 0.04),
    ("Executive", 8, (15, 40), 120000.0, 0.05),
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut seniority: Vec<i64> = Vec::new();
    let mut salary: Vec<i64> = Vec::new();
    let mut area: Vec<&str> = Vec::new();

    for &(name, count, (lo, hi), base, raise) in &DEPARTMENTS {
        for _ in 0..count {
            let years = rng.range(lo, hi);
            let noise = 0.9 + 0.2 * rng.next_f64();
            let pay = base * (1.0 + raise).powi(years as i32) * noise;
            seniority.push(years);
            // Round to the nearest hundred like a payroll export.
            salary.push((pay / 100.0).round() as i64 * 100);
            area.push(name);
        }
    }

    std::fs::create_dir_all("data").context("creating data/")?;

    let csv_path = Path::new("data/CompanyData.csv");
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV")?;
    writer.write_record(["Senority", "salary", "Area"])?;
    for i in 0..seniority.len() {
        writer.write_record([seniority[i].to_string(), salary[i].to_string(), area[i].to_string()])?;
    }
    writer.flush()?;

    let schema = Arc::new(Schema::new(vec![
        Field::new("Senority", DataType::Int64, false),
        Field::new("salary", DataType::Int64, false),
        Field::new("Area", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(seniority.clone())),
            Arc::new(Int64Array::from(salary)),
            Arc::new(StringArray::from(area)),
        ],
    )
    .context("building record batch")?;

    let parquet_path = Path::new("data/CompanyData.parquet");
    let file = std::fs::File::create(parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!(
        "Wrote {} employees to {} and {}",
        seniority.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
