//! Write a synthetic video game sales table for trying the dashboard.
//!
//! `generate_sample [OUTPUT]` writes `.csv` (default `sample_sales.csv`) or
//! `.parquet`. About one row in forty gets an unknown year, written as
//! `N/A` in CSV and null in Parquet.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const PLATFORMS: [&str; 8] = ["PS2", "PS3", "Wii", "X360", "DS", "GBA", "PC", "N64"];
const GENRES: [&str; 8] = [
    "Action", "Sports", "Shooter", "Racing", "Puzzle", "Platform", "Role-Playing", "Strategy",
];
const TITLE_WORDS: [&str; 10] = [
    "Legend", "Super", "Galaxy", "Racer", "Quest", "Tactics", "Arena", "Kart", "Shadow", "Island",
];

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct SaleRow {
    rank: i64,
    name: String,
    platform: &'static str,
    year: Option<f64>,
    genre: &'static str,
    global_sales: f64,
}

fn generate_rows(n: usize, rng: &mut SimpleRng) -> Vec<SaleRow> {
    let mut rows: Vec<SaleRow> = (0..n)
        .map(|i| {
            let name = format!(
                "{} {} {}",
                rng.pick(&TITLE_WORDS),
                rng.pick(&TITLE_WORDS),
                i % 7 + 1
            );
            let year = if rng.next_f64() < 0.025 {
                None
            } else {
                Some(1985.0 + (rng.next_f64() * 32.0).floor())
            };
            // Heavy-tailed sales: most titles sell little, a few sell a lot.
            let global_sales = 0.02 / (1.0 - rng.next_f64()).max(0.0005);
            SaleRow {
                rank: 0,
                name,
                platform: rng.pick(&PLATFORMS),
                year,
                genre: rng.pick(&GENRES),
                global_sales: (global_sales * 100.0).round() / 100.0,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.global_sales.total_cmp(&a.global_sales));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as i64 + 1;
    }
    rows
}

fn write_csv(path: &Path, rows: &[SaleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["Rank", "Name", "Platform", "Year", "Genre", "Global_Sales"])?;
    for row in rows {
        let year = row
            .year
            .map(|y| format!("{y:.0}"))
            .unwrap_or_else(|| "N/A".to_string());
        writer.write_record([
            row.rank.to_string(),
            row.name.clone(),
            row.platform.to_string(),
            year,
            row.genre.to_string(),
            format!("{:.2}", row.global_sales),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SaleRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Rank", DataType::Int64, false),
        Field::new("Name", DataType::Utf8, false),
        Field::new("Platform", DataType::Utf8, false),
        Field::new("Year", DataType::Float64, true),
        Field::new("Genre", DataType::Utf8, false),
        Field::new("Global_Sales", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.rank))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.name.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.platform))),
            Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.year))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.genre))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.global_sales))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_sales.csv".to_string());
    let path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(2_000, &mut rng);

    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => write_csv(path, &rows)?,
        Some("parquet") | Some("pq") => write_parquet(path, &rows)?,
        _ => bail!("output must end in .csv or .parquet: {output}"),
    }

    println!("Wrote {} sales records to {output}", rows.len());
    Ok(())
}
