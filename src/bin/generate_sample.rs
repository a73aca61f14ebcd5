use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use house_explorer::data::HousingRecord;

const ROWS: usize = 545;
const CSV_PATH: &str = "house_data.csv";
const PARQUET_PATH: &str = "house_data.parquet";

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

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Randomly re-case a value the way hand-entered spreadsheets do.
fn messy_case(rng: &mut SimpleRng, value: &str) -> String {
    match rng.next_u64() % 4 {
        0 => value.to_uppercase(),
        1 => {
            let mut chars = value.chars();
            chars
                .next()
                .map(|c| c.to_uppercase().chain(chars).collect())
                .unwrap_or_default()
        }
        _ => value.to_string(),
    }
}

fn generate(rng: &mut SimpleRng) -> Vec<HousingRecord> {
    (0..ROWS)
        .map(|_| {
            let area = rng.gauss(5000.0, 2000.0).clamp(1650.0, 16200.0).round();
            let stories = 1 + (rng.next_u64() % 4) as i64;
            let basement = rng.pick(&["yes", "no", "no"]);
            let airconditioning = rng.pick(&["yes", "no", "no"]);
            let furnishing = rng.pick(&["furnished", "semi-furnished", "unfurnished"]);

            let mut price = 1_000_000.0 + area * 650.0 + stories as f64 * 350_000.0;
            if basement == "yes" {
                price += 400_000.0;
            }
            if airconditioning == "yes" {
                price += 800_000.0;
            }
            price += rng.gauss(0.0, 600_000.0);
            let price = (price.clamp(1_750_000.0, 13_300_000.0) / 1000.0).round() * 1000.0;

            HousingRecord {
                price,
                area,
                stories,
                basement: messy_case(rng, basement),
                airconditioning: messy_case(rng, airconditioning),
                furnishingstatus: messy_case(rng, furnishing),
            }
        })
        .collect()
}

fn write_csv(records: &[HousingRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(CSV_PATH).context("creating CSV file")?;
    for rec in records {
        writer.serialize(rec).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(records: &[HousingRecord]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("price", DataType::Float64, false),
        Field::new("area", DataType::Float64, false),
        Field::new("stories", DataType::Int64, false),
        Field::new("basement", DataType::Utf8, false),
        Field::new("airconditioning", DataType::Utf8, false),
        Field::new("furnishingstatus", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.price))),
            Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.area))),
            Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.stories))),
            Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.basement.as_str()))),
            Arc::new(StringArray::from_iter_values(
                records.iter().map(|r| r.airconditioning.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                records.iter().map(|r| r.furnishingstatus.as_str()),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(PARQUET_PATH).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let records = generate(&mut rng);

    write_csv(&records)?;
    write_parquet(&records)?;

    log::info!("Wrote {} housing records to {CSV_PATH} and {PARQUET_PATH}", records.len());
    println!("Wrote {} housing records to {CSV_PATH} and {PARQUET_PATH}", records.len());
    Ok(())
}
