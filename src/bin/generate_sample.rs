use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

use eco_impact::data::model::{
    COL_COMPANY, COL_PRODUCT_TYPE, COL_PRODUCTION_YEAR, Metric, Record,
};

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

    /// Uniform in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// (code, kg CO₂ per unit, litres of water per unit, price per unit)
const PRODUCTS: [(&str, f64, f64, f64); 6] = [
    ("Cotton", 5.9, 10_000.0, 18.0),
    ("Polyester", 9.5, 60.0, 12.0),
    ("Nylon", 7.3, 120.0, 14.0),
    ("Wool", 17.0, 170.0, 45.0),
    ("Silk", 25.0, 500.0, 80.0),
    ("Denim", 11.0, 7_000.0, 35.0),
];

const COMPANIES: [&str; 5] = ["EcoWeave", "GreenThreads", "TerraTextiles", "BlueLoom", "NatureFab"];

const FIRST_YEAR: i32 = 2015;
const LAST_YEAR: i32 = 2023;

fn generate(rng: &mut SimpleRng) -> Vec<Record> {
    let mut records = Vec::new();
    for year in FIRST_YEAR..=LAST_YEAR {
        // Slow efficiency gains over time.
        let efficiency = 1.0 - 0.02 * (year - FIRST_YEAR) as f64;
        for company in COMPANIES {
            for &(product, ghg, water, price) in &PRODUCTS {
                // Not every company makes every product every year.
                if rng.next_f64() < 0.35 {
                    continue;
                }
                let units = rng.range(200.0, 2_000.0).round();
                records.push(Record {
                    company: company.to_string(),
                    product_type: product.to_string(),
                    production_year: year,
                    greenhouse_gas_emissions: (units * ghg * efficiency * rng.range(0.8, 1.2))
                        .round(),
                    water_consumption: (units * water * efficiency * rng.range(0.8, 1.2)).round(),
                    sales_revenue: (units * price * rng.range(0.9, 1.3) * 100.0).round() / 100.0,
                });
            }
        }
    }
    records
}

fn write_csv(path: &str, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for rec in records {
        writer.serialize(rec).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, records: &[Record]) -> Result<()> {
    let mut fields = vec![
        Field::new(COL_COMPANY, DataType::Utf8, false),
        Field::new(COL_PRODUCT_TYPE, DataType::Utf8, false),
        Field::new(COL_PRODUCTION_YEAR, DataType::Int64, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            records.iter().map(|r| r.company.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records.iter().map(|r| r.product_type.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from(
            records.iter().map(|r| r.production_year as i64).collect::<Vec<_>>(),
        )),
    ];
    for metric in Metric::ALL {
        fields.push(Field::new(metric.column(), DataType::Float64, false));
        columns.push(Arc::new(Float64Array::from(
            records.iter().map(|r| r.metric(metric)).collect::<Vec<_>>(),
        )));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    let preview = batch.slice(0, batch.num_rows().min(5));
    println!("{}", pretty_format_batches(&[preview]).context("formatting preview")?);
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let records = generate(&mut rng);

    write_csv("dataBase.csv", &records)?;
    write_parquet("dataBase.parquet", &records)?;

    println!(
        "Wrote {} records to dataBase.csv and dataBase.parquet",
        records.len()
    );
    Ok(())
}
