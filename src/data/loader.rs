use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{
    COL_COMPANY, COL_EMISSIONS, COL_PRODUCT_TYPE, COL_PRODUCTION_YEAR, COL_REVENUE, COL_WATER,
    Dataset, REQUIRED_COLUMNS, Record,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the production spreadsheet.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least the six required columns
/// * `.json`    – `[{ "Company": ..., "Product_Type": ..., ... }, ...]`
/// * `.parquet` – flat columns, as written by `df.to_parquet()`
///
/// Extra columns are ignored in every format.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} records ({} companies, {} product types, {} years) from {}",
        dataset.len(),
        dataset.companies.len(),
        dataset.product_types.len(),
        dataset.years.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell parsing shared by the text formats
// ---------------------------------------------------------------------------

fn invalid(row: usize, column: &str, value: impl Into<String>) -> DataError {
    DataError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.into(),
    }
}

fn parse_text(s: &str, row: usize, column: &str) -> Result<String, DataError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(invalid(row, column, s));
    }
    Ok(s.to_string())
}

fn parse_number(s: &str, row: usize, column: &str) -> Result<f64, DataError> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(row, column, s))
}

/// Years must be whole numbers; `2021.0` (a float-typed export) is accepted.
fn parse_year(s: &str, row: usize, column: &str) -> Result<i32, DataError> {
    let s = s.trim();
    if let Ok(y) = s.parse::<i32>() {
        return Ok(y);
    }
    s.parse::<f64>()
        .ok()
        .and_then(year_from_f64)
        .ok_or_else(|| invalid(row, column, s))
}

fn year_from_f64(v: f64) -> Option<i32> {
    if v.is_finite() && v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
        Some(v as i32)
    } else {
        None
    }
}

/// Text for a numeric cell in a text column: `7` for `7.0`, `1.5` for `1.5`.
/// Shared by every typed format so a code reads the same wherever it came from.
fn number_text(value: f64) -> Option<String> {
    value.is_finite().then(|| format!("{value}"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Positions of the required columns in a header row.
struct ColumnIndex {
    company: usize,
    product_type: usize,
    year: usize,
    emissions: usize,
    water: usize,
    revenue: usize,
}

impl ColumnIndex {
    fn locate(headers: &[String]) -> Result<Self, DataError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };
        Ok(ColumnIndex {
            company: find(COL_COMPANY)?,
            product_type: find(COL_PRODUCT_TYPE)?,
            year: find(COL_PRODUCTION_YEAR)?,
            emissions: find(COL_EMISSIONS)?,
            water: find(COL_WATER)?,
            revenue: find(COL_REVENUE)?,
        })
    }
}

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let idx = ColumnIndex::locate(&headers)?;
    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |i: usize| row.get(i).unwrap_or("");

        records.push(Record {
            company: parse_text(cell(idx.company), row_no, COL_COMPANY)?,
            product_type: parse_text(cell(idx.product_type), row_no, COL_PRODUCT_TYPE)?,
            production_year: parse_year(cell(idx.year), row_no, COL_PRODUCTION_YEAR)?,
            greenhouse_gas_emissions: parse_number(cell(idx.emissions), row_no, COL_EMISSIONS)?,
            water_consumption: parse_number(cell(idx.water), row_no, COL_WATER)?,
            sales_revenue: parse_number(cell(idx.revenue), row_no, COL_REVENUE)?,
        });
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Company": "Acme",
///     "Product_Type": "Cotton",
///     "Production_Year": 2020,
///     "Greenhouse_Gas_Emissions": 100.0,
///     "Water_Consumption": 50.0,
///     "Sales_Revenue": 1000.0
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let field = |name: &str| {
            obj.get(name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };

        records.push(Record {
            company: json_text(field(COL_COMPANY)?, i, COL_COMPANY)?,
            product_type: json_text(field(COL_PRODUCT_TYPE)?, i, COL_PRODUCT_TYPE)?,
            production_year: json_year(field(COL_PRODUCTION_YEAR)?, i, COL_PRODUCTION_YEAR)?,
            greenhouse_gas_emissions: json_number(field(COL_EMISSIONS)?, i, COL_EMISSIONS)?,
            water_consumption: json_number(field(COL_WATER)?, i, COL_WATER)?,
            sales_revenue: json_number(field(COL_REVENUE)?, i, COL_REVENUE)?,
        });
    }

    Ok(Dataset::from_records(records))
}

fn json_text(val: &JsonValue, row: usize, column: &str) -> Result<String, DataError> {
    match val {
        JsonValue::String(s) => parse_text(s, row, column),
        JsonValue::Number(n) => n
            .as_f64()
            .and_then(number_text)
            .ok_or_else(|| invalid(row, column, n.to_string())),
        other => Err(invalid(row, column, other.to_string())),
    }
}

fn json_number(val: &JsonValue, row: usize, column: &str) -> Result<f64, DataError> {
    match val {
        JsonValue::Number(n) => n.as_f64().ok_or_else(|| invalid(row, column, n.to_string())),
        JsonValue::String(s) => parse_number(s, row, column),
        other => Err(invalid(row, column, other.to_string())),
    }
}

fn json_year(val: &JsonValue, row: usize, column: &str) -> Result<i32, DataError> {
    match val {
        JsonValue::Number(n) => n
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .or_else(|| n.as_f64().and_then(year_from_f64))
            .ok_or_else(|| invalid(row, column, n.to_string())),
        JsonValue::String(s) => parse_year(s, row, column),
        other => Err(invalid(row, column, other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat columns.
///
/// Text columns may be Utf8 or LargeUtf8; numeric columns any of
/// Int32 / Int64 / Float32 / Float64.  Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    // Checked up front so a file with no row groups still fails on a bad schema.
    let schema = builder.schema();
    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| schema.index_of(c).is_err()) {
        return Err(DataError::MissingColumn(missing.to_string()).into());
    }

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let company = column(&batch, COL_COMPANY)?;
        let product = column(&batch, COL_PRODUCT_TYPE)?;
        let year = column(&batch, COL_PRODUCTION_YEAR)?;
        let emissions = column(&batch, COL_EMISSIONS)?;
        let water = column(&batch, COL_WATER)?;
        let revenue = column(&batch, COL_REVENUE)?;

        // Row numbers continue across batches.
        let offset = records.len();
        for row in 0..batch.num_rows() {
            let row_no = offset + row;
            let number = |col: &Arc<dyn Array>, name: &str| {
                arrow_f64(col, row).ok_or_else(|| invalid(row_no, name, cell_debug(col, row)))
            };

            let production_year = arrow_f64(year, row)
                .and_then(year_from_f64)
                .ok_or_else(|| invalid(row_no, COL_PRODUCTION_YEAR, cell_debug(year, row)))?;

            records.push(Record {
                company: arrow_text(company, row)
                    .ok_or_else(|| invalid(row_no, COL_COMPANY, cell_debug(company, row)))?,
                product_type: arrow_text(product, row)
                    .ok_or_else(|| invalid(row_no, COL_PRODUCT_TYPE, cell_debug(product, row)))?,
                production_year,
                greenhouse_gas_emissions: number(emissions, COL_EMISSIONS)?,
                water_consumption: number(water, COL_WATER)?,
                sales_revenue: number(revenue, COL_REVENUE)?,
            });
        }
    }

    Ok(Dataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column<'b>(batch: &'b RecordBatch, name: &str) -> Result<&'b ArrayRef, DataError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

/// Non-empty string cell, or `None` for nulls / other column types.
/// Numeric cells are rendered with [`number_text`], as in JSON.
fn arrow_text(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    let s = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row),
        _ => return arrow_f64(col, row).and_then(number_text),
    };
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Numeric cell widened to `f64`, or `None` for nulls / non-numeric columns.
fn arrow_f64(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let v = match col.data_type() {
        DataType::Int32 => col.as_any().downcast_ref::<Int32Array>()?.value(row) as f64,
        DataType::Int64 => col.as_any().downcast_ref::<Int64Array>()?.value(row) as f64,
        DataType::Float32 => col.as_any().downcast_ref::<Float32Array>()?.value(row) as f64,
        DataType::Float64 => col.as_any().downcast_ref::<Float64Array>()?.value(row),
        _ => return None,
    };
    v.is_finite().then_some(v)
}

fn cell_debug(col: &Arc<dyn Array>, row: usize) -> String {
    if col.is_null(row) {
        "<null>".to_string()
    } else {
        format!("<{:?}>", col.data_type())
    }
}
