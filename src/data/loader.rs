use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{as_whole, Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the health dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the record columns (the usual export)
/// * `.json`    – `[{ "age": 30, "gender": "M", ... }, ...]`
/// * `.parquet` – one column per record field
///
/// Rows that cannot be typed into a [`Record`] are skipped with a warning;
/// a file that cannot be opened or parsed at all is an error.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    Ok(Dataset::from_records(records))
}

/// Keep a typed row if all of its numbers are usable, otherwise log and drop it.
fn keep(row: usize, record: Record, out: &mut Vec<Record>) {
    if record.is_finite() {
        out.push(record);
    } else {
        log::warn!("Row {row}: non-finite numeric value, skipping");
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the record column names; extra columns (an
/// index column written by pandas, for instance) are ignored.
fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Record>> {
    reader.headers().context("reading CSV headers")?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<Record>().enumerate() {
        match result {
            Ok(record) => keep(row_no, record, &mut records),
            Err(e) => log::warn!("CSV row {row_no}: {e}, skipping"),
        }
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`).
fn load_json(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Vec<Record>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        match Record::deserialize(row) {
            Ok(record) => keep(i, record, &mut records),
            Err(e) => log::warn!("JSON row {i}: {e}, skipping"),
        }
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per record field.
///
/// Integer columns may be stored as Int32/Int64 or as whole-valued floats;
/// numeric columns as any of Int32/Int64/Float32/Float64.  Works with files
/// written by both **Pandas** (`df.to_parquet()`) and **Polars**.
fn load_parquet(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        records_from_batch(&batch, row_offset, &mut records)?;
        row_offset += batch.num_rows();
    }
    Ok(records)
}

/// Column handles for one record batch.
struct Columns<'a> {
    age: &'a ArrayRef,
    gender: &'a ArrayRef,
    height: &'a ArrayRef,
    weight: &'a ArrayRef,
    steps: &'a ArrayRef,
    calories: &'a ArrayRef,
    activity: &'a ArrayRef,
    distance: &'a ArrayRef,
    heart_rate: &'a ArrayRef,
    resting_heart: &'a ArrayRef,
    norm_heart: &'a ArrayRef,
}

impl<'a> Columns<'a> {
    fn locate(batch: &'a RecordBatch) -> Result<Self> {
        let col = |name: &str| -> Result<&'a ArrayRef> {
            let idx = batch
                .schema()
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
            Ok(batch.column(idx))
        };
        let heart_rate = col("heart_rate").or_else(|_| col("hear_rate"))?;

        Ok(Columns {
            age: col("age")?,
            gender: col("gender")?,
            height: col("height")?,
            weight: col("weight")?,
            steps: col("steps")?,
            calories: col("calories")?,
            activity: col("activity")?,
            distance: col("distance")?,
            heart_rate,
            resting_heart: col("resting_heart")?,
            norm_heart: col("norm_heart")?,
        })
    }

    fn record(&self, row: usize) -> Option<Record> {
        Some(Record {
            age: integer_at(self.age, row)?,
            gender: string_at(self.gender, row)?,
            height: number_at(self.height, row)?,
            weight: number_at(self.weight, row)?,
            steps: integer_at(self.steps, row)?,
            calories: number_at(self.calories, row)?,
            activity: string_at(self.activity, row)?,
            distance: number_at(self.distance, row)?,
            heart_rate: number_at(self.heart_rate, row)?,
            resting_heart: number_at(self.resting_heart, row)?,
            norm_heart: number_at(self.norm_heart, row)?,
        })
    }
}

fn records_from_batch(batch: &RecordBatch, row_offset: usize, out: &mut Vec<Record>) -> Result<()> {
    let columns = Columns::locate(batch)?;
    for row in 0..batch.num_rows() {
        match columns.record(row) {
            Some(record) => keep(row_offset + row, record, out),
            None => log::warn!("Parquet row {}: null or mistyped value, skipping", row_offset + row),
        }
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

/// Read a numeric cell as `f64`. `None` for nulls and non-numeric columns.
fn number_at(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => Some(col.as_any().downcast_ref::<Float64Array>()?.value(row)),
        DataType::Float32 => Some(col.as_any().downcast_ref::<Float32Array>()?.value(row) as f64),
        DataType::Int64 => Some(col.as_any().downcast_ref::<Int64Array>()?.value(row) as f64),
        DataType::Int32 => Some(col.as_any().downcast_ref::<Int32Array>()?.value(row) as f64),
        _ => None,
    }
}

/// Read an integer cell, accepting whole-valued floats.
fn integer_at(col: &ArrayRef, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int64 => Some(col.as_any().downcast_ref::<Int64Array>()?.value(row)),
        DataType::Int32 => Some(col.as_any().downcast_ref::<Int32Array>()?.value(row) as i64),
        _ => number_at(col, row).and_then(as_whole),
    }
}

fn string_at(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => Some(col.as_any().downcast_ref::<StringArray>()?.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }
}
