use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Int16Array, Int32Array, Int64Array, UInt32Array, UInt64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{RAW_COLUMNS, RawRecord};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural problem with an input file, worth showing to the user verbatim.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("column '{column}' has unsupported type {datatype}")]
    ColumnType {
        column: &'static str,
        datatype: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load raw salary records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the canonical column names (the shape the
///   source dataset ships in)
/// * `.parquet` – flat columns of the same names, e.g. written by
///   `df.to_parquet()`
/// * `.json`    – records-oriented array, `[{ "work_year": 2023, ... }, ...]`
///
/// The result is the raw table only; enrichment is a separate step.
pub fn load_file(path: &Path) -> Result<Vec<RawRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: a header row naming all eleven raw columns (order is free),
/// one observation per data row.  Cell values deserialize straight into
/// [`RawRecord`]; a wrong-typed cell fails the load with its row number.
fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for col in RAW_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "work_year": 2023,
///     "experience_level": "SE",
///     "employment_type": "FT",
///     "job_title": "Data Scientist",
///     "salary": 120000,
///     "salary_currency": "USD",
///     "salary_in_usd": 120000,
///     "employee_residence": "US",
///     "remote_ratio": 100,
///     "company_location": "US",
///     "company_size": "M"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the eleven raw columns as flat fields.
///
/// Integer columns may be any common signed/unsigned width (Pandas writes
/// Int64, Polars keeps whatever the frame had); strings may be `Utf8` or
/// `LargeUtf8`.  A null in a string column becomes an empty string and
/// propagates as a missing value downstream; a null in a numeric column
/// fails the load.
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let work_year = named_column(&batch, "work_year")?;
        let experience_level = named_column(&batch, "experience_level")?;
        let employment_type = named_column(&batch, "employment_type")?;
        let job_title = named_column(&batch, "job_title")?;
        let salary = named_column(&batch, "salary")?;
        let salary_currency = named_column(&batch, "salary_currency")?;
        let salary_in_usd = named_column(&batch, "salary_in_usd")?;
        let employee_residence = named_column(&batch, "employee_residence")?;
        let remote_ratio = named_column(&batch, "remote_ratio")?;
        let company_location = named_column(&batch, "company_location")?;
        let company_size = named_column(&batch, "company_size")?;

        for row in 0..batch.num_rows() {
            let record = RawRecord {
                work_year: int_cell(work_year, row, "work_year")?
                    .try_into()
                    .with_context(|| format!("row {row}: work_year out of range"))?,
                experience_level: string_cell(experience_level, row, "experience_level")?,
                employment_type: string_cell(employment_type, row, "employment_type")?,
                job_title: string_cell(job_title, row, "job_title")?,
                salary: int_cell(salary, row, "salary")?
                    .try_into()
                    .with_context(|| format!("row {row}: salary out of range"))?,
                salary_currency: string_cell(salary_currency, row, "salary_currency")?,
                salary_in_usd: int_cell(salary_in_usd, row, "salary_in_usd")?
                    .try_into()
                    .with_context(|| format!("row {row}: salary_in_usd out of range"))?,
                employee_residence: string_cell(employee_residence, row, "employee_residence")?,
                remote_ratio: int_cell(remote_ratio, row, "remote_ratio")?
                    .try_into()
                    .with_context(|| format!("row {row}: remote_ratio out of range"))?,
                company_location: string_cell(company_location, row, "company_location")?,
                company_size: string_cell(company_size, row, "company_size")?,
            };
            records.push(record);
        }
    }

    Ok(records)
}

// -- Arrow helpers --

fn named_column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| LoadError::MissingColumn(name))?;
    Ok(batch.column(idx))
}

/// Read one integer cell, widening whatever width the file used to `i64`.
fn int_cell(col: &Arc<dyn Array>, row: usize, name: &'static str) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value in numeric column '{name}' at row {row}");
    }
    let value = match col.data_type() {
        DataType::Int16 => col.as_any().downcast_ref::<Int16Array>().unwrap().value(row) as i64,
        DataType::Int32 => col.as_any().downcast_ref::<Int32Array>().unwrap().value(row) as i64,
        DataType::Int64 => col.as_any().downcast_ref::<Int64Array>().unwrap().value(row),
        DataType::UInt32 => col.as_any().downcast_ref::<UInt32Array>().unwrap().value(row) as i64,
        DataType::UInt64 => {
            let v = col.as_any().downcast_ref::<UInt64Array>().unwrap().value(row);
            i64::try_from(v).with_context(|| format!("column '{name}' value exceeds i64"))?
        }
        other => {
            return Err(LoadError::ColumnType {
                column: name,
                datatype: format!("{other:?}"),
            }
            .into());
        }
    };
    Ok(value)
}

/// Read one string cell.  Nulls become empty strings so they keep flowing as
/// missing values instead of failing the load.
fn string_cell(col: &Arc<dyn Array>, row: usize, name: &'static str) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => Err(LoadError::ColumnType {
            column: name,
            datatype: format!("{other:?}"),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::path::PathBuf;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/data")
            .join(name)
    }

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("salary_scope_{}_{name}", std::process::id()))
    }

    #[test]
    fn loads_the_csv_fixture() {
        let records = load_file(&fixture("ds_salaries_sample.csv")).expect("CSV load failed");
        assert_eq!(records.len(), 8);

        let first = &records[0];
        assert_eq!(first.work_year, 2023);
        assert_eq!(first.experience_level, "SE");
        assert_eq!(first.job_title, "Data Scientist");
        assert_eq!(first.salary_in_usd, 175_000);
        assert_eq!(first.remote_ratio, 100);
        assert_eq!(first.company_location, "US");

        // The fixture keeps one deliberately unmapped code.
        assert!(records.iter().any(|r| r.experience_level == "ZZ"));
    }

    #[test]
    fn json_loader_agrees_with_the_csv_loader() {
        let from_csv = load_file(&fixture("ds_salaries_sample.csv")).unwrap();
        let from_json = load_file(&fixture("ds_salaries_sample.json")).unwrap();
        assert_eq!(from_csv, from_json);
    }

    #[test]
    fn parquet_round_trips_through_the_arrow_writer() {
        let expected = load_file(&fixture("ds_salaries_sample.csv")).unwrap();

        let schema = Arc::new(Schema::new(vec![
            Field::new("work_year", DataType::Int64, false),
            Field::new("experience_level", DataType::Utf8, false),
            Field::new("employment_type", DataType::Utf8, false),
            Field::new("job_title", DataType::Utf8, false),
            Field::new("salary", DataType::Int64, false),
            Field::new("salary_currency", DataType::Utf8, false),
            Field::new("salary_in_usd", DataType::Int64, false),
            Field::new("employee_residence", DataType::Utf8, false),
            Field::new("remote_ratio", DataType::Int64, false),
            Field::new("company_location", DataType::Utf8, false),
            Field::new("company_size", DataType::Utf8, false),
        ]));
        let strings = |f: fn(&RawRecord) -> &str| {
            StringArray::from(expected.iter().map(f).collect::<Vec<_>>())
        };
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(
                    expected.iter().map(|r| r.work_year as i64).collect::<Vec<_>>(),
                )),
                Arc::new(strings(|r| r.experience_level.as_str())),
                Arc::new(strings(|r| r.employment_type.as_str())),
                Arc::new(strings(|r| r.job_title.as_str())),
                Arc::new(Int64Array::from(
                    expected.iter().map(|r| r.salary as i64).collect::<Vec<_>>(),
                )),
                Arc::new(strings(|r| r.salary_currency.as_str())),
                Arc::new(Int64Array::from(
                    expected.iter().map(|r| r.salary_in_usd as i64).collect::<Vec<_>>(),
                )),
                Arc::new(strings(|r| r.employee_residence.as_str())),
                Arc::new(Int64Array::from(
                    expected.iter().map(|r| r.remote_ratio as i64).collect::<Vec<_>>(),
                )),
                Arc::new(strings(|r| r.company_location.as_str())),
                Arc::new(strings(|r| r.company_size.as_str())),
            ],
        )
        .expect("building record batch");

        let path = scratch("round_trip.parquet");
        let file = File::create(&path).expect("creating scratch parquet");
        let mut writer = ArrowWriter::try_new(file, schema, None).expect("creating writer");
        writer.write(&batch).expect("writing batch");
        writer.close().expect("closing writer");

        let loaded = load_file(&path).expect("parquet load failed");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, expected);
    }

    #[test]
    fn unsupported_extension_is_a_typed_error() {
        let err = load_file(Path::new("salaries.xlsx")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LoadError>(),
            Some(&LoadError::UnsupportedExtension("xlsx".into())),
        );
    }

    #[test]
    fn missing_csv_column_is_reported_by_name() {
        let path = scratch("missing_column.csv");
        std::fs::write(&path, "work_year,job_title\n2023,Data Scientist\n").unwrap();

        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        match err.downcast_ref::<LoadError>() {
            Some(LoadError::MissingColumn(col)) => {
                assert_eq!(*col, "experience_level");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }
}
