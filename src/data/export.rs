use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{RAW_COLUMNS, SalaryDataset};

// ---------------------------------------------------------------------------
// CSV export of the filtered subset
// ---------------------------------------------------------------------------

/// Header of an exported file: the eleven raw columns in input order,
/// followed by the derived ones.  The data table shows the same columns.
pub fn export_header() -> Vec<&'static str> {
    RAW_COLUMNS
        .iter()
        .copied()
        .chain(["remote_work_type", "region", "job_category"])
        .collect()
}

/// Serialize the given rows of the enriched table as UTF-8 CSV.
///
/// Recoded columns carry their human-readable labels; missing values become
/// empty cells.  Row order follows `indices`, which the filter engine hands
/// over already in table order.
pub fn write_csv<W: Write>(writer: W, dataset: &SalaryDataset, indices: &[usize]) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(export_header()).context("writing CSV header")?;

    for &i in indices {
        let rec = &dataset.records[i];
        let row = [
            rec.work_year.to_string(),
            rec.experience_level.map(|v| v.label().to_string()).unwrap_or_default(),
            rec.employment_type.map(|v| v.label().to_string()).unwrap_or_default(),
            rec.job_title.clone(),
            rec.salary.to_string(),
            rec.salary_currency.clone(),
            rec.salary_in_usd.to_string(),
            rec.employee_residence.clone(),
            rec.remote_ratio.to_string(),
            rec.company_location.clone(),
            rec.company_size.map(|v| v.label().to_string()).unwrap_or_default(),
            rec.remote_work_type.map(|v| v.label().to_string()).unwrap_or_default(),
            rec.region.label().to_string(),
            rec.job_category.label().to_string(),
        ];
        w.write_record(&row)
            .with_context(|| format!("writing CSV row {i}"))?;
    }

    w.flush().context("flushing CSV output")?;
    Ok(())
}

/// Write the filtered subset to a file.
pub fn export_csv(path: &Path, dataset: &SalaryDataset, indices: &[usize]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, dataset, indices)
}

/// Suggested file name for an export: `filtered_<source-stem>.csv`.
pub fn default_file_name(source_stem: Option<&str>) -> String {
    format!("filtered_{}.csv", source_stem.unwrap_or("ds_salaries"))
}
