//! CSV loading for weight histories

use chrono::NaiveDate;
use polars::prelude::*;
use std::path::Path;
use tracing::info;

use crate::error::CoachError;
use crate::models::WeightRecord;

const DATE_FORMAT: &str = "%Y-%m-%d";

impl From<PolarsError> for CoachError {
    fn from(err: PolarsError) -> Self {
        CoachError::Data(err.to_string())
    }
}

/// Load weight records from a CSV file with `date` and `weight` columns
///
/// Dates use `YYYY-MM-DD`. Integer weights are accepted and widened to f64.
/// Rows keep file order; sorting happens during feature preparation.
pub fn load_weight_records<P: AsRef<Path>>(csv_path: P) -> Result<Vec<WeightRecord>, CoachError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(csv_path.as_ref().to_path_buf()))?
        .finish()?;

    let records = dataframe_to_records(&df)?;
    info!(
        "Loaded {} weight records from {:?}",
        records.len(),
        csv_path.as_ref()
    );
    Ok(records)
}

/// Convert a `date`/`weight` DataFrame to records
pub fn dataframe_to_records(df: &DataFrame) -> Result<Vec<WeightRecord>, CoachError> {
    let date_col = df
        .column("date")
        .map_err(|_| CoachError::InvalidInput("Missing 'date' column".to_string()))?
        .cast(&DataType::String)?;
    let weight_col = df
        .column("weight")
        .map_err(|_| CoachError::InvalidInput("Missing 'weight' column".to_string()))?
        .cast(&DataType::Float64)?;

    let dates = date_col.str()?;
    let weights = weight_col.f64()?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let row = i + 1;
        let raw_date = dates
            .get(i)
            .ok_or_else(|| CoachError::InvalidInput(format!("Row {}: missing date", row)))?;
        let date = NaiveDate::parse_from_str(raw_date.trim(), DATE_FORMAT).map_err(|e| {
            CoachError::InvalidInput(format!("Row {}: invalid date '{}': {}", row, raw_date, e))
        })?;
        let weight = weights
            .get(i)
            .ok_or_else(|| CoachError::InvalidInput(format!("Row {}: missing weight", row)))?;

        records.push(WeightRecord { date, weight });
    }

    Ok(records)
}
