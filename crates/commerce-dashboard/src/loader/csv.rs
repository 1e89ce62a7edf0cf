//! CSV reading and column extraction.

use chrono::{NaiveDate, NaiveDateTime};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

use crate::error::{DashboardError, Result, ResultExt};

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Read a CSV file with a header row.
///
/// Every column is read as a string (`infer_schema_length = 0`) so identifiers
/// and zip-code-like values keep their exact text; empty cells become nulls.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(DashboardError::FileNotFound(path.display().to_string()));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("Failed to open {}", path.display()))?
        .finish()
        .context(format!("Failed to parse {}", path.display()))?;

    debug!("Read {}: {:?}", path.display(), df.shape());
    Ok(df)
}

/// Extract a column as owned optional strings. Empty cells become `None`.
pub(crate) fn text_column(
    df: &DataFrame,
    table: &str,
    column: &str,
) -> Result<Vec<Option<String>>> {
    let col = df
        .column(column)
        .map_err(|_| DashboardError::ColumnNotFound {
            table: table.to_string(),
            column: column.to_string(),
        })?;

    let series = col.as_materialized_series().cast(&DataType::String)?;
    let values = series
        .str()?
        .into_iter()
        .map(|value| value.filter(|v| !v.is_empty()).map(str::to_string))
        .collect();

    Ok(values)
}

/// Parse a purchase timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` (the dataset's format), the ISO `T`
/// separator, minute precision, and a bare date (midnight).
pub(crate) fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();

    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DashboardError::InvalidTimestamp {
            value: raw.to_string(),
        })
}
