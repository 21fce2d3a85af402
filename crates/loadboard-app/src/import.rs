//! CSV loader for bulk posting imports
//!
//! Expected header (column order is free, optional columns may be omitted):
//! origin,destination,distance,rate,equipment,broker,broker_email,pickup_date,commodity

use std::path::Path;

use loadboard_domain::model::{IngestRequest, NumericField};
use loadboard_domain::repository::PostingRepository;
use loadboard_domain::service::validate_ingest;
use loadboard_types::{Error, Result, ValidationError};
use serde::Deserialize;
use tracing::{debug, info};

use crate::app::ingest_posting;

const REQUIRED_COLUMNS: [&str; 4] = ["origin", "destination", "distance", "rate"];

#[derive(Debug, Deserialize)]
struct CsvPostingRow {
    origin: Option<String>,
    destination: Option<String>,
    distance: Option<String>,
    rate: Option<String>,
    #[serde(default)]
    equipment: Option<String>,
    #[serde(default)]
    broker: Option<String>,
    #[serde(default)]
    broker_email: Option<String>,
    #[serde(default)]
    pickup_date: Option<String>,
    #[serde(default)]
    commodity: Option<String>,
}

impl From<CsvPostingRow> for IngestRequest {
    fn from(row: CsvPostingRow) -> Self {
        IngestRequest {
            origin: row.origin,
            destination: row.destination,
            distance: row.distance.map(NumericField::Text),
            rate: row.rate.map(NumericField::Text),
            equipment: row.equipment,
            broker: row.broker,
            broker_email: row.broker_email,
            pickup_date: row.pickup_date,
            commodity: row.commodity,
        }
    }
}

/// One data row of an import file
#[derive(Debug)]
pub struct ImportRow {
    /// 1-based line number in the file
    pub line: u64,
    /// The decoded payload, or why the row could not be decoded
    pub request: std::result::Result<IngestRequest, String>,
}

/// Read every data row of a posting CSV. Rows that cannot be decoded are
/// returned with their error instead of aborting the whole file.
pub fn load_ingest_requests<P: AsRef<Path>>(path: P) -> Result<Vec<ImportRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    validate_headers(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let request = record
            .deserialize::<CsvPostingRow>(Some(&headers))
            .map(IngestRequest::from)
            .map_err(|e| e.to_string());
        rows.push(ImportRow { line, request });
    }

    Ok(rows)
}

/// Outcome of a bulk import
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Rows inserted, or rows that would be inserted on a dry run
    pub imported: usize,
    /// `(line, reason)` for every skipped row
    pub rejected: Vec<(u64, String)>,
}

/// Ingest every row through the Ingestion Service.
///
/// Rows that cannot be decoded or fail validation are skipped and reported.
/// A store failure aborts the import; rows inserted before it stay inserted.
/// With `dry_run` rows are only validated. `on_row` sees each line number and
/// its rejection reason, if any.
pub fn import_postings<R, F>(
    repo: &R,
    rows: Vec<ImportRow>,
    dry_run: bool,
    mut on_row: F,
) -> Result<ImportReport>
where
    R: PostingRepository,
    F: FnMut(u64, Option<&str>),
{
    let mut report = ImportReport::default();

    for row in rows {
        let outcome = match row.request {
            Err(reason) => Err(reason),
            Ok(request) if dry_run => validate_ingest(&request)
                .map(|_| ())
                .map_err(|e| e.to_string()),
            Ok(request) => match ingest_posting(repo, &request) {
                Ok(record) => {
                    debug!("line {} -> {}", row.line, record.id);
                    Ok(())
                }
                Err(Error::Validation(e)) => Err(e.to_string()),
                Err(e) => return Err(e),
            },
        };

        match outcome {
            Ok(()) => {
                report.imported += 1;
                on_row(row.line, None);
            }
            Err(reason) => {
                on_row(row.line, Some(&reason));
                report.rejected.push((row.line, reason));
            }
        }
    }

    info!(
        "Import finished: {} imported, {} rejected{}",
        report.imported,
        report.rejected.len(),
        if dry_run { " (dry run)" } else { "" }
    );
    Ok(report)
}

fn validate_headers(headers: &csv::StringRecord) -> std::result::Result<(), ValidationError> {
    let missing: Vec<&'static str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}
