use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::constants::{self, SOURCE_COLUMNS};
use crate::domain::SourceRow;
use crate::error::{ImporterError, Result};

/// Counts from one pass over the CSV export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub total_rows: usize,
    pub blank_names: usize,
    pub duplicates: usize,
    pub out_of_region: usize,
    pub accepted: usize,
    pub missing_columns: Vec<String>,
}

/// Rows accepted for import, in encounter order, plus the tallies
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub rows: Vec<SourceRow>,
    pub report: IngestReport,
}

/// Header positions of the known columns; `None` when the export lacks one
struct ColumnIndex {
    positions: [Option<usize>; 7],
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut positions = [None; 7];
        for (slot, name) in positions.iter_mut().zip(SOURCE_COLUMNS) {
            *slot = headers.iter().position(|h| h == name);
        }
        Self { positions }
    }

    fn missing(&self) -> Vec<String> {
        self.positions
            .iter()
            .zip(SOURCE_COLUMNS)
            .filter(|(pos, _)| pos.is_none())
            .map(|(_, name)| name.to_string())
            .collect()
    }

    fn field(&self, record: &StringRecord, column: usize) -> String {
        self.positions[column]
            .and_then(|i| record.get(i))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    fn row(&self, record: &StringRecord) -> SourceRow {
        SourceRow {
            company_name: self.field(record, 0),
            website: self.field(record, 1),
            city: self.field(record, 2),
            state: self.field(record, 3),
            employees: self.field(record, 4),
            classification: self.field(record, 5),
            business_info: self.field(record, 6),
        }
    }
}

/// Reads the company CSV export and applies the row filters.
pub struct CsvIngester {
    target_state: String,
}

impl CsvIngester {
    /// `target_state` is matched case-insensitively; empty accepts every state.
    pub fn new(target_state: impl Into<String>) -> Self {
        Self {
            target_state: target_state.into().trim().to_string(),
        }
    }

    pub fn ingest_file(&self, path: &Path) -> Result<IngestOutcome> {
        let mut content = String::new();
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut content))
            .map_err(|source| ImporterError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Read {} bytes from {}", content.len(), path.display());
        self.ingest_str(&content)
    }

    /// Filter order: blank name, then duplicate of an already accepted name,
    /// then state. Only accepted names enter the dedup set.
    pub fn ingest_str(&self, content: &str) -> Result<IngestOutcome> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::from_headers(&headers);

        let mut report = IngestReport {
            missing_columns: columns.missing(),
            ..Default::default()
        };
        for name in &report.missing_columns {
            warn!("CSV has no '{}' column, treating it as empty", name);
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut rows = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let record = result?;
            report.total_rows += 1;
            let row = columns.row(&record);

            if row.company_name.is_empty() {
                report.blank_names += 1;
                debug!(row = index + 1, "Skipping row without {}", constants::COL_COMPANY_NAME);
                continue;
            }
            if seen.contains(&row.company_name) {
                report.duplicates += 1;
                debug!(row = index + 1, name = %row.company_name, "Skipping duplicate company");
                continue;
            }
            if !self.accepts_state(&row.state) {
                report.out_of_region += 1;
                debug!(row = index + 1, state = %row.state, "Skipping company outside target state");
                continue;
            }

            seen.insert(row.company_name.clone());
            rows.push(row);
        }

        report.accepted = rows.len();
        Ok(IngestOutcome { rows, report })
    }

    fn accepts_state(&self, state: &str) -> bool {
        self.target_state.is_empty() || state.trim().eq_ignore_ascii_case(&self.target_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Company Name,Website,City,State,Employees,Classification,Business Info\n";

    fn ingest(body: &str) -> IngestOutcome {
        CsvIngester::new("HI")
            .ingest_str(&format!("{HEADER}{body}"))
            .unwrap()
    }

    #[test]
    fn reads_and_trims_fields() {
        let outcome = ingest(" Acme Ltd , acme.com , Honolulu , hi , 75 , Software Services ,\"Makes things, mostly\"\n");
        assert_eq!(outcome.rows.len(), 1);
        let row = &outcome.rows[0];
        assert_eq!(row.company_name, "Acme Ltd");
        assert_eq!(row.website, "acme.com");
        assert_eq!(row.state, "hi");
        assert_eq!(row.business_info, "Makes things, mostly");
        assert!(outcome.report.missing_columns.is_empty());
    }

    #[test]
    fn applies_filters_in_order() {
        let outcome = ingest(
            "Acme,,Honolulu,HI,5,,\n\
             ,,Hilo,HI,5,,\n\
             Acme,,Hilo,HI,500,,\n\
             West Co,,San Diego,CA,20,,\n\
             Kona Coffee,,Kailua-Kona,Hi,12,,\n",
        );
        let names: Vec<_> = outcome.rows.iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(names, ["Acme", "Kona Coffee"]);
        assert_eq!(outcome.rows[0].city, "Honolulu");

        let report = outcome.report;
        assert_eq!(report.total_rows, 5);
        assert_eq!(report.blank_names, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.out_of_region, 1);
        assert_eq!(report.accepted, 2);
    }

    #[test]
    fn dedup_is_case_sensitive_and_ignores_rejected_rows() {
        let outcome = ingest(
            "Maui Tours,,San Diego,CA,5,,\n\
             Maui Tours,,Kihei,HI,5,,\n\
             MAUI TOURS,,Lahaina,HI,5,,\n",
        );
        let cities: Vec<_> = outcome.rows.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, ["Kihei", "Lahaina"]);
        assert_eq!(outcome.report.out_of_region, 1);
        assert_eq!(outcome.report.duplicates, 0);
    }

    #[test]
    fn missing_columns_default_to_empty() {
        let outcome = CsvIngester::new("HI")
            .ingest_str("Company Name,State\nAloha Bakery,HI\nShort Row\n")
            .unwrap();
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].city, "");
        assert_eq!(outcome.rows[0].employees, "");
        assert_eq!(outcome.report.missing_columns.len(), 5);
        // the short row has an empty state and is filtered, not an error
        assert_eq!(outcome.report.out_of_region, 1);
    }

    #[test]
    fn empty_target_state_accepts_everything() {
        let outcome = CsvIngester::new("")
            .ingest_str(&format!("{HEADER}A,,Seattle,WA,,,\nB,,Hilo,HI,,,\n"))
            .unwrap();
        assert_eq!(outcome.rows.len(), 2);
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = CsvIngester::new("HI")
            .ingest_file(Path::new("/no/such/export.csv"))
            .unwrap_err();
        assert!(matches!(err, ImporterError::Read { .. }));
    }
}
