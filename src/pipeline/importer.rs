use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::config::{CollectionConfig, Config};
use crate::domain::CompanyRecord;
use crate::error::{ImporterError, Result};
use crate::metrics::ImportMetrics;
use crate::pipeline::ingestion::{CsvIngester, IngestReport};
use crate::pipeline::processing::{DefaultEnricher, Enricher};
use crate::storage::collection::{self, AppendError};
use crate::storage::{read_text, write_atomic};

/// Outcome of one import run
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub ingest: IngestReport,
    /// Records spliced into the collection, ids assigned
    pub appended: Vec<CompanyRecord>,
    pub first_id: Option<u64>,
    pub last_id: Option<u64>,
    /// False for dry runs and for runs with nothing to append
    pub written: bool,
    pub duration_secs: f64,
}

/// New collection text (if anything changes) plus the report
#[derive(Debug, Clone)]
pub struct ImportPlan {
    pub new_text: Option<String>,
    pub report: ImportReport,
}

/// Appends enriched CSV rows to the persisted collection.
pub struct Importer<E: Enricher = DefaultEnricher> {
    ingester: CsvIngester,
    enricher: E,
    collection: CollectionConfig,
    fallback_start_id: u64,
}

impl Importer<DefaultEnricher> {
    pub fn from_config(config: &Config) -> Self {
        Self::with_enricher(
            config,
            DefaultEnricher::new(config.classification.clone(), config.import.company_type.clone()),
        )
    }
}

impl<E: Enricher> Importer<E> {
    pub fn with_enricher(config: &Config, enricher: E) -> Self {
        Self {
            ingester: CsvIngester::new(config.import.target_state.clone()),
            enricher,
            collection: config.collection.clone(),
            fallback_start_id: config.import.fallback_start_id,
        }
    }

    /// Compute the import without touching the filesystem.
    ///
    /// `collection_path` is only used for error messages.
    pub fn plan(&self, csv_text: &str, collection_text: &str, collection_path: &Path) -> Result<ImportPlan> {
        let outcome = self.ingester.ingest_str(csv_text)?;
        let records: Vec<CompanyRecord> = outcome
            .rows
            .iter()
            .map(|row| self.enricher.enrich(row))
            .collect();

        let appended = collection::append(
            collection_text,
            &records,
            self.fallback_start_id,
            &self.collection,
        )
        .map_err(|e| match e {
            AppendError::DelimiterNotFound => ImporterError::ClosingDelimiterNotFound {
                path: collection_path.to_path_buf(),
                delimiter: self.collection.closing_delimiter.clone(),
            },
            AppendError::IdOverflow { max_id } => ImporterError::IdOverflow {
                path: collection_path.to_path_buf(),
                max_id,
            },
        })?;

        for record in &appended.records {
            debug!(
                id = record.id.as_deref().unwrap_or_default(),
                name = %record.name,
                industry = %record.industry,
                size = %record.size,
                island = %record.region,
                "Prepared company"
            );
        }

        let first_id = appended.first_id;
        let last_id = appended.last_id();
        let new_text = (!appended.records.is_empty()).then_some(appended.text);

        Ok(ImportPlan {
            new_text,
            report: ImportReport {
                ingest: outcome.report,
                appended: appended.records,
                first_id,
                last_id,
                written: false,
                duration_secs: 0.0,
            },
        })
    }

    /// Read the CSV and the collection, append, and replace the collection
    /// file unless `dry_run` is set.
    pub fn run(&self, csv_path: &Path, collection_path: &Path, dry_run: bool) -> Result<ImportReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("import", %run_id);
        let _enter = span.enter();
        let started = Instant::now();

        info!("Importing companies from {}", csv_path.display());
        let csv_text = read_text(csv_path)?;
        let collection_text = read_text(collection_path)?;

        let ImportPlan { new_text, mut report } = self.plan(&csv_text, &collection_text, collection_path)?;
        info!(
            accepted = report.ingest.accepted,
            blank = report.ingest.blank_names,
            duplicates = report.ingest.duplicates,
            out_of_region = report.ingest.out_of_region,
            "Ingested {} CSV rows",
            report.ingest.total_rows
        );

        match new_text {
            Some(text) if !dry_run => {
                write_atomic(collection_path, &text)?;
                report.written = true;
                info!(
                    "Appended {} companies to {} (ids {}..={})",
                    report.appended.len(),
                    collection_path.display(),
                    report.first_id.unwrap_or_default(),
                    report.last_id.unwrap_or_default()
                );
            }
            Some(_) => info!("Dry run, {} companies not written", report.appended.len()),
            None => warn!("No new companies to import, {} left unchanged", collection_path.display()),
        }

        report.duration_secs = started.elapsed().as_secs_f64();
        ImportMetrics::record(&report);
        Ok(report)
    }
}

/// Convenience wrapper running the default importer against configured paths
pub fn import_with_config(config: &Config, dry_run: bool) -> Result<ImportReport> {
    Importer::from_config(config).run(&config.paths.csv_path, &config.paths.collection_path, dry_run)
}

/// Write an empty collection unless one already exists.
/// Returns whether a file was created.
pub fn init_collection(path: &Path, config: &CollectionConfig) -> Result<bool> {
    if path.exists() {
        info!("{} already exists, leaving it alone", path.display());
        return Ok(false);
    }
    write_atomic(path, &collection::empty_collection(config))?;
    info!("Created empty collection at {}", path.display());
    Ok(true)
}
