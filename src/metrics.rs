//! Run counters for the importer and cleaner.
//!
//! Counters go through the `metrics` facade. Without an installed recorder
//! they cost nothing; an embedding process may install one to collect them.

use crate::pipeline::cleaner::CleanReport;
use crate::pipeline::importer::ImportReport;

/// Build a metric name for a phase, e.g. `company_importer_import_rows_total`
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("company_importer_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("company_importer_", $phase, "_", $name)
    };
}

pub struct ImportMetrics;

impl ImportMetrics {
    pub fn record(report: &ImportReport) {
        let ingest = &report.ingest;
        ::metrics::counter!(phase_metric!(counter, "import", "rows")).increment(ingest.total_rows as u64);
        ::metrics::counter!(phase_metric!(counter, "import", "rows_blank_name"))
            .increment(ingest.blank_names as u64);
        ::metrics::counter!(phase_metric!(counter, "import", "rows_duplicate"))
            .increment(ingest.duplicates as u64);
        ::metrics::counter!(phase_metric!(counter, "import", "rows_out_of_region"))
            .increment(ingest.out_of_region as u64);
        ::metrics::counter!(phase_metric!(counter, "import", "records_appended"))
            .increment(report.appended.len() as u64);
        ::metrics::histogram!(phase_metric!(histogram, "import", "duration_seconds"))
            .record(report.duration_secs);
    }
}

pub struct CleanMetrics;

impl CleanMetrics {
    pub fn record(report: &CleanReport) {
        ::metrics::counter!(phase_metric!(counter, "clean", "blocks_kept")).increment(report.kept as u64);
        ::metrics::counter!(phase_metric!(counter, "clean", "blocks_removed"))
            .increment(report.removed.len() as u64);
        ::metrics::histogram!(phase_metric!(histogram, "clean", "duration_seconds"))
            .record(report.duration_secs);
    }
}
