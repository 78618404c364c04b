pub mod cleaner;
pub mod importer;
pub mod ingestion;
pub mod processing;

pub use cleaner::{CleanReport, Cleaner};
pub use importer::{import_with_config, init_collection, ImportReport, Importer};
pub use ingestion::{CsvIngester, IngestReport};
