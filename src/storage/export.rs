use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

use crate::domain::CompanyRecord;
use crate::error::Result;
use crate::storage::atomic::write_atomic;
use crate::storage::collection::{extract_blocks, parse_block};

/// Structured snapshot of the collection
#[derive(Debug, Serialize)]
pub struct CollectionSnapshot {
    pub exported_at: DateTime<Utc>,
    pub source: String,
    pub companies: Vec<CompanyRecord>,
}

impl CollectionSnapshot {
    pub fn from_text(text: &str, source: &Path) -> Self {
        let blocks = extract_blocks(text);
        let companies: Vec<CompanyRecord> = blocks.iter().filter_map(|b| parse_block(b)).collect();
        if companies.len() != blocks.len() {
            warn!(
                "{} of {} blocks could not be read back",
                blocks.len() - companies.len(),
                blocks.len()
            );
        }
        Self {
            exported_at: Utc::now(),
            source: source.display().to_string(),
            companies,
        }
    }

    /// Write the snapshot as pretty JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, &json)?;
        info!("Exported {} companies to {}", self.companies.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollectionConfig;
    use crate::storage::collection::render_collection;

    #[test]
    fn snapshot_serializes_labels() {
        let text = render_collection(
            &CollectionConfig::default(),
            &[r#"{
    id: "120",
    name: "Acme Ltd",
    slug: "acme-ltd",
    industry: "Financial Services",
    size: "1000+",
    island: "Kauai",
    type: "Public Company",
    contacts: []
  }"#],
        );
        let snapshot = CollectionSnapshot::from_text(&text, Path::new("companies.ts"));
        assert_eq!(snapshot.companies.len(), 1);

        let json = serde_json::to_value(&snapshot).unwrap();
        let company = &json["companies"][0];
        assert_eq!(company["id"], "120");
        assert_eq!(company["industry"], "Financial Services");
        assert_eq!(company["size"], "1000+");
        assert_eq!(company["island"], "Kauai");
        assert_eq!(company["type"], "Public Company");
        assert_eq!(json["source"], "companies.ts");
    }
}
