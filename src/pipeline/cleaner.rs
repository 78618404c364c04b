use std::path::Path;
use std::time::Instant;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::config::{CollectionConfig, Config};
use crate::constants::REMOVED_PREVIEW_CHARS;
use crate::error::Result;
use crate::metrics::CleanMetrics;
use crate::storage::{collection, read_text, write_atomic};

/// Outcome of one cleaning pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanReport {
    pub found: usize,
    pub kept: usize,
    /// Leading characters of every dropped block, in document order
    pub removed: Vec<String>,
    pub written: bool,
    pub duration_secs: f64,
}

/// Drops record blocks without a name and rewrites the collection.
pub struct Cleaner {
    collection: CollectionConfig,
}

impl Cleaner {
    pub fn new(collection: CollectionConfig) -> Self {
        Self { collection }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.collection.clone())
    }

    /// Rebuild `text` keeping only named blocks, in their original order.
    pub fn clean_text(&self, text: &str) -> (String, CleanReport) {
        let blocks = collection::extract_blocks(text);
        let mut report = CleanReport {
            found: blocks.len(),
            ..Default::default()
        };

        let mut kept = Vec::with_capacity(blocks.len());
        for block in blocks {
            if collection::has_name(block) {
                kept.push(block);
            } else {
                let preview: String = block.chars().take(REMOVED_PREVIEW_CHARS).collect();
                warn!("Removing company without name: {}...", preview);
                report.removed.push(preview);
            }
        }
        report.kept = kept.len();

        (collection::render_collection(&self.collection, &kept), report)
    }

    pub fn run(&self, collection_path: &Path, dry_run: bool) -> Result<CleanReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("clean", %run_id);
        let _enter = span.enter();
        let started = Instant::now();

        let text = read_text(collection_path)?;
        let (cleaned, mut report) = self.clean_text(&text);
        info!("Found {} potential companies in {}", report.found, collection_path.display());
        if report.found == 0 && !text.trim().is_empty() {
            warn!("No record blocks recognised, the rewritten collection will be empty");
        }

        if dry_run {
            info!("Dry run, {} would be kept and {} removed", report.kept, report.removed.len());
        } else {
            write_atomic(collection_path, &cleaned)?;
            report.written = true;
            info!("Kept {} companies with names", report.kept);
        }

        report.duration_secs = started.elapsed().as_secs_f64();
        CleanMetrics::record(&report);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = r#"import { Company } from '@/types';

export const mockCompanies: Company[] = [
  {
    id: "1",
    name: "First",
    contacts: []
  },
  {
    id: "2",
    slug: "no-name-here",
    contacts: []
  },
  {
    id: "3",
    name: "Third",
    contacts: []
  }
];"#;

    #[test]
    fn drops_nameless_block_and_keeps_order() {
        let cleaner = Cleaner::new(CollectionConfig::default());
        let (cleaned, report) = cleaner.clean_text(MIXED);

        assert_eq!(report.found, 3);
        assert_eq!(report.kept, 2);
        assert_eq!(report.removed.len(), 1);
        assert!(report.removed[0].contains("no-name-here"));

        let blocks = collection::extract_blocks(&cleaned);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("\"First\""));
        assert!(blocks[1].contains("\"Third\""));
        assert!(!cleaned.contains("no-name-here"));
    }

    #[test]
    fn clean_output_is_a_fixed_point() {
        let cleaner = Cleaner::new(CollectionConfig::default());
        let (once, _) = cleaner.clean_text(MIXED);
        let (twice, report) = cleaner.clean_text(&once);
        assert_eq!(once, twice);
        assert!(report.removed.is_empty());
    }

    #[test]
    fn hand_edited_names_survive() {
        let text = r#"[
  {
    id: "1",
    name: 'Hand Edited Co',
    contacts: []
  },
  {
    id: "2",
    name: "Imported Co",
    contacts: []
  },
  {
    id: "3",
    name: '',
    contacts: []
  }
];"#;
        let (cleaned, report) = Cleaner::new(CollectionConfig::default()).clean_text(text);
        assert_eq!(report.found, 3);
        assert_eq!(report.kept, 2);
        assert_eq!(report.removed.len(), 1);
        assert!(report.removed[0].contains("id: \"3\""));
        assert!(cleaned.contains("name: 'Hand Edited Co'"));
        assert!(cleaned.contains("name: \"Imported Co\""));
    }

    #[test]
    fn previews_are_truncated_on_char_boundaries() {
        let long_slug = "ā".repeat(300);
        let text = format!("[\n  {{\n    id: \"9\",\n    slug: \"{long_slug}\"\n  }}\n];");
        let (_, report) = Cleaner::new(CollectionConfig::default()).clean_text(&text);
        assert_eq!(report.removed.len(), 1);
        assert_eq!(report.removed[0].chars().count(), REMOVED_PREVIEW_CHARS);
    }
}
