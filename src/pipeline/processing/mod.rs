pub mod classify;
pub mod enrich;
pub mod slug;

pub use classify::{classify_size, ClassificationRules, IndustryRule, RegionRule};
pub use enrich::{DefaultEnricher, Enricher};
pub use slug::slugify;
