use crate::domain::{CompanyRecord, SourceRow};
use crate::pipeline::processing::classify::{classify_size, ClassificationRules};
use crate::pipeline::processing::slug::slugify;

/// Trait for turning an accepted CSV row into a company record
pub trait Enricher {
    /// Build a record with every derived field filled in and no id yet
    fn enrich(&self, row: &SourceRow) -> CompanyRecord;
}

/// Default enricher driven by the configured classification rules
pub struct DefaultEnricher {
    pub rules: ClassificationRules,
    pub company_type: String,
}

impl Default for DefaultEnricher {
    fn default() -> Self {
        Self {
            rules: ClassificationRules::default(),
            company_type: crate::constants::DEFAULT_COMPANY_TYPE.to_string(),
        }
    }
}

impl DefaultEnricher {
    pub fn new(rules: ClassificationRules, company_type: impl Into<String>) -> Self {
        Self {
            rules,
            company_type: company_type.into(),
        }
    }
}

/// Prefix `https://` unless the URL is empty or already has a scheme
pub fn normalize_website(website: &str) -> String {
    let website = website.trim();
    if website.is_empty() || website.starts_with("http://") || website.starts_with("https://") {
        website.to_string()
    } else {
        format!("https://{website}")
    }
}

/// Business info, or a templated sentence when the export left it blank
pub fn describe(row: &SourceRow) -> String {
    if row.business_info.trim().is_empty() {
        format!(
            "{} is a company based in {}, {}.",
            row.company_name, row.city, row.state
        )
    } else {
        row.business_info.clone()
    }
}

impl Enricher for DefaultEnricher {
    fn enrich(&self, row: &SourceRow) -> CompanyRecord {
        CompanyRecord {
            id: None,
            name: row.company_name.clone(),
            slug: slugify(&row.company_name),
            description: describe(row),
            logo_url: String::new(),
            industry: self.rules.classify_industry(&row.classification),
            size: classify_size(&row.employees),
            region: self.rules.classify_region(&row.city),
            city: row.city.clone(),
            website: normalize_website(&row.website),
            linkedin_url: String::new(),
            company_type: self.company_type.clone(),
            contacts: Vec::new(),
        }
    }
}
