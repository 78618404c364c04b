//! Derived-field classification.
//!
//! Industry and region are decided by ordered rule lists: rules are checked
//! top to bottom and the first one with any matching keyword wins. The order
//! of the built-in lists is significant. Several keywords overlap
//! (`"it"` is a substring of `"hospital"`, `"kailua"` of `"kailua-kona"`,
//! `"waimea"` appears for both Hawaii and Kauai), so reordering changes
//! results.

use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;

use crate::domain::{Industry, Region, SizeBucket};
use crate::error::{ImporterError, Result};

const DEFAULT_INDUSTRY_RULES: &[(Industry, &[&str])] = &[
    (
        Industry::Technology,
        &["technology", "software", "it", "tech", "computer", "digital", "ai", "data"],
    ),
    (
        Industry::Healthcare,
        &["healthcare", "medical", "health", "hospital", "clinic"],
    ),
    (
        Industry::Education,
        &["education", "school", "university", "college", "academy"],
    ),
    (
        Industry::FinancialServices,
        &["bank", "financial", "credit", "finance", "insurance"],
    ),
    (
        Industry::TourismHospitality,
        &["travel", "tourism", "entertainment", "hotel", "resort", "restaurant"],
    ),
    (
        Industry::Government,
        &["government", "public", "federal", "state", "county"],
    ),
    (
        Industry::Nonprofit,
        &["nonprofit", "non-profit", "charity", "foundation"],
    ),
    (
        Industry::ConstructionRealEstate,
        &["construction", "real estate", "contractor", "building"],
    ),
    (Industry::Retail, &["retail", "grocery", "store", "shopping"]),
    (
        Industry::Manufacturing,
        &["manufacturing", "production", "factory"],
    ),
    (
        Industry::Energy,
        &["energy", "power", "electric", "solar", "renewable"],
    ),
    (
        Industry::Agriculture,
        &["agriculture", "farming", "food", "agricultural"],
    ),
];

const DEFAULT_REGION_RULES: &[(Region, &[&str])] = &[
    (
        Region::Oahu,
        &[
            "honolulu", "kapolei", "ewa beach", "waipahu", "kaneohe", "kailua", "waianae",
            "nanakuli", "pearl city", "aiea", "mililani", "wahiawa", "laie", "haleiwa",
        ],
    ),
    (
        Region::Hawaii,
        &[
            "hilo", "kailua-kona", "kamuela", "waimea", "keaau", "volcano", "pahoa", "honokaa",
            "naalehu", "ocean view",
        ],
    ),
    (
        Region::Maui,
        &[
            "kahului", "wailuku", "kihei", "lahaina", "makawao", "paia", "haiku", "hana",
            "lanai city",
        ],
    ),
    (
        Region::Kauai,
        &[
            "lihue", "kapaa", "hanalei", "kalaheo", "koloa", "waimea", "hanapepe", "kekaha",
        ],
    ),
];

/// Keyword set mapped to an industry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryRule {
    pub industry: Industry,
    pub keywords: Vec<String>,
}

/// Locality names mapped to a region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRule {
    pub region: Region,
    pub localities: Vec<String>,
}

/// Ordered first-match-wins rule lists for industry and region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationRules {
    pub industries: Vec<IndustryRule>,
    pub regions: Vec<RegionRule>,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        let owned = |words: &[&str]| -> Vec<String> { words.iter().map(|w| w.to_string()).collect() };
        Self {
            industries: DEFAULT_INDUSTRY_RULES
                .iter()
                .map(|(industry, keywords)| IndustryRule {
                    industry: *industry,
                    keywords: owned(*keywords),
                })
                .collect(),
            regions: DEFAULT_REGION_RULES
                .iter()
                .map(|(region, localities)| RegionRule {
                    region: *region,
                    localities: owned(*localities),
                })
                .collect(),
        }
    }
}

/// True when `haystack` (already lowercased) contains any of `needles`,
/// compared case-insensitively.
fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| haystack.contains(needle.to_lowercase().as_str()))
}

impl ClassificationRules {
    /// First industry whose keyword set matches, `Other` when none does.
    pub fn classify_industry(&self, classification: &str) -> Industry {
        let text = classification.to_lowercase();
        self.industries
            .iter()
            .find(|rule| contains_any(&text, &rule.keywords))
            .map(|rule| rule.industry)
            .unwrap_or(Industry::Other)
    }

    /// First region listing a locality contained in `city`, `Unknown` otherwise.
    pub fn classify_region(&self, city: &str) -> Region {
        let text = city.trim().to_lowercase();
        if text.is_empty() {
            return Region::Unknown;
        }
        self.regions
            .iter()
            .find(|rule| contains_any(&text, &rule.localities))
            .map(|rule| rule.region)
            .unwrap_or(Region::Unknown)
    }

    /// Reject rules that could never match or would match everything.
    pub fn validate(&self) -> Result<()> {
        for rule in &self.industries {
            if rule.keywords.is_empty() || rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ImporterError::Config(format!(
                    "industry rule '{}' needs non-empty keywords",
                    rule.industry
                )));
            }
        }
        for rule in &self.regions {
            if rule.localities.is_empty() || rule.localities.iter().any(|l| l.trim().is_empty()) {
                return Err(ImporterError::Config(format!(
                    "region rule '{}' needs non-empty localities",
                    rule.region
                )));
            }
        }
        Ok(())
    }
}

/// Bucket an employee count. Anything that does not parse as an integer is
/// `Unknown`; counts below ten, negative ones included, land in `1-10`.
/// Integers too large for `i64` still bucket by sign.
pub fn classify_size(employees: &str) -> SizeBucket {
    let count: i64 = match employees.trim().parse::<i64>() {
        Ok(n) => n,
        Err(e) => {
            return match e.kind() {
                IntErrorKind::PosOverflow => SizeBucket::Over1000,
                IntErrorKind::NegOverflow => SizeBucket::UpTo10,
                _ => SizeBucket::Unknown,
            }
        }
    };
    match count {
        n if n < 10 => SizeBucket::UpTo10,
        n if n < 50 => SizeBucket::From10To50,
        n if n < 100 => SizeBucket::From50To100,
        n if n < 500 => SizeBucket::From100To500,
        n if n < 1000 => SizeBucket::From500To1000,
        _ => SizeBucket::Over1000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_bucket_boundaries() {
        let cases = [
            ("0", SizeBucket::UpTo10),
            ("9", SizeBucket::UpTo10),
            ("10", SizeBucket::From10To50),
            ("49", SizeBucket::From10To50),
            ("50", SizeBucket::From50To100),
            ("75", SizeBucket::From50To100),
            ("99", SizeBucket::From50To100),
            ("100", SizeBucket::From100To500),
            ("499", SizeBucket::From100To500),
            ("500", SizeBucket::From500To1000),
            ("999", SizeBucket::From500To1000),
            ("1000", SizeBucket::Over1000),
            ("250000", SizeBucket::Over1000),
            ("99999999999999999999", SizeBucket::Over1000),
            ("-99999999999999999999", SizeBucket::UpTo10),
            ("-3", SizeBucket::UpTo10),
        ];
        for (input, expected) in cases {
            assert_eq!(classify_size(input), expected, "employees = {input}");
        }
    }

    #[test]
    fn buckets_are_contiguous() {
        let mut previous = classify_size("0");
        let mut transitions = 0;
        for n in 1..=1500 {
            let bucket = classify_size(&n.to_string());
            assert_ne!(bucket, SizeBucket::Unknown);
            if bucket != previous {
                transitions += 1;
                previous = bucket;
            }
        }
        assert_eq!(transitions, 5);
    }

    #[test]
    fn unparseable_counts_are_unknown() {
        for input in ["", "  ", "abc", "1,200", "12.5", "10-50"] {
            assert_eq!(classify_size(input), SizeBucket::Unknown, "employees = {input:?}");
        }
        assert_eq!(classify_size(" 42 "), SizeBucket::From10To50);
    }

    #[test]
    fn industry_first_match_wins() {
        let rules = ClassificationRules::default();
        assert_eq!(rules.classify_industry("Software Services"), Industry::Technology);
        assert_eq!(rules.classify_industry("MEDICAL Clinic"), Industry::Healthcare);
        assert_eq!(rules.classify_industry("Savings Bank"), Industry::FinancialServices);
        assert_eq!(rules.classify_industry("County Government"), Industry::Government);
        assert_eq!(rules.classify_industry("Grocery"), Industry::Retail);
        assert_eq!(rules.classify_industry("Farming"), Industry::Agriculture);
        assert_eq!(rules.classify_industry(""), Industry::Other);
        assert_eq!(rules.classify_industry("Plumbing"), Industry::Other);
    }

    #[test]
    fn industry_overlaps_resolve_by_order() {
        let rules = ClassificationRules::default();
        // "hospital" contains "it", which is a Technology keyword
        assert_eq!(rules.classify_industry("Hospital"), Industry::Technology);
        // "state" sits in the Government set ahead of Construction/Real Estate
        assert_eq!(rules.classify_industry("Estate Building"), Industry::Government);
        assert_eq!(rules.classify_industry("Resort and Hotel"), Industry::TourismHospitality);
    }

    #[test]
    fn region_lookup() {
        let rules = ClassificationRules::default();
        assert_eq!(rules.classify_region("Honolulu"), Region::Oahu);
        assert_eq!(rules.classify_region("HILO"), Region::Hawaii);
        assert_eq!(rules.classify_region("Kihei"), Region::Maui);
        assert_eq!(rules.classify_region("Lihue"), Region::Kauai);
        assert_eq!(rules.classify_region("Seattle"), Region::Unknown);
        assert_eq!(rules.classify_region(""), Region::Unknown);
    }

    #[test]
    fn ambiguous_localities_keep_list_order() {
        let rules = ClassificationRules::default();
        // listed for both Hawaii and Kauai
        assert_eq!(rules.classify_region("Waimea"), Region::Hawaii);
        // "kailua" (Oahu) is a substring of "kailua-kona"
        assert_eq!(rules.classify_region("Kailua-Kona"), Region::Oahu);
    }

    #[test]
    fn custom_rules_are_case_insensitive() {
        let rules = ClassificationRules {
            industries: vec![IndustryRule {
                industry: Industry::Energy,
                keywords: vec!["Geothermal".to_string()],
            }],
            regions: vec![RegionRule {
                region: Region::Maui,
                localities: vec!["Lanai City".to_string()],
            }],
        };
        assert_eq!(rules.classify_industry("geothermal plant"), Industry::Energy);
        assert_eq!(rules.classify_industry("software"), Industry::Other);
        assert_eq!(rules.classify_region("lanai city"), Region::Maui);
    }

    #[test]
    fn default_rules_validate() {
        ClassificationRules::default().validate().unwrap();
        assert_eq!(ClassificationRules::default().industries.len(), 12);
    }
}
