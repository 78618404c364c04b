//! Text codec for the persisted company collection.
//!
//! The collection is a source file holding a typed array literal:
//!
//! ```text
//! import { Company } from '@/types';
//!
//! export const mockCompanies: Company[] = [
//!   {
//!     id: "120",
//!     name: "Acme Ltd",
//!     ...
//!     contacts: []
//!   }
//! ];
//! ```
//!
//! Blocks are located with a non-nesting pattern: a block opens at `{`
//! followed by an `id:` field and closes at the next `}`. A `}` inside a
//! field value ends the block early. This is a textual scan, not a parser.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt::Write as _;

use crate::config::CollectionConfig;
use crate::domain::{CompanyRecord, Industry, Region, SizeBucket};

static BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)\{\s*id:\s*"[^"]+",\s*[^}]*\}"#).unwrap());
static NUMERIC_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\bid:\s*"(\d+)""#).unwrap());
// quoted values of any literal style, or the first character of a bare expression
static NAME_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bname:\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)'|`([^`]*)`|([^\s,}]))"#)
        .unwrap()
});
static STRING_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\b([A-Za-z_]+):\s*"((?:[^"\\]|\\.)*)""#).unwrap());

/// Result of splicing new records into a collection
#[derive(Debug, Clone)]
pub struct Appended {
    pub text: String,
    /// The inserted records, ids filled in
    pub records: Vec<CompanyRecord>,
    /// `None` when nothing was appended
    pub first_id: Option<u64>,
}

impl Appended {
    pub fn last_id(&self) -> Option<u64> {
        self.first_id
            .map(|first| first + self.records.len().saturating_sub(1) as u64)
    }
}

/// Why records could not be spliced into a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendError {
    /// The closing delimiter does not occur in the text
    DelimiterNotFound,
    /// Numbering the new records would run past `u64::MAX`
    IdOverflow { max_id: u64 },
}

/// Escape a value for a double-quoted string literal
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Inverse of [`escape`]; unknown escapes keep the escaped character
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Largest numeric `id: "<n>"` anywhere in the text
pub fn max_id(text: &str) -> Option<u64> {
    NUMERIC_ID
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse::<u64>().ok())
        .max()
}

/// Serialize one record as a block, indented for the array body.
pub fn render_block(record: &CompanyRecord, id: u64) -> String {
    let fields: [(&str, &str); 11] = [
        ("name", &record.name),
        ("slug", &record.slug),
        ("description", &record.description),
        ("logo_url", &record.logo_url),
        ("industry", record.industry.as_str()),
        ("size", record.size.as_str()),
        ("island", record.region.as_str()),
        ("city", &record.city),
        ("website", &record.website),
        ("linkedin_url", &record.linkedin_url),
        ("type", &record.company_type),
    ];

    let mut block = String::from("  {\n");
    let _ = writeln!(block, "    id: \"{id}\",");
    for (key, value) in fields {
        let _ = writeln!(block, "    {key}: \"{}\",", escape(value));
    }
    let contacts: Vec<String> = record
        .contacts
        .iter()
        .map(|c| format!("\"{}\"", escape(c)))
        .collect();
    let _ = writeln!(block, "    contacts: [{}]", contacts.join(", "));
    block.push_str("  }");
    block
}

/// Splice `records` in front of the last closing delimiter, numbering them
/// from one past the highest existing id (or `fallback_start_id`).
///
/// Fails when the delimiter does not occur in `text`, or when the new ids
/// would not fit in a `u64`. Appending nothing never fails on ids.
pub fn append(
    text: &str,
    records: &[CompanyRecord],
    fallback_start_id: u64,
    config: &CollectionConfig,
) -> Result<Appended, AppendError> {
    let insert_at = text
        .rfind(&config.closing_delimiter)
        .ok_or(AppendError::DelimiterNotFound)?;
    let existing_max = max_id(text);
    let overflow = AppendError::IdOverflow {
        max_id: existing_max.unwrap_or(fallback_start_id),
    };
    let next_id = match existing_max {
        Some(max) => max.checked_add(1),
        None => Some(fallback_start_id),
    };

    let mut assigned = Vec::with_capacity(records.len());
    let mut blocks = Vec::with_capacity(records.len());
    for (offset, record) in records.iter().enumerate() {
        let id = next_id
            .and_then(|first| first.checked_add(offset as u64))
            .ok_or(overflow)?;
        blocks.push(render_block(record, id));
        let mut record = record.clone();
        record.id = Some(id.to_string());
        assigned.push(record);
    }

    let (before, after) = text.split_at(insert_at);
    let new_text = if blocks.is_empty() {
        text.to_string()
    } else {
        // an empty array literal takes no leading comma
        let separator = if before.trim_end().ends_with('[') { "" } else { ",\n" };
        format!("{before}{separator}{}\n{after}", blocks.join(",\n"))
    };

    let first_id = if assigned.is_empty() { None } else { next_id };
    Ok(Appended {
        text: new_text,
        records: assigned,
        first_id,
    })
}

/// Every record block in document order
pub fn extract_blocks(text: &str) -> Vec<&str> {
    BLOCK.find_iter(text).map(|m| m.as_str()).collect()
}

/// A block is kept when it carries a `name` field that is not a blank
/// string literal. Single-quoted, backtick and bare values all count.
pub fn has_name(block: &str) -> bool {
    NAME_FIELD.captures(block).is_some_and(|caps| match caps.get(4) {
        Some(_) => true,
        None => (1..=3)
            .filter_map(|i| caps.get(i))
            .any(|value| !value.as_str().trim().is_empty()),
    })
}

/// Rebuild a collection file from the wrapper and the given blocks.
pub fn render_collection<S: AsRef<str>>(config: &CollectionConfig, blocks: &[S]) -> String {
    let body = blocks
        .iter()
        .map(|b| format!("  {}", b.as_ref()))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{}{}{}", config.header, body, config.footer)
}

pub fn empty_collection(config: &CollectionConfig) -> String {
    render_collection::<&str>(config, &[])
}

/// Best-effort read of a block back into a record. Unrecognised labels map
/// to the fallback variants; blocks without an `id` yield `None`.
pub fn parse_block(block: &str) -> Option<CompanyRecord> {
    let fields: HashMap<&str, String> = STRING_FIELD
        .captures_iter(block)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str();
            let value = caps.get(2)?.as_str();
            Some((key, unescape(value)))
        })
        .fold(HashMap::new(), |mut acc, (k, v)| {
            acc.entry(k).or_insert(v);
            acc
        });

    let field = |key: &str| fields.get(key).cloned().unwrap_or_default();
    let id = fields.get("id")?.clone();

    Some(CompanyRecord {
        id: Some(id),
        name: field("name"),
        slug: field("slug"),
        description: field("description"),
        logo_url: field("logo_url"),
        industry: field("industry").parse().unwrap_or(Industry::Other),
        size: field("size").parse().unwrap_or(SizeBucket::Unknown),
        region: field("island").parse().unwrap_or(Region::Unknown),
        city: field("city"),
        website: field("website"),
        linkedin_url: field("linkedin_url"),
        company_type: field("type"),
        contacts: Vec::new(),
    })
}
