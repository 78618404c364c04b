/// Column names expected in the company CSV export
pub const COL_COMPANY_NAME: &str = "Company Name";
pub const COL_WEBSITE: &str = "Website";
pub const COL_CITY: &str = "City";
pub const COL_STATE: &str = "State";
pub const COL_EMPLOYEES: &str = "Employees";
pub const COL_CLASSIFICATION: &str = "Classification";
pub const COL_BUSINESS_INFO: &str = "Business Info";

pub const SOURCE_COLUMNS: [&str; 7] = [
    COL_COMPANY_NAME,
    COL_WEBSITE,
    COL_CITY,
    COL_STATE,
    COL_EMPLOYEES,
    COL_CLASSIFICATION,
    COL_BUSINESS_INFO,
];

// Default locations, overridable through config, env or CLI
pub const DEFAULT_CONFIG_FILE: &str = "company_importer.toml";
pub const DEFAULT_CSV_PATH: &str = "data/companies.csv";
pub const DEFAULT_COLLECTION_PATH: &str = "src/data/companies.ts";
pub const DEFAULT_EXPORT_PATH: &str = "output/companies.json";

// Environment variable names
pub const ENV_CONFIG: &str = "COMPANY_IMPORTER_CONFIG";
pub const ENV_CSV: &str = "COMPANY_IMPORTER_CSV";
pub const ENV_COLLECTION: &str = "COMPANY_IMPORTER_COLLECTION";
pub const ENV_TARGET_STATE: &str = "COMPANY_IMPORTER_TARGET_STATE";

pub const DEFAULT_TARGET_STATE: &str = "HI";
/// First id handed out when the collection has no numeric ids yet
pub const DEFAULT_FALLBACK_START_ID: u64 = 120;
pub const DEFAULT_COMPANY_TYPE: &str = "Public Company";

pub const DEFAULT_COLLECTION_HEADER: &str =
    "import { Company } from '@/types';\n\nexport const mockCompanies: Company[] = [\n";
pub const DEFAULT_COLLECTION_FOOTER: &str = "\n];";
pub const DEFAULT_CLOSING_DELIMITER: &str = "];";

/// Length of the block excerpt logged when the cleaner drops a block
pub const REMOVED_PREVIEW_CHARS: usize = 100;
