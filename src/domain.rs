use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Industry label assigned from the Classification column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Technology,
    Healthcare,
    Education,
    #[serde(rename = "Financial Services")]
    FinancialServices,
    #[serde(rename = "Tourism/Hospitality")]
    TourismHospitality,
    Government,
    Nonprofit,
    #[serde(rename = "Construction/Real Estate")]
    ConstructionRealEstate,
    Retail,
    Manufacturing,
    Energy,
    Agriculture,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 13] = [
        Industry::Technology,
        Industry::Healthcare,
        Industry::Education,
        Industry::FinancialServices,
        Industry::TourismHospitality,
        Industry::Government,
        Industry::Nonprofit,
        Industry::ConstructionRealEstate,
        Industry::Retail,
        Industry::Manufacturing,
        Industry::Energy,
        Industry::Agriculture,
        Industry::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Healthcare => "Healthcare",
            Industry::Education => "Education",
            Industry::FinancialServices => "Financial Services",
            Industry::TourismHospitality => "Tourism/Hospitality",
            Industry::Government => "Government",
            Industry::Nonprofit => "Nonprofit",
            Industry::ConstructionRealEstate => "Construction/Real Estate",
            Industry::Retail => "Retail",
            Industry::Manufacturing => "Manufacturing",
            Industry::Energy => "Energy",
            Industry::Agriculture => "Agriculture",
            Industry::Other => "Other",
        }
    }
}

/// Employee-count bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeBucket {
    Unknown,
    #[serde(rename = "1-10")]
    UpTo10,
    #[serde(rename = "10-50")]
    From10To50,
    #[serde(rename = "50-100")]
    From50To100,
    #[serde(rename = "100-500")]
    From100To500,
    #[serde(rename = "500-1000")]
    From500To1000,
    #[serde(rename = "1000+")]
    Over1000,
}

impl SizeBucket {
    pub const ALL: [SizeBucket; 7] = [
        SizeBucket::Unknown,
        SizeBucket::UpTo10,
        SizeBucket::From10To50,
        SizeBucket::From50To100,
        SizeBucket::From100To500,
        SizeBucket::From500To1000,
        SizeBucket::Over1000,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeBucket::Unknown => "Unknown",
            SizeBucket::UpTo10 => "1-10",
            SizeBucket::From10To50 => "10-50",
            SizeBucket::From50To100 => "50-100",
            SizeBucket::From100To500 => "100-500",
            SizeBucket::From500To1000 => "500-1000",
            SizeBucket::Over1000 => "1000+",
        }
    }
}

/// Island the company's city belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Unknown,
    Oahu,
    Hawaii,
    Maui,
    Kauai,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Unknown,
        Region::Oahu,
        Region::Hawaii,
        Region::Maui,
        Region::Kauai,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Unknown => "Unknown",
            Region::Oahu => "Oahu",
            Region::Hawaii => "Hawaii",
            Region::Maui => "Maui",
            Region::Kauai => "Kauai",
        }
    }
}

macro_rules! label_impls {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| format!("unknown {}: '{}'", $what, s))
            }
        }
    };
}

label_impls!(Industry, "industry");
label_impls!(SizeBucket, "size bucket");
label_impls!(Region, "region");

/// One row of the CSV export, trimmed; absent columns are empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    pub company_name: String,
    pub website: String,
    pub city: String,
    pub state: String,
    pub employees: String,
    pub classification: String,
    pub business_info: String,
}

/// A company as stored in the collection.
///
/// `id` stays `None` until the importer assigns one; records parsed back out
/// of the collection always carry the id found in their block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub logo_url: String,
    pub industry: Industry,
    pub size: SizeBucket,
    #[serde(rename = "island")]
    pub region: Region,
    pub city: String,
    pub website: String,
    pub linkedin_url: String,
    #[serde(rename = "type")]
    pub company_type: String,
    pub contacts: Vec<String>,
}
