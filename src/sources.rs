//! Dataset Descriptors
//!
//! Static facts about the two data.gov.in sources: endpoint URLs, request
//! parameters, normalized column names, and citation labels.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// All-India production of principal crops (yearly, national aggregate).
pub const AGRICULTURE_API_URL: &str =
    "https://api.data.gov.in/resource/2cd35c5a-e278-4a7c-8d1f-63316dbef7a6";

/// Sub-division wise monthly/annual rainfall, 1901-2017.
pub const RAINFALL_API_URL: &str =
    "https://api.data.gov.in/resource/8e0bd482-4aba-4d99-9cb9-ff124f6f1c2f";

// Normalized column names shared by the fetchers and the answer engine.
pub const YEAR_COL: &str = "Year";
pub const SUB_DIVISION_COL: &str = "Sub-Division";
pub const RAINFALL_COL: &str = "Annual Rainfall (mm)";
pub const RICE_COL: &str = "Rice Production (000 Tonnes)";
pub const WHEAT_COL: &str = "Wheat Production (000 Tonnes)";
pub const MAIZE_COL: &str = "Maize Production (000 Tonnes)";

/// The two remote datasets this tool knows how to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Agriculture,
    Rainfall,
}

impl Dataset {
    /// Human-readable source label, also used verbatim in citations.
    pub fn label(&self) -> &'static str {
        match self {
            Dataset::Agriculture => "All India Production of Principal Crops",
            Dataset::Rainfall => "Sub Divisional Monthly Rainfall (1901-2017)",
        }
    }

    /// Row limit passed to the endpoint. The production table is small; the
    /// rainfall table has one row per (year, sub-division).
    pub fn record_limit(&self) -> u32 {
        match self {
            Dataset::Agriculture => 1000,
            Dataset::Rainfall => 5000,
        }
    }

    /// Per-request network timeout. The rainfall fetch is the larger payload.
    pub fn timeout(&self) -> Duration {
        match self {
            Dataset::Agriculture => Duration::from_secs(10),
            Dataset::Rainfall => Duration::from_secs(20),
        }
    }
}

/// Attribution for one dataset, attached to successful answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    pub url: String,
}
