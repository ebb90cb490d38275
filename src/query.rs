//! Query Parsing
//!
//! Free-text questions are matched against a fixed vocabulary of crops and
//! regions by case-insensitive substring search. The scan walks explicitly
//! ordered lists, so match precedence is a documented property: a query
//! naming two crops resolves to whichever comes first in [`Crop::ALL`].

use crate::sources;

/// Supported crops, each backed by one production column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crop {
    Rice,
    Wheat,
    Maize,
}

impl Crop {
    /// Scan order for keyword matching. First match wins.
    pub const ALL: [Crop; 3] = [Crop::Rice, Crop::Wheat, Crop::Maize];

    /// Keyword searched for in the lower-cased query.
    pub fn keyword(&self) -> &'static str {
        match self {
            Crop::Rice => "rice",
            Crop::Wheat => "wheat",
            Crop::Maize => "maize",
        }
    }

    /// Production column this crop maps to.
    pub fn column(&self) -> &'static str {
        match self {
            Crop::Rice => sources::RICE_COL,
            Crop::Wheat => sources::WHEAT_COL,
            Crop::Maize => sources::MAIZE_COL,
        }
    }
}

/// Supported rainfall sub-divisions, treated as regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Punjab,
    UttarPradesh,
    Haryana,
    Kerala,
    Assam,
}

impl Region {
    /// Scan order for keyword matching. First match wins.
    pub const ALL: [Region; 5] = [
        Region::Punjab,
        Region::UttarPradesh,
        Region::Haryana,
        Region::Kerala,
        Region::Assam,
    ];

    /// Keyword searched for in the lower-cased query.
    pub fn keyword(&self) -> &'static str {
        match self {
            Region::Punjab => "punjab",
            Region::UttarPradesh => "uttar pradesh",
            Region::Haryana => "haryana",
            Region::Kerala => "kerala",
            Region::Assam => "assam",
        }
    }

    /// Canonical upper-case form used as the rainfall join key.
    pub fn canonical(&self) -> &'static str {
        match self {
            Region::Punjab => "PUNJAB",
            Region::UttarPradesh => "UTTAR PRADESH",
            Region::Haryana => "HARYANA",
            Region::Kerala => "KERALA",
            Region::Assam => "ASSAM",
        }
    }
}

/// Outcome of parsing one question. Either slot may be unresolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub crop: Option<Crop>,
    pub region: Option<Region>,
}

/// Find the first supported crop and region named in a query.
pub fn parse_query(query: &str) -> ParsedQuery {
    let lowered = query.to_lowercase();

    let crop = Crop::ALL
        .iter()
        .copied()
        .find(|crop| lowered.contains(crop.keyword()));
    let region = Region::ALL
        .iter()
        .copied()
        .find(|region| lowered.contains(region.keyword()));

    ParsedQuery { crop, region }
}

/// Comma-separated crop vocabulary, for guidance messages.
pub fn supported_crops() -> String {
    Crop::ALL
        .iter()
        .map(|crop| crop.keyword())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-separated region vocabulary, for guidance messages.
pub fn supported_regions() -> String {
    Region::ALL
        .iter()
        .map(|region| region.canonical())
        .collect::<Vec<_>>()
        .join(", ")
}
