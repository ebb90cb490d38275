//! Data Fetching and Normalization
//!
//! Retrieves the two datasets over HTTP and normalizes the stringly-typed
//! API rows into typed DataFrames.
//!
//! Raw field names (as served by the API):
//! - Agriculture: `_year` ("YYYY-YY" ranges), `food_grains_cereals___rice_000_tonnes_`
//!   and the wheat/maize equivalents (numbers serialized as strings)
//! - Rainfall: `year`, `subdivision`, `annual`
//!
//! The fetchers are fallible; converting failures into the empty-table
//! contract happens one level up, in [`crate::cache::DataService`].

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Settings;
use crate::sources::{self, Dataset};

const YEAR_FIELD: &str = "_year";
const RICE_FIELD: &str = "food_grains_cereals___rice_000_tonnes_";
const WHEAT_FIELD: &str = "food_grains_cereals___wheat_000_tonnes_";
const MAIZE_FIELD: &str = "food_grains_cereals___maize_000_tonnes_";

const RAIN_YEAR_FIELD: &str = "year";
const SUB_DIVISION_FIELD: &str = "subdivision";
const ANNUAL_FIELD: &str = "annual";

/// Response envelope common to both endpoints.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    records: Vec<Value>,
}

/// Blocking HTTP client for the two endpoints.
pub struct DataClient {
    agent: ureq::Agent,
    settings: Settings,
}

impl DataClient {
    pub fn new(settings: Settings) -> Self {
        let agent = ureq::AgentBuilder::new().build();
        Self { agent, settings }
    }

    /// Fetch one dataset and normalize it into a DataFrame.
    pub fn fetch(&self, dataset: Dataset) -> Result<DataFrame> {
        let records = self.fetch_records(dataset)?;
        match dataset {
            Dataset::Agriculture => agriculture_frame(&records),
            Dataset::Rainfall => rainfall_frame(&records),
        }
    }

    fn fetch_records(&self, dataset: Dataset) -> Result<Vec<Value>> {
        let url = self.settings.endpoint(dataset);
        tracing::debug!("requesting up to {} records from {}", dataset.record_limit(), url);

        let response = self
            .agent
            .get(url)
            .query("api-key", &self.settings.api_key)
            .query("format", "json")
            .query("limit", &dataset.record_limit().to_string())
            .timeout(dataset.timeout())
            .call()
            .with_context(|| format!("request to '{}' failed", dataset.label()))?;

        let envelope: ApiEnvelope = response
            .into_json()
            .with_context(|| format!("malformed JSON from '{}'", dataset.label()))?;

        Ok(envelope.records)
    }
}

/// Normalize agriculture records into (Year, rice, wheat, maize).
///
/// Production values are coerced to numeric; a non-numeric cell becomes a
/// null rather than failing the row. Rows without a parseable year are
/// skipped since they can never join.
pub fn agriculture_frame(records: &[Value]) -> Result<DataFrame> {
    let mut years = Vec::with_capacity(records.len());
    let mut rice = Vec::with_capacity(records.len());
    let mut wheat = Vec::with_capacity(records.len());
    let mut maize = Vec::with_capacity(records.len());

    for record in records {
        let Some(year) = record.get(YEAR_FIELD).and_then(year_from_range) else {
            continue;
        };
        years.push(year);
        rice.push(numeric_field(record, RICE_FIELD));
        wheat.push(numeric_field(record, WHEAT_FIELD));
        maize.push(numeric_field(record, MAIZE_FIELD));
    }

    let frame = df!(
        sources::YEAR_COL => years,
        sources::RICE_COL => rice,
        sources::WHEAT_COL => wheat,
        sources::MAIZE_COL => maize,
    )
    .context("failed to assemble agriculture frame")?;

    Ok(frame)
}

/// Normalize rainfall records into (Year, Sub-Division, Annual Rainfall).
///
/// Rows whose raw sub-division contains the literal substring "ANNUAL" are
/// pre-aggregated totals in the feed, not genuine sub-divisions, and are
/// dropped. Sub-division names are canonicalized to upper-case.
pub fn rainfall_frame(records: &[Value]) -> Result<DataFrame> {
    let mut years = Vec::with_capacity(records.len());
    let mut sub_divisions = Vec::with_capacity(records.len());
    let mut rainfall = Vec::with_capacity(records.len());

    for record in records {
        let Some(raw_sub_division) = record.get(SUB_DIVISION_FIELD).and_then(Value::as_str)
        else {
            continue;
        };
        if raw_sub_division.contains("ANNUAL") {
            continue;
        }
        let Some(year) = record
            .get(RAIN_YEAR_FIELD)
            .and_then(coerce_numeric)
            .map(|y| y as i32)
        else {
            continue;
        };

        years.push(year);
        sub_divisions.push(raw_sub_division.to_uppercase());
        rainfall.push(numeric_field(record, ANNUAL_FIELD));
    }

    let frame = df!(
        sources::YEAR_COL => years,
        sources::SUB_DIVISION_COL => sub_divisions,
        sources::RAINFALL_COL => rainfall,
    )
    .context("failed to assemble rainfall frame")?;

    Ok(frame)
}

/// Extract a 4-digit year from a possibly hyphenated range.
///
/// "2001-02" -> 2001, "1999-2000" -> 1999, plain "1987" -> 1987.
pub fn year_from_range(value: &Value) -> Option<i32> {
    match value {
        Value::String(raw) => raw.split('-').next()?.trim().parse().ok(),
        Value::Number(n) => n.as_i64().map(|y| y as i32),
        _ => None,
    }
}

/// Coerce a JSON value to f64; anything non-numeric becomes None.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

fn numeric_field(record: &Value, field: &str) -> Option<f64> {
    record.get(field).and_then(coerce_numeric)
}
