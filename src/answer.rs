//! Answer Engine
//!
//! Joins All-India production with regional rainfall on year and renders the
//! comparison as a fixed-width table plus source citations.
//!
//! The merge and rendering steps are pure functions of their input frames so
//! they can be exercised without a network.

use polars::prelude::*;
use thiserror::Error;

use crate::cache::DataService;
use crate::config::Settings;
use crate::query::{Crop, Region};
use crate::sources::{self, Citation, Dataset};

/// At most this many of the most recent overlapping years are rendered.
pub const MAX_ROWS: usize = 10;

/// Reasons an otherwise well-formed question cannot be answered. Each one
/// renders as a normal conversational reply with zero citations; none of
/// these crash a turn, and none are retried here.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("could not fetch data from one or more sources")]
    Fetch,

    /// The region comes from a fixed supported list, so this points at a
    /// transient gap in the rainfall feed rather than a parser fault.
    #[error("could not find rainfall data for region '{0}'")]
    RegionNotFound(String),

    #[error("data fetched, but no overlapping years found")]
    NoOverlap,

    #[error("table operation failed: {0}")]
    Table(#[from] PolarsError),
}

/// A rendered reply and its attributions.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// Fetches both datasets (through the cache) and composes answers.
pub struct AnswerEngine {
    data: DataService,
    citations: [Citation; 2],
}

impl AnswerEngine {
    pub fn new(settings: Settings) -> Self {
        // Fixed citation order: production first, rainfall second. URLs
        // reflect the endpoints actually queried.
        let citations = [
            Citation {
                source: Dataset::Agriculture.label().to_string(),
                url: settings.agriculture_url.clone(),
            },
            Citation {
                source: Dataset::Rainfall.label().to_string(),
                url: settings.rainfall_url.clone(),
            },
        ];
        Self {
            data: DataService::new(settings),
            citations,
        }
    }

    /// Answer a resolved (crop, region) question.
    ///
    /// The two fetches run sequentially; a failure on either side surfaces
    /// immediately as [`AnswerError::Fetch`].
    pub fn answer(&self, crop: Crop, region: Region) -> Result<Answer, AnswerError> {
        let agriculture = self.data.table(Dataset::Agriculture);
        let rainfall = self.data.table(Dataset::Rainfall);

        let table = merge_for_region(&agriculture, &rainfall, crop, region)?;
        let text = render_comparison(&table, crop, region)?;

        Ok(Answer {
            text,
            citations: self.citations.to_vec(),
        })
    }
}

/// Filter rainfall to one region, inner-join with production on year, and
/// keep the [`MAX_ROWS`] most recent complete rows, newest first.
///
/// A merged row only survives if both the requested crop's production value
/// and the rainfall value are present for that year.
pub fn merge_for_region(
    agriculture: &DataFrame,
    rainfall: &DataFrame,
    crop: Crop,
    region: Region,
) -> Result<DataFrame, AnswerError> {
    if agriculture.height() == 0 || rainfall.height() == 0 {
        return Err(AnswerError::Fetch);
    }

    let region_rainfall = rainfall
        .clone()
        .lazy()
        .filter(col(sources::SUB_DIVISION_COL).eq(lit(region.canonical())))
        .collect()?;
    if region_rainfall.height() == 0 {
        return Err(AnswerError::RegionNotFound(region.canonical().to_string()));
    }

    let merged = agriculture
        .clone()
        .lazy()
        .join(
            region_rainfall.lazy(),
            [col(sources::YEAR_COL)],
            [col(sources::YEAR_COL)],
            JoinArgs::new(JoinType::Inner),
        )
        .select([
            col(sources::YEAR_COL),
            col(crop.column()),
            col(sources::RAINFALL_COL),
        ])
        .filter(
            col(crop.column())
                .is_not_null()
                .and(col(sources::RAINFALL_COL).is_not_null()),
        )
        .collect()?;
    if merged.height() == 0 {
        return Err(AnswerError::NoOverlap);
    }

    let table = merged
        .lazy()
        .sort(
            [sources::YEAR_COL],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .limit(MAX_ROWS as IdxSize)
        .collect()?;

    Ok(table)
}

/// Render the merged table as a one-line summary plus a right-aligned,
/// fixed-width three-column table.
pub fn render_comparison(
    table: &DataFrame,
    crop: Crop,
    region: Region,
) -> Result<String, AnswerError> {
    let years = table.column(sources::YEAR_COL)?.i32()?;
    let production = table.column(crop.column())?.f64()?;
    let rainfall = table.column(sources::RAINFALL_COL)?.f64()?;

    let mut rows = Vec::with_capacity(table.height());
    for idx in 0..table.height() {
        let (Some(year), Some(prod), Some(rain)) =
            (years.get(idx), production.get(idx), rainfall.get(idx))
        else {
            continue;
        };
        rows.push([year.to_string(), format!("{prod:.1}"), format!("{rain:.1}")]);
    }

    let headers = [
        sources::YEAR_COL.to_string(),
        crop.column().to_string(),
        sources::RAINFALL_COL.to_string(),
    ];
    let mut widths = [headers[0].len(), headers[1].len(), headers[2].len()];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(&headers, &widths));
    for row in &rows {
        lines.push(format_row(row, &widths));
    }

    let mut text = format!(
        "Here is the comparison for {} (All-India) vs. rainfall in {} (last {} available years):\n\n",
        crop.column(),
        region.canonical(),
        MAX_ROWS,
    );
    text.push_str(&lines.join("\n"));
    Ok(text)
}

fn format_row(cells: &[String; 3], widths: &[usize; 3]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{cell:>width$}"))
        .collect::<Vec<_>>()
        .join("  ")
}
