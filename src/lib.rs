//! Samarth: crop production vs. regional rainfall Q&A
//!
//! Answers free-text questions that name one crop and one region by fetching
//! two public data.gov.in datasets (All-India crop production, sub-division
//! rainfall), joining them on year, and rendering a tabular comparison with
//! source citations.
//!
//! - `config`: environment-driven settings (API key is required)
//! - `sources`: static dataset descriptors and column names
//! - `fetch`: blocking HTTP fetchers and JSON-to-frame normalization
//! - `cache`: TTL table cache and the empty-table-on-failure entry point
//! - `query`: ordered keyword parsing of free-text questions
//! - `answer`: the join/sort/render pipeline and citations
//! - `chat`: caller-owned conversation log and the per-turn handler

pub mod answer;
pub mod cache;
pub mod chat;
pub mod config;
pub mod fetch;
pub mod query;
pub mod sources;

// Re-export commonly used types
pub use answer::{Answer, AnswerEngine, AnswerError};
pub use cache::DataService;
pub use chat::{History, Role, Turn};
pub use config::Settings;
pub use query::{parse_query, Crop, ParsedQuery, Region};
pub use sources::{Citation, Dataset};
