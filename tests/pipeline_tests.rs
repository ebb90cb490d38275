//! Pipeline Integration Tests
//!
//! Exercises the public fetch-normalize-merge-render pipeline on constructed
//! inputs, plus the full turn handler against unreachable endpoints. No test
//! here talks to the real data.gov.in API.

use polars::prelude::*;
use serde_json::json;

use samarth::answer::{merge_for_region, render_comparison};
use samarth::chat::{self, History};
use samarth::fetch::{agriculture_frame, rainfall_frame};
use samarth::{sources, AnswerEngine, Crop, Region, Role, Settings};

/// Raw API rows all the way to rendered text.
#[test]
fn normalized_feeds_merge_and_render() {
    let agriculture_records = vec![
        json!({
            "_year": "2015-16",
            "food_grains_cereals___rice_000_tonnes_": "104410",
            "food_grains_cereals___wheat_000_tonnes_": "92290",
            "food_grains_cereals___maize_000_tonnes_": "22570",
        }),
        json!({
            "_year": "2016-17",
            "food_grains_cereals___rice_000_tonnes_": "109700",
            "food_grains_cereals___wheat_000_tonnes_": "98510",
            "food_grains_cereals___maize_000_tonnes_": "25900",
        }),
        json!({
            "_year": "2017-18",
            "food_grains_cereals___rice_000_tonnes_": "112760",
            "food_grains_cereals___wheat_000_tonnes_": "99700",
            "food_grains_cereals___maize_000_tonnes_": "28750",
        }),
    ];
    let rainfall_records = vec![
        json!({"year": "2016", "subdivision": "Punjab", "annual": "479.6"}),
        json!({"year": "2017", "subdivision": "Punjab", "annual": "535.1"}),
        json!({"year": "2018", "subdivision": "Punjab", "annual": "462.8"}),
        json!({"year": "2017", "subdivision": "ANNUAL", "annual": "1117.0"}),
        json!({"year": "2017", "subdivision": "Kerala", "annual": "2850.2"}),
    ];

    let agriculture = agriculture_frame(&agriculture_records).unwrap();
    let rainfall = rainfall_frame(&rainfall_records).unwrap();

    let table = merge_for_region(&agriculture, &rainfall, Crop::Rice, Region::Punjab).unwrap();
    assert_eq!(table.height(), 2);

    let years = table.column(sources::YEAR_COL).unwrap().i32().unwrap();
    assert_eq!(years.get(0), Some(2017));
    assert_eq!(years.get(1), Some(2016));

    let text = render_comparison(&table, Crop::Rice, Region::Punjab).unwrap();
    assert!(text.contains("Rice Production (000 Tonnes)"));
    assert!(text.contains("PUNJAB"));
    assert!(text.contains("112760.0"));
    assert!(text.contains("535.1"));
    // The Kerala row must not leak into a Punjab answer.
    assert!(!text.contains("2850.2"));
}

#[test]
fn canonical_region_matches_any_input_casing() {
    let rainfall_records = vec![
        json!({"year": "2016", "subdivision": "punjab", "annual": "479.6"}),
    ];
    let rainfall = rainfall_frame(&rainfall_records).unwrap();
    let agriculture = df!(
        sources::YEAR_COL => [2016i32],
        sources::RICE_COL => [Some(104410.0)],
        sources::WHEAT_COL => [Some(92290.0)],
        sources::MAIZE_COL => [Some(22570.0)],
    )
    .unwrap();

    // "punjab" in the feed is canonicalized and joins against PUNJAB.
    let table = merge_for_region(&agriculture, &rainfall, Crop::Wheat, Region::Punjab).unwrap();
    assert_eq!(table.height(), 1);
}

/// A full turn against unreachable endpoints: fetches fail, the service
/// degrades to empty tables, and the reply is the fetch-error message with
/// zero citations. Nothing panics.
#[test]
fn turn_against_unreachable_endpoints_degrades_gracefully() {
    let mut settings = Settings::with_api_key("test-key");
    // Discard port on loopback; the connection is refused immediately.
    settings.agriculture_url = "http://127.0.0.1:9/resource/agriculture".to_string();
    settings.rainfall_url = "http://127.0.0.1:9/resource/rainfall".to_string();
    let engine = AnswerEngine::new(settings);

    let mut history = History::new();
    let reply = chat::run_turn(&engine, &mut history, "rice production in Punjab please");

    assert_eq!(reply.role, Role::Assistant);
    assert!(reply.content.contains("could not fetch data"));
    assert!(reply.sources.is_empty());
    assert_eq!(history.len(), 2);
}

#[test]
fn unparseable_turn_replies_with_guidance_and_no_sources() {
    let mut settings = Settings::with_api_key("test-key");
    settings.agriculture_url = "http://127.0.0.1:9/resource/agriculture".to_string();
    settings.rainfall_url = "http://127.0.0.1:9/resource/rainfall".to_string();
    let engine = AnswerEngine::new(settings);

    let mut history = History::new();
    let reply = chat::run_turn(&engine, &mut history, "how tall is the Eiffel Tower?");

    assert!(reply.content.contains("rice, wheat, maize"));
    assert!(reply.content.contains("PUNJAB, UTTAR PRADESH, HARYANA, KERALA, ASSAM"));
    assert!(reply.sources.is_empty());

    // One crop alone is not enough either; no fetch is attempted.
    let reply = chat::run_turn(&engine, &mut history, "tell me about wheat");
    assert!(reply.content.starts_with("Sorry"));
    assert_eq!(history.len(), 4);
}
