// Console chat entry point.
//
// Usage: DATA_GOV_API_KEY=... cargo run --bin samarth

use std::io::{self, BufRead, Write};

use samarth::chat::{self, History};
use samarth::config::Settings;
use samarth::query;
use samarth::AnswerEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "samarth=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing API key halts here with the diagnostic, before any query runs.
    let settings = Settings::from_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  agriculture endpoint: {}", settings.agriculture_url);
    tracing::info!("  rainfall endpoint: {}", settings.rainfall_url);
    tracing::info!("  cache TTL: {}s", settings.cache_ttl.as_secs());

    let engine = AnswerEngine::new(settings);
    let mut history = History::new();

    println!("Project Samarth");
    println!("Q&A on India's agricultural economy and climate.");
    println!();
    println!("Available crops: {}", query::supported_crops());
    println!("Available regions: {}", query::supported_regions());
    println!();
    println!("Example queries:");
    println!("  - Compare rice production and rainfall in Punjab");
    println!("  - show me data on wheat in uttar pradesh");
    println!("  - what is the maize production and rainfall in assam?");
    println!();
    println!("Type 'exit' to quit.");
    println!();

    let mut stdin = io::stdin().lock();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // EOF
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        let reply = chat::run_turn(&engine, &mut history, input);
        println!();
        println!("{}", reply.content);
        if !reply.sources.is_empty() {
            println!();
            println!("Sources:");
            for citation in &reply.sources {
                println!("  {}", citation.source);
                println!("    API endpoint: {}", citation.url);
            }
        }
        println!();
    }

    Ok(())
}
