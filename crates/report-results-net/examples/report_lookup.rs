//! Look up one report and print every flattened field.
//!
//! ```text
//! export REPORT_RESULTS_API_ENDPOINT=https://api.example.com/graphql
//! export REPORT_RESULTS_API_KEY=...
//! cargo run -p report-results-net --example report_lookup -- 1206489210
//! ```
//!
//! Set `RUST_LOG=report_results_net=debug` to see request tracing.

use std::process::ExitCode;

use report_results_net::{ReportClient, ReportConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_REPORT_NUMBER: &str = "1206489210";
const GRAPHQL_QUERY_FILE: &str = "graphql_query/report_results.graphql";

fn heading(title: &str) {
    println!("{title}");
    println!("{}", "-".repeat(title.len()));
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match ReportConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let query = match ReportConfig::load_query(GRAPHQL_QUERY_FILE) {
        Ok(query) => query,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let report_number = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_REPORT_NUMBER.to_string());

    println!("Looking up report number: {report_number}\n");

    let client = match ReportClient::new(&config, query) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    heading("JSON PAYLOAD TO BE POSTED TO THE SERVER");
    match client.payload(&report_number).to_pretty_json() {
        Ok(json) => println!("{json}\n"),
        Err(err) => eprintln!("{err}"),
    }

    let response = match client.lookup_blocking(&report_number) {
        Ok(response) => response,
        Err(err) if err.is_transport() => {
            eprintln!("Error accessing {}: {err}", config.endpoint);
            eprintln!("Check your network connection and the API endpoint URL.");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    heading("JSON RESPONSE RECEIVED FROM THE API");
    println!("{}\n", response.pretty_body());
    println!("Returned in {:.3}s\n", response.elapsed().as_secs_f64());

    if let Some(err) = response.http_error() {
        println!("HTTP error returned by the API: {err}\n");
    }
    for message in response.error_messages() {
        println!("Error processing request: {message}\n");
    }

    heading("PARSED REPORT RESULTS");
    print!("{}", response.flat());

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
