// File: services/careflow_runner/src/main.rs
use careflow_client::CareFlowClient;
use careflow_config::{api_key, ensure_dotenv_loaded, load_config};
use careflow_scenario::ScenarioRunner;
use chrono::NaiveDate;
use std::env;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Date used when neither the CLI nor the config supplies one.
const FALLBACK_DATE: &str = "2025-09-01";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    ensure_dotenv_loaded();
    init_tracing();

    let config = load_config().expect("Failed to load config");

    // One optional positional argument: the date to query slots for.
    let date = env::args().nth(1).unwrap_or_else(|| {
        config
            .runner
            .default_date
            .clone()
            .unwrap_or_else(|| FALLBACK_DATE.to_string())
    });
    if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
        error!("Invalid date argument '{}' (expected YYYY-MM-DD)", date);
        process::exit(1);
    }

    let Some(api_key) = api_key() else {
        error!("CAREFLOW_API_KEY is not set. All requests would be 401.");
        process::exit(1);
    };

    let client = match CareFlowClient::new(&config.api.base_url, &api_key, config.api.timeout_seconds)
    {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to build CareFlow client: {}", err);
            process::exit(1);
        }
    };

    info!(
        "Running CareFlow scenario against {} for {}",
        config.api.base_url, date
    );
    let runner = ScenarioRunner::new(client, &config.runner);
    match runner.run(&date).await {
        Ok(outcome) => {
            info!("Scenario finished: {:?}", outcome);
            process::exit(outcome.exit_code());
        }
        Err(err) => {
            error!("Scenario aborted: {}", err);
            process::exit(1);
        }
    }
}
