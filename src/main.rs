mod assistant;
mod budget;
mod categorize;
mod config;
mod db;
mod import;
mod models;
mod run;
mod store;

use anyhow::Result;

use config::Config;
use store::FinanceStore;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::load();
    init_tracing(&config.log_filter);

    if args.len() < 2 {
        run::print_usage();
        return Ok(());
    }

    let db = db::Database::open(&config.db_path()?)?;
    let mut store = FinanceStore::with_key(db, &config.storage_key);
    run::as_cli(&args, &mut store, &config.rule_table())
}

fn init_tracing(filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("Warning: invalid log filter '{filter}': {e}");
        EnvFilter::new(config::DEFAULT_LOG_FILTER)
    });
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
