mod analytics;
mod config;
mod db;
mod error;
mod logging;
mod models;
mod record;
mod report;
mod run;

use anyhow::Result;

fn main() -> Result<()> {
    logging::setup_logging();

    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    let mut settings = config::Settings::from_env()?;
    let args = settings.apply_args(&raw_args)?;

    run::as_cli(&args, &settings, || db::Database::open(&settings.resolve_db_path()?))
}
