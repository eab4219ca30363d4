//! QueryLens CLI
//!
//! ```bash
//! # Query logs and schema suggestions
//! querylens
//!
//! # Record a query
//! querylens submit -q "SELECT * FROM t" -t 1.5 --records 100 --indexes idx_t
//!
//! # Against another backend, as JSON
//! QUERYLENS_API_URL=http://db-insights:8000 querylens logs --json
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use querylens_lib::cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let ok = querylens_lib::run(args).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
