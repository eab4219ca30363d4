//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::PendingQueryForm;

/// QueryLens - record query metadata and review optimization suggestions
#[derive(Parser, Debug, Clone)]
#[command(name = "querylens")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Backend base URL (overrides the settings file)
    #[arg(long, global = true, env = "QUERYLENS_API_URL")]
    pub base_url: Option<String>,

    /// Settings file (default: <config dir>/querylens/settings.json)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Print snapshots as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Show informational log output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show query logs and schema suggestions side by side (default)
    Dashboard,

    /// Show recorded query logs with their optimization suggestions
    Logs,

    /// Record a new query log entry
    Submit(SubmitArgs),

    /// Show schema migration suggestions
    Suggestions,

    /// Write the current query logs to a CSV file
    Export {
        /// Destination file
        path: PathBuf,
    },

    /// Inspect or change persisted settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Fill in and submit entries interactively
    Repl,
}

/// Raw form values, validated by the query log store on submit
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitArgs {
    /// SQL text of the executed query
    #[arg(short = 'q', long = "query")]
    pub query_text: Option<String>,

    /// Execution time in seconds
    #[arg(short = 't', long)]
    pub execution_time: Option<String>,

    /// Number of records processed
    #[arg(short = 'r', long = "records")]
    pub records_processed: Option<String>,

    /// Indexes used by the query
    #[arg(short = 'i', long = "indexes")]
    pub indexes_used: Option<String>,

    /// Columns accessed by the query
    #[arg(short = 'c', long = "columns")]
    pub columns_accessed: Option<String>,
}

impl SubmitArgs {
    pub fn into_form(self) -> PendingQueryForm {
        PendingQueryForm {
            query_text: self.query_text.unwrap_or_default(),
            execution_time: self.execution_time.unwrap_or_default(),
            records_processed: self.records_processed.unwrap_or_default(),
            indexes_used: self.indexes_used.unwrap_or_default(),
            columns_accessed: self.columns_accessed.unwrap_or_default(),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the settings in effect
    Show,

    /// Print the settings file location
    Path,

    /// Persist a new backend base URL
    SetBaseUrl {
        url: String,
    },
}
