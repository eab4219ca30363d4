use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

pub mod api;
pub mod cli;
pub mod commands;
pub mod error;
pub mod models;
pub mod repl;
pub mod state;
pub mod validation;
pub mod view;

use api::HttpApiClient;
use cli::{Args, Command, ConfigAction};
use models::ClientSettings;
use state::AppState;

/// Resolve settings from the settings file and command-line overrides
pub fn initialize_settings(args: &Args) -> Result<(ClientSettings, PathBuf), String> {
    let path = args
        .settings
        .clone()
        .unwrap_or_else(commands::default_settings_path);

    let mut settings = commands::load_settings(&path)?;
    if let Some(ref base_url) = args.base_url {
        settings.api.base_url = base_url.clone();
    }

    Ok((settings, path))
}

/// Run one CLI invocation. Returns `false` when the command ended in an
/// error the user should see reflected in the exit status.
pub async fn run(args: Args) -> anyhow::Result<bool> {
    let (settings, settings_path) = initialize_settings(&args).map_err(anyhow::Error::msg)?;
    log::info!("Using backend at {}", settings.api.base_url);

    let api = Arc::new(HttpApiClient::new(&settings.api)?);
    let state = AppState::new(settings, settings_path, api);
    let display = state.settings.display.clone();

    let ok = match args.command.clone().unwrap_or(Command::Dashboard) {
        Command::Dashboard => {
            state.refresh_all().await;
            let logs = state.query_logs.snapshot();
            let suggestions = state.schema_suggestions.snapshot();
            let ok = logs.error.is_none() && suggestions.error.is_none();

            if args.json {
                print_json(&serde_json::json!({
                    "queryLogs": logs,
                    "schemaSuggestions": suggestions,
                }))?;
            } else {
                println!("{}", view::render_query_logs(&logs, &display));
                print!("{}", view::render_schema_suggestions(&suggestions));
            }
            ok
        }
        Command::Logs => {
            let snapshot = commands::load_query_logs(&state).await;
            if args.json {
                print_json(&snapshot)?;
            } else {
                print!("{}", view::render_query_logs(&snapshot, &display));
            }
            snapshot.error.is_none()
        }
        Command::Submit(submit) => {
            match commands::submit_query_log(&state, submit.into_form()).await {
                Ok(snapshot) => {
                    if args.json {
                        print_json(&snapshot)?;
                    } else {
                        print!("{}", view::render_query_logs(&snapshot, &display));
                    }
                    snapshot.error.is_none()
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    false
                }
            }
        }
        Command::Suggestions => {
            let snapshot = commands::load_schema_suggestions(&state).await;
            if args.json {
                print_json(&snapshot)?;
            } else {
                print!("{}", view::render_schema_suggestions(&snapshot));
            }
            snapshot.error.is_none()
        }
        Command::Export { path } => match commands::export_query_logs(&state, &path).await {
            Ok(result) => {
                if args.json {
                    print_json(&result)?;
                } else {
                    println!("Exported {} query logs to {}", result.rows_exported, path.display());
                }
                true
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                false
            }
        },
        Command::Config { action } => run_config(&state, action, args.json)?,
        Command::Repl => {
            repl::run_repl(&state).await?;
            true
        }
    };

    Ok(ok)
}

fn run_config(state: &AppState, action: ConfigAction, json: bool) -> anyhow::Result<bool> {
    match action {
        ConfigAction::Show => {
            if json {
                print_json(&state.settings)?;
            } else {
                println!("{}", serde_json::to_string_pretty(&state.settings)?);
            }
        }
        ConfigAction::Path => println!("{}", state.settings_path.display()),
        ConfigAction::SetBaseUrl { url } => {
            // Persist on top of the file contents, not the overridden settings
            let mut settings = commands::load_settings(&state.settings_path).map_err(anyhow::Error::msg)?;
            settings.api.base_url = url.trim_end_matches('/').to_string();
            commands::save_settings(&state.settings_path, &settings).map_err(anyhow::Error::msg)?;
            println!("Saved base URL {} to {}", settings.api.base_url, state.settings_path.display());
        }
    }
    Ok(true)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
