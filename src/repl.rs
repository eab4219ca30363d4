//! Interactive session over the query log form.
//!
//! Fields are edited one at a time with `set <field> <value>` and sent with
//! `submit`; a failed submission keeps the typed values for another try.

use std::io::{self, Write};

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::commands;
use crate::models::FormField;
use crate::state::AppState;
use crate::view;

const HELP: &str = "\
Commands:
  set <field> <value>   edit a form field (query_text, execution_time,
                        records_processed, indexes_used, columns_accessed)
  form                  show the pending form
  clear                 empty the pending form
  submit                validate and send the pending form
  refresh               re-fetch and show query logs
  show                  show query logs without fetching
  suggestions           fetch and show schema suggestions
  help                  show this help
  /quit, /exit, /q      leave";

#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Set(FormField, String),
    Form,
    Clear,
    Submit,
    Refresh,
    Show,
    Suggestions,
    Help,
    Quit,
    /// Malformed use of a known command
    Invalid(String),
    Unknown(String),
    Empty,
}

impl ReplCommand {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return ReplCommand::Empty;
        }

        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        match word.to_lowercase().as_str() {
            "/quit" | "/exit" | "/q" | "quit" | "exit" => ReplCommand::Quit,
            "set" => {
                let (name, value) = match rest.split_once(char::is_whitespace) {
                    Some((name, value)) => (name, value.trim()),
                    None => (rest, ""),
                };
                if name.is_empty() {
                    return ReplCommand::Invalid("Usage: set <field> <value>".to_string());
                }
                match name.parse::<FormField>() {
                    Ok(field) => ReplCommand::Set(field, value.to_string()),
                    Err(e) => ReplCommand::Invalid(e),
                }
            }
            "form" => ReplCommand::Form,
            "clear" => ReplCommand::Clear,
            "submit" => ReplCommand::Submit,
            "refresh" => ReplCommand::Refresh,
            "show" => ReplCommand::Show,
            "suggestions" => ReplCommand::Suggestions,
            "help" | "?" => ReplCommand::Help,
            _ => ReplCommand::Unknown(trimmed.to_string()),
        }
    }
}

/// Run until `/quit` or EOF. Both stores are fetched once on entry.
pub async fn run_repl(state: &AppState) -> Result<()> {
    eprintln!("querylens interactive mode ({})", state.settings.api.base_url);
    eprintln!("Type help for commands, /quit to exit\n");

    state.refresh_all().await;
    println!(
        "{}",
        view::render_query_logs(&state.query_logs.snapshot(), &state.settings.display)
    );
    println!(
        "{}",
        view::render_schema_suggestions(&state.schema_suggestions.snapshot())
    );

    read_commands(state, BufReader::new(tokio::io::stdin())).await
}

async fn read_commands<R>(state: &AppState, mut lines: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if lines.read_line(&mut input).await? == 0 {
            eprintln!();
            break;
        }

        match ReplCommand::parse(&input) {
            ReplCommand::Empty => continue,
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Set(field, value) => state.query_logs.set_field(field, value),
            ReplCommand::Form => print!("{}", view::render_form(&state.query_logs.form())),
            ReplCommand::Clear => state.query_logs.clear_form(),
            ReplCommand::Submit => match commands::submit_pending(state).await {
                Ok(snapshot) => {
                    println!("{}", view::render_query_logs(&snapshot, &state.settings.display))
                }
                Err(e) => eprintln!("Error: {}", e),
            },
            ReplCommand::Refresh => {
                let snapshot = commands::load_query_logs(state).await;
                println!("{}", view::render_query_logs(&snapshot, &state.settings.display));
            }
            ReplCommand::Show => println!(
                "{}",
                view::render_query_logs(&state.query_logs.snapshot(), &state.settings.display)
            ),
            ReplCommand::Suggestions => {
                let snapshot = commands::load_schema_suggestions(state).await;
                println!("{}", view::render_schema_suggestions(&snapshot));
            }
            ReplCommand::Invalid(message) => eprintln!("{}", message),
            ReplCommand::Unknown(cmd) => {
                eprintln!("Unknown command: {}", cmd);
                eprintln!("Type help for commands");
            }
        }
    }

    Ok(())
}
