//! Line-oriented console front-end
//!
//! Each input line is one command; after it runs the whole view (flash, form, results)
//! is printed again.

use std::fmt::Write as _;

use crate::{
    controller::RecommendationController,
    error::ClientResult,
    models::RecommendationType,
    services::RecommendationApi,
    view::{FormField, RowAction},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(FormField, String),
    Show,
    Create,
    Retrieve,
    Update,
    Delete,
    Search,
    Row(RowAction),
    Refresh,
    Clear,
    Health,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));

        let command = match verb.to_lowercase().as_str() {
            "" | "show" => Command::Show,
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(field, value)| (field, value.trim()))
                    .unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err("usage: set <field> <value>".to_string());
                }
                Command::Set(field.parse()?, value.to_string())
            }
            "create" => Command::Create,
            "retrieve" | "get" => Command::Retrieve,
            "update" => Command::Update,
            "delete" => Command::Delete,
            "search" => Command::Search,
            "like" => Command::Row(RowAction::Like {
                row: parse_row(rest)?,
            }),
            "dislike" => Command::Row(RowAction::Dislike {
                row: parse_row(rest)?,
            }),
            "refresh" => Command::Refresh,
            "clear" => Command::Clear,
            "health" => Command::Health,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: {} (try `help`)", other)),
        };

        Ok(command)
    }
}

fn parse_row(arg: &str) -> Result<usize, String> {
    arg.parse()
        .map_err(|_| format!("expected a row number, got `{}`", arg))
}

/// Runs one command; failures are already reflected in the flash area
pub async fn execute<A: RecommendationApi>(
    controller: &mut RecommendationController<A>,
    command: Command,
) {
    let result: ClientResult<()> = match command {
        Command::Set(field, value) => {
            controller.set_field(field, value);
            Ok(())
        }
        Command::Create => controller.create().await.map(|_| ()),
        Command::Retrieve => controller.retrieve().await.map(|_| ()),
        Command::Update => controller.update().await.map(|_| ()),
        Command::Delete => controller.delete().await,
        Command::Search => controller.search().await.map(|_| ()),
        Command::Row(action) => controller.dispatch(action).await.map(|_| ()),
        Command::Refresh => controller.refresh().await,
        Command::Clear => {
            controller.clear_form();
            Ok(())
        }
        Command::Health => controller.health().await.map(|_| ()),
        Command::Show | Command::Help | Command::Quit => Ok(()),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Command failed");
    }
}

/// Flash message, form and results table as printed after every command
pub fn render_view<A: RecommendationApi>(controller: &RecommendationController<A>) -> String {
    let mut out = String::new();

    if let Some(message) = controller.flash().message() {
        let _ = writeln!(out, ">> {}", message);
    }
    let _ = writeln!(out, "Recommendation");
    let _ = write!(out, "{}", controller.form());
    if let Some(query) = controller.last_search() {
        let _ = writeln!(out, "Results for `{}`", query);
        let _ = write!(out, "{}", controller.results());
    }

    out
}

pub fn help_text() -> String {
    let fields: Vec<&str> = FormField::ALL.iter().map(FormField::key).collect();
    let types: Vec<&str> = RecommendationType::ALL
        .iter()
        .map(RecommendationType::as_str)
        .collect();

    format!(
        "Commands:
  set <field> <value>   edit a form field ({})
  show                  print the form and results
  create                create a recommendation from the form
  retrieve              load the recommendation named by rec_id
  update                save the form over rec_id
  delete                delete the recommendation named by rec_id
  search                search with the non-empty fields
  like <row>            add a like to a result row
  dislike <row>         add a dislike to a result row
  refresh               re-run the last search
  clear                 clear the form and message
  health                check the service
  quit                  leave
Known types: {}",
        fields.join(", "),
        types.join(", ")
    )
}
