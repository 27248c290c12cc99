use crate::output::{print_json, print_table};
use actiontype_core::{config::Config, session::AdminSession};
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let session = AdminSession::from_config(&config);
    print_list(&session, json)
}

/// Master list of the session's registry. Shared with `create --yes`.
pub fn print_list(session: &AdminSession, json: bool) -> anyhow::Result<()> {
    let summaries = session.registry().summaries();

    if json {
        return print_json(&summaries);
    }

    if summaries.is_empty() {
        println!("No action types yet.");
        return Ok(());
    }

    println!("Action Types ({})", summaries.len());
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            vec![
                if s.selected { "*".to_string() } else { String::new() },
                s.id.clone(),
                s.name.clone(),
                s.version_badge(),
                s.schema_payload_type.to_string(),
            ]
        })
        .collect();
    print_table(&["", "ID", "NAME", "VERSION", "TYPE"], &rows);
    Ok(())
}
