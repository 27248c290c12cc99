use crate::output::print_json;
use actiontype_core::{config::Config, session::AdminSession, AdminError};
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let mut session = AdminSession::from_config(&config);

    if !session.select(id) {
        return Err(AdminError::ActionTypeNotFound(id.to_string()).into());
    }
    let record = session
        .registry()
        .selected()
        .ok_or_else(|| AdminError::ActionTypeNotFound(id.to_string()))?;

    if json {
        return print_json(record);
    }

    println!("{}", record.name);
    println!("Version {}  {}", record.version(), record.payload_type());
    println!();
    println!("Action Type JSON:");
    println!("{}", record.to_pretty_json()?);
    Ok(())
}
