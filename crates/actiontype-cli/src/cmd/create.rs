use crate::cmd::list::print_list;
use crate::output::print_json;
use actiontype_core::{
    config::Config,
    payload::{Field, FormFields},
    session::AdminSession,
};
use anyhow::Context;
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Action type name (required)
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Version (one of the configured options, default from config)
    #[arg(long)]
    pub version: Option<String>,

    /// Schema payload type: JSON, AVRO or ProtoBuf
    #[arg(long = "payload-type", value_name = "TYPE")]
    pub payload_type: Option<String>,

    /// Schema payload JSON, or @path to read it from a file
    #[arg(long = "schema-payload", value_name = "JSON")]
    pub schema_payload: Option<String>,

    #[arg(long = "schema-arn")]
    pub schema_arn: Option<String>,

    /// SEAL ID (non-digits are dropped)
    #[arg(long = "seal-id")]
    pub seal_id: Option<String>,

    /// Deployment ID (non-digits are dropped)
    #[arg(long = "deployment-id")]
    pub deployment_id: Option<String>,

    #[arg(long = "application-name")]
    pub application_name: Option<String>,

    /// Destinations JSON, or @path to read it from a file
    #[arg(long, value_name = "JSON")]
    pub destinations: Option<String>,

    /// Pretty-print the JSON fields before building
    #[arg(long)]
    pub format: bool,

    /// Commit after review (without it the record is only previewed)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl CreateArgs {
    fn edits(&self) -> anyhow::Result<Vec<(Field, String)>> {
        let values = [
            (Field::Name, &self.name),
            (Field::Description, &self.description),
            (Field::Version, &self.version),
            (Field::SchemaPayloadType, &self.payload_type),
            (Field::SchemaPayload, &self.schema_payload),
            (Field::SchemaArn, &self.schema_arn),
            (Field::SealId, &self.seal_id),
            (Field::DeploymentId, &self.deployment_id),
            (Field::ApplicationName, &self.application_name),
            (Field::Destinations, &self.destinations),
        ];

        let mut edits = Vec::new();
        for (field, value) in values {
            let Some(v) = value else { continue };
            let text = if field.is_structured() {
                read_inline_or_file(field, v)?
            } else {
                v.clone()
            };
            edits.push((field, text));
        }
        Ok(edits)
    }
}

fn read_inline_or_file(field: Field, value: &str) -> anyhow::Result<String> {
    match value.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {field} from {path}")),
        None => Ok(value.to_string()),
    }
}

/// Echo what was entered so a rejected form can be corrected in one go.
fn print_form_values(fields: &FormFields) {
    eprintln!("Form values:");
    for &field in Field::all() {
        let text = fields.text(field);
        if !text.trim().is_empty() {
            eprintln!("  {field}: {text}");
        }
    }
}

pub fn run(root: &Path, args: CreateArgs, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let mut session = AdminSession::from_config(&config);

    let flow = session.open_create();
    for (field, value) in args.edits()? {
        flow.edit(field, &value)
            .with_context(|| format!("cannot set {field}"))?;
        let stored = flow.fields().text(field);
        if field.is_numeric() && stored != value {
            eprintln!("warning: {field}: non-digits dropped, using '{stored}'");
        }
    }
    if args.format {
        flow.format(Field::SchemaPayload);
        flow.format(Field::Destinations);
    }
    let fields = flow.fields();
    for (field, text) in [
        (Field::SchemaPayload, &fields.schema_payload),
        (Field::Destinations, &fields.destinations),
    ] {
        if let Some(err) = text.error() {
            eprintln!("warning: {field}: {err}");
        }
    }

    let preview = match session.submit().map(|gate| gate.preview()) {
        Ok(preview) => preview?,
        Err(e) if e.is_validation() => {
            if let Some(flow) = session.flow() {
                print_form_values(flow.fields());
            }
            return Err(anyhow::Error::new(e).context("action type is not valid"));
        }
        Err(e) => return Err(e.into()),
    };

    if !args.yes {
        session.dismiss();
        if json {
            println!("{preview}");
        } else {
            println!("Review Action Type JSON:");
            println!("{preview}");
            println!("\nDry run: nothing was committed. Re-run with --yes to save.");
        }
        return Ok(());
    }

    tracing::info!(transport = %session.transport().describe(), "committing action type");
    let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let added = rt
        .block_on(session.confirm())
        .context("failed to commit action type")?
        .clone();

    if json {
        print_json(&added)?;
    } else {
        println!("Created action type {}: {}", added.id, added.name);
        println!();
        print_list(&session, false)?;
    }
    Ok(())
}
