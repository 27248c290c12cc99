use crate::output::print_json;
use actiontype_core::{
    config::{Config, TransportConfig, WarnLevel},
    paths,
};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Write a default .actiontypes/config.yaml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Choose where confirmed action types are sent
    SetTransport {
        /// Transport type: stub or http
        #[arg(long = "type", value_name = "TYPE")]
        transport_type: String,
        /// Endpoint URL (for http)
        #[arg(long)]
        endpoint: Option<String>,
        /// Request timeout in seconds (for http)
        #[arg(long)]
        timeout: Option<u64>,
        /// Simulated latency in milliseconds (for stub)
        #[arg(long)]
        latency_ms: Option<u64>,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Init { force } => init(root, force),
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
        ConfigSubcommand::SetTransport {
            transport_type,
            endpoint,
            timeout,
            latency_ms,
        } => set_transport(root, &transport_type, endpoint, timeout, latency_ms),
    }
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(root: &Path, force: bool) -> anyhow::Result<()> {
    let path = paths::config_path(root);
    if force {
        Config::default().save(root).context("failed to save config")?;
    } else if !Config::init(root).context("failed to write config")? {
        println!("Config already exists at {} (use --force to overwrite).", path.display());
        return Ok(());
    }
    println!("Wrote {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;

    if json {
        return print_json(&config);
    }

    println!("Versions:          {}", config.form.versions.join(", "));
    println!("Default version:   {}", config.form.default_version);
    println!("Default type:      {}", config.form.default_payload_type);
    println!("Transport:         {}", transport_display(&config.transport));
    Ok(())
}

fn transport_display(transport: &TransportConfig) -> String {
    match transport {
        TransportConfig::Stub {
            latency_ms,
            fail_with,
        } => {
            let fail = fail_with
                .as_ref()
                .map(|r| format!(", always fails: {r}"))
                .unwrap_or_default();
            format!("stub ({latency_ms}ms{fail})")
        }
        TransportConfig::Http {
            endpoint,
            timeout_seconds,
        } => format!("http ({endpoint}, timeout: {timeout_seconds}s)"),
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// set-transport
// ---------------------------------------------------------------------------

fn parse_transport(
    type_str: &str,
    endpoint: Option<String>,
    timeout: Option<u64>,
    latency_ms: Option<u64>,
) -> anyhow::Result<TransportConfig> {
    match type_str {
        "stub" => Ok(TransportConfig::Stub {
            latency_ms: latency_ms.unwrap_or(500),
            fail_with: None,
        }),
        "http" => {
            let endpoint = endpoint
                .ok_or_else(|| anyhow::anyhow!("--endpoint is required for http transport"))?;
            Ok(TransportConfig::Http {
                endpoint,
                timeout_seconds: timeout.unwrap_or(30),
            })
        }
        other => anyhow::bail!("unknown transport type '{other}'; valid: stub, http"),
    }
}

fn set_transport(
    root: &Path,
    transport_type: &str,
    endpoint: Option<String>,
    timeout: Option<u64>,
    latency_ms: Option<u64>,
) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(root).context("failed to load config")?;
    config.transport = parse_transport(transport_type, endpoint, timeout, latency_ms)?;
    config.save(root).context("failed to save config")?;
    println!("Transport set to {}.", transport_display(&config.transport));
    Ok(())
}
