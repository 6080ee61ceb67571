//! process-envelope CLI - main entry point.
//!
//! Subcommands:
//! - encapsulate: offline, read response/definition file -> envelope file + curl command
//! - fetch: authenticate and save a process read response
//! - update: authenticate, fetch, edit, build and submit in one go

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use process_envelope::api::{HttpProcessClient, ProcessApi, UpdateRequest, UpdateWorkflow};
use process_envelope::envelope::{
    apply_edits, export, import, FieldEdit, ProcessSummary, UpdateEnvelope,
};
use process_envelope::render::{curl_update_command, structure_overview};
use process_envelope::types::{ProcessId, TenantId};
use process_envelope::{Config, Error};

const PREVIEW_CHARS: usize = 300;

#[derive(Parser)]
#[command(name = "process-envelope")]
#[command(about = "Build and send Process Manager update payloads", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the Process Manager site
    #[arg(long, env = "PROMAPP_BASE_URL")]
    base_url: Option<String>,

    /// Tenant id (second URL segment)
    #[arg(long, env = "PROMAPP_TENANT_ID")]
    tenant_id: Option<TenantId>,

    #[arg(long, env = "PROMAPP_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "PROMAPP_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Wrap a saved process for the update endpoint (no network)
    Encapsulate {
        /// Read response or bare process definition (JSON)
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Where to write the envelope
        #[arg(short, long, default_value = "./user-payload-encapsulated.json")]
        output: PathBuf,

        /// Field edit applied before wrapping, e.g. --set Name="New name"
        #[arg(long = "set", value_name = "KEY=VALUE")]
        edits: Vec<FieldEdit>,

        /// Process id for the printed curl command (defaults to UniqueId)
        #[arg(long)]
        process_id: Option<ProcessId>,
    },

    /// Save a process read response to a file
    Fetch {
        #[arg(short, long)]
        process_id: ProcessId,

        #[arg(short, long, default_value = "./process.json")]
        output: PathBuf,
    },

    /// Fetch, edit and submit a process update
    Update {
        #[arg(short, long)]
        process_id: ProcessId,

        #[arg(short, long)]
        description: String,

        #[arg(long = "set", value_name = "KEY=VALUE")]
        edits: Vec<FieldEdit>,

        /// Cookie header for the login page
        #[arg(long)]
        cookie: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    process_envelope::observability::init_tracing(&config.observability);

    match cli.command {
        Commands::Encapsulate {
            input,
            description,
            output,
            edits,
            process_id,
        } => encapsulate(&config, &input, &description, &output, &edits, process_id)?,
        Commands::Fetch { process_id, output } => fetch(&config, &process_id, &output).await?,
        Commands::Update {
            process_id,
            description,
            edits,
            cookie,
        } => {
            let request = UpdateRequest {
                process_id,
                change_description: description,
                edits,
                cookies: cookie,
            };
            update(&config, &request).await?
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> process_envelope::Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.tenant.base_url = base_url.clone();
    }
    if let Some(tenant_id) = &cli.tenant_id {
        config.tenant.tenant_id = Some(tenant_id.clone());
    }
    if let Some(username) = &cli.username {
        config.credentials.username = username.clone();
    }
    if let Some(password) = &cli.password {
        config.credentials.password = password.clone();
    }
    config.observability.json_logs |= cli.json_logs;
    Ok(config)
}

fn encapsulate(
    config: &Config,
    input: &Path,
    description: &str,
    output: &Path,
    edits: &[FieldEdit],
    process_id: Option<ProcessId>,
) -> process_envelope::Result<()> {
    let bytes = std::fs::read(input)?;
    let mut process = import::process_definition_from_json(&bytes)?;

    println!("Loaded {}:", input.display());
    println!("{}", ProcessSummary::from_definition(&process));

    if !edits.is_empty() {
        apply_edits(&mut process, edits);
        println!("\nApplied {} field edit(s)", edits.len());
    }

    let envelope = UpdateEnvelope::build(&process, Some(description))?;
    export::write_to_file(&envelope, output)?;

    println!("\nEncapsulated payload structure:");
    println!("{}", serde_json::to_string_pretty(&structure_overview(&envelope))?);
    println!("\nPreview of stringified ProcessJson:");
    println!("  {}", envelope.process_json_preview(PREVIEW_CHARS));
    println!("\nSaved to: {}", output.display());

    let process_id = match process_id {
        Some(id) => Some(id),
        None => process
            .get("UniqueId")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse::<ProcessId>().ok()),
    };
    match (process_id, config.tenant.tenant_url()) {
        (Some(id), Ok(tenant_url)) => {
            let process_url = format!("{tenant_url}/Api/v1/Processes/{id}");
            println!("\nSend it with:\n\n{}", curl_update_command(&process_url, output));
        }
        (None, _) => tracing::warn!("no process id known; skipping curl command"),
        (_, Err(err)) => tracing::warn!(error = %err, "skipping curl command"),
    }
    Ok(())
}

async fn fetch(
    config: &Config,
    process_id: &ProcessId,
    output: &Path,
) -> process_envelope::Result<()> {
    require_credentials(config)?;
    let client = HttpProcessClient::new(config)?;

    let bearer = client.bearer_token(&config.credentials).await?;
    let response = client.get_process(process_id, &bearer).await?;

    std::fs::write(output, serde_json::to_vec_pretty(&response)?)?;
    println!("{}", ProcessSummary::from_definition(&response.process_json));
    println!("\nSaved read response to: {}", output.display());
    Ok(())
}

async fn update(config: &Config, request: &UpdateRequest) -> process_envelope::Result<()> {
    require_credentials(config)?;
    let client = HttpProcessClient::new(config)?;
    let workflow = UpdateWorkflow::new(client, config.credentials.clone());

    let (envelope, reply) = workflow.run(request).await?;
    println!(
        "Process {} updated ({} chars of ProcessJson sent)",
        request.process_id,
        envelope.process_json().chars().count()
    );
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}

fn require_credentials(config: &Config) -> process_envelope::Result<()> {
    if config.credentials.is_complete() {
        Ok(())
    } else {
        Err(Error::config(
            "username and password are required (PROMAPP_USERNAME / PROMAPP_PASSWORD)",
        ))
    }
}
