mod input;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use mdk_core::config::{load_client_config, try_load_client_config};
use mdk_core::prelude::*;
use mdk_memory_native::MdkMemoryNative;
use serde_json::json;

#[derive(Debug, Parser)]
#[command(name = "mdk")]
#[command(about = "Decode MDK message envelopes and reconcile reactions")]
struct Cli {
    /// Client configuration file (JSON). Missing or invalid files fall back to defaults.
    #[arg(long, env = "MDK_CONFIG")]
    config: Option<PathBuf>,

    /// Fail instead of falling back to defaults when the configuration is invalid
    #[arg(long)]
    strict_config: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode every envelope and print one summary per message, newest first
    Decode {
        /// Input file: a JSON array of envelopes or one envelope per line (default: stdin)
        input: Option<PathBuf>,
    },

    /// Print the reaction aggregate of the envelopes
    Reactions {
        /// Input file: a JSON array of envelopes or one envelope per line (default: stdin)
        input: Option<PathBuf>,

        /// Address of the local account, used for `includesSelf`
        #[arg(long, default_value = "")]
        me: String,
    },

    /// List the content types the client can decode
    ContentTypes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = client_config(&cli)?;

    match &cli.cmd {
        Command::Decode { input } => cmd_decode(config, input.as_deref()).await,
        Command::Reactions { input, me } => cmd_reactions(config, input.as_deref(), me).await,
        Command::ContentTypes => cmd_content_types(config),
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn client_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    match (&cli.config, cli.strict_config) {
        (Some(path), true) => try_load_client_config(path)
            .with_context(|| format!("load config {}", path.display())),
        (Some(path), false) => Ok(load_client_config(path)),
        (None, _) => Ok(ClientConfig::default()),
    }
}

/// Client over an in-memory conversation holding the input envelopes
fn open(
    config: ClientConfig,
    path: Option<&Path>,
    self_address: &str,
) -> anyhow::Result<(Client<MdkMemoryNative>, ConversationId)> {
    let raw = input::read_input(path)?;
    let envelopes = input::parse_envelopes(&raw)?;

    let native = MdkMemoryNative::new(self_address);
    let conversation = ConversationId::from("input");
    let stored = input::load_envelopes(&native, &conversation, envelopes);
    tracing::debug!(stored, "Loaded envelopes");

    let client = Client::builder(native)
        .with_config(config)
        .build()
        .context("build client")?;
    Ok((client, conversation))
}

fn print(v: serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&v).context("json encode")?);
    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────────

async fn cmd_decode(config: ClientConfig, path: Option<&Path>) -> anyhow::Result<()> {
    let (client, conversation) = open(config, path, "")?;
    let messages = client
        .all_messages(&conversation)
        .await
        .context("load messages")?;

    let rendered: Vec<serde_json::Value> = messages
        .iter()
        .map(|message| render::message_json(message, client.registry()))
        .collect();
    print(json!(rendered))
}

async fn cmd_reactions(
    config: ClientConfig,
    path: Option<&Path>,
    me: &str,
) -> anyhow::Result<()> {
    let (client, conversation) = open(config, path, me)?;
    let aggregate = client
        .reactions(&conversation)
        .await
        .context("reconcile reactions")?;
    print(serde_json::to_value(&aggregate).context("json encode")?)
}

fn cmd_content_types(config: ClientConfig) -> anyhow::Result<()> {
    let client = Client::builder(MdkMemoryNative::new(""))
        .with_config(config)
        .build()
        .context("build client")?;
    let types: Vec<String> = client
        .registry()
        .content_types()
        .iter()
        .map(ToString::to_string)
        .collect();
    print(json!(types))
}
