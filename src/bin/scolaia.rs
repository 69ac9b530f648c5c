//! scolaia CLI: run the API server, or search and chat from a terminal.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scolaia_rs::catalog::Catalog;
use scolaia_rs::chat::{ChatResponseBuilder, Conversation, MessageFactory};
use scolaia_rs::config::Config;
use scolaia_rs::config::secrets::presence;
use scolaia_rs::config::{LlmConfig, ProviderConfig};
use scolaia_rs::llm::client_from_config;
use scolaia_rs::search::build_global_search;
use scolaia_rs::server::{AppState, router, serve};
use scolaia_rs::telemetry::{TelemetryConfig, init_telemetry};
use std::io::Write as _;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::io::AsyncBufReadExt as _;

#[derive(Parser)]
#[command(name = "scolaia", about = "Scolaia content and planning assistant backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        /// JSON catalog file (overrides CATALOG_PATH)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Search every catalog collection
    Search {
        /// Free-text query
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Ask the planning assistant; starts an interactive session without a prompt
    Chat {
        /// Prompt text
        prompt: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "scolaia".to_string(),
        log_level: config.log_level.clone(),
    })?;

    match cli.command {
        Command::Serve { port, catalog } => cmd_serve(config, port, catalog).await,
        Command::Search { query } => cmd_search(&config, &query.join(" ")),
        Command::Chat { prompt } => cmd_chat(&config, &prompt.join(" ")).await,
    }
}

fn load_catalog(path: Option<&PathBuf>) -> anyhow::Result<Catalog> {
    let catalog = match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading catalog");
            Catalog::load_from_file(path)
                .with_context(|| format!("loading catalog {}", path.display()))?
        }
        None => Catalog::builtin()?,
    };
    Ok(catalog)
}

fn chat_builder(llm: &LlmConfig) -> anyhow::Result<ChatResponseBuilder> {
    match &llm.provider {
        Some(provider) => {
            let api_key = match provider {
                ProviderConfig::Groq { api_key, .. }
                | ProviderConfig::HuggingFace { api_key, .. }
                | ProviderConfig::Bedrock { api_key, .. } => api_key,
            };
            tracing::info!(
                provider = %provider.kind(),
                model = provider.model(),
                api_key = presence(Some(api_key)),
                "upstream language model configured"
            );
        }
        None => match llm.incomplete_provider {
            Some(kind) => tracing::warn!(
                provider = %kind,
                "LLM_PROVIDER set but credentials are incomplete, chat uses fallback replies"
            ),
            None => {
                tracing::info!("no upstream language model configured, chat uses fallback replies")
            }
        },
    }

    let client = client_from_config(llm)?;
    Ok(ChatResponseBuilder::from_config(client, llm))
}

async fn cmd_serve(
    config: Config,
    port: Option<u16>,
    catalog: Option<PathBuf>,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog.as_ref().or(config.catalog_path.as_ref()))?;
    let chat = chat_builder(&config.llm)?;

    let app = router(AppState::new(catalog, chat), &config.api_prefix);
    let addr = SocketAddr::from(([0, 0, 0, 0], port.unwrap_or(config.port)));
    serve(app, addr).await?;
    Ok(())
}

fn cmd_search(config: &Config, query: &str) -> anyhow::Result<()> {
    let catalog = load_catalog(config.catalog_path.as_ref())?;
    let groups = build_global_search(query, &catalog);

    if groups.is_empty() {
        println!("No results for \"{query}\".");
        return Ok(());
    }

    for group in &groups {
        println!("{} ({})", group.label, group.results.len());
        for item in &group.results {
            match &item.meta {
                Some(meta) if !meta.is_empty() => {
                    println!("  {:<36}  {}  [{meta}]", item.id, item.title)
                }
                _ => println!("  {:<36}  {}", item.id, item.title),
            }
        }
        println!();
    }
    Ok(())
}

async fn cmd_chat(config: &Config, prompt: &str) -> anyhow::Result<()> {
    let builder = chat_builder(&config.llm)?;

    if !prompt.trim().is_empty() {
        let response = builder.respond_to_prompt(prompt).await;
        println!("{}", response.reply);
        return Ok(());
    }

    let mut conversation = Conversation::with_greeting(MessageFactory::default());
    println!("{}", conversation.messages()[0].content);
    println!("(empty line to skip, \"exit\" to quit)\n");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        conversation.push_user(line);
        let response = builder.respond(&conversation.turns()).await;
        let message = conversation.push_assistant(response.reply);
        println!("\n{}\n", message.content);
    }
    Ok(())
}
