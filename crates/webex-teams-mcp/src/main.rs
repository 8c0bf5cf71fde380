//! Webex Teams MCP server entry point.

use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use webex_teams::{PersonRef, WebexApi};
use webex_teams_mcp::config::ServerConfig;
use webex_teams_mcp::protocol::ProtocolHandler;
use webex_teams_mcp::tools::ToolRegistry;
use webex_teams_mcp::transport::StdioTransport;

#[derive(Parser)]
#[command(
    name = "webex-teams-mcp",
    about = "MCP server exposing Webex Teams messaging, spaces, and people as tools",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve,

    /// Print server capabilities and tool names as JSON.
    Info,

    /// Verify WEBEX_ACCESS_TOKEN by fetching the authenticated identity.
    Check,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   webex-teams-mcp completions bash > ~/.local/share/bash-completion/completions/webex-teams-mcp
    ///   webex-teams-mcp completions zsh > ~/.zfunc/_webex-teams-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let api = connect()?;
            tracing::info!("Webex Teams MCP server v{}", env!("CARGO_PKG_VERSION"));
            let handler = ProtocolHandler::new(api);
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        Commands::Info => {
            let capabilities = webex_teams_mcp::types::InitializeResult::default_result();
            let tools = ToolRegistry::list_tools();
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Check => {
            let api = connect()?;
            let me = api
                .get_person(&PersonRef::Me)
                .await
                .context("Webex rejected the access token")?;
            let name = me.display_name.as_deref().unwrap_or(&me.id);
            println!("Connected to Webex as {name}");
            if let Some(email) = me.emails.first() {
                println!("  Email: {email}");
            }
            if let Some(org) = &me.org_id {
                println!("  Org: {org}");
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "webex-teams-mcp", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn connect() -> anyhow::Result<Arc<dyn WebexApi>> {
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::debug!("Using Webex API at {}", config.api_base);
    let client = config
        .build_client()
        .context("Failed to build Webex client")?;
    Ok(Arc::new(client))
}
