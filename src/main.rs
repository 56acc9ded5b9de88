use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use issue_analyzer::config::{DEFAULT_GITHUB_API_URL, DEFAULT_OPENAI_API_URL};
use issue_analyzer::{api, mcp, Config, Services};

#[derive(Parser)]
#[command(name = "issue-analyzer")]
#[command(about = "Cache a GitHub repository's open issues and ask an LLM about them")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ConfigArgs {
    /// GitHub access token used to list issues
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    github_token: Option<String>,

    /// OpenAI API key used for analysis
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    openai_api_key: Option<String>,

    /// Path to the issue store (defaults to the platform data directory)
    #[arg(long, env = "ISSUE_ANALYZER_DB", global = true)]
    database: Option<PathBuf>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL, global = true)]
    github_api_url: String,

    /// OpenAI API base URL
    #[arg(long, env = "OPENAI_API_URL", default_value = DEFAULT_OPENAI_API_URL, global = true)]
    openai_api_url: String,
}

impl From<ConfigArgs> for Config {
    fn from(args: ConfigArgs) -> Self {
        Config {
            github_token: args.github_token,
            openai_api_key: args.openai_api_key,
            database_path: args.database,
            github_api_url: args.github_api_url,
            openai_api_url: args.openai_api_url,
        }
        .normalized()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Start MCP server via stdio
    Mcp,
    /// Fetch and cache the open issues of a repository
    Scan {
        /// Repository in owner/name form
        repo: String,
    },
    /// Ask a question about a repository's cached issues
    Analyze {
        /// Repository in owner/name form
        repo: String,
        /// Question or instruction for the analysis
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "issue_analyzer=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from(cli.config);
    config.warn_missing_credentials();

    let services = Services::open(&config)?;

    match cli.command.unwrap_or(Commands::Serve {
        host: "127.0.0.1".into(),
        port: 3000,
    }) {
        Commands::Serve { host, port } => serve(services, &host, port).await?,
        Commands::Mcp => mcp::run_stdio_server(services).await?,
        Commands::Scan { repo } => {
            let result = services.scanner.scan(&repo).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Analyze { repo, prompt } => {
            let result = services.analyzer.analyze(&repo, &prompt).await?;
            println!("{}", result.analysis);
        }
    }

    Ok(())
}

async fn serve(services: Services, host: &str, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting Issue Analyzer server on port {}", port);

    let app = api::create_router(services);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Issue Analyzer server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
