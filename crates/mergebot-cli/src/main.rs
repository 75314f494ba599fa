use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mergebot_core::{Allowlist, Config};

#[derive(Parser)]
#[command(
    name = "mergebot",
    about = "Automated PR review and conditional merging, gated by allowlist, AI verdict, and CI",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the webhook server
    Serve(ServeArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Shared secret for webhook signature verification
    #[arg(long, env = "GITHUB_WEBHOOK_SECRET", hide_env_values = true)]
    webhook_secret: String,

    /// Bearer token for the GitHub API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    #[arg(long, env = "REPOSITORY_OWNER")]
    repo_owner: String,

    #[arg(long, env = "REPOSITORY_NAME")]
    repo_name: String,

    /// Allowlisted path prefix (repeatable, or comma-separated via env).
    /// Omit to use the stock set: resources/, docs/, README.md,
    /// .github/workflows/
    #[arg(long = "allow-path", env = "ALLOWLISTED_PATHS", value_delimiter = ',')]
    allow_paths: Vec<String>,

    /// API key for the text-generation service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,

    /// Model identifier for AI review
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4")]
    model: String,

    /// Sampling temperature (low for near-deterministic verdicts)
    #[arg(long, env = "OPENAI_TEMPERATURE", default_value_t = 0.1)]
    temperature: f32,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Postgres connection string for the review audit log
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl ServeArgs {
    fn into_config(self) -> Config {
        let allowlist = if self.allow_paths.is_empty() {
            Allowlist::default_paths()
        } else {
            Allowlist::new(self.allow_paths)
        };
        Config {
            webhook_secret: self.webhook_secret,
            github_token: self.github_token,
            repo_owner: self.repo_owner,
            repo_name: self.repo_name,
            allowlist,
            openai_api_key: self.openai_api_key,
            model: self.model,
            temperature: self.temperature,
            port: self.port,
            database_url: self.database_url,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => {
            let config = args.into_config();
            tracing::info!(repo = %config.repo(), port = config.port, "starting mergebot");
            mergebot_server::serve(config).await
        }
    }
}
