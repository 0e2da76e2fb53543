use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use logchat::connector::api::{Container, ContainerConfig, Router};
use logchat::Commands;

#[derive(Parser)]
#[command(name = "logchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, default_value = "~/.logchat")]
    data_dir: String,

    /// Region recorded on log searches (falls back to LOGCHAT_REGION)
    #[arg(long, global = true)]
    region: Option<String>,

    /// Directory of *.log files served as log groups
    #[arg(long, global = true)]
    logs_dir: Option<String>,

    /// Chat endpoint (falls back to LOGCHAT_CHAT_URL)
    #[arg(long, global = true)]
    chat_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data_dir = expand_tilde(&cli.data_dir);
    std::fs::create_dir_all(&data_dir)?;
    debug!("Using data dir {}", data_dir);

    let container = Container::new(ContainerConfig {
        data_dir,
        region: cli.region,
        logs_dir: cli.logs_dir.as_deref().map(expand_tilde),
        chat_url: cli.chat_url,
    })?;
    let router = Router::new(&container);

    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
