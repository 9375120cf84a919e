use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use npm_gateway::config::{AppConfig, config_path, log_path};
use npm_gateway::gateway::download::save_package;
use npm_gateway::gateway::{Gateway, NpmGateway};

#[derive(Parser)]
#[command(name = "npm-gateway")]
#[command(version, about = "Resolve and download npm package archives")]
struct Cli {
    /// Configuration file (defaults to $XDG_CONFIG_HOME/npm-gateway/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to the data directory instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the version and tarball `~> VERSION` resolves to
    Resolve { name: String, version: String },
    /// Download the archive `~> VERSION` resolves to
    Download {
        name: String,
        version: String,
        /// Where to store the archive (defaults to a kept temporary file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = npm_gateway::logging::init(cli.log_file.then(log_path).as_deref())?;

    let config_file = cli.config.unwrap_or_else(config_path);
    let config = AppConfig::load(&config_file)
        .with_context(|| format!("Failed to load configuration from {:?}", config_file))?;
    let gateway = NpmGateway::from_config(&config.npm_gateway)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command, &gateway))
}

async fn run(command: Command, gateway: &dyn Gateway) -> anyhow::Result<()> {
    match command {
        Command::Resolve { name, version } => {
            let resolved = gateway.resolve_package(&name, &version).await?;
            println!("{} {}", resolved.version, resolved.tarball);
        }
        Command::Download {
            name,
            version,
            output,
        } => {
            let path = save_package(gateway, &name, &version, output.as_deref()).await?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
