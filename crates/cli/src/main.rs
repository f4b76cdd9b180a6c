use clap::{Parser, Subcommand};
use fnet_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod commands;
mod driver;

#[derive(Parser)]
#[command(name = "fnet")]
#[command(version)]
#[command(about = "FNET network services: DNS resolver and LLMNR responder")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// DNS server port used when none is given
    #[arg(long, global = true)]
    dns_port: Option<u16>,

    /// LLMNR port
    #[arg(long, global = true)]
    llmnr_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a host name to its addresses
    Resolve(commands::resolve::ResolveArgs),
    /// Answer LLMNR queries for a host name until interrupted
    Llmnr(commands::llmnr::LlmnrArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        llmnr_port: cli.llmnr_port,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting FNET v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Resolve(args) => commands::resolve::run(&config, args).await,
        Command::Llmnr(args) => commands::llmnr::run(&config, args).await,
    }
}
