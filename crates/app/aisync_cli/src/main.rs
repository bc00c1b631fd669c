// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::time::Duration;

use aisync_core::{IntegrationAi, IntegrationConfig};
use clap::Parser;
use cli::{Cli, Commands, ProbeArgs};

mod cli;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    let args = Cli::parse();
    logging::init(logging::spec(args.verbose))?;

    match &args.command {
        Commands::Version => {
            println!(
                "{} {} (aisync_core {})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                aisync_core::version()
            );
        }
        Commands::Probe(probe_args) => probe(probe_args)?,
    }

    Ok(())
}

fn probe(args: &ProbeArgs) -> Result<()> {
    let mut config = IntegrationConfig::from_env();
    config.graphql_endpoint = args.graphql_endpoint.clone().filter(|v| !v.is_empty());
    config.rest_endpoint = args.rest_endpoint.clone().filter(|v| !v.is_empty());
    if let Some(secs) = args.timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }

    let ai = IntegrationAi::from_config(&config)?;
    if !ai.is_enabled() {
        return Err(Error::Custom(
            "AI integration is not configured: set AI_GRAPHQL_ENDPOINT and AI_REST_ENDPOINT".into(),
        ));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let count = runtime.block_on(ai.session(config.static_credentials()).probe())?;

    log::info!("remote reachable: {count} employees");
    println!("ok employees={count}");
    Ok(())
}
