use anyhow::Context;
use clap::Parser;
use strata_config::StrataConfig;

mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("strata error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    // Pure scoring needs neither configuration nor a store.
    if let cli::Commands::Score(args) = &cli.command {
        return commands::score::handle(args, &flags);
    }

    let config = StrataConfig::load_with_dotenv().context("failed to load strata configuration")?;
    context::warn_unconfigured(&config);

    match &cli.command {
        cli::Commands::Predict(args) => return commands::predict::handle(args, &config, &flags),
        cli::Commands::Train(args) => return commands::train::handle(args, &config, &flags),
        _ => {}
    }

    let ctx = context::AppContext::init(config)
        .await
        .context("failed to initialize strata application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("STRATA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
