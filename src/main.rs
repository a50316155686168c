use anyhow::Result;
use clap::Parser;
use rentfuse::cli::{commands, Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = cli.verbosity();

    // Logs on stderr, decoded JSON on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| verbosity.to_log_level().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Decode(args) => commands::decode(args, &config)?,
        Commands::Address(args) => commands::address(args, &config)?,
        Commands::Config => commands::show_config(&config)?,
    }

    Ok(())
}
