use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use wallet_balance_checker::cli::Cli;
use wallet_balance_checker::run;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    run::run(&cli.run_config())?;
    Ok(())
}
