use clap::Parser;
use tracing_subscriber::EnvFilter;

use workout_planner::{cli, web};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("workout_planner=debug,tower_http=debug,info")
    } else {
        EnvFilter::new("workout_planner=info,warn")
    };

    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let store_config = cli.store.to_config();

    match cli.command {
        cli::Commands::Serve(args) => {
            web::server::run(args, store_config)?;
        }
        cli::Commands::Plan(args) => {
            cli::plan::run(args, &store_config, cli.format)?;
        }
        cli::Commands::Catalog(args) => {
            cli::catalog::run(args, &store_config, cli.format)?;
        }
    }

    Ok(())
}
