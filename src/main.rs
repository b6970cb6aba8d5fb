// src/main.rs — Lucidra entry point

use clap::Parser;

use lucidra::cli::analyze::{self, AnalyzeOptions};
use lucidra::cli::{serve, Cli, Commands};
use lucidra::infra::config::Config;
use lucidra::infra::logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG overrides --log-level
    logger::init_logging(&cli.log_level);

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Falls back to defaults if no config.toml
    let config = if let Some(ref path) = cli.config {
        let mut config = Config::load_from(std::path::Path::new(path))?;
        config.apply_env();
        config
    } else {
        Config::load()?
    };

    match cli.command {
        Commands::Serve { port, host } => serve::run_serve(config, port, host).await,
        Commands::Analyze {
            scenario,
            plan,
            opt_in,
            provider,
            json,
        } => {
            let opts = AnalyzeOptions {
                plan,
                opt_in,
                provider,
                json,
            };
            analyze::run_analyze(&config, &scenario.join(" "), opts).await
        }
        Commands::Tips => {
            analyze::run_tips();
            Ok(())
        }
    }
}
