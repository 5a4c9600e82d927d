use std::sync::Arc;

use clap::Parser;
use tracing::error;

use cloudwatch_reporter::config::{load_config, schema};
use cloudwatch_reporter::startup;
use cloudwatch_reporter::utils::logger::init_logging;

/// Periodically exports metric snapshots as CloudWatch datapoints.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "./config.yaml")]
    config: String,

    /// Print the JSON schema of the configuration and exit.
    #[arg(long)]
    schema: bool,

    /// Run a single reporting cycle and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.schema {
        match schema() {
            Ok(schema) => println!("{}", schema),
            Err(e) => {
                eprintln!("Error rendering configuration schema: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = startup::run(Arc::new(config), cli.once).await {
        error!("Reporter stopped: {}", e);
        std::process::exit(1);
    }
}
