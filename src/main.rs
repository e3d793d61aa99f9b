use std::process::ExitCode;

use clap::Parser;

use flash_tx::blockchain::client;
use flash_tx::cli::Cli;
use flash_tx::config::load_config;
use flash_tx::observability::logging::init_logging;
use flash_tx::{Dispatcher, Outcome, WalletStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(outcome) => {
            println!("{}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = %e, exit_code = e.exit_code(), "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> flash_tx::Result<Outcome> {
    let config = load_config(cli.config.as_deref(), &cli.overrides())?;
    init_logging(&config.logging, cli.verbose);

    tracing::debug!(
        network = %config.chain.network,
        mock = config.chain.mock,
        state_file = %config.state_file.display(),
        "Configuration loaded"
    );

    let store = WalletStore::open(&config.state_file)?;
    let chain = client::connect(&config.chain)?;

    let mut dispatcher = Dispatcher::new(store, chain);
    dispatcher.dispatch(cli.into_command()).await
}
