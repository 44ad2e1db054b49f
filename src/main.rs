//! Yosai CLI entry point.

use clap::Parser;

use yosai::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = yosai::cli::run(cli).await {
        yosai::cli::handle_error(err, json);
    }
}
