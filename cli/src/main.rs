use clap::Parser;
use scout_cli::args::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    scout_cli::init_tracing(cli.verbose);
    scout_cli::run(cli).await
}
