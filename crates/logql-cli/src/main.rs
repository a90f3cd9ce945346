// logql CLI entry point

use std::process::ExitCode;

use clap::Parser;
use logql_cli::{logging, output, Cli, CommandRouter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref());

    match CommandRouter::execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}
