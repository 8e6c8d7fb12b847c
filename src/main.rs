use std::io;
use std::process::ExitCode;

use anyhow::Context;
use log::error;
use teller::{run_app, Console, ConsoleError, SessionError};

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    match run_app(&mut console) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(
            err @ (SessionError::AccountNotFound(_)
            | SessionError::Console(ConsoleError::Parse { .. } | ConsoleError::Closed)),
        ) => {
            error!("session ended early: {}", err);
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err).context("banking session failed"),
    }
}
