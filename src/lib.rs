use std::io::{BufRead, Write};

pub mod account;
pub mod bank;
pub mod console;
pub mod error;
pub mod session;

pub use account::{Account, AccountId, Amount, History};
pub use bank::Bank;
pub use console::Console;
pub use error::{
    AccountError, AccountLimitError, AccountNotFoundError, ConsoleError, SeedError, SessionError,
    TransactionKind,
};
pub use session::{MenuChoice, Session, SessionState};

/// Runs one interactive session to completion and hands back its final state.
pub fn run_app<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Session, SessionError> {
    let mut session = Session::establish(console)?;
    session.run(console)?;
    Ok(session)
}
