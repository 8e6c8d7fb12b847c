use std::io::{BufRead, Write};

use log::{debug, info, warn};

use crate::account::{Account, AccountId};
use crate::bank::Bank;
use crate::console::Console;
use crate::error::{AccountNotFoundError, ConsoleError, SessionError};

const MENU: &str = "
Menu:
1. Deposit
2. Withdraw
3. View Balance
4. View Transaction History
5. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Deposit,
    Withdraw,
    ViewBalance,
    History,
    Exit,
}

impl MenuChoice {
    /// `None` for anything that is not one of the numbered options.
    pub fn from_input(input: &str) -> Option<MenuChoice> {
        match input.trim().parse::<u32>().ok()? {
            1 => Some(MenuChoice::Deposit),
            2 => Some(MenuChoice::Withdraw),
            3 => Some(MenuChoice::ViewBalance),
            4 => Some(MenuChoice::History),
            5 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated,
}

/// One bank and the single account selected in it for the whole run.
#[derive(Debug)]
pub struct Session {
    bank: Bank,
    current: usize,
}

fn answered_no(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("no")
}

impl Session {
    pub fn new(bank: Bank, account_id: AccountId) -> Result<Session, AccountNotFoundError> {
        let current = bank.position(account_id)?;
        Ok(Session { bank, current })
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn current_account(&self) -> &Account {
        &self.bank.accounts()[self.current]
    }

    fn current_account_mut(&mut self) -> &mut Account {
        self.bank.account_at_mut(self.current)
    }

    /// Sets up the bank and binds an account. An unknown or malformed account id
    /// ends the session here, before any menu is shown.
    pub fn establish<R: BufRead, W: Write>(
        console: &mut Console<R, W>,
    ) -> Result<Session, SessionError> {
        let bank = setup_bank(console)?;
        console.say(format!("Welcome to {}!", bank.name()))?;
        console.say(format!("Address: {}\n", bank.address()))?;

        let answer = console.prompt_and_read_line("Do you have an account? (yes/no):")?;
        if answered_no(&answer) {
            open_account(bank, console)
        } else {
            select_account(bank, console)
        }
    }

    pub fn run<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<(), SessionError> {
        let mut state = SessionState::Running;
        while state == SessionState::Running {
            console.say(MENU)?;
            let input = console.prompt_and_read_line("Choose an option:")?;
            state = self.step(console, MenuChoice::from_input(&input))?;
        }
        info!("session for account {} ended", self.current_account().id());
        Ok(())
    }

    pub fn step<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        choice: Option<MenuChoice>,
    ) -> Result<SessionState, SessionError> {
        debug!("menu choice {:?}", choice);
        match choice {
            Some(MenuChoice::Deposit) => {
                let Some(amount) = read_amount(console, "Enter amount to deposit:")? else {
                    return Ok(SessionState::Running);
                };
                match self.current_account_mut().deposit(amount) {
                    Ok(()) => console.say("Deposit successful!")?,
                    Err(err) => console.say(format!("Error: {}", err))?,
                }
            }
            Some(MenuChoice::Withdraw) => {
                let Some(amount) = read_amount(console, "Enter amount to withdraw:")? else {
                    return Ok(SessionState::Running);
                };
                match self.current_account_mut().withdraw(amount) {
                    Ok(()) => console.say("Withdrawal successful!")?,
                    Err(err) => console.say(format!("Error: {}", err))?,
                }
            }
            Some(MenuChoice::ViewBalance) => {
                console.say(format!(
                    "Current Balance: {:.2}",
                    self.current_account().balance()
                ))?;
            }
            Some(MenuChoice::History) => {
                let history = self.current_account().transaction_history();
                if history.len() == 0 {
                    console.say("No transactions available.")?;
                } else {
                    console.say("Transaction History:")?;
                    for entry in history {
                        console.say(entry)?;
                    }
                }
            }
            Some(MenuChoice::Exit) => {
                console.say("Thank you for using the Bank Transaction System. Goodbye!")?;
                return Ok(SessionState::Terminated);
            }
            None => console.say("Invalid option. Please try again.")?,
        }
        Ok(SessionState::Running)
    }
}

fn setup_bank<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Bank, SessionError> {
    let answer = console.prompt_and_read_line("Do you have a bank set up? (yes/no):")?;
    if !answered_no(&answer) {
        let bank = Bank::seeded()?;
        info!("using seeded bank:\n{}", bank);
        return Ok(bank);
    }

    let name = console.prompt_and_read_line("Enter bank name:")?;
    let address = console.prompt_and_read_line("Enter bank address:")?;
    console.say("Bank created successfully!")?;
    info!("created bank '{}'", name);
    Ok(Bank::new(name, address))
}

fn open_account<R: BufRead, W: Write>(
    mut bank: Bank,
    console: &mut Console<R, W>,
) -> Result<Session, SessionError> {
    let name = console.prompt_and_read_line("Enter your name:")?;
    let initial_balance = match console.prompt_and_read_number("Enter initial deposit amount:") {
        Ok(amount) => amount,
        Err(err) => {
            if matches!(err, ConsoleError::Parse { .. }) {
                console.say(format!("Error: {}", err))?;
            }
            return Err(err.into());
        }
    };

    let id = bank.open_account(name, initial_balance)?;
    console.say(format!(
        "Account created successfully! Your account ID is: {}",
        id
    ))?;
    Ok(Session::new(bank, id)?)
}

fn select_account<R: BufRead, W: Write>(
    bank: Bank,
    console: &mut Console<R, W>,
) -> Result<Session, SessionError> {
    let input = console.prompt_and_read_line("Enter your account ID:")?;
    let Ok(id) = input.parse::<AccountId>() else {
        warn!("account id '{}' is not a number", input);
        console.say("Invalid account ID.")?;
        return Err(ConsoleError::Parse { input }.into());
    };

    match Session::new(bank, id) {
        Ok(session) => Ok(session),
        Err(err) => {
            warn!("{}", err);
            console.say("Invalid account ID.")?;
            Err(err.into())
        }
    }
}

/// A malformed amount is reported and yields `None`, leaving the session running.
fn read_amount<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
) -> Result<Option<f64>, SessionError> {
    match console.prompt_and_read_number(prompt) {
        Ok(amount) => Ok(Some(amount)),
        Err(err @ ConsoleError::Parse { .. }) => {
            console.say(format!("Error: {}", err))?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    fn alice_session() -> Session {
        Session::new(Bank::seeded().unwrap(), 1).unwrap()
    }

    #[rstest]
    #[case("1", Some(MenuChoice::Deposit))]
    #[case(" 2 ", Some(MenuChoice::Withdraw))]
    #[case("3", Some(MenuChoice::ViewBalance))]
    #[case("4", Some(MenuChoice::History))]
    #[case("5", Some(MenuChoice::Exit))]
    #[case("0", None)]
    #[case("6", None)]
    #[case("-1", None)]
    #[case("deposit", None)]
    #[case("", None)]
    fn parse_menu_choice(#[case] input: &str, #[case] expected: Option<MenuChoice>) {
        assert_eq!(MenuChoice::from_input(input), expected);
    }

    #[test]
    fn deposit_step() {
        let mut session = alice_session();
        let mut con = console("250\n");
        let state = session.step(&mut con, Some(MenuChoice::Deposit)).unwrap();
        assert_eq!(state, SessionState::Running);
        assert_eq!(session.current_account().balance(), 1250.0);
        assert_eq!(
            output(con),
            "Enter amount to deposit: Deposit successful!\n"
        );
    }

    #[test]
    fn failed_withdraw_step_prints_error() {
        let mut session = alice_session();
        let mut con = console("2000\n");
        let state = session.step(&mut con, Some(MenuChoice::Withdraw)).unwrap();
        assert_eq!(state, SessionState::Running);
        assert_eq!(session.current_account().balance(), 1000.0);
        assert_eq!(
            output(con),
            "Enter amount to withdraw: Error: insufficient balance: available 1000.00, requested 2000.00\n"
        );
    }

    #[test]
    fn malformed_amount_keeps_running() {
        let mut session = alice_session();
        let mut con = console("lots\n");
        let state = session.step(&mut con, Some(MenuChoice::Deposit)).unwrap();
        assert_eq!(state, SessionState::Running);
        assert_eq!(session.current_account().balance(), 1000.0);
        assert_eq!(session.current_account().transaction_history().len(), 0);
        assert_eq!(
            output(con),
            "Enter amount to deposit: Error: 'lots' is not a valid number\n"
        );
    }

    #[test]
    fn empty_history_step() {
        let mut session = alice_session();
        let mut con = console("");
        session.step(&mut con, Some(MenuChoice::History)).unwrap();
        assert_eq!(output(con), "No transactions available.\n");
    }

    #[test]
    fn balance_and_invalid_steps() {
        let mut session = alice_session();
        let mut con = console("");
        session.step(&mut con, Some(MenuChoice::ViewBalance)).unwrap();
        session.step(&mut con, None).unwrap();
        assert_eq!(
            output(con),
            "Current Balance: 1000.00\nInvalid option. Please try again.\n"
        );
    }

    #[test]
    fn exit_step_terminates() {
        let mut session = alice_session();
        let mut con = console("");
        let state = session.step(&mut con, Some(MenuChoice::Exit)).unwrap();
        assert_eq!(state, SessionState::Terminated);
    }

    #[test]
    fn closed_input_during_amount_is_an_error() {
        let mut session = alice_session();
        let mut con = console("");
        let err = session
            .step(&mut con, Some(MenuChoice::Withdraw))
            .unwrap_err();
        assert!(matches!(err, SessionError::Console(ConsoleError::Closed)));
    }

    #[test]
    fn session_for_unknown_account() {
        let err = Session::new(Bank::seeded().unwrap(), 3).unwrap_err();
        assert_eq!(err, AccountNotFoundError { id: 3 });
    }
}
