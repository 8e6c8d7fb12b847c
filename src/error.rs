use std::fmt::Display;
use std::io;

use thiserror::Error;

use crate::account::{AccountId, Amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "deposit"),
            TransactionKind::Withdrawal => write!(f, "withdrawal"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum AccountError {
    #[error("{kind} amount must be greater than zero")]
    InvalidAmount { kind: TransactionKind },
    #[error("insufficient balance: available {balance:.2}, requested {requested:.2}")]
    InsufficientFunds { balance: Amount, requested: Amount },
    #[error("deposit of {requested:.2} would overflow the balance of {balance:.2}")]
    BalanceOverflow { balance: Amount, requested: Amount },
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("account {id} not found")]
pub struct AccountNotFoundError {
    pub id: AccountId,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("bank cannot hold more than {} accounts", AccountId::MAX)]
pub struct AccountLimitError;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("input closed before an answer was given")]
    Closed,
    #[error("'{input}' is not a valid number")]
    Parse { input: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("seed account at position {expected} has id {found}, ids must run 1, 2, 3, ...")]
    NonSequentialId { expected: usize, found: AccountId },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    AccountNotFound(#[from] AccountNotFoundError),
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    AccountLimit(#[from] AccountLimitError),
}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        SessionError::Console(ConsoleError::Io(err))
    }
}
