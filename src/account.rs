use std::fmt::Display;
use std::slice;

use log::{debug, warn};
use serde::Deserialize;

use crate::error::{AccountError, TransactionKind};

pub type Amount = f64;
pub type AccountId = u32;

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    id: AccountId,
    name: String,
    balance: Amount,
    #[serde(default)]
    transaction_log: Vec<String>,
}

impl Account {
    /// Opens an account holding `balance` with an empty log.
    /// The balance is taken as given, without the checks `deposit` applies.
    pub fn new(id: AccountId, name: String, balance: Amount) -> Account {
        Account {
            id,
            name,
            balance,
            transaction_log: Vec::new(),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn deposit(&mut self, amount: Amount) -> Result<(), AccountError> {
        check_positive(amount, TransactionKind::Deposit).map_err(|err| self.rejected(err))?;
        let balance = self.balance + amount;
        if !balance.is_finite() {
            return Err(self.rejected(AccountError::BalanceOverflow {
                balance: self.balance,
                requested: amount,
            }));
        }

        self.balance = balance;
        self.record(format!("Deposited: {:.2}", amount));
        debug!("account {} deposited {:.2}", self.id, amount);
        Ok(())
    }

    /// Amount validity is checked before sufficiency, so `withdraw(-5.0)` on an
    /// empty account reports `InvalidAmount`.
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), AccountError> {
        check_positive(amount, TransactionKind::Withdrawal).map_err(|err| self.rejected(err))?;
        if amount > self.balance {
            return Err(self.rejected(AccountError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            }));
        }

        self.balance -= amount;
        self.record(format!("Withdrawn: {:.2}", amount));
        debug!("account {} withdrew {:.2}", self.id, amount);
        Ok(())
    }

    /// Snapshot of the log, oldest entry first.
    pub fn transaction_history(&self) -> History<'_> {
        History {
            entries: self.transaction_log.iter(),
        }
    }

    pub(crate) fn record(&mut self, entry: String) {
        self.transaction_log.push(entry);
    }

    fn rejected(&self, err: AccountError) -> AccountError {
        warn!("account {} rejected operation: {}", self.id, err);
        err
    }
}

// NaN and infinities fail here too, otherwise they would slip past `amount > balance`.
fn check_positive(amount: Amount, kind: TransactionKind) -> Result<(), AccountError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(AccountError::InvalidAmount { kind })
    }
}

impl Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}, {:.2}", self.id, self.name, self.balance)
    }
}

/// Ordered, single-pass view over an account's transaction log.
#[derive(Debug)]
pub struct History<'a> {
    entries: slice::Iter<'a, String>,
}

impl<'a> Iterator for History<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for History<'_> {}
