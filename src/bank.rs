use std::fmt::Display;

use log::info;
use serde::Deserialize;

use crate::account::{Account, AccountId, Amount};
use crate::error::{AccountLimitError, AccountNotFoundError, SeedError};

const DEFAULT_SEED: &str = include_str!("seed.json");

#[derive(Debug, Deserialize)]
pub struct Bank {
    name: String,
    address: String,
    #[serde(default)]
    accounts: Vec<Account>,
}

impl Bank {
    pub fn new(name: String, address: String) -> Bank {
        Bank {
            name,
            address,
            accounts: Vec::new(),
        }
    }

    /// The bank used when the operator has none set up: Alice and Bob.
    pub fn seeded() -> Result<Bank, SeedError> {
        Bank::from_seed(DEFAULT_SEED)
    }

    /// Seed ids must be exactly 1..=n in order, so that `open_account` keeps
    /// handing out unique ids.
    pub fn from_seed(json: &str) -> Result<Bank, SeedError> {
        let bank: Bank = serde_json::from_str(json)?;

        for (index, account) in bank.accounts.iter().enumerate() {
            let expected = index + 1;
            if usize::try_from(account.id()) != Ok(expected) {
                return Err(SeedError::NonSequentialId {
                    expected,
                    found: account.id(),
                });
            }
        }
        info!(
            "loaded bank '{}' with {} account(s)",
            bank.name,
            bank.accounts.len()
        );
        Ok(bank)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Appends a new account with the next sequential id. The initial balance
    /// is accepted as-is, zero and negative included.
    pub fn open_account(
        &mut self,
        name: String,
        initial_balance: Amount,
    ) -> Result<AccountId, AccountLimitError> {
        let id = next_account_id(self.accounts.len())?;
        let mut account = Account::new(id, name, initial_balance);
        account.record(format!(
            "Account created with initial deposit: {:.2}",
            initial_balance
        ));
        info!("opened account {}", account);
        self.accounts.push(account);
        Ok(id)
    }

    pub fn find_account(&self, id: AccountId) -> Result<&Account, AccountNotFoundError> {
        self.position(id).map(|index| &self.accounts[index])
    }

    pub(crate) fn position(&self, id: AccountId) -> Result<usize, AccountNotFoundError> {
        self.accounts
            .iter()
            .position(|account| account.id() == id)
            .ok_or(AccountNotFoundError { id })
    }

    pub(crate) fn account_at_mut(&mut self, index: usize) -> &mut Account {
        &mut self.accounts[index]
    }
}

fn next_account_id(count: usize) -> Result<AccountId, AccountLimitError> {
    AccountId::try_from(count)
        .ok()
        .and_then(|count| count.checked_add(1))
        .ok_or(AccountLimitError)
}

impl Display for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{}, {}", self.name, self.address)?;
        self.accounts
            .iter()
            .try_for_each(|account| writeln!(f, "{}", account))
    }
}
