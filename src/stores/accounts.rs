use std::path::{Path, PathBuf};

use super::{next_id, ChangeListener};
use crate::dto::{Account, NewAccount};
use crate::error::Result;
use crate::json_utils;
use crate::session::filter_accounts;

/// Wallet accounts backed by one JSON file.
/// Accounts are append-only apart from deletion; there is no edit path.
pub struct AccountsStore {
    path: PathBuf,
    accounts: Vec<Account>,
    listener: Option<ChangeListener>,
}

impl AccountsStore {
    /// Loads the store from `path`, creating an empty file if there is none.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let accounts: Vec<Account> = json_utils::load_or_create(&path)?;
        tracing::info!(path = %path.display(), count = accounts.len(), "accounts loaded");
        Ok(Self {
            path,
            accounts,
            listener: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_listener(&mut self, listener: impl FnMut() + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// All accounts in insertion order.
    pub fn list(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Accounts matching a free-text query, for the project member selector.
    pub fn filter(&self, query: &str) -> Vec<&Account> {
        filter_accounts(&self.accounts, query)
    }

    /// Appends a new account with the next free id and persists the store.
    /// Nothing changes in memory if the write fails.
    pub fn add(&mut self, fields: NewAccount) -> Result<Account> {
        let id = next_id(self.accounts.iter().map(|account| account.id))?;
        let account = fields.into_account(id);
        self.accounts.push(account.clone());
        if let Err(err) = self.persist() {
            self.accounts.pop();
            return Err(err);
        }
        tracing::info!(id, "account added");
        self.notify();
        Ok(account)
    }

    /// Removes the account with `id`. Returns false (and writes nothing)
    /// if there is no such account. Projects referencing it are not touched.
    pub fn delete(&mut self, id: u32) -> Result<bool> {
        let Some(index) = self.accounts.iter().position(|account| account.id == id) else {
            tracing::debug!(id, "delete of unknown account ignored");
            return Ok(false);
        };
        let removed = self.accounts.remove(index);
        if let Err(err) = self.persist() {
            self.accounts.insert(index, removed);
            return Err(err);
        }
        tracing::info!(id, "account deleted");
        self.notify();
        Ok(true)
    }

    fn persist(&self) -> Result<()> {
        json_utils::save(&self.path, &self.accounts)
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener();
        }
    }
}

impl std::fmt::Debug for AccountsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountsStore")
            .field("path", &self.path)
            .field("accounts", &self.accounts.len())
            .finish()
    }
}
