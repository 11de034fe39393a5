//! Project edit session and the account selector behind it.
//!
//! A session holds the pending values of a project being added or edited.
//! Account membership is picked from the accounts store's current list,
//! narrowed by a free-text query. Nothing here touches disk; the owning
//! [`ProjectsStore`](crate::stores::ProjectsStore) commits or drops it.

use std::collections::BTreeSet;

use crate::dto::{Account, Project, ProjectFields, ProjectStatus, ProjectType};

/// Accounts whose id, EVM key, Solana key and email, glued together,
/// contain `query` ignoring case. A blank query keeps every account.
pub fn filter_accounts<'a>(accounts: &'a [Account], query: &str) -> Vec<&'a Account> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return accounts.iter().collect();
    }
    accounts
        .iter()
        .filter(|account| search_text(account).contains(&query))
        .collect()
}

fn search_text(account: &Account) -> String {
    format!(
        "{}{}{}{}",
        account.id, account.evm_private_key, account.sol_private_key, account.email
    )
    .to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Add,
    Edit(u32),
}

#[derive(Debug, Clone)]
pub struct EditSession {
    mode: SessionMode,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub status: ProjectStatus,
    pub project_type: ProjectType,
    query: String,
    selected: BTreeSet<u32>,
}

impl EditSession {
    pub(crate) fn for_add() -> Self {
        Self {
            mode: SessionMode::Add,
            name: String::new(),
            description: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            status: ProjectStatus::default(),
            project_type: ProjectType::default(),
            query: String::new(),
            selected: BTreeSet::new(),
        }
    }

    pub(crate) fn for_edit(project: &Project) -> Self {
        Self {
            mode: SessionMode::Edit(project.id),
            name: project.name.clone(),
            description: project.description.clone(),
            start_date: project.start_date.clone(),
            end_date: project.end_date.clone(),
            status: project.status,
            project_type: project.project_type,
            query: String::new(),
            selected: project.accounts.iter().copied().collect(),
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The selector rows for the current query.
    pub fn visible<'a>(&self, accounts: &'a [Account]) -> Vec<&'a Account> {
        filter_accounts(accounts, &self.query)
    }

    pub fn is_selected(&self, account_id: u32) -> bool {
        self.selected.contains(&account_id)
    }

    pub fn toggle(&mut self, account_id: u32) {
        if !self.selected.remove(&account_id) {
            self.selected.insert(account_id);
        }
    }

    /// Selects every account in the current view. Selection outside it is kept.
    pub fn select_all(&mut self, accounts: &[Account]) {
        let visible: Vec<u32> = self.visible(accounts).iter().map(|a| a.id).collect();
        self.selected.extend(visible);
    }

    /// Clears every account in the current view. Selection outside it is kept.
    pub fn clear_all(&mut self, accounts: &[Account]) {
        let visible: Vec<u32> = self.visible(accounts).iter().map(|a| a.id).collect();
        for id in visible {
            self.selected.remove(&id);
        }
    }

    /// Field values to commit. Only ids present in `accounts` are kept,
    /// in the order of that list, since those are the rows the selector shows.
    pub(crate) fn to_fields(&self, accounts: &[Account]) -> ProjectFields {
        ProjectFields {
            name: self.name.clone(),
            description: self.description.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            status: self.status,
            project_type: self.project_type,
            accounts: accounts
                .iter()
                .map(|account| account.id)
                .filter(|id| self.selected.contains(id))
                .collect(),
        }
    }
}
