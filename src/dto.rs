use rust_decimal::Decimal;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::expenses::to_cents;

/// A wallet credential bundle as stored in `accounts.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Account {
    pub id: u32,
    pub evm_private_key: String,
    pub sol_private_key: String,
    pub email: String,
    pub twitter_token: String,
    pub discord_token: String,
}

/// Field values for a new account. Anything left out stays empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NewAccount {
    pub evm_private_key: String,
    pub sol_private_key: String,
    pub email: String,
    pub twitter_token: String,
    pub discord_token: String,
}

impl NewAccount {
    pub(crate) fn into_account(self, id: u32) -> Account {
        Account {
            id,
            evm_private_key: self.evm_private_key,
            sol_private_key: self.sol_private_key,
            email: self.email,
            twitter_token: self.twitter_token,
            discord_token: self.discord_token,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    #[default]
    Waiting,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Testnet,
    Mainnet,
    Dex,
    Social,
    Gamefi,
    Other,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Active,
        ProjectStatus::Waiting,
        ProjectStatus::Completed,
        ProjectStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Waiting => "waiting",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }
}

impl ProjectType {
    pub const ALL: [ProjectType; 6] = [
        ProjectType::Testnet,
        ProjectType::Mainnet,
        ProjectType::Dex,
        ProjectType::Social,
        ProjectType::Gamefi,
        ProjectType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Testnet => "testnet",
            ProjectType::Mainnet => "mainnet",
            ProjectType::Dex => "dex",
            ProjectType::Social => "social",
            ProjectType::Gamefi => "gamefi",
            ProjectType::Other => "other",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown project status: {s}"))
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown project type: {s}"))
    }
}

/// A tracked campaign as stored in `projects.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub status: ProjectStatus,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "deserialize_decimal_2dp"
    )]
    pub expenses: Decimal,
    /// Account ids by value. Not checked against the accounts store.
    pub accounts: Vec<u32>,
}

/// The editable part of a project: everything except `id` and `expenses`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFields {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub status: ProjectStatus,
    pub project_type: ProjectType,
    pub accounts: Vec<u32>,
}

impl ProjectFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

fn deserialize_decimal_2dp<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    rust_decimal::serde::float::deserialize(deserializer)
        .map(to_cents)
}

/// One line of the account CSV export.
#[derive(Debug, Serialize)]
pub struct AccountRow<'a> {
    pub id: u32,
    pub evm_private_key: &'a str,
    pub sol_private_key: &'a str,
    pub email: &'a str,
    pub twitter_token: &'a str,
    pub discord_token: &'a str,
}

impl<'a> From<&'a Account> for AccountRow<'a> {
    fn from(account: &'a Account) -> Self {
        Self {
            id: account.id,
            evm_private_key: &account.evm_private_key,
            sol_private_key: &account.sol_private_key,
            email: &account.email,
            twitter_token: &account.twitter_token,
            discord_token: &account.discord_token,
        }
    }
}

/// One line of the project CSV export; `accounts` is the member count.
#[derive(Debug, Serialize)]
pub struct ProjectRow<'a> {
    pub id: u32,
    pub name: &'a str,
    pub description: &'a str,
    pub start_date: &'a str,
    pub end_date: &'a str,
    pub status: ProjectStatus,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub expenses: Decimal,
    pub accounts: usize,
}

impl<'a> From<&'a Project> for ProjectRow<'a> {
    fn from(project: &'a Project) -> Self {
        Self {
            id: project.id,
            name: &project.name,
            description: &project.description,
            start_date: &project.start_date,
            end_date: &project.end_date,
            status: project.status,
            project_type: project.project_type,
            expenses: project.expenses,
            accounts: project.accounts.len(),
        }
    }
}
