pub mod config;
mod csv_utils;
mod dto;
mod error;
mod expenses;
pub mod interchange;
mod json_utils;
pub mod session;
pub mod stores;

pub use config::Config;
pub use dto::{Account, NewAccount, Project, ProjectFields, ProjectStatus, ProjectType};
pub use error::{Error, Result};
pub use expenses::{add_expense, try_add_expense};
pub use session::{filter_accounts, EditSession, SessionMode};
pub use stores::{AccountsStore, ProjectsStore};
