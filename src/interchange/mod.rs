//! CSV interchange for the stores: bulk account import and table exports.
//!
//! Import comes in a synchronous and an asynchronous flavour. Both feed
//! every row through [`AccountsStore::add`](crate::stores::AccountsStore::add),
//! so ids are assigned exactly as for accounts added one by one.

mod async_import;
mod export;
mod sync_import;

pub use async_import::import_accounts as import_accounts_async;
pub use export::{export_accounts, export_projects};
pub use sync_import::import_accounts;
