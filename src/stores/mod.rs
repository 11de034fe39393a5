//! Storage layer for the tracker. Provides:
//! - Wallet accounts ([`AccountsStore`])
//! - Projects and the project edit session ([`ProjectsStore`])
//!
//! Each store keeps its whole file in memory and rewrites the file after
//! every successful mutation. Nothing here is shared between threads.

use crate::error::{Error, Result};

mod accounts;
mod projects;

pub use accounts::AccountsStore;
pub use projects::ProjectsStore;

/// Called after every successful mutation so a view can re-render.
pub type ChangeListener = Box<dyn FnMut() + Send>;

/// Next free id: one past the largest id in use, or 1 for an empty store.
fn next_id(ids: impl Iterator<Item = u32>) -> Result<u32> {
    match ids.max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(Error::IdsExhausted),
    }
}
