use std::io::Write;

use crate::csv_utils::write_csv;
use crate::dto::{Account, AccountRow, Project, ProjectRow};
use crate::error::Result;

/// Writes accounts as CSV, one row each, in the given order.
pub fn export_accounts<'a, W: Write>(
    accounts: impl IntoIterator<Item = &'a Account>,
    writer: W,
) -> Result<()> {
    let written = write_csv(writer, accounts.into_iter().map(AccountRow::from))?;
    tracing::debug!(written, "accounts exported");
    Ok(())
}

/// Writes projects as CSV with a member count in place of the id list.
pub fn export_projects<'a, W: Write>(
    projects: impl IntoIterator<Item = &'a Project>,
    writer: W,
) -> Result<()> {
    let written = write_csv(writer, projects.into_iter().map(ProjectRow::from))?;
    tracing::debug!(written, "projects exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{NewAccount, ProjectFields, ProjectStatus};
    use crate::stores::{AccountsStore, ProjectsStore};

    #[test]
    fn test_export_accounts() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AccountsStore::open(dir.path().join("accounts.json"))?;
        store.add(NewAccount {
            evm_private_key: "0xabc".to_string(),
            email: "a@b.c".to_string(),
            ..NewAccount::default()
        })?;
        store.add(NewAccount {
            discord_token: "tok".to_string(),
            ..NewAccount::default()
        })?;

        let mut output = Vec::new();
        export_accounts(store.list(), &mut output)?;

        let expected = "id,evm_private_key,sol_private_key,email,twitter_token,discord_token
1,0xabc,,a@b.c,,
2,,,,,tok
";
        assert_eq!(String::from_utf8(output).unwrap(), expected);

        let mut filtered = Vec::new();
        export_accounts(store.filter("0xABC"), &mut filtered)?;
        assert_eq!(String::from_utf8(filtered).unwrap().lines().count(), 2);
        Ok(())
    }

    #[test]
    fn test_export_projects() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProjectsStore::open(dir.path().join("projects.json"))?;
        store.add(ProjectFields {
            description: "points farming".to_string(),
            start_date: "2025-01-01".to_string(),
            status: ProjectStatus::Active,
            accounts: vec![1, 2, 5],
            ..ProjectFields::named("Drop A")
        })?;
        store.record_expense(1, "5.50")?;
        store.add(ProjectFields::named("Drop B"))?;
        store.record_expense(2, "3")?;
        store.add(ProjectFields::named("Drop C"))?;

        let mut output = Vec::new();
        export_projects(store.list(), &mut output)?;

        let expected = "id,name,description,start_date,end_date,status,type,expenses,accounts
1,Drop A,points farming,2025-01-01,,active,testnet,5.50,3
2,Drop B,,,,waiting,testnet,3.00,0
3,Drop C,,,,waiting,testnet,0.00,0
";
        assert_eq!(String::from_utf8(output).unwrap(), expected);
        Ok(())
    }
}
