use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::csv_utils::read_csv;
use crate::dto::NewAccount;
use crate::error::{Error, Result};
use crate::stores::AccountsStore;

/// Adds one account per CSV row of `input_path` and returns how many were added.
///
/// Recognised columns are `evm_private_key`, `sol_private_key`, `email`,
/// `twitter_token` and `discord_token`; any of them may be missing.
///
/// # Errors
/// Returns an error if:
/// * The input file cannot be read
/// * The CSV is malformed (rows before the bad one stay added)
/// * The store file cannot be written
pub fn import_accounts<P: AsRef<Path>>(input_path: P, store: &mut AccountsStore) -> Result<usize> {
    let input_path = input_path.as_ref();
    let file = File::open(input_path).map_err(|source| Error::Io {
        path: input_path.to_owned(),
        source,
    })?;
    let mut added = 0;
    for row in read_csv::<NewAccount, _>(BufReader::new(file)) {
        // CSV parsing errors are critical - propagate them
        let row = row?;
        store.add(row)?;
        added += 1;
    }
    tracing::info!(added, "accounts imported");
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;

    #[test]
    fn test_import_appends_after_existing() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AccountsStore::open(dir.path().join("accounts.json"))?;
        store.add(NewAccount::default())?;

        let input = dir.path().join("accounts.csv");
        fs::write(&input, "email,sol_private_key\nx@y.z,SoL1\nq@w.e,SoL2\n").unwrap();

        assert_eq!(import_accounts(&input, &mut store)?, 2);
        let ids: Vec<u32> = store.list().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.get(3).unwrap().sol_private_key, "SoL2");
        Ok(())
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AccountsStore::open(dir.path().join("accounts.json")).unwrap();
        let result = import_accounts(dir.path().join("nope.csv"), &mut store);
        assert!(matches!(result, Err(Error::Io { path, .. }) if path.ends_with("nope.csv")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_row_stops_import() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AccountsStore::open(dir.path().join("accounts.json")).unwrap();
        let input = dir.path().join("accounts.csv");
        fs::write(&input, "email,evm_private_key\na@b.c,0x1\nbroken\n").unwrap();

        let result = import_accounts(&input, &mut store);
        assert!(matches!(result, Err(Error::Csv(_))));
        assert_eq!(store.len(), 1);
    }
}
