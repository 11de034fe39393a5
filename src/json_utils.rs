//! JSON file persistence shared by both stores.
//!
//! Files hold a single array of records, written with 4-space indentation.
//! Non-ASCII text is written as-is.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Loads every record from `path`.
/// A missing file (and any missing parent directory) is created holding `[]`.
pub fn load_or_create<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned + Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(path = %path.display(), "creating empty store file");
        save::<T, _>(path, &[])?;
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| Error::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Rewrites `path` with the whole record list. The write is not atomic.
pub fn save<T, P>(path: P, records: &[T]) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_owned(),
            source,
        })?;
    }
    let bytes = to_pretty_json(records)?;
    fs::write(path, bytes).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    tracing::debug!(path = %path.display(), records = records.len(), "store file written");
    Ok(())
}

fn to_pretty_json<T: Serialize>(records: &[T]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser).map_err(Error::Serialize)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::Account;

    #[test]
    fn test_missing_file_is_created_empty() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("accounts.json");

        let accounts: Vec<Account> = load_or_create(&path)?;
        assert!(accounts.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        fs::write(&path, "[{").unwrap();

        let result = load_or_create::<Account, _>(&path);
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_four_space_indent_and_unicode_preserved() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        let account = Account {
            id: 1,
            email: "пользователь@mail.ru".to_string(),
            ..Account::default()
        };

        save(&path, &[account.clone()])?;
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("[\n    {\n        \"id\": 1,"));
        assert!(written.contains("пользователь@mail.ru"));

        let loaded: Vec<Account> = load_or_create(&path)?;
        assert_eq!(loaded, vec![account]);
        Ok(())
    }
}
