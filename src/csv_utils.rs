//! CSV helpers behind account import and table export.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};

/// Iterates over the headed CSV rows of `reader`, deserialized into `T`.
/// Cells are trimmed, and columns missing from the header fall back to the
/// row type's serde defaults.
pub fn read_csv<T, R>(reader: R) -> impl Iterator<Item = csv::Result<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize()
}

/// Serializes `rows` to `writer`, header first, and returns how many rows
/// were written.
pub fn write_csv<T, W>(writer: W, rows: impl IntoIterator<Item = T>) -> csv::Result<usize>
where
    T: Serialize,
    W: Write,
{
    let mut out = csv::Writer::from_writer(writer);
    let mut written = 0;
    for row in rows {
        out.serialize(row)?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}
