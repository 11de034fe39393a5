use std::path::Path;

use csv_async::{AsyncReaderBuilder, Error as CsvError, Trim};
use tokio::fs::File;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;

use crate::dto::NewAccount;
use crate::error::Result;
use crate::stores::AccountsStore;

const BUFFER_SIZE: usize = 1024;

/// Imports accounts from a CSV file asynchronously and returns how many were added.
/// Work is split in two:
/// * CSV reader - a spawned task that streams rows from the input file, deserializes them and sends them via channel.
/// * Importer - runs on the calling task and adds every received row until the channel is closed.
///
/// The store stays borrowed by the caller, so it is still usable after a failed import.
///
/// # Errors
/// Returns an error if:
/// * The input file cannot be read
/// * The CSV is malformed (rows received before the bad one stay added)
/// * The store file cannot be written
pub async fn import_accounts<P>(input_path: P, store: &mut AccountsStore) -> Result<usize>
where
    P: AsRef<Path>,
{
    // Create channel for passing rows from reader to importer
    let (tx, rx) = mpsc::channel(BUFFER_SIZE);
    let input_path = input_path.as_ref().to_owned();

    let reader_handle = tokio::spawn(read_rows(input_path, tx));

    // The importer finishes once the reader drops its sender
    let added = add_rows(rx, store).await;
    let read_result = reader_handle.await?;
    let added = added?;
    read_result?;

    tracing::info!(added, "accounts imported");
    Ok(added)
}

/// Reads and deserializes account rows from a CSV file.
/// Returns them through the provided channel.
async fn read_rows(input_path: impl AsRef<Path> + Send, tx: mpsc::Sender<NewAccount>) -> Result<(), CsvError> {
    let file = File::open(input_path).await?;
    let mut csv_reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .create_deserializer(file);

    let mut records = csv_reader.deserialize::<NewAccount>();
    while let Some(result) = records.next().await {
        match result {
            Ok(row) => {
                if tx.send(row).await.is_err() {
                    // Importer stopped on a write error, exit gracefully
                    break;
                }
            }
            // CSV parsing errors are critical - propagate them
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Adds rows received through the channel to the store.
/// Stops at the first failed write, dropping the receiver so the reader stops too.
async fn add_rows(mut rx: mpsc::Receiver<NewAccount>, store: &mut AccountsStore) -> Result<usize> {
    let mut added = 0;
    while let Some(row) = rx.recv().await {
        if let Err(err) = store.add(row) {
            tracing::warn!(added, "import stopped on a failed write");
            return Err(err);
        }
        added += 1;
    }
    Ok(added)
}
