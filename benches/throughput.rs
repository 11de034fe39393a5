use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use retro_tracker::interchange::{import_accounts, import_accounts_async};
use retro_tracker::{filter_accounts, Account, AccountsStore};
use std::fmt::Write as _;
use std::time::Duration;
use tokio::runtime::Runtime;

const NUM_ACCOUNTS: usize = 10_000;
const NUM_IMPORTED: usize = 200;

fn sample_accounts() -> Vec<Account> {
    (1..=NUM_ACCOUNTS as u32)
        .map(|id| Account {
            id,
            evm_private_key: format!("0x{:064x}", id),
            sol_private_key: format!("So1{:040}", id),
            email: format!("user{}@mail.com", id),
            ..Account::default()
        })
        .collect()
}

fn import_csv() -> String {
    let mut csv = String::from("evm_private_key,email\n");
    for i in 0..NUM_IMPORTED {
        writeln!(csv, "0x{:064x},farm{}@mail.com", i, i).unwrap();
    }
    csv
}

fn filter_selector(c: &mut Criterion) {
    let accounts = sample_accounts();
    let mut group = c.benchmark_group("filter");
    group.throughput(Throughput::Elements(NUM_ACCOUNTS as u64));

    group.bench_function("filter_10K_accounts", |b| {
        b.iter(|| filter_accounts(&accounts, "USER99"));
    });

    group.finish();
}

fn import(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("accounts.csv");
    std::fs::write(&input, import_csv()).unwrap();

    let mut group = c.benchmark_group("import");
    // Every add rewrites the whole file
    group.throughput(Throughput::Elements(NUM_IMPORTED as u64));
    group.measurement_time(Duration::from_secs(20));
    group.sample_size(20);

    group.bench_function("sync_import_200_accounts", |b| {
        b.iter_batched(
            || {
                let store_dir = tempfile::tempdir().unwrap();
                let store = AccountsStore::open(store_dir.path().join("accounts.json")).unwrap();
                (store_dir, store)
            },
            |(_store_dir, mut store)| import_accounts(&input, &mut store).unwrap(),
            BatchSize::PerIteration,
        );
    });

    group.bench_function("async_import_200_accounts", |b| {
        let rt = Runtime::new().unwrap();
        b.to_async(rt).iter_batched(
            || {
                let store_dir = tempfile::tempdir().unwrap();
                let store = AccountsStore::open(store_dir.path().join("accounts.json")).unwrap();
                (store_dir, store)
            },
            |(store_dir, mut store)| {
                let input = input.clone();
                async move {
                    let added = import_accounts_async(&input, &mut store).await.unwrap();
                    drop(store_dir);
                    added
                }
            },
            BatchSize::PerIteration,
        );
    });

    group.finish();
}

criterion_group!(benches, filter_selector, import);
criterion_main!(benches);
