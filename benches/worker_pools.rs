//! Benchmark suite comparing the thread and task worker pools
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Each run applies a deterministic workload of transfers spread over 64
//! accounts. The ledger and requests are built outside the timed section.

use divan::Bencher;
use rust_decimal::Decimal;
use std::sync::Arc;
use transfer_ledger::{
    AsyncWorkerPool, CompletionBarrier, Ledger, PoolConfig, TransferPool, TransferRequest,
    WorkerPool,
};

const ACCOUNTS: usize = 64;

fn main() {
    divan::main();
}

fn workload(transfers: usize) -> (Arc<Ledger>, Vec<TransferRequest>) {
    let mut ledger = Ledger::new();
    for index in 0..ACCOUNTS {
        ledger
            .register(format!("acc-{}", index), "Holder", Decimal::new(1_000_000, 0))
            .expect("register account");
    }

    let requests = (0..transfers)
        .map(|i| {
            let from = format!("acc-{}", i % ACCOUNTS);
            let to = format!("acc-{}", (i * 7 + 3) % ACCOUNTS);
            TransferRequest::new(from, to, Decimal::new((i % 500 + 1) as i64, 2))
                .expect("positive amount")
        })
        .collect();

    (Arc::new(ledger), requests)
}

fn run<P: TransferPool>(ledger: Arc<Ledger>, requests: Vec<TransferRequest>, workers: usize) {
    P::submit_all(ledger, requests, &PoolConfig::new(workers, 256))
        .expect("start pool")
        .wait()
        .expect("workers finished");
}

/// Thread pool, 10,000 transfers
#[divan::bench(args = [1, 4, 8])]
fn thread_pool(bencher: Bencher, workers: usize) {
    bencher
        .with_inputs(|| workload(10_000))
        .bench_values(|(ledger, requests)| run::<WorkerPool>(ledger, requests, workers));
}

/// Task pool, 10,000 transfers
#[divan::bench(args = [1, 4, 8])]
fn async_pool(bencher: Bencher, workers: usize) {
    bencher
        .with_inputs(|| workload(10_000))
        .bench_values(|(ledger, requests)| run::<AsyncWorkerPool>(ledger, requests, workers));
}
