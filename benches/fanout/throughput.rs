//! # Throughput — Sensor Feed Fanned Out To Two Consumers
//!
//! **Real-world scenario**: a telemetry feed where one producer streams
//! readings and two independent consumers (say, an aggregator and an
//! alerter) must each see every reading, in order.
//!
//! ```text
//!                    ┌──────────────┐
//!              ┌───► │  Job 1       │
//! ┌──────────┐ │     └──────────────┘
//! │ Producer │─┤  10K records, in order
//! └──────────┘ │     ┌──────────────┐
//!              └───► │  Job 2       │
//!                    └──────────────┘
//! ```
//!
//! The fan-out list shares one node per record among all jobs; the channel
//! renditions below pay one send (and one buffered copy) per job instead.

use crossbeam_channel::bounded as crossbeam_bounded;
use std::sync::mpsc::sync_channel as std_sync_channel;
use test::Bencher;
use ventaglio::fanout::stream;

const JOBS: usize = 2;
const TOTAL_MESSAGES: usize = 10_000;
const BUFFER_SIZE: usize = 1024;

#[bench]
fn ventaglio(b: &mut Bencher) {
    b.iter(|| {
        let stream = stream::<u64>(JOBS).unwrap();
        for job_id in 1..=JOBS {
            stream
                .register_job(job_id, |record: &u64| {
                    test::black_box(*record);
                })
                .unwrap();
        }
        for i in 0..TOTAL_MESSAGES {
            stream.insert(i as u64).unwrap();
        }
        stream.shutdown().unwrap();
    });
}

#[bench]
fn crossbeam_per_job_channels(b: &mut Bencher) {
    b.iter(|| {
        let mut txs = Vec::with_capacity(JOBS);
        let mut consumers = Vec::with_capacity(JOBS);
        for _ in 0..JOBS {
            let (tx, rx) = crossbeam_bounded::<u64>(BUFFER_SIZE);
            txs.push(tx);
            consumers.push(std::thread::spawn(move || {
                while let Ok(record) = rx.recv() {
                    test::black_box(record);
                }
            }));
        }
        for i in 0..TOTAL_MESSAGES {
            for tx in &txs {
                tx.send(i as u64).unwrap();
            }
        }
        drop(txs);
        for consumer in consumers {
            consumer.join().unwrap();
        }
    });
}

#[bench]
fn std_mpsc_per_job_channels(b: &mut Bencher) {
    b.iter(|| {
        let mut txs = Vec::with_capacity(JOBS);
        let mut consumers = Vec::with_capacity(JOBS);
        for _ in 0..JOBS {
            let (tx, rx) = std_sync_channel::<u64>(BUFFER_SIZE);
            txs.push(tx);
            consumers.push(std::thread::spawn(move || {
                while let Ok(record) = rx.recv() {
                    test::black_box(record);
                }
            }));
        }
        for i in 0..TOTAL_MESSAGES {
            for tx in &txs {
                tx.send(i as u64).unwrap();
            }
        }
        drop(txs);
        for consumer in consumers {
            consumer.join().unwrap();
        }
    });
}
