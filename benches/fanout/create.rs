//! # Create — Stream Bring-Up And Teardown Cost
//!
//! **Real-world scenario**: short-lived pipelines brought up per batch or
//! per connection, where spawn/join cost dominates over steady-state
//! throughput.
//!
//! A stream always carries its reclaimer task, so the floor here is one
//! thread spawn plus one join; each registered job adds a worker.

use crossbeam_channel::bounded as crossbeam_bounded;
use test::Bencher;
use ventaglio::fanout::stream;

const BUFFER_SIZE: usize = 1024;

#[bench]
fn ventaglio_no_jobs(b: &mut Bencher) {
    b.iter(|| stream::<u64>(0).unwrap().shutdown().unwrap());
}

#[bench]
fn ventaglio_one_job(b: &mut Bencher) {
    b.iter(|| {
        let stream = stream::<u64>(1).unwrap();
        stream.register_job(1, |_: &u64| {}).unwrap();
        stream.shutdown().unwrap();
    });
}

#[bench]
fn crossbeam_channel_and_consumer(b: &mut Bencher) {
    b.iter(|| {
        let (tx, rx) = crossbeam_bounded::<u64>(BUFFER_SIZE);
        let consumer = std::thread::spawn(move || while rx.recv().is_ok() {});
        drop(tx);
        consumer.join().unwrap();
    });
}
