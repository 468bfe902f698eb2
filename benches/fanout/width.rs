//! # Width — Scaling With The Number Of Jobs
//!
//! **Real-world scenario**: the same feed consumed by a growing set of
//! independent jobs. Every job walks the same nodes, so the marginal cost
//! of one more job is one more walker on the list, not another copy of the
//! stream.

use test::Bencher;
use ventaglio::fanout::stream;

const TOTAL_MESSAGES: usize = 5_000;

fn fan_out(b: &mut Bencher, jobs: usize) {
    b.iter(|| {
        let stream = stream::<u64>(jobs).unwrap();
        for job_id in 1..=jobs {
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
fn one_job(b: &mut Bencher) {
    fan_out(b, 1);
}

#[bench]
fn two_jobs(b: &mut Bencher) {
    fan_out(b, 2);
}

#[bench]
fn four_jobs(b: &mut Bencher) {
    fan_out(b, 4);
}

#[bench]
fn one_job_per_cpu(b: &mut Bencher) {
    fan_out(b, num_cpus::get().max(1));
}
