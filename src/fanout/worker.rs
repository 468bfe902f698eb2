use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{error, trace};

use crate::fanout::JobId;
use crate::fanout::shared::Shared;

/// Job worker task: walks the list from the head, applying `func` to every
/// record exactly once, in enqueue order.
///
/// Per node: claim the visit and run `func`, then block until the successor
/// exists, count this worker off the node and step forward. The claim flag
/// survives the wait, so a record is never processed twice even though the
/// worker re-checks the same node after every wakeup. Observing the
/// end-of-stream marker opens its gate and ends the task.
pub(super) fn run<T, F>(shared: Arc<Shared<T>>, job_id: JobId, func: F)
where
    F: Fn(&T),
{
    let mut node = shared.wait_head();
    loop {
        if node.eos {
            trace!(job_id, "end of stream observed");
            node.gate.open();
            return;
        }

        if let Some(record) = node.claim(job_id) {
            // A panicking job must not wedge the stream: the node still has
            // to drain so the reclaimer can move past it.
            if panic::catch_unwind(AssertUnwindSafe(|| func(record))).is_err() {
                error!(job_id, seq = node.seq, "job function panicked, record skipped");
            }
        }

        let next = shared.wait_next(&node);
        node.leave();
        node = next;
    }
}
