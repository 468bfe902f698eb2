use std::mem;
use std::sync::Arc;

use tracing::{debug, error};

use crate::fanout::shared::Shared;

/// Reclaimer task: consumes each head node's gate, advances the head and
/// destroys the drained node.
///
/// A gate only opens once every worker has moved past the node, so the
/// successor is either already linked or (with zero workers) arrives with
/// the next append; reclamation never overtakes the slowest worker. At the
/// end-of-stream marker the reclaimer joins every worker first and tears the
/// marker down last, so no task can touch a destroyed node.
pub(super) fn run<T>(shared: Arc<Shared<T>>) {
    let mut node = shared.wait_head();
    loop {
        node.gate.wait();

        if node.eos {
            let workers = mem::take(&mut *shared.workers.lock());
            debug!(workers = workers.len(), "end of stream, joining workers");
            for (job_id, handle) in workers {
                if handle.join().is_err() {
                    error!(job_id, "worker task panicked");
                }
            }
            shared.clear();
            debug!(seq = node.seq, "destroyed end-of-stream marker");
            return;
        }

        let next = shared.wait_next(&node);
        shared.advance_head(next.clone());
        debug!(seq = node.seq, "destroyed drained node");
        node = next;
    }
}
