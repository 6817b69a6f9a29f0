//! Work-queue infrastructure for CLI invocations.

use crate::application::ports::WorkQueue;

/// Constant queue signal.
///
/// A `stoker provision` invocation IS the pending work, so the CLI wires
/// in an always-pending signal. Orchestrators embedding the library
/// implement [`WorkQueue`] against their real queue instead.
pub struct StaticWorkQueue {
    pending: bool,
}

impl StaticWorkQueue {
    #[must_use]
    pub fn always_pending() -> Self {
        Self { pending: true }
    }

    #[must_use]
    pub fn drained() -> Self {
        Self { pending: false }
    }
}

impl WorkQueue for StaticWorkQueue {
    async fn has_pending_work(&self) -> bool {
        self.pending
    }
}
