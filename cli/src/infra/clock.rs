//! Wall-clock infrastructure — implements the `Clock` port with tokio time.

use std::time::{Duration, Instant};

use crate::application::ports::Clock;

/// Production clock. Tests use simulated clocks instead so the readiness
/// wait runs without real delays.
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
