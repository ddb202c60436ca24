//! TvDriver — runs the broadcast machine's timers on tokio.
//!
//! At most one timer task is alive. Any transition that changes state aborts
//! it; the token check in the machine drops anything that still slips
//! through. Tokens come back to the event loop over `tx`.

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, trace};

use vrlab_core::broadcast::{Broadcast, Timer, Transition};

pub struct TvDriver {
    machine: Broadcast,
    tx: mpsc::UnboundedSender<u64>,
    timer: Option<AbortHandle>,
}

impl TvDriver {
    pub fn new(machine: Broadcast, tx: mpsc::UnboundedSender<u64>) -> Self {
        Self {
            machine,
            tx,
            timer: None,
        }
    }

    pub fn machine(&self) -> &Broadcast {
        &self.machine
    }

    /// Run one command against the machine and reschedule accordingly.
    pub fn apply(&mut self, command: impl FnOnce(&mut Broadcast) -> Transition) -> Transition {
        let transition = command(&mut self.machine);
        if transition.changed {
            self.cancel();
        }
        if let Some(timer) = transition.schedule {
            self.spawn(timer);
        }
        transition
    }

    /// A timer came back through the channel.
    pub fn fire(&mut self, token: u64) -> Transition {
        self.apply(|m| m.timeout(token))
    }

    fn spawn(&mut self, timer: Timer) {
        trace!("tv timer {:?}", timer);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timer.delay).await;
            let _ = tx.send(timer.token);
        });
        self.timer = Some(handle.abort_handle());
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.timer.take() {
            debug!("tv timer cancelled");
            handle.abort();
        }
    }
}

impl Drop for TvDriver {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::Instant;
    use vrlab_core::broadcast::{BroadcastState, Direction, Timings};

    fn driver(content_end: Option<Duration>) -> (TvDriver, mpsc::UnboundedReceiver<u64>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let timings = Timings {
            content_end,
            ..Timings::default()
        };
        (TvDriver::new(Broadcast::new(3, timings), tx), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_power_on_plays_after_static() {
        let (mut tv, mut rx) = driver(None);
        let start = Instant::now();
        tv.apply(|m| m.power_on());

        let token = rx.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
        tv.fire(token);
        assert_eq!(tv.machine().state(), BroadcastState::Playing(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_power_off_aborts_timer() {
        let (mut tv, mut rx) = driver(None);
        tv.apply(|m| m.power_on());
        tv.apply(|m| m.power_off());

        let waited = tokio::time::timeout(Duration::from_secs(10), rx.recv()).await;
        assert!(waited.is_err());
        assert_eq!(tv.machine().state(), BroadcastState::Off);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_channel_changes_fire_once() {
        let (mut tv, mut rx) = driver(None);
        tv.apply(|m| m.power_on());
        let token = rx.recv().await.unwrap();
        tv.fire(token);

        tv.apply(|m| m.channel(Direction::Next));
        tokio::time::sleep(Duration::from_millis(500)).await;
        tv.apply(|m| m.channel(Direction::Next));

        let token = rx.recv().await.unwrap();
        tv.fire(token);
        assert_eq!(tv.machine().state(), BroadcastState::Playing(2));

        let more = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(more.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_content_end_advances_channel() {
        let (mut tv, mut rx) = driver(Some(Duration::from_secs(180)));
        tv.apply(|m| m.power_on());
        let token = rx.recv().await.unwrap();
        tv.fire(token);

        let token = rx.recv().await.unwrap();
        tv.fire(token);
        let token = rx.recv().await.unwrap();
        tv.fire(token);
        assert_eq!(tv.machine().state(), BroadcastState::Playing(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_timer() {
        let (mut tv, mut rx) = driver(None);
        tv.apply(|m| m.power_on());
        drop(tv);
        assert!(rx.recv().await.is_none());
    }
}
