use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Fired when a scheduled bot reply is due. `epoch` is the session epoch at
/// scheduling time; the controller drops the event if it has moved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotTurnDue {
    pub epoch: u64,
}

pub trait BotScheduler {
    /// Replaces any pending reply with a new one.
    fn schedule(&mut self, epoch: u64, delay: Duration);
    fn cancel(&mut self);
}

/// Sleeps on the tokio runtime and reports through an unbounded channel, so
/// the owning event loop handles the reply like any other event.
pub struct TokioBotScheduler {
    tx: mpsc::UnboundedSender<BotTurnDue>,
    pending: Option<JoinHandle<()>>,
}

impl TokioBotScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BotTurnDue>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, pending: None }, rx)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl BotScheduler for TokioBotScheduler {
    fn schedule(&mut self, epoch: u64, delay: Duration) {
        self.cancel();
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(BotTurnDue { epoch });
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for TokioBotScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (mut scheduler, mut rx) = TokioBotScheduler::new();
        scheduler.schedule(4, Duration::from_millis(1000));

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some(BotTurnDue { epoch: 4 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_fire() {
        let (mut scheduler, mut rx) = TokioBotScheduler::new();
        scheduler.schedule(1, Duration::from_millis(500));
        scheduler.cancel();
        assert!(!scheduler.has_pending());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_pending_reply() {
        let (mut scheduler, mut rx) = TokioBotScheduler::new();
        scheduler.schedule(1, Duration::from_millis(500));
        scheduler.schedule(2, Duration::from_millis(500));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(rx.recv().await, Some(BotTurnDue { epoch: 2 }));
        assert!(rx.try_recv().is_err());
    }
}
