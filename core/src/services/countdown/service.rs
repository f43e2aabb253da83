//! Resumable one-second countdown for OTP resend gating.

use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::store::{Credentials, FlowKind, SetOptions};

/// Countdown gating the resend action of one flow's OTP step
///
/// The remainder is written to the flow's countdown key on every tick and
/// the key is removed when the countdown reaches zero, so an interrupted
/// process can resume from where it stopped. Each flow kind owns its own
/// countdown key, so login and password reset countdowns never collide.
pub struct FlowCountdown {
    credentials: Credentials,
    kind: FlowKind,
    sender: watch::Sender<u32>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl FlowCountdown {
    /// Create a countdown for the given flow
    ///
    /// The initial remainder is whatever storage holds for the flow; the
    /// ticker does not run until `start` or `resume` is called.
    pub fn new(credentials: Credentials, kind: FlowKind) -> Self {
        let persisted = Self::persisted_remaining(&credentials, kind).unwrap_or(0);
        let (sender, _) = watch::channel(persisted);
        Self {
            credentials,
            kind,
            sender,
            ticker: Mutex::new(None),
        }
    }

    /// Remaining seconds as currently known
    pub fn remaining(&self) -> u32 {
        *self.sender.borrow()
    }

    /// Subscribe to remainder updates
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.sender.subscribe()
    }

    /// Start the countdown from `seconds`, replacing any running ticker
    pub fn start(&self, seconds: u32) {
        self.abort_ticker();
        if seconds == 0 {
            self.credentials.delete(self.kind.countdown_key());
            self.sender.send_replace(0);
            return;
        }
        self.credentials.write(
            self.kind.countdown_key(),
            &seconds.to_string(),
            &SetOptions::default(),
        );
        self.sender.send_replace(seconds);
        self.spawn_ticker(seconds);
    }

    /// Resume a previously persisted countdown
    ///
    /// # Returns
    ///
    /// `true` when a positive remainder was found and the ticker restarted
    pub fn resume(&self) -> bool {
        let Some(remaining) = Self::persisted_remaining(&self.credentials, self.kind) else {
            return false;
        };
        if remaining == 0 {
            self.credentials.delete(self.kind.countdown_key());
            return false;
        }
        debug!(
            remaining = remaining,
            flow = ?self.kind,
            event = "countdown_resumed",
            "Resuming persisted countdown"
        );
        self.abort_ticker();
        self.sender.send_replace(remaining);
        self.spawn_ticker(remaining);
        true
    }

    /// Stop ticking but keep the persisted remainder for a later resume
    pub fn pause(&self) {
        self.abort_ticker();
    }

    /// Stop ticking and discard the persisted remainder
    pub fn cancel(&self) {
        self.abort_ticker();
        self.credentials.delete(self.kind.countdown_key());
        self.sender.send_replace(0);
    }

    fn spawn_ticker(&self, mut remaining: u32) {
        let credentials = self.credentials.clone();
        let kind = self.kind;
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            interval.tick().await;
            while remaining > 0 {
                interval.tick().await;
                remaining -= 1;
                if remaining == 0 {
                    credentials.delete(kind.countdown_key());
                } else {
                    credentials.write(
                        kind.countdown_key(),
                        &remaining.to_string(),
                        &SetOptions::default(),
                    );
                }
                sender.send_replace(remaining);
            }
        });
        if let Ok(mut guard) = self.ticker.lock() {
            *guard = Some(handle);
        }
    }

    fn abort_ticker(&self) {
        if let Ok(mut guard) = self.ticker.lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
            }
        }
    }

    fn persisted_remaining(credentials: &Credentials, kind: FlowKind) -> Option<u32> {
        credentials
            .read(kind.countdown_key())
            .and_then(|value| value.parse::<u32>().ok())
    }
}

impl Drop for FlowCountdown {
    fn drop(&mut self) {
        self.abort_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn countdown_over(store: Arc<MemoryStore>, kind: FlowKind) -> FlowCountdown {
        FlowCountdown::new(Credentials::new(store), kind)
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_and_clears_key() {
        let store = Arc::new(MemoryStore::new());
        let credentials = Credentials::new(store.clone());
        let countdown = countdown_over(store, FlowKind::LoginOtp);
        let mut receiver = countdown.subscribe();
        receiver.borrow_and_update();

        countdown.start(3);
        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), 3);
        assert_eq!(
            credentials.read("otp_countdown_remaining").as_deref(),
            Some("3")
        );

        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), 2);
        assert_eq!(
            credentials.read("otp_countdown_remaining").as_deref(),
            Some("2")
        );

        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), 1);

        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), 0);
        assert!(credentials.read("otp_countdown_remaining").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_continues_from_persisted_remainder() {
        let store = Arc::new(MemoryStore::new());
        let credentials = Credentials::new(store.clone());
        credentials.write("otp_countdown_remaining", "2", &SetOptions::default());

        let countdown = countdown_over(store, FlowKind::LoginOtp);
        assert_eq!(countdown.remaining(), 2);

        let mut receiver = countdown.subscribe();
        receiver.borrow_and_update();
        assert!(countdown.resume());

        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), 1);
        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), 0);
        assert!(credentials.read("otp_countdown_remaining").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_without_remainder_is_noop() {
        let store = Arc::new(MemoryStore::new());
        let countdown = countdown_over(store, FlowKind::LoginOtp);
        assert!(!countdown.resume());
        assert_eq!(countdown.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_keeps_remainder_for_resume() {
        let store = Arc::new(MemoryStore::new());
        let credentials = Credentials::new(store.clone());
        let countdown = countdown_over(store, FlowKind::PasswordReset);
        let mut receiver = countdown.subscribe();
        receiver.borrow_and_update();

        countdown.start(5);
        receiver.changed().await.unwrap();
        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), 4);

        countdown.pause();
        assert_eq!(
            credentials.read("reset_otp_countdown_remaining").as_deref(),
            Some("4")
        );
        assert!(countdown.resume());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_remainder() {
        let store = Arc::new(MemoryStore::new());
        let credentials = Credentials::new(store.clone());
        let countdown = countdown_over(store, FlowKind::LoginOtp);
        let mut receiver = countdown.subscribe();
        receiver.borrow_and_update();

        countdown.start(10);
        receiver.changed().await.unwrap();

        countdown.cancel();
        assert_eq!(countdown.remaining(), 0);
        assert!(credentials.read("otp_countdown_remaining").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_zero_clears_immediately() {
        let store = Arc::new(MemoryStore::new());
        let credentials = Credentials::new(store.clone());
        credentials.write("otp_countdown_remaining", "7", &SetOptions::default());

        let countdown = countdown_over(store, FlowKind::LoginOtp);
        countdown.start(0);
        assert_eq!(countdown.remaining(), 0);
        assert!(credentials.read("otp_countdown_remaining").is_none());
    }
}
