//! Workspace notifications and the timer that expires success messages.

use std::{future::Future, time::Duration};

use tokio::{task::JoinHandle, time::Instant};
use tracing::debug;

pub const SUCCESS_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// One scheduled callback at a time. Re-arming aborts the previous task.
#[derive(Debug, Default)]
pub struct NotificationTimer {
    pending: Option<JoinHandle<()>>,
}

impl NotificationTimer {
    /// The deadline is fixed at the moment of arming, not when the spawned
    /// task is first polled.
    pub fn arm<F>(&mut self, delay: Duration, on_expire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let deadline = Instant::now() + delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            on_expire.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Forget the handle without aborting; used by the expiring task itself.
    fn release(&mut self) {
        self.pending = None;
    }
}

impl Drop for NotificationTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SuccessNotice {
    message: String,
    seq: u64,
}

/// Error text persists until dismissed or replaced; success text expires.
#[derive(Debug, Default)]
pub struct Notifications {
    error: Option<String>,
    success: Option<SuccessNotice>,
    next_seq: u64,
    timer: NotificationTimer,
}

impl Notifications {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_ref().map(|notice| notice.message.as_str())
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Replaces any current success message and returns the sequence number
    /// the caller must pass to [`Notifications::expire_success`]. The caller
    /// is expected to arm the timer via [`Notifications::schedule_expiry`].
    pub fn set_success(&mut self, message: impl Into<String>) -> u64 {
        self.timer.cancel();
        self.next_seq += 1;
        self.success = Some(SuccessNotice {
            message: message.into(),
            seq: self.next_seq,
        });
        self.next_seq
    }

    pub fn schedule_expiry<F>(&mut self, delay: Duration, on_expire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.timer.arm(delay, on_expire);
    }

    pub fn dismiss_success(&mut self) {
        self.timer.cancel();
        self.success = None;
    }

    /// Clears the success message only if it is still the one `seq` names.
    pub fn expire_success(&mut self, seq: u64) -> bool {
        if !self.success.as_ref().is_some_and(|notice| notice.seq == seq) {
            return false;
        }
        debug!(seq, "success notification expired");
        self.success = None;
        self.timer.release();
        true
    }

    pub fn expiry_pending(&self) -> bool {
        self.timer.is_armed()
    }
}
