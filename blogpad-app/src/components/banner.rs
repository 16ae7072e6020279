use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct BannerSlot {
    message: Option<String>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl BannerSlot {
    fn abort_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn replace(&mut self, message: Option<String>) {
        self.abort_timer();
        self.generation = self.generation.wrapping_add(1);
        self.message = message;
    }
}

impl Drop for BannerSlot {
    fn drop(&mut self) {
        self.abort_timer();
    }
}

/// A single message slot that can dismiss itself.
///
/// A new message replaces the old one and cancels its timer. Timed
/// messages need a running tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct Banner {
    slot: Arc<Mutex<BannerSlot>>,
}

impl Banner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BannerSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.lock().message.clone()
    }

    /// Shows `message` until replaced or cleared.
    pub fn show(&self, message: impl Into<String>) {
        self.lock().replace(Some(message.into()));
    }

    /// Shows `message` and clears it after `delay`.
    pub fn show_for(&self, message: impl Into<String>, delay: Duration) {
        let mut slot = self.lock();
        slot.replace(Some(message.into()));

        let generation = slot.generation;
        let weak = Arc::downgrade(&self.slot);
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = weak.upgrade() {
                let mut slot = shared.lock().unwrap_or_else(PoisonError::into_inner);
                if slot.generation == generation {
                    slot.message = None;
                    slot.timer = None;
                }
            }
        }));
    }

    pub fn clear(&self) {
        self.lock().replace(None);
    }

    /// Stops a pending dismissal without touching the message.
    pub fn cancel(&self) {
        self.lock().abort_timer();
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock()
            .timer
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }
}
