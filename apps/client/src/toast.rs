//! Transient error notification with a self-clearing deadline.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const TOAST_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
struct ToastState {
    message: Option<String>,
    generation: u64,
}

/// A single notification slot.
///
/// Each [`Toast::show`] replaces the message and restarts the countdown. The
/// countdown task only holds a weak reference, so it never keeps a dropped
/// toast alive, and it is aborted on [`Toast::dismiss`] and on drop.
#[derive(Debug)]
pub struct Toast {
    state: Arc<Mutex<ToastState>>,
    timer: Option<JoinHandle<()>>,
    duration: Duration,
}

impl Default for Toast {
    fn default() -> Self {
        Self::with_duration(TOAST_DURATION)
    }
}

impl Toast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ToastState::default())),
            timer: None,
            duration,
        }
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.cancel_timer();

        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.message = Some(message.into());
            state.generation
        };

        match Handle::try_current() {
            Ok(handle) => {
                let state = Arc::downgrade(&self.state);
                let duration = self.duration;
                self.timer = Some(handle.spawn(expire_after(state, generation, duration)));
            }
            Err(_) => warn!("no async runtime available; toast will stay until dismissed"),
        }
    }

    pub fn dismiss(&mut self) {
        self.cancel_timer();
        let mut state = lock(&self.state);
        state.generation += 1;
        state.message = None;
    }

    pub fn message(&self) -> Option<String> {
        lock(&self.state).message.clone()
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.state).message.is_some()
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for Toast {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

async fn expire_after(state: Weak<Mutex<ToastState>>, generation: u64, duration: Duration) {
    tokio::time::sleep(duration).await;

    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = lock(&state);
    // a newer show or a dismiss owns the slot now
    if state.generation == generation {
        debug!("toast expired");
        state.message = None;
    }
}

fn lock(state: &Mutex<ToastState>) -> MutexGuard<'_, ToastState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
