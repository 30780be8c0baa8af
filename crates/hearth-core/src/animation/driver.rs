//! Tokio driver for the typing machine
//!
//! Owns the single pending timer per animator instance and forwards every
//! displayed-text change to the subscriber. Disposal cancels the pending
//! timer so no callback fires after teardown.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::typing::{TypingConfig, TypingMachine};
use crate::error::CoreError;

/// Subscriber invoked with every new displayed text
pub type OnChange = Box<dyn FnMut(&str) + Send>;

/// Handle to a running typing animation.
///
/// The driving task holds exactly one pending sleep at a time; callbacks are
/// strictly ordered and never concurrent. Dropping the handle (or calling
/// [`TypingAnimator::dispose`]) cancels the task.
#[derive(Debug)]
pub struct TypingAnimator {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl TypingAnimator {
    /// Validate inputs and start the animation on a background task.
    pub fn spawn(
        texts: Vec<String>,
        config: TypingConfig,
        on_change: impl FnMut(&str) + Send + 'static,
    ) -> Result<Self, CoreError> {
        let machine = TypingMachine::new(texts, config)?;
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_loop(machine, cancel.child_token(), Box::new(on_change)));
        Ok(Self { cancel, task })
    }

    /// Stop the animation. No callback fires after this returns.
    pub fn dispose(self) {
        self.cancel.cancel();
        self.task.abort();
        debug!("typing animator disposed");
    }
}

impl Drop for TypingAnimator {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

async fn run_loop(mut machine: TypingMachine, cancel: CancellationToken, mut on_change: OnChange) {
    loop {
        let delay = machine.next_delay();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(delay) => {
                if cancel.is_cancelled() {
                    break;
                }
                if let Some(text) = machine.advance() {
                    on_change(text);
                }
            }
        }
    }
}
