//! Cooperative cancellation for blocking generation loops.
//!
//! The decoding loop runs on a plain thread, so cancellation is a flag plus an
//! optional deadline that the loop polls once per step. No runtime is needed
//! to fire a timeout.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// A token polled by the generation loop to decide whether to keep going.
#[derive(Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    /// Creates a new token together with the handle that cancels it.
    ///
    /// ```ignore
    /// let (token, handle) = CancellationToken::new();
    /// std::thread::spawn(move || summarizer.summarize_with_cancellation(&text, &token));
    /// handle.cancel();
    /// ```
    pub fn new() -> (Self, CancellationHandle) {
        let cancelled = Arc::new(AtomicBool::new(false));
        let token = CancellationToken {
            cancelled: cancelled.clone(),
            deadline: None,
        };
        (token, CancellationHandle { cancelled })
    }

    /// Creates a token that also reports cancelled once `timeout` has elapsed.
    pub fn with_timeout(timeout: Duration) -> (Self, CancellationHandle) {
        let (mut token, handle) = Self::new();
        token.deadline = Instant::now().checked_add(timeout);
        (token, handle)
    }

    /// Creates a token that is never cancelled.
    pub fn never() -> Self {
        CancellationToken {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: None,
        }
    }

    /// Creates a token that is already cancelled.
    pub fn already_cancelled() -> Self {
        CancellationToken {
            cancelled: Arc::new(AtomicBool::new(true)),
            deadline: None,
        }
    }

    /// Checks if cancellation was requested or the deadline has passed.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// The deadline attached to this token, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl Default for CancellationToken {
    /// Default token is never cancelled.
    fn default() -> Self {
        Self::never()
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .field("deadline", &self.deadline)
            .finish()
    }
}

/// A handle that can trigger cancellation.
#[derive(Clone)]
pub struct CancellationHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancellationHandle {
    /// Signals cancellation to every token created with this handle.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Checks if cancellation has already been triggered.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Wraps the handle so that it cancels when dropped.
    ///
    /// Useful when the waiting side (an HTTP request future, say) may be
    /// dropped while blocking work it started is still running.
    pub fn cancel_on_drop(self) -> CancelOnDrop {
        CancelOnDrop(Some(self))
    }
}

impl std::fmt::Debug for CancellationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Guard returned by [`CancellationHandle::cancel_on_drop`].
#[derive(Debug)]
pub struct CancelOnDrop(Option<CancellationHandle>);

impl CancelOnDrop {
    /// Releases the guard without cancelling.
    pub fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if let Some(handle) = self.0.take() {
            handle.cancel();
        }
    }
}

#[cfg(test)]
mod cancellation_tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_token_not_cancelled() {
        let (token, _handle) = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(token.deadline().is_none());
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let (token, handle) = CancellationToken::new();

        let worker = thread::spawn(move || {
            while !token.is_cancelled() {
                thread::sleep(Duration::from_millis(5));
            }
            token.is_cancelled()
        });

        thread::sleep(Duration::from_millis(20));
        handle.cancel();

        assert!(worker.join().unwrap());
    }

    #[test]
    fn test_cloned_tokens_share_state() {
        let (token1, handle) = CancellationToken::new();
        let token2 = token1.clone();

        handle.cancel();
        handle.cancel();

        assert!(token1.is_cancelled());
        assert!(token2.is_cancelled());
    }

    #[test]
    fn test_zero_timeout_is_cancelled_immediately() {
        let (token, handle) = CancellationToken::with_timeout(Duration::ZERO);
        assert!(token.is_cancelled());
        // The deadline does not flip the shared flag.
        assert!(!handle.is_cancelled());
    }

    #[test]
    fn test_long_timeout_not_cancelled() {
        let (token, _handle) = CancellationToken::with_timeout(Duration::from_secs(3600));
        assert!(!token.is_cancelled());
        assert!(token.deadline().is_some());
    }

    #[test]
    fn test_never_and_already_cancelled() {
        assert!(!CancellationToken::never().is_cancelled());
        assert!(!CancellationToken::default().is_cancelled());
        assert!(CancellationToken::already_cancelled().is_cancelled());
    }

    #[test]
    fn test_cancel_on_drop() {
        let (token, handle) = CancellationToken::new();
        {
            let _guard = handle.cancel_on_drop();
            assert!(!token.is_cancelled());
        }
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_disarmed_guard_does_not_cancel() {
        let (token, handle) = CancellationToken::new();
        handle.cancel_on_drop().disarm();
        assert!(!token.is_cancelled());
    }
}
