//! Synchronization primitives for request/response traffic.
//!
//! Two distinct pieces, deliberately kept apart:
//!
//! - [`Gate`]: a one-shot completion slot. A caller arms it, sends its
//!   request, and waits; the reader task completes it on the matching
//!   reply or injects an error into it. Completions and errors arriving
//!   while nobody is armed are discarded, so a stale fault can never leak
//!   into an unrelated request.
//! - [`RequestLock`]: a named mutex with a deadline, serializing the
//!   one-outstanding-request-at-a-time invariant.

use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{
    sync::Notify,
    time::{self, Instant},
};

use crate::error::ClientError;

#[derive(Debug, Default)]
struct Slot {
    /// A waiter round is in progress.
    armed: bool,
    /// The round has been released.
    fired: bool,
    /// Errors injected into the round.
    errors: Vec<ClientError>,
}

/// One-shot completion slot with error injection and a deadline.
#[derive(Debug)]
pub(crate) struct Gate {
    name: &'static str,
    slot: Mutex<Slot>,
    notify: Notify,
}

impl Gate {
    /// Create a gate; the name shows up in timeout diagnostics.
    pub fn new(name: &'static str) -> Self {
        Self { name, slot: Mutex::new(Slot::default()), notify: Notify::new() }
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Begin a round. Starts fresh unless a round is already pending.
    pub fn arm(&self) {
        let mut slot = self.slot();
        if !slot.armed {
            slot.armed = true;
            slot.fired = false;
            slot.errors.clear();
        }
    }

    /// Abandon the pending round, discarding anything injected into it.
    /// Used when the request never made it onto the wire.
    pub fn disarm(&self) {
        let mut slot = self.slot();
        slot.armed = false;
        slot.fired = false;
        slot.errors.clear();
    }

    /// Release the armed round successfully. Ignored when nothing is
    /// armed; idempotent otherwise.
    pub fn complete(&self) {
        let mut slot = self.slot();
        if slot.armed {
            slot.fired = true;
            self.notify.notify_waiters();
        }
    }

    /// Release the armed round with an error. Multiple injections
    /// accumulate into a composite.
    pub fn fail(&self, error: ClientError) {
        let mut slot = self.slot();
        if slot.armed {
            slot.errors.push(error);
            slot.fired = true;
            self.notify.notify_waiters();
        }
    }

    /// Wait for the armed round to be released.
    ///
    /// Returns `Ok` on completion, the injected error (or composite) on
    /// failure, or [`ClientError::TimedOut`] once the deadline elapses.
    pub async fn wait(&self, timeout: Duration) -> Result<(), ClientError> {
        let deadline = Instant::now() + timeout;

        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register interest before checking state so a release between
            // the check and the await is not lost.
            notified.as_mut().enable();

            {
                let mut slot = self.slot();
                if slot.fired {
                    slot.armed = false;
                    slot.fired = false;
                    let mut errors = std::mem::take(&mut slot.errors);
                    return match errors.len() {
                        0 => Ok(()),
                        1 => Err(errors.remove(0)),
                        _ => Err(ClientError::Multiple(errors)),
                    };
                }
            }

            if time::timeout_at(deadline, notified).await.is_err() {
                let mut slot = self.slot();
                slot.armed = false;
                slot.errors.clear();
                return Err(ClientError::TimedOut { gate: self.name, timeout });
            }
        }
    }
}

/// A mutex with a deadline, used as the process gate for multi-step
/// request/response operations.
#[derive(Debug)]
pub(crate) struct RequestLock {
    name: &'static str,
    inner: tokio::sync::Mutex<()>,
}

impl RequestLock {
    /// Create a lock; the name shows up in timeout diagnostics.
    pub fn new(name: &'static str) -> Self {
        Self { name, inner: tokio::sync::Mutex::new(()) }
    }

    /// Acquire the lock, giving up after the deadline.
    pub async fn acquire(
        &self,
        timeout: Duration,
    ) -> Result<tokio::sync::MutexGuard<'_, ()>, ClientError> {
        time::timeout(timeout, self.inner.lock())
            .await
            .map_err(|_| ClientError::TimedOut { gate: self.name, timeout })
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;

    const SHORT: Duration = Duration::from_millis(50);
    const LONG: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn complete_releases_waiter() {
        let gate = Arc::new(Gate::new("test"));
        gate.arm();

        let waiter = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.wait(LONG).await })
        };
        tokio::task::yield_now().await;
        gate.complete();

        assert!(waiter.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn complete_before_wait_is_not_lost() {
        let gate = Gate::new("test");
        gate.arm();
        gate.complete();
        assert!(gate.wait(SHORT).await.is_ok());
    }

    #[tokio::test]
    async fn fail_delivers_the_injected_error() {
        let gate = Gate::new("test");
        gate.arm();
        gate.fail(ClientError::ConnectionClosed);

        assert_eq!(gate.wait(SHORT).await, Err(ClientError::ConnectionClosed));
    }

    #[tokio::test]
    async fn repeated_failures_accumulate() {
        let gate = Gate::new("test");
        gate.arm();
        gate.fail(ClientError::ConnectionClosed);
        gate.fail(ClientError::Transport("reset".to_string()));

        match gate.wait(SHORT).await {
            Err(ClientError::Multiple(errors)) => assert_eq!(errors.len(), 2),
            other => unreachable!("expected composite, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn wait_times_out_with_gate_name() {
        let gate = Gate::new("receive");
        gate.arm();

        assert_eq!(
            gate.wait(SHORT).await,
            Err(ClientError::TimedOut { gate: "receive", timeout: SHORT })
        );
    }

    #[tokio::test]
    async fn releases_without_a_round_are_discarded() {
        let gate = Gate::new("test");
        gate.complete();
        gate.fail(ClientError::ConnectionClosed);

        // A fresh round must not observe the stale releases.
        gate.arm();
        assert!(matches!(gate.wait(SHORT).await, Err(ClientError::TimedOut { .. })));
    }

    #[tokio::test]
    async fn arm_is_idempotent_while_pending() {
        let gate = Gate::new("test");
        gate.arm();
        gate.fail(ClientError::ConnectionClosed);
        gate.arm(); // pending round stays as-is

        assert_eq!(gate.wait(SHORT).await, Err(ClientError::ConnectionClosed));
    }

    #[tokio::test]
    async fn request_lock_times_out_when_held() {
        let lock = Arc::new(RequestLock::new("process"));
        let guard = lock.acquire(LONG).await.unwrap();

        let contender = {
            let lock = Arc::clone(&lock);
            tokio::spawn(async move { lock.acquire(SHORT).await.map(|_| ()) })
        };
        let result = contender.await.unwrap();
        assert_eq!(result, Err(ClientError::TimedOut { gate: "process", timeout: SHORT }));

        drop(guard);
        assert!(lock.acquire(SHORT).await.is_ok());
    }
}
