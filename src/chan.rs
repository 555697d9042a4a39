// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Closable blocking FIFO channel.
//!
//! Any number of producers push without ever blocking; consumers block in
//! [`Channel::recv`] until an item arrives or the channel is closed.
//!
//! Closing is a rendezvous: [`Channel::close`] wakes every blocked receiver
//! and does not return until all receivers that were waiting at that moment
//! have left the wait. Items still queued at that point are discarded, and
//! every later receive reports the closure at once. An owner that needs the
//! backlog delivered calls [`Channel::wait_idle`] before closing.
//!
//! Which blocked receiver is woken by a push is unspecified. Exactly one is
//! woken per pushed item.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Error returned by [`Channel::recv_timeout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvTimeoutError {
    /// No item arrived before the deadline
    Timeout,
    /// The channel is closed
    Closed,
}

impl fmt::Display for RecvTimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecvTimeoutError::Timeout => write!(f, "timed out waiting on channel"),
            RecvTimeoutError::Closed => write!(f, "channel is closed"),
        }
    }
}

impl std::error::Error for RecvTimeoutError {}

/// Queue contents, closed flag and waiter count share one lock
struct State<T> {
    queue: VecDeque<T>,
    closed: bool,
    waiting: usize,
}

/// Multi-producer blocking FIFO queue with a close rendezvous
pub struct Channel<T> {
    state: Mutex<State<T>>,
    /// Signalled on push (one waiter) and on close (all waiters)
    readable: Condvar,
    /// Signalled when the last waiter leaves after a close
    drained: Condvar,
    /// Signalled when a receiver blocks on an empty queue, and on close
    idle: Condvar,
}

impl<T> Channel<T> {
    /// Create an empty, open channel
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                queue: VecDeque::new(),
                closed: false,
                waiting: 0,
            }),
            readable: Condvar::new(),
            drained: Condvar::new(),
            idle: Condvar::new(),
        }
    }

    // Critical sections never panic, so a poisoned lock still holds
    // consistent state.
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an item and wake one blocked receiver.
    ///
    /// Never blocks. Silently dropped once the channel is closed.
    pub fn push(&self, item: T) {
        let mut state = self.lock();
        if state.closed {
            return;
        }
        state.queue.push_back(item);
        drop(state);
        self.readable.notify_one();
    }

    /// Pop the head of the queue, blocking while the channel is open and empty.
    ///
    /// Returns `None` immediately once the channel is closed.
    pub fn recv(&self) -> Option<T> {
        let mut state = self.lock();
        if state.closed {
            return None;
        }
        if let Some(item) = state.queue.pop_front() {
            return Some(item);
        }

        state = self.park(state, None);
        state.queue.pop_front()
    }

    /// Like [`recv`](Self::recv) but gives up after `timeout`.
    ///
    /// A timeout too large to represent as a deadline waits without limit.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        let mut state = self.lock();
        if state.closed {
            return Err(RecvTimeoutError::Closed);
        }
        if let Some(item) = state.queue.pop_front() {
            return Ok(item);
        }

        state = self.park(state, Instant::now().checked_add(timeout));
        match state.queue.pop_front() {
            Some(item) => Ok(item),
            None if state.closed => Err(RecvTimeoutError::Closed),
            None => Err(RecvTimeoutError::Timeout),
        }
    }

    /// Pop the head of the queue without blocking.
    pub fn try_recv(&self) -> Option<T> {
        self.lock().queue.pop_front()
    }

    /// Block as a counted waiter until the queue is non-empty, the channel is
    /// closed or `deadline` passes.
    fn park<'a>(
        &'a self,
        mut state: MutexGuard<'a, State<T>>,
        deadline: Option<Instant>,
    ) -> MutexGuard<'a, State<T>> {
        state.waiting += 1;
        self.idle.notify_all();

        while state.queue.is_empty() && !state.closed {
            state = match deadline {
                None => self
                    .readable
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner),
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    self.readable
                        .wait_timeout(state, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
            };
        }

        state.waiting -= 1;
        if state.closed && state.waiting == 0 {
            self.drained.notify_all();
        }
        state
    }

    /// Block until the queue is empty with a receiver waiting on it, or the
    /// channel is closed.
    ///
    /// A consumer only blocks again after it has finished with the previous
    /// item, so on return every item pushed before the call has been handed
    /// over and processed. Never returns if no receiver ever blocks and the
    /// channel stays open.
    pub fn wait_idle(&self) {
        let mut state = self.lock();
        while !state.closed && !(state.queue.is_empty() && state.waiting > 0) {
            state = self.idle.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Close the channel.
    ///
    /// Further pushes are ignored and queued items are discarded. Every
    /// blocked receiver is woken, and the call returns only after all of them
    /// have left their wait. A second call is a no-op.
    pub fn close(&self) {
        let mut state = self.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        let discarded = std::mem::take(&mut state.queue);
        self.readable.notify_all();
        self.idle.notify_all();

        while state.waiting > 0 {
            state = self
                .drained
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        // Item destructors run outside the lock
        drop(state);
        drop(discarded);
    }

    /// Current queue length, 0 once closed. Advisory only, it may be stale
    /// on return.
    pub fn len(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Number of receivers currently blocked in `recv`/`recv_timeout`
    pub fn waiting_receivers(&self) -> usize {
        self.lock().waiting
    }

    /// Blocking iterator that ends when the channel is closed
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { channel: self }
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Channel<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Channel")
            .field("len", &state.queue.len())
            .field("closed", &state.closed)
            .field("waiting", &state.waiting)
            .finish()
    }
}

/// Iterator returned by [`Channel::iter`]
pub struct Iter<'a, T> {
    channel: &'a Channel<T>,
}

impl<T> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.channel.recv()
    }
}

impl<'a, T> IntoIterator for &'a Channel<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
