//! Live streaming registrations, consumed as lazy pull sequences.
//!
//! A [`Subscription`] is one server-streaming registration. A forwarder task
//! drains the stub stream into a shared queue; the consumer pulls elements
//! one at a time with [`Subscription::next`]. The task ends when the broker
//! closes the stream, when a stream error arrives (delivered as the final
//! element), or when the owning channel is forced shut.
//!
//! When the registration asked for a bounded buffer and the consumer falls
//! behind, the oldest buffered update is dropped to admit the newest —
//! delivery stays in broker-send order, minus the dropped prefix.
//!
//! Cancellation is independent per subscription: cancelling one stream never
//! touches the channel or sibling subscriptions, never blocks, and is safe
//! to call more than once.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures::{Stream, StreamExt};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::channel::SignalChannel;
use crate::error::ClientError;

struct SharedQueue<T> {
    items: Mutex<VecDeque<Result<T, ClientError>>>,
    notify: Notify,
    capacity: Option<usize>,
    closed: AtomicBool,
}

impl<T> SharedQueue<T> {
    fn new(capacity: Option<usize>) -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
            capacity,
            closed: AtomicBool::new(false),
        }
    }

    /// Admit one element, dropping the oldest buffered one when full.
    fn push(&self, item: Result<T, ClientError>) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }

        {
            let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(capacity) = self.capacity {
                if capacity > 0 && items.len() >= capacity {
                    let _ = items.pop_front();
                    warn!(capacity, "subscription buffer full, dropped oldest update");
                }
            }
            items.push_back(item);
        }

        self.notify.notify_one();
    }

    fn pop(&self) -> Option<Result<T, ClientError>> {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.notify.notify_waiters();
        self.notify.notify_one();
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// One live streaming registration.
pub struct Subscription<T> {
    queue: Arc<SharedQueue<T>>,
    task: JoinHandle<()>,
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

impl<T: Send + 'static> Subscription<T> {
    /// Bridge a stub stream into a pull sequence.
    ///
    /// `capacity` bounds the client-side buffer; `None` buffers without
    /// limit (default stub behavior). The forwarder also ends when `channel`
    /// is forced shut, so a connection-level teardown cancels the stream
    /// abruptly.
    pub(crate) fn spawn<S>(stream: S, channel: SignalChannel, capacity: Option<usize>) -> Self
    where
        S: Stream<Item = Result<T, tonic::Status>> + Send + Unpin + 'static,
    {
        let queue = Arc::new(SharedQueue::new(capacity));
        let task_queue = Arc::clone(&queue);

        let task = tokio::spawn(async move {
            let mut stream = stream;
            loop {
                tokio::select! {
                    message = stream.next() => match message {
                        Some(Ok(item)) => task_queue.push(Ok(item)),
                        Some(Err(status)) => {
                            task_queue.push(Err(status.into()));
                            break;
                        }
                        None => break,
                    },
                    () = channel.closed() => {
                        debug!("channel shut down, ending subscription stream");
                        break;
                    }
                }
            }
            task_queue.close();
        });

        Self { queue, task }
    }

    /// The next element, in broker-send order. Returns `None` once the
    /// stream has ended and the buffer is drained. A stream-level failure is
    /// delivered as the final `Err` element.
    pub async fn next(&mut self) -> Option<Result<T, ClientError>> {
        loop {
            // Register interest before checking, so a push between the check
            // and the await still wakes us.
            let notified = self.queue.notify.notified();

            if let Some(item) = self.queue.pop() {
                return Some(item);
            }
            if self.queue.is_closed() {
                return None;
            }

            notified.await;
        }
    }

    /// Unregister this stream. Does not affect the channel or sibling
    /// subscriptions; never blocks; safe to call more than once.
    pub fn cancel(&self) {
        self.task.abort();
        self.queue.close();
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Cancellation handle for a listener-bridged subscription.
///
/// The push adapter and the pull sequence it consumes share one underlying
/// registration; cancelling the handle cancels both.
pub struct SubscriptionHandle {
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// True while the bridged stream is still being pumped.
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop pumping and unregister the underlying stream. Idempotent.
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
