use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::debug;

use super::stream::TopicStream;

/// A registered stream under one topic.
struct Registration<P> {
    stream_id: u64,
    sender: mpsc::UnboundedSender<P>,
}

pub(super) struct BusInner<P> {
    topics: Mutex<HashMap<String, Vec<Registration<P>>>>,
    next_stream_id: AtomicU64,
    events_published: AtomicU64,
    closed: AtomicBool,
}

impl<P> BusInner<P> {
    fn topics(&self) -> MutexGuard<'_, HashMap<String, Vec<Registration<P>>>> {
        self.topics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop every registration belonging to a stream.
    pub(super) fn unregister(&self, stream_id: u64, topics: &[String]) {
        let mut registry = self.topics();
        for topic in topics {
            if let Some(registrations) = registry.get_mut(topic) {
                registrations.retain(|r| r.stream_id != stream_id);
                if registrations.is_empty() {
                    registry.remove(topic);
                }
            }
        }
    }
}

/// In-memory topic bus.
///
/// Features:
/// - Thread-safe (can be shared across threads via `Clone`)
/// - Any number of independent streams per topic
/// - One stream may listen on several topics
/// - No buffering for absent listeners, no replay
pub struct TopicBus<P> {
    inner: Arc<BusInner<P>>,
}

impl<P> Clone for TopicBus<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Clone + Send + 'static> Default for TopicBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone + Send + 'static> TopicBus<P> {
    /// Create a bus with no topics.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BusInner {
                topics: Mutex::new(HashMap::new()),
                next_stream_id: AtomicU64::new(1),
                events_published: AtomicU64::new(0),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Deliver a payload to every stream currently registered for `topic`.
    ///
    /// Returns the number of streams that received it.
    pub fn publish(&self, topic: &str, payload: P) -> usize {
        self.inner.events_published.fetch_add(1, Ordering::Relaxed);

        let mut registry = self.inner.topics();
        let Some(registrations) = registry.get_mut(topic) else {
            debug!(topic, "payload dropped (no receivers)");
            return 0;
        };

        // A failed send means the receiver is gone but has not unregistered yet.
        registrations.retain(|r| r.sender.send(payload.clone()).is_ok());
        let receivers = registrations.len();
        if receivers == 0 {
            registry.remove(topic);
        }

        debug!(topic, receivers, "payload published");
        receivers
    }

    /// Open a new stream receiving payloads published to any of `topics` from now on.
    ///
    /// On a closed bus the stream is already finished.
    pub fn subscribe<I, T>(&self, topics: I) -> TopicStream<P>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut topics: Vec<String> = topics.into_iter().map(Into::into).collect();
        topics.sort();
        topics.dedup();

        let stream_id = self.inner.next_stream_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();

        {
            let mut registry = self.inner.topics();
            // Checked under the registry lock so a concurrent `close` cannot be missed.
            if !self.inner.closed.load(Ordering::Acquire) {
                for topic in &topics {
                    registry
                        .entry(topic.clone())
                        .or_default()
                        .push(Registration {
                            stream_id,
                            sender: sender.clone(),
                        });
                }
            }
        }

        debug!(?topics, stream_id, "stream opened");
        TopicStream::new(stream_id, topics, receiver, Arc::downgrade(&self.inner))
    }

    /// Number of open streams registered for a topic.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.inner.topics().get(topic).map_or(0, Vec::len)
    }

    /// Total payloads published, including dropped ones.
    pub fn events_published(&self) -> u64 {
        self.inner.events_published.load(Ordering::Relaxed)
    }

    /// Tear the bus down: every open stream ends after draining what it already holds,
    /// and later subscriptions start finished.
    pub fn close(&self) {
        let mut registry = self.inner.topics();
        self.inner.closed.store(true, Ordering::Release);
        registry.clear();
        debug!("bus closed");
    }

    /// Check if the bus has been torn down.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}
