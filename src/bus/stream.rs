use std::pin::Pin;
use std::sync::Weak;
use std::task::{Context, Poll};

use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio_stream::Stream;
use tracing::debug;

use super::topic_bus::BusInner;

/// An open subscription on a [`TopicBus`](super::TopicBus).
///
/// Yields payloads in publish order until closed or until the bus is torn
/// down. Not rewindable: reopening means subscribing again, which only sees
/// payloads published after that point.
///
/// When dropped, the registration is released.
pub struct TopicStream<P> {
    stream_id: u64,
    topics: Vec<String>,
    receiver: mpsc::UnboundedReceiver<P>,
    bus: Weak<BusInner<P>>,
    finished: bool,
}

impl<P> TopicStream<P> {
    pub(super) fn new(
        stream_id: u64,
        topics: Vec<String>,
        receiver: mpsc::UnboundedReceiver<P>,
        bus: Weak<BusInner<P>>,
    ) -> Self {
        Self {
            stream_id,
            topics,
            receiver,
            bus,
            finished: false,
        }
    }

    /// Wait for the next payload.
    ///
    /// Returns `None` once the bus has been torn down and everything already
    /// delivered has been read.
    pub async fn recv(&mut self) -> Option<P> {
        let next = self.receiver.recv().await;
        if next.is_none() {
            self.finished = true;
        }
        next
    }

    /// Take the next payload if one is already waiting.
    pub fn try_recv(&mut self) -> Option<P> {
        match self.receiver.try_recv() {
            Ok(payload) => Some(payload),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finished = true;
                None
            }
        }
    }

    /// Topics this stream is registered for.
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// True once the stream has observed the end of its payloads.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stop delivery and release the registration.
    pub fn close(self) {
        drop(self)
    }
}

impl<P> Stream for TopicStream<P> {
    type Item = P;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<P>> {
        let polled = self.receiver.poll_recv(cx);
        if let Poll::Ready(None) = polled {
            self.finished = true;
        }
        polled
    }
}

impl<P> Drop for TopicStream<P> {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.unregister(self.stream_id, &self.topics);
        }
        debug!(topics = ?self.topics, stream_id = self.stream_id, "stream closed");
    }
}
