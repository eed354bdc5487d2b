//! Topic bus - in-process publish/subscribe fan-out.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    TopicBus<P>                           │
//! │  publish(topic, payload)   subscribe([topics])           │
//! └──────────────────────────────────────────────────────────┘
//!               │ one unbounded channel per open stream
//!      ┌────────┴─────────┬──────────────────┐
//!      ▼                  ▼                  ▼
//! ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//! │TopicStream  │   │TopicStream  │   │TopicStream  │
//! │ [A]         │   │ [A, B]      │   │ [B]         │
//! └─────────────┘   └─────────────┘   └─────────────┘
//! ```
//!
//! Delivery is fire-and-forget: a payload published to a topic nobody listens
//! on is dropped. Publishing never blocks. Each stream sees its payloads in
//! publish order. Dropping a stream (or calling `close`) releases its
//! registrations.
//!
//! ## Example
//!
//! ```
//! use media_catalog::bus::TopicBus;
//!
//! let bus = TopicBus::<String>::new();
//! let mut stream = bus.subscribe(["GREETINGS"]);
//!
//! bus.publish("GREETINGS", "hello".to_string());
//! bus.publish("OTHER", "ignored".to_string());
//!
//! assert_eq!(stream.try_recv(), Some("hello".to_string()));
//! assert_eq!(stream.try_recv(), None);
//! ```

mod stream;
mod topic_bus;

pub use stream::TopicStream;
pub use topic_bus::TopicBus;
