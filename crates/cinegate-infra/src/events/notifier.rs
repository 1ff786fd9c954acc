//! Fire-and-forget view notifier.
//!
//! Reads hand events to a bounded queue and return at once. A single worker
//! task drains the queue and publishes each event on the configured pub/sub
//! channel. A full queue drops the event; a failed publish is logged and
//! forgotten. Nothing is retried.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use cinegate_core::domain::ViewEvent;
use cinegate_core::ports::{PubSub, ViewNotifier};

/// Channel name view events are published on.
pub const MOVIE_VIEWED_CHANNEL: &str = "movie.viewed";

#[derive(Debug, Clone)]
pub struct ViewNotifierConfig {
    pub channel: String,
    /// Events queued beyond this are dropped.
    pub buffer_size: usize,
}

impl Default for ViewNotifierConfig {
    fn default() -> Self {
        Self {
            channel: MOVIE_VIEWED_CHANNEL.to_string(),
            buffer_size: 1024,
        }
    }
}

impl ViewNotifierConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            channel: std::env::var("VIEW_EVENTS_CHANNEL")
                .unwrap_or_else(|_| MOVIE_VIEWED_CHANNEL.to_string()),
            buffer_size: std::env::var("VIEW_EVENTS_BUFFER")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(1024),
        }
    }
}

/// View notifier backed by a bounded queue and a publishing worker.
pub struct ChannelViewNotifier {
    sender: mpsc::Sender<ViewEvent>,
}

impl ChannelViewNotifier {
    /// Create the notifier and spawn its worker. Must be called inside a tokio runtime.
    pub fn new<P>(publisher: Arc<P>, config: ViewNotifierConfig) -> Self
    where
        P: PubSub + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<ViewEvent>(config.buffer_size.max(1));
        let channel = config.channel;

        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let payload = match serde_json::to_string(&event) {
                    Ok(p) => p,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to serialize view event");
                        continue;
                    }
                };

                match publisher.publish(&channel, &payload).await {
                    Ok(()) => tracing::debug!(
                        actor_id = event.actor_id,
                        item_id = event.item_id,
                        "View event published"
                    ),
                    Err(e) => tracing::warn!(
                        channel = %channel,
                        actor_id = event.actor_id,
                        item_id = event.item_id,
                        error = %e,
                        "Failed to publish view event"
                    ),
                }
            }

            tracing::debug!("View notifier worker stopped");
        });

        Self { sender: tx }
    }
}

impl ViewNotifier for ChannelViewNotifier {
    fn notify_viewed(&self, event: ViewEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => tracing::warn!(
                actor_id = event.actor_id,
                item_id = event.item_id,
                "View event queue full, dropping event"
            ),
            Err(TrySendError::Closed(event)) => tracing::warn!(
                actor_id = event.actor_id,
                item_id = event.item_id,
                "View notifier worker is gone, dropping event"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cinegate_core::ports::{PubSubError, PubSubMessage};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::pubsub::InMemoryPubSub;

    /// Event channel that is never reachable.
    #[derive(Default)]
    struct UnreachablePubSub {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl PubSub for UnreachablePubSub {
        async fn publish(&self, _channel: &str, _message: &str) -> Result<(), PubSubError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(PubSubError::Connection("broker unreachable".to_string()))
        }

        async fn subscribe<F>(&self, _channel: &str, _handler: F) -> Result<(), PubSubError>
        where
            F: Fn(PubSubMessage) -> Pin<Box<dyn Future<Output = ()> + Send>>
                + Send
                + Sync
                + 'static,
        {
            Err(PubSubError::Connection("broker unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_event_is_published_as_json() {
        let pubsub = Arc::new(InMemoryPubSub::default());
        let (tx, mut rx) = mpsc::channel(1);
        pubsub
            .subscribe(MOVIE_VIEWED_CHANNEL, move |msg| {
                let tx = tx.clone();
                Box::pin(async move {
                    let _ = tx.send(msg.payload).await;
                })
            })
            .await
            .unwrap();

        let notifier = ChannelViewNotifier::new(pubsub, ViewNotifierConfig::default());
        notifier.notify_viewed(ViewEvent::new(42, 550, "pt-BR"));

        let payload = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(json["actorId"], 42);
        assert_eq!(json["itemId"], 550);
        assert_eq!(json["language"], "pt-BR");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_publish_failure_is_swallowed_without_retry() {
        let pubsub = Arc::new(UnreachablePubSub::default());
        let notifier = ChannelViewNotifier::new(pubsub.clone(), ViewNotifierConfig::default());

        notifier.notify_viewed(ViewEvent::new(42, 550, "pt-BR"));

        for _ in 0..50 {
            if pubsub.attempts.load(Ordering::SeqCst) > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(pubsub.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_blocking() {
        let pubsub = Arc::new(UnreachablePubSub::default());
        let notifier = ChannelViewNotifier::new(
            pubsub.clone(),
            ViewNotifierConfig {
                channel: MOVIE_VIEWED_CHANNEL.to_string(),
                buffer_size: 1,
            },
        );

        // No await between sends, so the worker cannot drain in between
        let started = std::time::Instant::now();
        for item_id in 1..=100 {
            notifier.notify_viewed(ViewEvent::new(42, item_id, "pt-BR"));
        }
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(pubsub.attempts.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;

        // At most one event in flight plus one buffered; the rest were dropped
        let attempts = pubsub.attempts.load(Ordering::SeqCst);
        assert!((1..=2).contains(&attempts), "published {attempts} events");
    }
}
