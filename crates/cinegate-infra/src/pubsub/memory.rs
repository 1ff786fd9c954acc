//! In-memory pub/sub implementation.
//!
//! Used when Redis is not configured. Works within a single process only.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};

use cinegate_core::ports::{PubSub, PubSubError, PubSubMessage};

/// In-memory pub/sub over tokio broadcast channels.
pub struct InMemoryPubSub {
    channels: RwLock<HashMap<String, broadcast::Sender<String>>>,
    buffer_size: usize,
}

impl InMemoryPubSub {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            buffer_size,
        }
    }
}

impl Default for InMemoryPubSub {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl PubSub for InMemoryPubSub {
    async fn publish(&self, channel: &str, message: &str) -> Result<(), PubSubError> {
        let channels = self.channels.read().await;

        match channels.get(channel) {
            // A send error only means every subscriber is gone
            Some(sender) => {
                let receivers = sender.send(message.to_string()).unwrap_or(0);
                tracing::trace!(channel = %channel, receivers, "Message published");
            }
            None => tracing::trace!(channel = %channel, "No subscribers for channel"),
        }

        Ok(())
    }

    async fn subscribe<F>(&self, channel: &str, handler: F) -> Result<(), PubSubError>
    where
        F: Fn(PubSubMessage) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync + 'static,
    {
        let mut receiver = {
            let mut channels = self.channels.write().await;
            channels
                .entry(channel.to_string())
                .or_insert_with(|| broadcast::channel(self.buffer_size).0)
                .subscribe()
        };

        let channel_name = channel.to_string();
        let handler = Arc::new(handler);

        tokio::spawn(async move {
            tracing::debug!(channel = %channel_name, "Subscribed to channel");

            loop {
                match receiver.recv().await {
                    Ok(payload) => {
                        handler(PubSubMessage {
                            channel: channel_name.clone(),
                            payload,
                        })
                        .await;
                    }
                    Err(broadcast::error::RecvError::Lagged(count)) => {
                        tracing::warn!(
                            channel = %channel_name,
                            lagged = count,
                            "Subscriber lagged behind"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::debug!(channel = %channel_name, "Channel closed");
                        break;
                    }
                }
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let pubsub = InMemoryPubSub::default();
        let (tx, mut rx) = mpsc::channel(1);

        pubsub
            .subscribe("movie.viewed", move |msg| {
                let tx = tx.clone();
                Box::pin(async move {
                    let _ = tx.send(msg).await;
                })
            })
            .await
            .unwrap();

        pubsub.publish("movie.viewed", "hello").await.unwrap();

        let msg = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(msg.channel, "movie.viewed");
        assert_eq!(msg.payload, "hello");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let pubsub = InMemoryPubSub::default();
        assert!(pubsub.publish("nobody.listens", "x").await.is_ok());
    }
}
