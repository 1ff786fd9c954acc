//! Redis PubSub implementation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use cinegate_core::ports::{PubSub, PubSubError, PubSubMessage};

use crate::cache::RedisConfig;

/// Redis-backed PubSub, shared by every gateway instance.
pub struct RedisPubSub {
    conn: ConnectionManager,
    client: Client,
    subscriptions: Mutex<Vec<JoinHandle<()>>>,
}

impl RedisPubSub {
    pub async fn new(config: &RedisConfig) -> Result<Self, PubSubError> {
        let (client, conn) = config.connect().await.map_err(PubSubError::Connection)?;

        tracing::info!(url = %config.url, "Connected to Redis PubSub");

        Ok(Self {
            conn,
            client,
            subscriptions: Mutex::new(Vec::new()),
        })
    }
}

impl Drop for RedisPubSub {
    fn drop(&mut self) {
        for handle in self.subscriptions.get_mut().drain(..) {
            handle.abort();
        }
    }
}

#[async_trait]
impl PubSub for RedisPubSub {
    async fn publish(&self, channel: &str, message: &str) -> Result<(), PubSubError> {
        let mut conn = self.conn.clone();
        conn.publish::<_, _, ()>(channel, message)
            .await
            .map_err(|e| PubSubError::PublishError(e.to_string()))?;
        Ok(())
    }

    async fn subscribe<F>(&self, channel: &str, handler: F) -> Result<(), PubSubError>
    where
        F: Fn(PubSubMessage) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync + 'static,
    {
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(|e| PubSubError::Connection(e.to_string()))?;
        pubsub
            .subscribe(channel)
            .await
            .map_err(|e| PubSubError::SubscribeError(e.to_string()))?;

        let channel_name = channel.to_string();
        let handler = Arc::new(handler);

        let handle = tokio::spawn(async move {
            tracing::debug!(channel = %channel_name, "Subscribed to Redis channel");

            let mut stream = pubsub.on_message();
            while let Some(msg) = stream.next().await {
                let payload: String = match msg.get_payload() {
                    Ok(p) => p,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to get message payload");
                        continue;
                    }
                };

                handler(PubSubMessage {
                    channel: msg.get_channel_name().to_string(),
                    payload,
                })
                .await;
            }

            tracing::info!(channel = %channel_name, "PubSub connection closed");
        });

        self.subscriptions.lock().await.push(handle);

        Ok(())
    }
}
