//! View event delivery.

mod notifier;

pub use notifier::{ChannelViewNotifier, MOVIE_VIEWED_CHANNEL, ViewNotifierConfig};
