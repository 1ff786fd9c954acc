use crate::domain::ViewEvent;

/// Sink for "viewed" notifications.
///
/// `notify_viewed` hands the event off and returns immediately. Delivery is
/// best-effort: implementations log failures and never report them back.
pub trait ViewNotifier: Send + Sync {
    fn notify_viewed(&self, event: ViewEvent);
}
