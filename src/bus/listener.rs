//! Listener trait for event bus subscribers

use crate::events::Notification;

/// Trait for anything that wants to hear about pointer events
///
/// Listeners are called synchronously, in subscription order, from inside
/// the tracker's tick.
pub trait PointerListener {
    /// Name of this listener for debugging
    fn name(&self) -> &str {
        "anonymous"
    }

    /// Handle a delivered or published notification
    fn on_event(&mut self, notification: &Notification);
}

impl<F> PointerListener for F
where
    F: FnMut(&Notification),
{
    fn on_event(&mut self, notification: &Notification) {
        self(notification)
    }
}
