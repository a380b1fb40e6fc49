//! Typed publish/subscribe notification transport
//!
//! Subscriptions are keyed by an optional event type and an optional target
//! object. A subscription with a target hears point-to-point deliveries to
//! that object; a subscription without one hears global publications.
//!
//! ```text
//! Notifier ──deliver(target, event)──▶ listeners filtered on (event, Some(target))
//!          ──publish(event, payload)──▶ listeners filtered on (event, None)
//! ```

mod listener;

pub use listener::PointerListener;

use tracing::trace;

use crate::events::{Notification, ObjectId, PointerEvent};

/// Delivery mechanism the notifier hands events to
pub trait Transport {
    /// Sends `event` to `target` only
    ///
    /// Returns true if at least one handler received it. A target without a
    /// handler is not an error.
    fn deliver(&mut self, target: ObjectId, event: PointerEvent) -> bool;

    /// Fans `event` out to every global subscriber
    fn publish(&mut self, event: PointerEvent, payload: Option<ObjectId>);
}

/// Which notifications a subscription receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventFilter {
    /// `None` matches every event
    pub event: Option<PointerEvent>,
    /// `None` subscribes to global publications
    pub target: Option<ObjectId>,
}

impl EventFilter {
    /// Global publications of one event
    pub fn global(event: PointerEvent) -> Self {
        Self {
            event: Some(event),
            target: None,
        }
    }

    /// Every global publication
    pub fn any_global() -> Self {
        Self {
            event: None,
            target: None,
        }
    }

    /// Deliveries of one event to one object
    pub fn target(object: ObjectId, event: PointerEvent) -> Self {
        Self {
            event: Some(event),
            target: Some(object),
        }
    }

    /// Every delivery to one object
    pub fn any_for(object: ObjectId) -> Self {
        Self {
            event: None,
            target: Some(object),
        }
    }

    fn matches(&self, event: PointerEvent, target: Option<ObjectId>) -> bool {
        self.target == target && self.event.is_none_or(|e| e == event)
    }
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    listener: Box<dyn PointerListener>,
}

/// In-process [`Transport`] with typed subscriptions
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    /// Creates an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for notifications matching `filter`
    pub fn subscribe(
        &mut self,
        filter: EventFilter,
        listener: impl PointerListener + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            filter,
            listener: Box::new(listener),
        });
        id
    }

    /// Removes a subscription, returning whether it existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Number of live subscriptions
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Names of live listeners, in call order
    pub fn debug_listeners(&self) -> Vec<(SubscriptionId, String)> {
        self.subscriptions
            .iter()
            .map(|s| (s.id, s.listener.name().to_string()))
            .collect()
    }

    fn dispatch(&mut self, filter_target: Option<ObjectId>, notification: Notification) -> usize {
        let mut reached = 0;
        for subscription in &mut self.subscriptions {
            if subscription
                .filter
                .matches(notification.event, filter_target)
            {
                subscription.listener.on_event(&notification);
                reached += 1;
            }
        }
        reached
    }
}

impl Transport for EventBus {
    fn deliver(&mut self, target: ObjectId, event: PointerEvent) -> bool {
        let notification = Notification {
            event,
            target: Some(target),
        };
        let reached = self.dispatch(Some(target), notification);
        trace!(%event, %target, reached, "delivered");
        reached > 0
    }

    fn publish(&mut self, event: PointerEvent, payload: Option<ObjectId>) {
        let notification = Notification {
            event,
            target: payload,
        };
        let reached = self.dispatch(None, notification);
        trace!(%event, ?payload, reached, "published");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(bus: &mut EventBus, filter: EventFilter) -> Rc<RefCell<Vec<Notification>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        bus.subscribe(filter, move |n: &Notification| sink.borrow_mut().push(*n));
        log
    }

    #[test]
    fn test_deliver_reaches_only_matching_target() {
        let mut bus = EventBus::new();
        let a = recorder(&mut bus, EventFilter::target(ObjectId(1), PointerEvent::Click));
        let b = recorder(&mut bus, EventFilter::target(ObjectId(2), PointerEvent::Click));

        assert!(bus.deliver(ObjectId(1), PointerEvent::Click));
        assert_eq!(a.borrow().len(), 1);
        assert!(b.borrow().is_empty());
    }

    #[test]
    fn test_deliver_without_handler_is_silent() {
        let mut bus = EventBus::new();
        let global = recorder(&mut bus, EventFilter::any_global());

        assert!(!bus.deliver(ObjectId(9), PointerEvent::Press));
        // Point-to-point deliveries never reach global subscribers
        assert!(global.borrow().is_empty());
    }

    #[test]
    fn test_publish_reaches_global_subscribers_only() {
        let mut bus = EventBus::new();
        let global = recorder(&mut bus, EventFilter::global(PointerEvent::Release));
        let any = recorder(&mut bus, EventFilter::any_global());
        let targeted = recorder(&mut bus, EventFilter::any_for(ObjectId(1)));

        bus.publish(PointerEvent::Release, Some(ObjectId(1)));
        bus.publish(PointerEvent::Press, None);

        assert_eq!(
            *global.borrow(),
            vec![Notification {
                event: PointerEvent::Release,
                target: Some(ObjectId(1)),
            }]
        );
        assert_eq!(any.borrow().len(), 2);
        assert_eq!(any.borrow()[1].target, None);
        assert!(targeted.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let log = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&log);
        let id = bus.subscribe(EventFilter::any_global(), move |_: &Notification| {
            *sink.borrow_mut() += 1
        });

        bus.publish(PointerEvent::Click, None);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(PointerEvent::Click, None);

        assert_eq!(*log.borrow(), 1);
        assert_eq!(bus.subscription_count(), 0);
    }

    #[test]
    fn test_named_listener() {
        struct Counter(usize);
        impl PointerListener for Counter {
            fn name(&self) -> &str {
                "counter"
            }
            fn on_event(&mut self, _: &Notification) {
                self.0 += 1;
            }
        }

        let mut bus = EventBus::new();
        let id = bus.subscribe(EventFilter::any_global(), Counter(0));
        assert_eq!(bus.debug_listeners(), vec![(id, "counter".to_string())]);
    }
}
