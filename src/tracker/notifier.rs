//! Event delivery to hit objects and global listeners

use tracing::trace;

use super::registry::PointerRegistry;
use crate::bus::Transport;
use crate::events::{ObjectId, PointerEvent};

/// Sends classified events out through a [`Transport`]
///
/// Every notification is delivered point-to-point to its object (when there
/// is one) and then published globally with the object as payload.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    last_interacted: Option<ObjectId>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently notified object
    pub fn last_interacted(&self) -> Option<ObjectId> {
        self.last_interacted
    }

    /// Notifies one object, or only global listeners when there is none
    pub fn notify_object(
        &mut self,
        transport: &mut dyn Transport,
        object: Option<ObjectId>,
        event: PointerEvent,
    ) {
        if let Some(object) = object {
            self.last_interacted = Some(object);
            if !transport.deliver(object, event) {
                trace!(%object, %event, "no handler on target");
            }
        }
        transport.publish(event, object);
    }

    /// Sends each event in order to `object`
    pub fn notify_all(
        &mut self,
        transport: &mut dyn Transport,
        object: Option<ObjectId>,
        events: &[PointerEvent],
    ) {
        for event in events {
            self.notify_object(transport, object, *event);
        }
    }

    /// Notifies every object attached to a slot, in attachment order
    ///
    /// Does nothing when the slot has no objects or is not active.
    pub fn notify_pointer_objects(
        &mut self,
        transport: &mut dyn Transport,
        registry: &PointerRegistry,
        slot: usize,
        event: PointerEvent,
    ) {
        for object in registry.objects(slot) {
            self.notify_object(transport, Some(object), event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[derive(Default)]
    struct Log {
        delivered: Vec<(ObjectId, PointerEvent)>,
        published: Vec<(PointerEvent, Option<ObjectId>)>,
    }

    impl Transport for Log {
        fn deliver(&mut self, target: ObjectId, event: PointerEvent) -> bool {
            self.delivered.push((target, event));
            false
        }

        fn publish(&mut self, event: PointerEvent, payload: Option<ObjectId>) {
            self.published.push((event, payload));
        }
    }

    #[test]
    fn test_notify_object_delivers_and_publishes() {
        let mut log = Log::default();
        let mut notifier = Notifier::new();

        notifier.notify_object(&mut log, Some(ObjectId(3)), PointerEvent::Click);

        assert_eq!(log.delivered, vec![(ObjectId(3), PointerEvent::Click)]);
        assert_eq!(log.published, vec![(PointerEvent::Click, Some(ObjectId(3)))]);
        assert_eq!(notifier.last_interacted(), Some(ObjectId(3)));
    }

    #[test]
    fn test_notify_nothing_still_publishes() {
        let mut log = Log::default();
        let mut notifier = Notifier::new();
        notifier.notify_object(&mut log, Some(ObjectId(1)), PointerEvent::Press);

        notifier.notify_object(&mut log, None, PointerEvent::Release);

        assert_eq!(log.delivered.len(), 1);
        assert_eq!(log.published[1], (PointerEvent::Release, None));
        // Last-interacted only moves when there is an object
        assert_eq!(notifier.last_interacted(), Some(ObjectId(1)));
    }

    #[test]
    fn test_notify_pointer_objects_in_attachment_order() {
        let mut registry = PointerRegistry::new();
        registry.update(0, Vec2::ZERO, Some(ObjectId(2)));
        registry.update(0, Vec2::ZERO, Some(ObjectId(1)));

        let mut log = Log::default();
        let mut notifier = Notifier::new();
        notifier.notify_pointer_objects(&mut log, &registry, 0, PointerEvent::Release);
        notifier.notify_pointer_objects(&mut log, &registry, 5, PointerEvent::Release);

        assert_eq!(
            log.delivered,
            vec![
                (ObjectId(2), PointerEvent::Release),
                (ObjectId(1), PointerEvent::Release),
            ]
        );
        assert_eq!(notifier.last_interacted(), Some(ObjectId(1)));
    }
}
