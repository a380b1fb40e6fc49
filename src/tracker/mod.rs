//! Pointer tracking and gesture dispatch
//!
//! [`PointerTracker`] is polled once per frame. Each tick it:
//!
//! ```text
//! advance gesture timers
//!        ↓
//! read raw input (mouse or touch path)
//!        ↓
//! resolve hits → update pointer registry → classify → notify
//!        ↓
//! rebuild interaction index
//! ```
//!
//! # Usage
//!
//! ```
//! use pointer_tracker::{
//!     EventBus, EventFilter, InputState, MouseButton, Notification, ObjectId, PointerEvent,
//!     PointerTracker, Rect, Scene, TrackerConfig,
//! };
//! use pointer_tracker::config::Platform;
//! use pointer_tracker::scene::Identity;
//! use glam::Vec2;
//!
//! let button = ObjectId(1);
//! let scene = Scene::new().with_object(button, Rect::new(Vec2::ZERO, Vec2::splat(10.0)), 0);
//! let config = TrackerConfig::default().with_platform(Platform::Mouse);
//! let mut tracker = PointerTracker::new(config, Identity);
//! tracker.transport_mut().subscribe(
//!     EventFilter::target(button, PointerEvent::Click),
//!     |_: &Notification| println!("clicked"),
//! );
//!
//! let mut input = InputState::new();
//! input.set_mouse_position(Vec2::splat(5.0));
//! input.press(MouseButton::Left);
//! tracker.tick(0.016, &input, &scene);
//! assert!(tracker.is_interacting(button));
//! ```

mod gesture;
mod notifier;
mod registry;

pub use gesture::{GestureClassifier, UpGesture};
pub use notifier::Notifier;
pub use registry::{PointerRegistry, PointerSlot};

use glam::Vec2;
use indexmap::IndexMap;
use tracing::{debug, info, trace, warn};

use crate::bus::{EventBus, Transport};
use crate::config::{Platform, TrackerConfig};
use crate::events::{Channel, ObjectId, PointerEvent};
use crate::input::{InputSource, MouseButton, TouchPhase};
use crate::scene::{CoordinateConverter, HitResolver, HitTest};

/// Slot index used by the mouse
pub const MOUSE_SLOT: usize = 0;

const MOUSE_CHANNELS: [(MouseButton, Channel); 2] = [
    (MouseButton::Left, Channel::MouseLeft),
    (MouseButton::Right, Channel::MouseRight),
];

/// Tracks pointers across frames and turns them into gesture notifications
pub struct PointerTracker<T: Transport = EventBus> {
    config: TrackerConfig,
    converter: Box<dyn CoordinateConverter>,
    transport: T,
    registry: PointerRegistry,
    gestures: GestureClassifier,
    notifier: Notifier,
    tick_count: u64,
    touch_overflow: bool,
    /// Finger id → slot it was given when it began
    touch_slots: IndexMap<u64, usize>,
}

impl PointerTracker<EventBus> {
    /// Creates a tracker publishing through a fresh [`EventBus`]
    pub fn new(config: TrackerConfig, converter: impl CoordinateConverter + 'static) -> Self {
        Self::with_transport(config, converter, EventBus::new())
    }
}

impl<T: Transport> PointerTracker<T> {
    /// Creates a tracker publishing through a caller-supplied transport
    pub fn with_transport(
        config: TrackerConfig,
        converter: impl CoordinateConverter + 'static,
        transport: T,
    ) -> Self {
        info!(
            profile = %config.profile,
            platform = ?config.platform,
            gap = config.gesture.interact_time_gap,
            max_touches = config.pointers.max_touches,
            "Starting pointer tracker"
        );

        Self {
            gestures: GestureClassifier::new(config.gesture.interact_time_gap),
            config,
            converter: Box::new(converter),
            transport,
            registry: PointerRegistry::new(),
            notifier: Notifier::new(),
            tick_count: 0,
            touch_overflow: false,
            touch_slots: IndexMap::new(),
        }
    }

    /// Polls input once and dispatches everything it implies
    ///
    /// # Arguments
    /// * `delta_time` - Seconds elapsed since the previous tick
    /// * `input` - Hardware state for this frame
    /// * `scene` - Picking collaborator
    pub fn tick<S: HitTest>(&mut self, delta_time: f32, input: &impl InputSource, scene: &S) {
        self.tick_count += 1;
        self.gestures.advance(delta_time);

        match self.config.platform {
            Platform::Mouse => self.poll_mouse(input, scene),
            Platform::Touch => self.poll_touch(input, scene),
        }

        self.registry.rebuild_interaction_index();

        trace!(
            tick = self.tick_count,
            slots = self.registry.slot_count(),
            interactions = self.registry.interactions().len(),
            "pointer tick"
        );
    }

    fn poll_mouse<S: HitTest>(&mut self, input: &impl InputSource, scene: &S) {
        let any_down = MOUSE_CHANNELS
            .iter()
            .any(|(button, _)| input.mouse_button_down(*button));
        let any_up = MOUSE_CHANNELS
            .iter()
            .any(|(button, _)| input.mouse_button_up(*button));
        let held = MOUSE_CHANNELS
            .iter()
            .any(|(button, _)| input.mouse_button_held(*button));
        let dragging = held && self.registry.contains(MOUSE_SLOT);

        if !(any_down || any_up || dragging) {
            return;
        }

        let position = input.mouse_position();
        let hit = self.hit_at(scene, position);

        for (button, channel) in MOUSE_CHANNELS {
            if input.mouse_button_down(button) {
                self.pointer_down(MOUSE_SLOT, position, hit, channel);
            }
        }

        if dragging {
            self.registry.update(MOUSE_SLOT, position, hit);
        }

        for (button, channel) in MOUSE_CHANNELS {
            if input.mouse_button_up(button) {
                self.pointer_up(MOUSE_SLOT, position, hit, channel);
            }
        }
    }

    fn poll_touch<S: HitTest>(&mut self, input: &impl InputSource, scene: &S) {
        let max_touches = self.config.pointers.max_touches;
        let count = input.touch_count();

        let overflow = count > max_touches;
        if overflow && !self.touch_overflow {
            warn!(count, max_touches, "ignoring touches beyond the slot cap");
        }
        self.touch_overflow = overflow;

        let mut seen = Vec::with_capacity(count.min(max_touches));
        for index in 0..count.min(max_touches) {
            let Some(touch) = input.touch(index) else {
                continue;
            };
            seen.push(touch.id);

            let slot = match (touch.phase, self.touch_slots.get(&touch.id).copied()) {
                (TouchPhase::Began, _) => {
                    let slot = self.free_touch_slot(index);
                    self.touch_slots.insert(touch.id, slot);
                    slot
                }
                (_, Some(slot)) => slot,
                // Began while over the cap; ignored until it ends
                (_, None) => continue,
            };
            let hit = self.hit_at(scene, touch.position);

            match touch.phase {
                TouchPhase::Began => self.pointer_down(slot, touch.position, hit, Channel::Touch),
                TouchPhase::Moved | TouchPhase::Stationary => {
                    self.registry.update(slot, touch.position, hit);
                }
                TouchPhase::Ended | TouchPhase::Canceled => {
                    self.touch_slots.shift_remove(&touch.id);
                    self.pointer_up(slot, touch.position, hit, Channel::Touch);
                }
            }
        }

        self.touch_slots.retain(|id, _| seen.contains(id));
        self.release_orphaned_slots();
    }

    /// Slot for a new finger: its hardware index unless another finger holds it
    fn free_touch_slot(&self, index: usize) -> usize {
        let claimed = |slot: &usize| self.touch_slots.values().any(|held| held == slot);
        if !claimed(&index) {
            return index;
        }
        (0..).find(|slot| !claimed(slot)).unwrap_or(index)
    }

    /// Releases slots no live finger maps to
    ///
    /// A finger whose up resolved into another finger's slot leaves its own
    /// slot behind; its objects still get the release pair.
    fn release_orphaned_slots(&mut self) {
        let orphaned: Vec<usize> = self
            .registry
            .slots()
            .map(|(slot, _)| slot)
            .filter(|slot| !self.touch_slots.values().any(|held| held == slot))
            .collect();

        for slot in orphaned {
            debug!(slot, "releasing slot with no finger");
            for event in [PointerEvent::TouchEnd, PointerEvent::Release] {
                self.notifier
                    .notify_pointer_objects(&mut self.transport, &self.registry, slot, event);
            }
            self.registry.release(slot);
        }
    }

    fn hit_at<S: HitTest>(&self, scene: &S, point: Vec2) -> Option<ObjectId> {
        let [x, y] = self.config.hit_test.cast_direction;
        HitResolver {
            scene,
            converter: self.converter.as_ref(),
            direction: Vec2::new(x, y),
        }
        .resolve(point)
    }

    fn pointer_down(
        &mut self,
        hint: usize,
        position: Vec2,
        hit: Option<ObjectId>,
        channel: Channel,
    ) {
        let slot = self.registry.update(hint, position, hit);
        let events = self.gestures.down(channel);
        debug!(slot, ?channel, ?hit, "pointer down");
        self.notifier.notify_all(&mut self.transport, hit, &events);
    }

    fn pointer_up(
        &mut self,
        hint: usize,
        position: Vec2,
        hit: Option<ObjectId>,
        channel: Channel,
    ) {
        let slot = self.registry.update(hint, position, hit);
        let gesture = self.gestures.up(channel);
        debug!(slot, ?channel, ?hit, "pointer up");

        if let Some(activation) = gesture.activation {
            self.notifier.notify_all(&mut self.transport, hit, &activation);
        }

        let pressed_on_nothing = self.registry.objects(slot).is_empty();
        for event in gesture.release {
            if pressed_on_nothing {
                self.notifier.notify_object(&mut self.transport, hit, event);
            } else {
                self.notifier
                    .notify_pointer_objects(&mut self.transport, &self.registry, slot, event);
            }
        }

        self.registry.release(slot);
    }

    /// Hands an in-progress interaction from one object to another
    ///
    /// The slot holding `from` now holds `to`, and `to` receives a start
    /// event as if it had been pressed. Returns false, doing nothing, when
    /// `from` is not attached to any pointer.
    pub fn spawn_interaction(&mut self, from: ObjectId, to: ObjectId) -> bool {
        let Some(slot) = self.registry.reassign(from, to) else {
            return false;
        };
        self.registry.rebuild_interaction_index();
        debug!(slot, %from, %to, "interaction handed over");

        let event = match self.config.platform {
            Platform::Touch => PointerEvent::TouchStart,
            Platform::Mouse => PointerEvent::MouseLeftDown,
        };
        self.notifier.notify_object(&mut self.transport, Some(to), event);
        true
    }

    /// Returns true if a pointer is currently attached to `object`
    pub fn is_interacting(&self, object: ObjectId) -> bool {
        self.registry.is_interacting(object)
    }

    /// World position of a slot, or zero if the slot is not active
    pub fn position(&self, slot: usize) -> Vec2 {
        self.registry
            .slot_position(slot)
            .map(|point| self.converter.screen_to_world(point))
            .unwrap_or(Vec2::ZERO)
    }

    /// World position of the pointer attached to `object`, or zero if none is
    pub fn object_position(&self, object: ObjectId) -> Vec2 {
        self.registry
            .object_position(object)
            .map(|point| self.converter.screen_to_world(point))
            .unwrap_or(Vec2::ZERO)
    }

    /// Touches started since the last touch ended
    pub fn num_touches(&self) -> usize {
        self.gestures.num_touches()
    }

    pub fn mouse_left_down(&self) -> bool {
        self.gestures.is_down(Channel::MouseLeft)
    }

    pub fn mouse_right_down(&self) -> bool {
        self.gestures.is_down(Channel::MouseRight)
    }

    /// Returns true while a touch that began is not yet ended
    pub fn touch_start(&self) -> bool {
        self.gestures.is_down(Channel::Touch)
    }

    /// Most recently notified object
    pub fn last_interacted(&self) -> Option<ObjectId> {
        self.notifier.last_interacted()
    }

    pub fn platform(&self) -> Platform {
        self.config.platform
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn registry(&self) -> &PointerRegistry {
        &self.registry
    }

    pub fn gestures(&self) -> &GestureClassifier {
        &self.gestures
    }

    /// Number of ticks processed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable transport access, for managing subscriptions
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Swaps the screen-to-world mapping, e.g. after the camera moves
    pub fn set_converter(&mut self, converter: impl CoordinateConverter + 'static) {
        self.converter = Box::new(converter);
    }
}
