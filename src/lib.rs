//! Pointer Tracker
//!
//! Polls mouse and touch input, resolves each pointer to the scene object
//! under it, tracks pointers across frames and dispatches press, release,
//! click, double-click, tap and double-tap notifications.

/// Typed publish/subscribe notification transport
pub mod bus;

/// Profile-based configuration
pub mod config;

/// Configuration errors
pub mod error;

/// Event and identifier types
pub mod events;

/// Raw input polling and winit collection
pub mod input;

/// Picking and coordinate conversion collaborators
pub mod scene;

/// Pointer registry, gesture classification and dispatch
pub mod tracker;

pub use bus::{EventBus, EventFilter, PointerListener, SubscriptionId, Transport};
pub use config::TrackerConfig;
pub use error::TrackerError;
pub use events::{Channel, Notification, ObjectId, PointerEvent};
pub use input::{InputCollector, InputSource, InputState, MouseButton, TouchPhase, TouchPoint};
pub use scene::{Camera, CoordinateConverter, HitTest, Rect, Scene};
pub use tracker::PointerTracker;
