//! Raw input polling
//!
//! The tracker reads hardware state through the [`InputSource`] trait, once
//! per tick. [`InputState`] is the stock implementation: a per-frame snapshot
//! that [`InputCollector`] fills from winit window events.
//!
//! # Architecture
//!
//! ```text
//! Raw Input (winit) → InputCollector → InputState (snapshot)
//!                                          ↓
//!                                   PointerTracker::tick
//! ```
//!
//! # Usage
//!
//! ```ignore
//! // In window_event()
//! collector.handle_window_event(&event);
//!
//! // Each frame
//! tracker.tick(dt, &collector.snapshot(), &scene);
//! collector.advance_frame();
//! ```

mod collector;
mod state;

pub use collector::InputCollector;
pub use state::{
    ButtonState, InputSource, InputState, MouseButton, MouseButtons, MouseState, TouchPhase,
    TouchPoint,
};
