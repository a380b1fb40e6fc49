//! Typed pointer events and the identifiers they carry

use std::fmt;

use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// Handle naming a scene object
///
/// The tracker never owns scene objects; it only remembers which handle a
/// pointer is interacting with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Independent gesture-classification stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Channel {
    MouseLeft,
    MouseRight,
    Touch,
}

impl Channel {
    /// Event emitted when the channel goes down
    pub fn down_event(self) -> PointerEvent {
        match self {
            Self::MouseLeft => PointerEvent::MouseLeftDown,
            Self::MouseRight => PointerEvent::MouseRightDown,
            Self::Touch => PointerEvent::TouchStart,
        }
    }

    /// Event emitted when the channel goes up
    pub fn up_event(self) -> PointerEvent {
        match self {
            Self::MouseLeft => PointerEvent::MouseLeftUp,
            Self::MouseRight => PointerEvent::MouseRightUp,
            Self::Touch => PointerEvent::TouchEnd,
        }
    }

    /// Event emitted for a single activation within the gap window
    pub fn single_event(self) -> PointerEvent {
        match self {
            Self::MouseLeft => PointerEvent::MouseLeftClick,
            Self::MouseRight => PointerEvent::MouseRightClick,
            Self::Touch => PointerEvent::Tap,
        }
    }

    /// Event emitted for a repeated activation within the gap window
    pub fn double_event(self) -> PointerEvent {
        match self {
            Self::MouseLeft => PointerEvent::MouseLeftDoubleClick,
            Self::MouseRight => PointerEvent::MouseRightDoubleClick,
            Self::Touch => PointerEvent::DoubleTap,
        }
    }
}

/// Every event the tracker can emit
///
/// Channel-specific variants are always followed by their generic
/// counterpart (`MouseLeftClick` then `Click`, `TouchStart` then `Press`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerEvent {
    MouseLeftDown,
    MouseLeftUp,
    MouseLeftClick,
    MouseLeftDoubleClick,
    MouseRightDown,
    MouseRightUp,
    MouseRightClick,
    MouseRightDoubleClick,
    TouchStart,
    TouchEnd,
    Tap,
    DoubleTap,
    Press,
    Release,
    Click,
    DoubleClick,
}

impl PointerEvent {
    /// Conventional handler name, used for logging
    pub fn handler_name(self) -> &'static str {
        match self {
            Self::MouseLeftDown => "onMouseLeftDown",
            Self::MouseLeftUp => "onMouseLeftUp",
            Self::MouseLeftClick => "onMouseLeftClick",
            Self::MouseLeftDoubleClick => "onMouseLeftDoubleClick",
            Self::MouseRightDown => "onMouseRightDown",
            Self::MouseRightUp => "onMouseRightUp",
            Self::MouseRightClick => "onMouseRightClick",
            Self::MouseRightDoubleClick => "onMouseRightDoubleClick",
            Self::TouchStart => "onTouchStart",
            Self::TouchEnd => "onTouchEnd",
            Self::Tap => "onTap",
            Self::DoubleTap => "onDoubleTap",
            Self::Press => "onPress",
            Self::Release => "onRelease",
            Self::Click => "onClick",
            Self::DoubleClick => "onDoubleClick",
        }
    }
}

impl fmt::Display for PointerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.handler_name())
    }
}

/// Payload handed to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub event: PointerEvent,
    /// The object the event happened to, if any
    pub target: Option<ObjectId>,
}
