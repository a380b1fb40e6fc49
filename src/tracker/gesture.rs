//! Click / double-click / tap classification from down and up transitions
//!
//! All channels share one pair of timers:
//!
//! - the single-activation timer restarts on every down and decides whether
//!   the following up was quick enough to be a click;
//! - the double-activation timer restarts on every up; once it runs past the
//!   gap window every channel's activation counter drops back to zero.
//!
//! A mouse double-click and a touch double-tap landing in the same window
//! therefore share a clock.
//!
//! Each channel counts the downs still waiting for their up. The touch channel
//! shares one down flag across fingers, so with two fingers down the first end
//! clears the flag while the second finger's down is still pending.

use enum_map::EnumMap;
use tracing::debug;

use crate::events::{Channel, PointerEvent};

/// Outcome of an up transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpGesture {
    /// Channel-specific then generic click-class pair, sent to the hit object
    pub activation: Option<[PointerEvent; 2]>,
    /// Channel-specific then generic release pair, sent to every slot object
    pub release: [PointerEvent; 2],
}

#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    down: bool,
    pending: u32,
    activations: u32,
}

/// Gesture state machine shared by all input channels
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    interact_time_gap: f32,
    single_timer: f32,
    double_timer: f32,
    channels: EnumMap<Channel, ChannelState>,
    num_touches: usize,
}

impl GestureClassifier {
    /// Creates a classifier with the given gap window in seconds
    pub fn new(interact_time_gap: f32) -> Self {
        Self {
            interact_time_gap,
            single_timer: 0.0,
            double_timer: 0.0,
            channels: EnumMap::default(),
            num_touches: 0,
        }
    }

    /// Advances both timers and expires stale activation counts
    pub fn advance(&mut self, delta_time: f32) {
        self.single_timer += delta_time;
        self.double_timer += delta_time;

        if self.double_timer > self.interact_time_gap {
            for state in self.channels.values_mut() {
                state.activations = 0;
            }
        }
    }

    /// Channel went down; returns the events for the hit object
    pub fn down(&mut self, channel: Channel) -> [PointerEvent; 2] {
        let state = &mut self.channels[channel];
        state.down = true;
        state.pending = state.pending.saturating_add(1);
        self.single_timer = 0.0;
        if channel == Channel::Touch {
            self.num_touches += 1;
        }

        [channel.down_event(), PointerEvent::Press]
    }

    /// Channel went up; classifies the activation
    ///
    /// An up with no pending down on its channel only releases.
    pub fn up(&mut self, channel: Channel) -> UpGesture {
        self.double_timer = 0.0;
        if channel == Channel::Touch {
            self.num_touches = 0;
        }

        let state = &mut self.channels[channel];
        state.down = false;

        let activation = if state.pending > 0 {
            state.pending -= 1;
            state.activations += 1;

            if state.activations >= 2 {
                Some([channel.double_event(), PointerEvent::DoubleClick])
            } else if self.single_timer <= self.interact_time_gap {
                Some([channel.single_event(), PointerEvent::Click])
            } else {
                None
            }
        } else {
            None
        };

        debug!(
            ?channel,
            activations = self.channels[channel].activations,
            held_for = self.single_timer,
            ?activation,
            "pointer up classified"
        );

        UpGesture {
            activation,
            release: [channel.up_event(), PointerEvent::Release],
        }
    }

    /// Returns true while the channel is down
    pub fn is_down(&self, channel: Channel) -> bool {
        self.channels[channel].down
    }

    /// Downs on this channel still waiting for their up
    pub fn pending(&self, channel: Channel) -> u32 {
        self.channels[channel].pending
    }

    /// Completed activations counted toward a double on this channel
    pub fn activations(&self, channel: Channel) -> u32 {
        self.channels[channel].activations
    }

    /// Touches started since the last touch ended
    pub fn num_touches(&self) -> usize {
        self.num_touches
    }

    /// Seconds since the last down on any channel
    pub fn single_timer(&self) -> f32 {
        self.single_timer
    }

    /// Seconds since the last up on any channel
    pub fn double_timer(&self) -> f32 {
        self.double_timer
    }

    pub fn interact_time_gap(&self) -> f32 {
        self.interact_time_gap
    }
}
