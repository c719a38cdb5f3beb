//! Channel attachment lifecycle

use serde::{Deserialize, Serialize};

/// Attachment state of an adapter on its channel
///
/// State transitions:
/// ```text
/// Created → Attached → Detached
/// Created → Detached
/// ```
///
/// `Detached` is terminal: a host that re-attaches builds a new adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelState {
    /// Adapter built but not yet registered on a channel
    #[default]
    Created,
    /// Registered and handling calls
    Attached,
    /// Unregistered; further calls are refused
    Detached,
}

impl ChannelState {
    /// Check if this state can transition to the target state
    pub fn can_transition_to(&self, target: ChannelState) -> bool {
        use ChannelState::*;
        matches!(
            (self, target),
            (Created, Attached) | (Attached, Detached) | (Created, Detached)
        )
    }

    /// Check if the adapter can handle calls in this state
    pub fn can_handle_calls(&self) -> bool {
        matches!(self, ChannelState::Attached)
    }

    /// Check if the adapter is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChannelState::Detached)
    }

    pub(crate) fn as_u8(self) -> u8 {
        match self {
            ChannelState::Created => 0,
            ChannelState::Attached => 1,
            ChannelState::Detached => 2,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => ChannelState::Created,
            1 => ChannelState::Attached,
            _ => ChannelState::Detached,
        }
    }
}

impl std::fmt::Display for ChannelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelState::Created => write!(f, "Created"),
            ChannelState::Attached => write!(f, "Attached"),
            ChannelState::Detached => write!(f, "Detached"),
        }
    }
}

/// Atomically updated [`ChannelState`] shared between the binding and in-flight calls
#[derive(Debug, Default)]
pub struct AtomicChannelState(std::sync::atomic::AtomicU8);

impl AtomicChannelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> ChannelState {
        ChannelState::from_u8(self.0.load(std::sync::atomic::Ordering::SeqCst))
    }

    /// Attempt to transition to a new state
    ///
    /// Returns the state observed before the attempt on failure.
    pub fn transition_to(&self, target: ChannelState) -> Result<(), ChannelState> {
        let mut current = self.get();
        loop {
            if !current.can_transition_to(target) {
                return Err(current);
            }
            match self.0.compare_exchange(
                current.as_u8(),
                target.as_u8(),
                std::sync::atomic::Ordering::SeqCst,
                std::sync::atomic::Ordering::SeqCst,
            ) {
                Ok(_) => return Ok(()),
                Err(actual) => current = ChannelState::from_u8(actual),
            }
        }
    }
}
