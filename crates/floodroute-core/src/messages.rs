//! Input events: [`Msg`], [`Key`], [`MouseAction`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::geom::Point;

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    /// A printable character.
    Char(char),
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Secondary (right) button pressed.
    Secondary,
    /// Button released.
    Release,
    /// Mouse moved (no button state change).
    Move,
}

/// A message delivered to the application model.
#[derive(Clone)]
pub enum Msg {
    /// A key was pressed.
    KeyDown { key: Key, time: Instant },
    /// A mouse event, in screen cell coordinates.
    Mouse {
        action: MouseAction,
        pos: Point,
        time: Instant,
    },
    /// The terminal was resized.
    Screen {
        width: i32,
        height: i32,
        time: Instant,
    },
    /// Sent once when the application starts.
    Init,
    /// Request to quit.
    Quit,
    /// An application-defined payload, usually produced by a command.
    Custom(Arc<dyn Any + Send + Sync>),
}

impl Msg {
    /// Create a `KeyDown` message stamped with the current time.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            time: Instant::now(),
        }
    }

    /// Create a left-click message at `pos`.
    pub fn click(pos: Point) -> Self {
        Self::Mouse {
            action: MouseAction::Main,
            pos,
            time: Instant::now(),
        }
    }

    /// Wrap an application payload.
    pub fn custom<T: Any + Send + Sync>(payload: T) -> Self {
        Self::Custom(Arc::new(payload))
    }

    /// Borrow the custom payload if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Custom(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for Msg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyDown { key, .. } => f.debug_tuple("Msg::KeyDown").field(key).finish(),
            Self::Mouse { action, pos, .. } => f
                .debug_struct("Msg::Mouse")
                .field("action", action)
                .field("pos", pos)
                .finish(),
            Self::Screen { width, height, .. } => f
                .debug_struct("Msg::Screen")
                .field("width", width)
                .field("height", height)
                .finish(),
            Self::Init => f.write_str("Msg::Init"),
            Self::Quit => f.write_str("Msg::Quit"),
            Self::Custom(_) => f.write_str("Msg::Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Ping(u32);

    #[test]
    fn custom_payload_downcasts_by_type() {
        let msg = Msg::custom(Ping(7));
        assert_eq!(msg.downcast_ref::<Ping>(), Some(&Ping(7)));
        assert!(msg.downcast_ref::<u32>().is_none());
        assert!(Msg::Init.downcast_ref::<Ping>().is_none());
    }

    #[test]
    fn cloned_custom_shares_payload() {
        let msg = Msg::custom(Ping(1));
        let copy = msg.clone();
        assert_eq!(copy.downcast_ref::<Ping>(), Some(&Ping(1)));
    }
}
