//! Input events delivered to the session once per frame.
//!
//! The windowing layer translates its own key and text callbacks into these
//! types; the session applies a whole frame's batch in its update phase.

mod event;
mod keyboard;

pub use event::{Event, ResizeEvent, TextEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
