//! Frame input events.

use crate::input::keyboard::KeyEvent;

/// One input event for the session's update phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// Characters typed or pasted since the last frame.
    Text(TextEvent),
    /// The viewport changed size.
    Resize(ResizeEvent),
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Self::Key(e)
    }
}

impl From<TextEvent> for Event {
    fn from(e: TextEvent) -> Self {
        Self::Text(e)
    }
}

impl From<ResizeEvent> for Event {
    fn from(e: ResizeEvent) -> Self {
        Self::Resize(e)
    }
}

/// Viewport resize in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeEvent {
    /// New width in pixels.
    pub width: u32,
    /// New height in pixels.
    pub height: u32,
}

impl ResizeEvent {
    /// Create a new resize event.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Characters entered since the last frame.
///
/// `'\r'` and `'\n'` inside the text act as Enter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEvent {
    /// The entered text.
    pub content: String,
}

impl TextEvent {
    /// Create a new text event.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Get the entered text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if no text was entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
