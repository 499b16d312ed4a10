//! `dofi` - console and editor text layout for a tiny fantasy console
//!
//! The crate keeps a REPL scrollback, a code editor buffer, their wrapped
//! visual rows and the caret position consistent while text is typed,
//! executed and scrolled. Windowing, pixel drawing and the script
//! interpreter stay outside: they talk to a [`Session`] through input
//! [`Event`](input::Event)s, the [`ScriptHost`] trait and the plain-data
//! [`Frame`] produced each draw phase.

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Intentional pixel/column casts
#![allow(clippy::cast_sign_loss)] // Intentional pixel/column conversions
#![allow(clippy::cast_precision_loss)] // Pixel widths are far below 2^52
#![allow(clippy::cast_possible_wrap)] // Intentional row arithmetic
#![allow(clippy::module_name_repetitions)] // Allow text::TextEvent etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::must_use_candidate)] // Not every accessor needs #[must_use]
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening

pub mod error;
pub mod event;
pub mod input;
pub mod metrics;
pub mod script;
pub mod session;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use metrics::{ScreenMetrics, ScreenMetricsBuilder};
pub use script::{FrameHook, NullHost, ScriptConsole, ScriptHost};
pub use session::{EditorRegistry, Frame, Mode, Session, Tab};
pub use text::{EditBuffer, LineBuffer, VisualCursor, WrapBudget, wrap};
