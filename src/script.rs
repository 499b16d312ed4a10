//! Seam between the session and an embedded script interpreter.
//!
//! The interpreter itself lives outside this crate. It implements
//! [`ScriptHost`] and writes to the console through the [`ScriptConsole`]
//! handed to every call, which is how `print` and `cls` bindings reach the
//! scrollback without the host owning it.
//!
//! Per-frame hooks (`_update`, `_draw`) run behind [`guarded_hook`]: an error
//! or a panic inside the hook is converted into [`Error::Hook`] and the frame
//! carries on.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::text::LineBuffer;

/// Optional per-frame entry points a script may define.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameHook {
    /// Called at the start of every update phase.
    Update,
    /// Called at the start of every draw phase.
    Draw,
}

impl FrameHook {
    /// Script-side name of the hook.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Update => "_update",
            Self::Draw => "_draw",
        }
    }
}

/// Console access granted to the script host for the duration of one call.
pub struct ScriptConsole<'a> {
    lines: &'a mut LineBuffer,
    input: &'a mut String,
}

impl<'a> ScriptConsole<'a> {
    pub(crate) fn new(lines: &'a mut LineBuffer, input: &'a mut String) -> Self {
        Self { lines, input }
    }

    /// Append an output line (the `print` binding).
    pub fn print(&mut self, text: &str) {
        emit_log(LogLevel::Info, text);
        self.lines.append(text, false);
    }

    /// Clear the scrollback and the pending input (the `cls` binding).
    pub fn cls(&mut self) {
        self.lines.clear();
        self.input.clear();
    }

    /// Read-only view of the scrollback.
    #[must_use]
    pub fn lines(&self) -> &LineBuffer {
        self.lines
    }
}

/// An embedded interpreter driven by the session.
pub trait ScriptHost {
    /// Evaluate a chunk of source typed at the console.
    fn eval(&mut self, source: &str, console: &mut ScriptConsole<'_>) -> Result<()>;

    /// Run a script file (the `run <path>` console command).
    fn run_file(&mut self, path: &Path, console: &mut ScriptConsole<'_>) -> Result<()> {
        let source = std::fs::read_to_string(path)?;
        self.eval(&source, console)
    }

    /// Invoke a frame hook if the script defines it.
    fn call_hook(&mut self, hook: FrameHook, console: &mut ScriptConsole<'_>) -> Result<()> {
        let _ = (hook, console);
        Ok(())
    }
}

/// Host that accepts everything and does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl ScriptHost for NullHost {
    fn eval(&mut self, _source: &str, _console: &mut ScriptConsole<'_>) -> Result<()> {
        Ok(())
    }
}

/// Call a frame hook, converting errors and panics into [`Error::Hook`].
pub fn guarded_hook<H: ScriptHost + ?Sized>(
    host: &mut H,
    hook: FrameHook,
    console: &mut ScriptConsole<'_>,
) -> Result<()> {
    let outcome = catch_unwind(AssertUnwindSafe(|| host.call_hook(hook, console)));
    let message = match outcome {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(Error::Script(message))) => message,
        Ok(Err(err)) => err.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };
    Err(Error::Hook {
        hook: hook.name(),
        message,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}
