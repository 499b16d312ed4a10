//! Frame-driven console/editor session.
//!
//! A [`Session`] owns the console scrollback, the line being typed, the
//! editor buffers and the script host. Each frame the host application calls
//! [`Session::update`] once with that frame's input events and then
//! [`Session::draw`] once to obtain the rows to paint. The two phases never
//! interleave, so no locking is involved.
//!
//! # Examples
//!
//! ```
//! use dofi::input::{Event, KeyCode, KeyEvent, TextEvent};
//! use dofi::{NullHost, ScreenMetrics, Session};
//!
//! let mut session = Session::new(ScreenMetrics::default(), NullHost);
//! session.update(&[
//!     Event::Text(TextEvent::new("x = 1")),
//!     Event::Key(KeyEvent::key(KeyCode::Enter)),
//! ]);
//! let frame = session.draw();
//! assert_eq!(frame.text(), "> x = 1\n> ");
//! ```

use std::collections::HashMap;
use std::mem;
use std::path::Path;

use crate::event::{
    EVENT_COMMAND, EVENT_MODE, EVENT_SAVE, EVENT_TAB, LogLevel, emit_event, emit_log,
};
use crate::input::{Event, KeyCode, KeyEvent};
use crate::metrics::ScreenMetrics;
use crate::script::{FrameHook, ScriptConsole, ScriptHost, guarded_hook};
use crate::text::{
    Caret, ConsoleView, EditBuffer, EditorView, LineBuffer, LogicalLine, RenderRow, WrapBudget,
};
use crate::unicode::grapheme_indices;

/// Frames per caret blink phase (on for this many frames, then off).
pub const BLINK_HALF_PERIOD: u64 = 30;

/// Prefix of the console command that runs a script file.
const RUN_COMMAND: &str = "run ";

/// Which surface receives input and gets drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// REPL console, bottom-anchored.
    #[default]
    Console,
    /// Tabbed workspace with the code editor.
    Editor,
}

impl Mode {
    /// Lowercase name used in events.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Editor => "editor",
        }
    }
}

/// Navbar tabs. Only [`Tab::Code`] has behaviour; the rest are placeholders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Code,
    Draw,
    Tile,
    Play,
    Music,
}

impl Tab {
    /// All tabs in navbar order. A tab's id is its index here.
    pub const ALL: [Self; 5] = [Self::Code, Self::Draw, Self::Tile, Self::Play, Self::Music];

    /// Tab for a navbar index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Draw => "draw",
            Self::Tile => "tile",
            Self::Play => "play",
            Self::Music => "music",
        }
    }

    /// Whether this tab hosts a code editor.
    #[must_use]
    pub fn has_editor(self) -> bool {
        self == Self::Code
    }
}

/// Editor buffers keyed by tab id, owned by the session.
#[derive(Clone, Debug, Default)]
pub struct EditorRegistry {
    editors: HashMap<usize, EditBuffer>,
}

impl EditorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor for `id`, if one was opened.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&EditBuffer> {
        self.editors.get(&id)
    }

    /// Mutable editor for `id`, if one was opened.
    pub fn get_mut(&mut self, id: usize) -> Option<&mut EditBuffer> {
        self.editors.get_mut(&id)
    }

    /// Editor for `id`, opening an empty one on first use.
    pub fn get_or_create(&mut self, id: usize) -> &mut EditBuffer {
        self.editors.entry(id).or_default()
    }

    /// Install a buffer for `id`, returning the one it replaces.
    pub fn insert(&mut self, id: usize, editor: EditBuffer) -> Option<EditBuffer> {
        self.editors.insert(id, editor)
    }

    /// Close the editor for `id`.
    pub fn remove(&mut self, id: usize) -> Option<EditBuffer> {
        self.editors.remove(&id)
    }

    /// Number of open editors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.editors.len()
    }

    /// Check if no editor is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }
}

/// Everything a renderer needs to paint one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Mode that was drawn.
    pub mode: Mode,
    /// Active tab.
    pub tab: Tab,
    /// Visible rows, top to bottom.
    pub rows: Vec<RenderRow>,
    /// Editor caret, when shown this frame.
    pub caret: Option<Caret>,
}

impl Frame {
    /// Row texts joined with `'\n'`, top to bottom.
    #[must_use]
    pub fn text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Console and editor state for one running console.
pub struct Session<H: ScriptHost> {
    metrics: ScreenMetrics,
    host: H,
    lines: LineBuffer,
    input: String,
    mode: Mode,
    current_tab: usize,
    editors: EditorRegistry,
    history_cap: Option<usize>,
    frame: u64,
}

impl<H: ScriptHost> Session<H> {
    /// Create a session with an empty prompt ready for input.
    pub fn new(metrics: ScreenMetrics, host: H) -> Self {
        let mut lines = LineBuffer::new(&metrics);
        lines.append("", true);
        Self {
            metrics,
            host,
            lines,
            input: String::new(),
            mode: Mode::Console,
            current_tab: 0,
            editors: EditorRegistry::new(),
            history_cap: None,
            frame: 0,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Current screen metrics.
    #[must_use]
    pub fn metrics(&self) -> ScreenMetrics {
        self.metrics
    }

    /// Console scrollback.
    #[must_use]
    pub fn lines(&self) -> &LineBuffer {
        &self.lines
    }

    /// Line currently being typed at the console.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Active mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Active tab.
    #[must_use]
    pub fn tab(&self) -> Tab {
        Tab::from_index(self.current_tab).unwrap_or(Tab::Code)
    }

    /// Open editors.
    #[must_use]
    pub fn editors(&self) -> &EditorRegistry {
        &self.editors
    }

    /// The script host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the script host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Number of completed update phases.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Whether the caret is in the visible half of its blink cycle.
    #[must_use]
    pub fn caret_on(&self) -> bool {
        (self.frame / BLINK_HALF_PERIOD) % 2 == 0
    }

    // ------------------------------------------------------------------
    // Scrollback operations
    // ------------------------------------------------------------------

    /// Append a console entry.
    pub fn append(&mut self, text: &str, is_input: bool) {
        self.lines.append(text, is_input);
    }

    /// Append an output entry.
    pub fn print(&mut self, text: &str) {
        self.lines.append(text, false);
    }

    /// Rewrite the most recent console entry.
    pub fn modify_last(&mut self, text: &str) {
        self.lines.modify_last(text);
    }

    /// Keep only the most recent `max_entries` console entries.
    pub fn truncate(&mut self, max_entries: isize) {
        self.lines.truncate(max_entries);
    }

    /// Clear the scrollback and the pending input.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.input.clear();
    }

    /// Override the number of retained console entries.
    ///
    /// `None` restores the default derived from the screen height.
    pub fn set_history_capacity(&mut self, capacity: Option<usize>) {
        self.history_cap = capacity;
        self.lines
            .set_capacity(capacity.unwrap_or_else(|| self.metrics.history_cap()));
    }

    /// Adopt new screen metrics, re-wrapping the scrollback.
    pub fn resize(&mut self, metrics: ScreenMetrics) {
        self.metrics = metrics;
        self.lines.set_metrics(&metrics);
        self.lines
            .set_capacity(self.history_cap.unwrap_or_else(|| metrics.history_cap()));
    }

    // ------------------------------------------------------------------
    // Mode and tabs
    // ------------------------------------------------------------------

    /// Switch between console and editor.
    pub fn toggle_mode(&mut self) {
        self.set_mode(match self.mode {
            Mode::Console => Mode::Editor,
            Mode::Editor => Mode::Console,
        });
    }

    /// Switch to `mode`.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        emit_log(LogLevel::Debug, &format!("mode -> {}", mode.name()));
        emit_event(EVENT_MODE, mode.name());
    }

    /// Select the tab at `index`. Returns false for an unknown index.
    pub fn select_tab(&mut self, index: usize) -> bool {
        let Some(tab) = Tab::from_index(index) else {
            return false;
        };
        if self.current_tab != index {
            self.current_tab = index;
            emit_event(EVENT_TAB, tab.name());
        }
        true
    }

    /// Editor for the active tab, when the tab hosts one.
    pub fn current_editor(&mut self) -> Option<&mut EditBuffer> {
        if self.tab().has_editor() {
            Some(self.editors.get_or_create(self.current_tab))
        } else {
            None
        }
    }

    // ------------------------------------------------------------------
    // Frame phases
    // ------------------------------------------------------------------

    /// Apply one frame of input.
    pub fn update(&mut self, events: &[Event]) {
        self.run_hook(FrameHook::Update);
        for event in events {
            self.apply(event);
        }
        if self.mode == Mode::Console {
            self.sync_prompt();
        }
        self.frame = self.frame.wrapping_add(1);
    }

    /// Produce the rows for this frame.
    pub fn draw(&mut self) -> Frame {
        self.run_hook(FrameHook::Draw);
        let tab = self.tab();
        let (rows, caret) = match self.mode {
            Mode::Console => (ConsoleView::new(&self.lines, self.metrics).rows(), None),
            Mode::Editor if tab.has_editor() => {
                let caret_on = self.caret_on();
                let editor = self.editors.get_or_create(self.current_tab);
                let view = EditorView::new(editor, self.metrics).caret_on(caret_on);
                (view.rows(), view.caret())
            }
            Mode::Editor => (Vec::new(), None),
        };
        Frame {
            mode: self.mode,
            tab,
            rows,
            caret,
        }
    }

    /// Execute a console command and start a fresh prompt.
    ///
    /// `run <path>` runs a script file; anything else is evaluated as
    /// source. Failures are appended as output lines.
    pub fn submit(&mut self, command: &str) {
        self.ensure_prompt();
        self.lines.modify_last(command);
        emit_event(EVENT_COMMAND, command);

        let mut console = ScriptConsole::new(&mut self.lines, &mut self.input);
        let result = match command.strip_prefix(RUN_COMMAND) {
            Some(path) => self.host.run_file(Path::new(path.trim()), &mut console),
            None => self.host.eval(command, &mut console),
        };
        if let Err(err) = result {
            let message = err.to_string();
            emit_log(LogLevel::Warn, &message);
            self.lines.append(&message, false);
        }
        self.lines.append("", true);
    }

    fn apply(&mut self, event: &Event) {
        match event {
            Event::Resize(size) => self.resize(self.metrics.with_size(size.width, size.height)),
            Event::Key(key) if key.is_esc() => self.toggle_mode(),
            Event::Key(key) => match self.mode {
                Mode::Console => self.console_key(key),
                Mode::Editor => self.editor_key(key),
            },
            Event::Text(text) => match self.mode {
                Mode::Console => self.console_text(text.content()),
                Mode::Editor => self.editor_text(text.content()),
            },
        }
    }

    fn console_key(&mut self, key: &KeyEvent) {
        if let Some(ch) = key.typed_char() {
            self.input.push(ch);
            return;
        }
        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Backspace => {
                if let Some((idx, _)) = grapheme_indices(&self.input).last() {
                    self.input.truncate(idx);
                }
            }
            _ => {}
        }
    }

    fn console_text(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\r' | '\n' => self.submit_input(),
                ch if !ch.is_control() => self.input.push(ch),
                _ => {}
            }
        }
    }

    fn submit_input(&mut self) {
        let command = mem::take(&mut self.input);
        self.submit(&command);
    }

    fn editor_key(&mut self, key: &KeyEvent) {
        if let KeyCode::F(n @ 1..=5) = key.code {
            self.select_tab(usize::from(n - 1));
            return;
        }
        if key.ctrl() && key.code == KeyCode::Char('s') {
            if let Some(editor) = self.current_editor() {
                editor.mark_saved();
                emit_event(EVENT_SAVE, Tab::Code.name());
            }
            return;
        }

        let rows = self.metrics.editor_rows();
        let budget = WrapBudget::from_metrics(&self.metrics);
        let Some(editor) = self.current_editor() else {
            return;
        };
        if let Some(ch) = key.typed_char() {
            editor.insert_char(ch);
        } else {
            match key.code {
                KeyCode::Enter => editor.newline(),
                KeyCode::Backspace => editor.backspace(),
                KeyCode::Delete => editor.delete(),
                KeyCode::Tab => editor.insert_char('\t'),
                KeyCode::Left => editor.move_left(),
                KeyCode::Right => editor.move_right(),
                KeyCode::Up => editor.move_up(),
                KeyCode::Down => editor.move_down(),
                KeyCode::Home => editor.move_home(),
                KeyCode::End => editor.move_end(),
                KeyCode::PageUp => editor.page_up(rows),
                KeyCode::PageDown => editor.page_down(rows),
                _ => return,
            }
        }
        editor.scroll_to_cursor(rows, budget);
    }

    fn editor_text(&mut self, text: &str) {
        let rows = self.metrics.editor_rows();
        let budget = WrapBudget::from_metrics(&self.metrics);
        if let Some(editor) = self.current_editor() {
            editor.insert_str(text);
            editor.scroll_to_cursor(rows, budget);
        }
    }

    /// Mirror the pending input into the last entry, opening a prompt entry
    /// first when output was appended after the previous one.
    fn sync_prompt(&mut self) {
        self.ensure_prompt();
        self.lines.modify_last(&self.input);
    }

    fn ensure_prompt(&mut self) {
        if !self.lines.last().is_some_and(LogicalLine::is_input) {
            self.lines.append("", true);
        }
    }

    fn run_hook(&mut self, hook: FrameHook) {
        let mut console = ScriptConsole::new(&mut self.lines, &mut self.input);
        if let Err(err) = guarded_hook(&mut self.host, hook, &mut console) {
            let message = err.to_string();
            emit_log(LogLevel::Error, &message);
            self.lines.append(&message, false);
        }
    }
}
