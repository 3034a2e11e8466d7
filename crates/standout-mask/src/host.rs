//! Host binding.
//!
//! The engine never talks to a widget directly. A host is anything that can
//! hand over the current text of an editable value and accept a replacement.
//! [`MaskedInput`] pairs one host with one [`CompiledFormat`] and runs the
//! pipeline whenever the host reports an edit.
//!
//! [`MemoryHost`] keeps the text in memory and simulates keystrokes, which is
//! all tests and demos need.
//!
//! ```rust
//! use standout_mask::{CompiledFormat, MaskedInput, MemoryHost};
//!
//! let format = CompiledFormat::compile_builtin("%H:%M").unwrap();
//! let mut input = MaskedInput::new(format, MemoryHost::new());
//!
//! input.type_keys("930");
//! assert_eq!(input.value(), "09:30");
//! ```

use crate::format::CompiledFormat;

/// Character [`MaskedInput::type_keys`] treats as a backspace.
pub const BACKSPACE: char = '\u{8}';

/// An editable text value owned by some outer widget.
pub trait EditHost {
    /// The text as it currently stands, after the user's latest edit.
    fn current_text(&self) -> String;

    /// Replace the text with a corrected value.
    fn replace_text(&mut self, text: &str);
}

/// In-memory host for tests and demos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHost {
    text: String,
    writes: usize,
}

impl MemoryHost {
    /// Create a host with empty text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host that already holds `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            writes: 0,
        }
    }

    /// Append a character at the end of the text, like a keystroke.
    pub fn type_char(&mut self, c: char) {
        self.text.push(c);
    }

    /// Append a string at the end of the text, like a paste.
    pub fn type_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Remove the last character, if any.
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// How many times the engine replaced the text.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl EditHost for MemoryHost {
    fn current_text(&self) -> String {
        self.text.clone()
    }

    fn replace_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.writes += 1;
    }
}

/// One masked editable value: a compiled format bound to its host.
#[derive(Debug, Clone)]
pub struct MaskedInput<H: EditHost> {
    format: CompiledFormat,
    host: H,
}

impl<H: EditHost> MaskedInput<H> {
    /// Bind `format` to `host`.
    pub fn new(format: CompiledFormat, host: H) -> Self {
        Self { format, host }
    }

    /// Hint text for the host to show while the value is empty.
    pub fn placeholder(&self) -> &str {
        self.format.placeholder()
    }

    /// Run the pipeline on the host's current text.
    ///
    /// The host is written only when the corrected text differs from what it
    /// holds. Returns whether a write happened.
    pub fn on_edit(&mut self) -> bool {
        let current = self.host.current_text();
        let corrected = self.format.reformat(&current);
        if corrected == current {
            return false;
        }
        self.host.replace_text(&corrected);
        true
    }

    /// The host's current text.
    pub fn value(&self) -> String {
        self.host.current_text()
    }

    /// The compiled format.
    pub fn format(&self) -> &CompiledFormat {
        &self.format
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, for feeding edits.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Split into the compiled format and the host.
    pub fn into_parts(self) -> (CompiledFormat, H) {
        (self.format, self.host)
    }
}

impl MaskedInput<MemoryHost> {
    /// Type `keys` one at a time, running the pipeline after each.
    ///
    /// [`BACKSPACE`] removes the last character instead of typing one.
    /// Returns the value after every keystroke.
    pub fn type_keys(&mut self, keys: &str) -> Vec<String> {
        keys.chars()
            .map(|key| {
                if key == BACKSPACE {
                    self.host.backspace();
                } else {
                    self.host.type_char(key);
                }
                self.on_edit();
                self.host.text().to_string()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masked(template: &str) -> MaskedInput<MemoryHost> {
        let format = CompiledFormat::compile_builtin(template).unwrap();
        MaskedInput::new(format, MemoryHost::new())
    }

    #[test]
    fn memory_host_edits() {
        let mut host = MemoryHost::with_text("12");
        host.type_char(':');
        host.type_str("34");
        assert_eq!(host.text(), "12:34");
        host.backspace();
        assert_eq!(host.current_text(), "12:3");
        host.replace_text("x");
        assert_eq!(host.text(), "x");
        assert_eq!(host.writes(), 1);
    }

    #[test]
    fn backspace_on_empty_host_is_noop() {
        let mut host = MemoryHost::new();
        host.backspace();
        assert_eq!(host.text(), "");
    }

    #[test]
    fn placeholder_comes_from_format() {
        assert_eq!(masked("%d/%m/%Y").placeholder(), "DD/MM/YYYY");
    }

    #[test]
    fn on_edit_writes_only_on_change() {
        let mut input = masked("%H:%M");
        input.host_mut().type_char('1');
        assert!(!input.on_edit());
        input.host_mut().type_char('2');
        assert!(!input.on_edit());
        input.host_mut().type_char('3');
        assert!(input.on_edit());
        assert_eq!(input.value(), "12:3");
        assert_eq!(input.host().writes(), 1);
    }

    #[test]
    fn type_keys_reports_each_step() {
        let mut input = masked("%H:%M");
        assert_eq!(input.type_keys("930"), vec!["09", "09:3", "09:30"]);
    }

    #[test]
    fn type_keys_backspace_is_not_fought() {
        let mut input = masked("%H:%M");
        input.type_keys("930");
        let steps = input.type_keys(&format!("{BACKSPACE}{BACKSPACE}{BACKSPACE}"));
        assert_eq!(steps, vec!["09:3", "09:", "09"]);
    }

    #[test]
    fn into_parts_keeps_state() {
        let mut input = masked("%H:%M");
        input.type_keys("93");
        let (format, host) = input.into_parts();
        assert_eq!(host.text(), "09:3");
        assert_eq!(format.last_len(), 4);
    }
}
