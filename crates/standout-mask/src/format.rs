//! Compiled formats and the reformat pipeline.
//!
//! A [`CompiledFormat`] is built once per masked value from a template and a
//! [`TokenTable`]. After that, the host calls [`CompiledFormat::reformat`]
//! with the current text on every edit and replaces the text with the result.
//!
//! # Pipeline
//!
//! ```text
//! edited text
//!   │ shrink guard ── shorter than last output? → returned as is
//!   │ prepare      ── keep alphanumerics, truncate to total width
//!   │ clean        ── each field corrects its slot, left to right, until settled
//!   │ delimit      ── interior delimiters reinserted between typed fields
//!   ▼
//! corrected text  (its length is remembered for the next shrink guard)
//! ```
//!
//! # Example
//!
//! ```rust
//! use standout_mask::{CompiledFormat, TokenTable};
//!
//! let mut format = CompiledFormat::compile("%H:%M", TokenTable::builtin()).unwrap();
//! assert_eq!(format.placeholder(), "HH:MM");
//!
//! assert_eq!(format.reformat("9"), "09");
//! assert_eq!(format.reformat("093"), "09:3");
//! assert_eq!(format.reformat("09:30"), "09:30");
//!
//! // Deleting is never fought: shorter text comes back untouched.
//! assert_eq!(format.reformat("09:"), "09:");
//! ```
//!
//! # State
//!
//! The only mutable state is the length of the last output. One compiled
//! format belongs to one editable value; compile another for a second value.

use crate::catalog::TokenTable;
use crate::error::{MaskError, Result};
use crate::field::FieldParser;
use crate::template::Template;

/// Which branch of the pipeline an edit takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// The text is as long as or longer than the last output; reformat it.
    Growing,
    /// The text got shorter than the last output; leave it alone.
    Shrinking,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Growing => write!(f, "growing"),
            Self::Shrinking => write!(f, "shrinking"),
        }
    }
}

/// A template compiled against a token table, ready to reformat edits.
#[derive(Debug, Clone)]
pub struct CompiledFormat {
    template: Template,
    fields: Vec<FieldParser>,
    placeholder: String,
    total_width: usize,
    last_len: usize,
}

impl CompiledFormat {
    /// Compile `template` against `table`.
    ///
    /// # Errors
    ///
    /// - [`MaskError::MalformedTemplate`] for a trailing bare `%`
    /// - [`MaskError::EmptyTemplate`] when there is no field
    /// - [`MaskError::UnrecognizedField`] for a code missing from `table`
    pub fn compile(template: &str, table: &TokenTable) -> Result<Self> {
        let template = Template::parse(template)?;

        if template.has_affixes() {
            tracing::warn!(
                template = template.source(),
                leading = template.leading(),
                trailing = template.trailing(),
                "literal text outside the first and last field is ignored"
            );
        }

        let mut fields = Vec::with_capacity(template.codes().len());
        let mut glyphs = Vec::with_capacity(template.codes().len());
        let mut offset = 0;

        for &code in template.codes() {
            let descriptor = table.lookup(code).map_err(|_| MaskError::UnrecognizedField {
                code,
                template: template.source().to_string(),
            })?;
            fields.push(FieldParser::from_descriptor(descriptor, offset));
            glyphs.push(descriptor.placeholder());
            offset += descriptor.width();
        }

        let mut placeholder = String::new();
        for (i, glyph) in glyphs.iter().enumerate() {
            if i > 0 {
                placeholder.push_str(&template.delimiters()[i - 1]);
            }
            placeholder.push_str(glyph);
        }

        tracing::debug!(
            template = template.source(),
            fields = fields.len(),
            total_width = offset,
            "compiled format"
        );

        Ok(Self {
            template,
            fields,
            placeholder,
            total_width: offset,
            last_len: 0,
        })
    }

    /// Compile `template` against the built-in catalog.
    pub fn compile_builtin(template: &str) -> Result<Self> {
        Self::compile(template, TokenTable::builtin())
    }

    /// Hint text to show before any input, e.g. `"HH:MM"`.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Sum of all field widths: the most content characters a value can hold.
    pub fn total_width(&self) -> usize {
        self.total_width
    }

    /// The field parser chain, in template order.
    pub fn fields(&self) -> &[FieldParser] {
        &self.fields
    }

    /// Delimiters reinserted between fields.
    pub fn delimiters(&self) -> &[String] {
        self.template.delimiters()
    }

    /// The split template this format was compiled from.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Length, in characters, of the last value this format produced.
    pub fn last_len(&self) -> usize {
        self.last_len
    }

    /// Forget the last output, e.g. after the host cleared the value.
    pub fn reset(&mut self) {
        self.last_len = 0;
    }

    /// Which pipeline branch `text` would take right now.
    pub fn state_for(&self, text: &str) -> PipelineState {
        state_for(text, self.last_len)
    }

    /// Reformat an edited value and remember the result's length.
    ///
    /// This is the operation a host runs on every change of the value.
    pub fn reformat(&mut self, text: &str) -> String {
        let (output, len) = self.reformat_from(text, self.last_len);
        self.last_len = len;
        output
    }

    /// Reformat relative to an explicit previous output length.
    ///
    /// Returns the corrected text and the length to pass on the next call.
    /// [`reformat`](Self::reformat) is this function threaded through the
    /// format's own state.
    pub fn reformat_from(&self, text: &str, previous_len: usize) -> (String, usize) {
        let state = state_for(text, previous_len);
        let output = match state {
            PipelineState::Shrinking => text.to_string(),
            PipelineState::Growing => self.format_value(text),
        };
        tracing::trace!(%state, input = text, output = %output, "reformat");
        let len = output.chars().count();
        (output, len)
    }

    /// Run prepare, clean and delimit without the shrink guard or any state.
    ///
    /// Useful to normalise a stored value before showing it.
    pub fn format_value(&self, text: &str) -> String {
        let raw = self.clean(self.prepare(text));
        self.delimit(&raw)
    }

    /// The corrected, undelimited content of `text`.
    pub fn raw_value(&self, text: &str) -> String {
        let raw = self.clean(self.prepare(text));
        raw.into_iter().take(self.total_width).collect()
    }

    /// Whether every slot of the formatted `text` is filled.
    pub fn is_complete(&self, text: &str) -> bool {
        self.raw_value(text).chars().count() == self.total_width
    }

    fn prepare(&self, text: &str) -> Vec<char> {
        text.chars()
            .filter(|c| c.is_alphanumeric())
            .take(self.total_width)
            .collect()
    }

    /// Run the field chain until the value settles.
    ///
    /// A field that drops characters pulls later content left into slots
    /// already cleaned, so one pass is not enough. A pass that changes the
    /// value either drops a character or settles another slot, which bounds
    /// the number of passes.
    fn clean(&self, mut raw: Vec<char>) -> Vec<char> {
        for _ in 0..=self.total_width + self.fields.len() {
            let mut next = self.fields.iter().fold(raw.clone(), |raw, field| field.clean(raw));
            next.truncate(self.total_width);
            if next == raw {
                break;
            }
            raw = next;
        }
        raw
    }

    fn delimit(&self, raw: &[char]) -> String {
        let len = raw.len();
        let delimiters = self.template.delimiters();
        let mut out = String::with_capacity(self.placeholder.len());

        for (i, field) in self.fields.iter().enumerate() {
            let slot = field.slot();
            out.extend(&raw[slot.offset.min(len)..slot.end().min(len)]);

            let is_last = i + 1 == self.fields.len();
            if is_last || len <= slot.end() {
                break;
            }
            out.push_str(&delimiters[i]);
        }
        out
    }
}

fn state_for(text: &str, previous_len: usize) -> PipelineState {
    if text.chars().count() < previous_len {
        PipelineState::Shrinking
    } else {
        PipelineState::Growing
    }
}
