//! Template-driven input masking for date and time fields.
//!
//! `standout-mask` keeps a text value in the shape of a compact format
//! template while the user types it. Templates interleave typed fields with
//! literal separators:
//!
//! | Template | Placeholder | Accepts |
//! |----------|-------------|---------|
//! | `%H:%M:%S` | `HH:MM:SS` | `09:30:00` |
//! | `%d/%m/%Y` | `DD/MM/YYYY` | `24/12/2024` |
//! | `%a %b` | `Day Mon` | `mon jan` |
//!
//! On every edit the value is re-validated and re-formatted: fields have fixed
//! widths, numeric fields are bounded, and textual fields only take words from
//! a closed vocabulary, with shorthands (`tu` → `tue`) expanded as they are
//! typed.
//!
//! # Quick Start
//!
//! ```rust
//! use standout_mask::{CompiledFormat, TokenTable};
//!
//! let mut format = CompiledFormat::compile("%H:%M", TokenTable::builtin())?;
//! assert_eq!(format.placeholder(), "HH:MM");
//!
//! // Typing "9" can only mean 09: no second digit keeps an hour below 24.
//! assert_eq!(format.reformat("9"), "09");
//! assert_eq!(format.reformat("093"), "09:3");
//! # Ok::<(), standout_mask::MaskError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! TokenTable ──┐
//!              ├─► CompiledFormat::compile ─► CompiledFormat ─► reformat (per edit)
//! Template ────┘    (fields, placeholder,                          │
//!                    total width)                                  ▼
//!                                                          EditHost (widget)
//! ```
//!
//! - [`TokenTable`] - catalog of field codes, built in or loaded from YAML/JSON
//! - [`Template`] - splits a template into field codes and delimiters
//! - [`FieldParser`] - corrects one fixed-width slot of the unformatted value
//! - [`CompiledFormat`] - field chain plus the reformat pipeline
//! - [`MaskedInput`] - binds a compiled format to an [`EditHost`]
//!
//! # Errors
//!
//! Only compilation and catalog loading fail, with [`MaskError`]. Edits never
//! fail: invalid input is corrected or cleared in place.
//!
//! # Logging
//!
//! The crate emits [`tracing`] events (`debug` on compile, `trace` per edit)
//! and leaves subscriber setup to the application.

mod catalog;
mod error;
mod field;
mod format;
mod host;
pub mod presets;
mod template;

pub use catalog::{TokenDescriptor, TokenKind, TokenTable, Vocabulary, MAX_NUMERIC_WIDTH};
pub use error::{MaskError, Result};
pub use field::{EnumeratedField, FieldParser, NumericField, Slot};
pub use format::{CompiledFormat, PipelineState};
pub use host::{EditHost, MaskedInput, MemoryHost, BACKSPACE};
pub use presets::{DateTimeMask, DATE_FORMAT, TIME_FORMAT};
pub use template::{Template, FIELD_MARKER};
