//! Ready-made masks for date and time inputs.
//!
//! Time inputs default to [`TIME_FORMAT`] and date inputs to
//! [`DATE_FORMAT`] unless the caller states a format. A combined date/time
//! value is edited as two inputs side by side, see [`DateTimeMask`].

use crate::catalog::TokenTable;
use crate::error::Result;
use crate::format::CompiledFormat;

/// Default template for time inputs.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Default template for date inputs.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Compile a time mask, falling back to [`TIME_FORMAT`].
pub fn time_mask(table: &TokenTable, format: Option<&str>) -> Result<CompiledFormat> {
    CompiledFormat::compile(format.unwrap_or(TIME_FORMAT), table)
}

/// Compile a date mask, falling back to [`DATE_FORMAT`].
pub fn date_mask(table: &TokenTable, format: Option<&str>) -> Result<CompiledFormat> {
    CompiledFormat::compile(format.unwrap_or(DATE_FORMAT), table)
}

/// A split date/time value: one mask per half.
///
/// The halves are edited independently, so each keeps its own shrink-guard
/// state.
#[derive(Debug, Clone)]
pub struct DateTimeMask {
    pub date: CompiledFormat,
    pub time: CompiledFormat,
}

impl DateTimeMask {
    /// Compile both halves; `None` selects the default template.
    pub fn new(
        table: &TokenTable,
        date_format: Option<&str>,
        time_format: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            date: date_mask(table, date_format)?,
            time: time_mask(table, time_format)?,
        })
    }

    /// Placeholders of the date and time halves.
    pub fn placeholders(&self) -> (&str, &str) {
        (self.date.placeholder(), self.time.placeholder())
    }
}
