//! Field parsers.
//!
//! Each field of a compiled format owns a fixed [`Slot`] of the unformatted
//! value (the value with every delimiter stripped). Its parser corrects the
//! characters in that slot and hands the whole value on to the next field.
//!
//! The set of field kinds is closed, so [`FieldParser`] is an enum and
//! [`FieldParser::clean`] dispatches on it.

use crate::catalog::{TokenDescriptor, TokenKind, Vocabulary};

/// The range of the unformatted value a field occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Token code of the owning field.
    pub code: char,
    /// Character offset of the first slot position.
    pub offset: usize,
    /// Number of characters in the slot.
    pub width: usize,
}

impl Slot {
    /// One past the last slot position.
    pub fn end(&self) -> usize {
        self.offset + self.width
    }

    /// The characters of `raw` that fall inside the slot.
    fn take<'a>(&self, raw: &'a [char]) -> &'a [char] {
        let len = raw.len();
        &raw[self.offset.min(len)..self.end().min(len)]
    }

    /// Replace the slot's characters in `raw` with `content`.
    fn splice(&self, raw: &[char], content: Vec<char>) -> Vec<char> {
        let tail = &raw[self.end().min(raw.len())..];
        let mut out = Vec::with_capacity(raw.len() + 1);
        out.extend_from_slice(&raw[..self.offset]);
        out.extend(content);
        out.extend_from_slice(tail);
        out
    }
}

/// A bounded decimal field, such as an hour or a year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericField {
    slot: Slot,
    max: u64,
}

impl NumericField {
    /// Create a numeric field over `slot`, bounded above by `max`.
    pub fn new(slot: Slot, max: u64) -> Self {
        Self { slot, max }
    }

    /// Upper bound of the field's value.
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Keep only digits in the slot and close it early on overflow.
    ///
    /// The digits typed so far are padded with zeros to the full width. If
    /// even that smallest completion exceeds the bound, no further digit can
    /// make the value valid, so a leading `0` is inserted: what was typed
    /// becomes the complete value and the excess moves on to the next slot.
    pub fn clean(&self, raw: Vec<char>) -> Vec<char> {
        if raw.len() < self.slot.offset {
            return raw;
        }

        let mut digits: Vec<char> = self
            .slot
            .take(&raw)
            .iter()
            .copied()
            .filter(char::is_ascii_digit)
            .collect();

        if self.overflows(&digits) {
            digits.insert(0, '0');
        }

        self.slot.splice(&raw, digits)
    }

    fn overflows(&self, digits: &[char]) -> bool {
        let padding = self.slot.width.saturating_sub(digits.len());
        let probe: String = digits
            .iter()
            .copied()
            .chain(std::iter::repeat('0').take(padding))
            .collect();
        match probe.parse::<u64>() {
            Ok(value) => value > self.max,
            // Only reachable for widths past the catalog limit.
            Err(_) => true,
        }
    }
}

/// A field restricted to a fixed vocabulary, such as a weekday name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumeratedField {
    slot: Slot,
    vocabulary: Vocabulary,
}

impl EnumeratedField {
    /// Create an enumerated field over `slot`.
    pub fn new(slot: Slot, vocabulary: Vocabulary) -> Self {
        Self { slot, vocabulary }
    }

    /// Accepted values and shorthands.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Drop digits, expand shorthands, and clear unknown complete words.
    pub fn clean(&self, raw: Vec<char>) -> Vec<char> {
        if raw.len() < self.slot.offset {
            return raw;
        }

        let letters: String = self
            .slot
            .take(&raw)
            .iter()
            .filter(|c| !c.is_ascii_digit())
            .collect();

        let content = if letters.chars().count() < self.slot.width {
            match self.vocabulary.expand(&letters) {
                Some(expanded) => expanded.to_string(),
                None => letters,
            }
        } else if self.vocabulary.contains(&letters) {
            letters
        } else {
            String::new()
        };

        self.slot.splice(&raw, content.chars().collect())
    }
}

/// One link of a compiled format's cleaning chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldParser {
    Numeric(NumericField),
    Enumerated(EnumeratedField),
}

impl FieldParser {
    /// Build the parser for `descriptor` starting at `offset`.
    pub fn from_descriptor(descriptor: &TokenDescriptor, offset: usize) -> Self {
        let slot = Slot {
            code: descriptor.code(),
            offset,
            width: descriptor.width(),
        };
        match descriptor.kind() {
            TokenKind::Numeric { max } => Self::Numeric(NumericField::new(slot, *max)),
            TokenKind::Enumerated(vocabulary) => {
                Self::Enumerated(EnumeratedField::new(slot, vocabulary.clone()))
            }
        }
    }

    /// The slot this field corrects.
    pub fn slot(&self) -> &Slot {
        match self {
            Self::Numeric(field) => &field.slot,
            Self::Enumerated(field) => &field.slot,
        }
    }

    /// Correct this field's slot within the unformatted value.
    pub fn clean(&self, raw: Vec<char>) -> Vec<char> {
        match self {
            Self::Numeric(field) => field.clean(raw),
            Self::Enumerated(field) => field.clean(raw),
        }
    }
}
