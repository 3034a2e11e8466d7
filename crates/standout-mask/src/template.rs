//! Format template splitting.
//!
//! A template is a string where `%` followed by one character names a field
//! and every other character is literal. [`Template::parse`] splits it into
//! the ordered field codes and the literal delimiters that sit strictly
//! between consecutive fields.
//!
//! ```text
//! "%d/%m/%Y"  →  codes ['d', 'm', 'Y'], delimiters ["/", "/"]
//! ```
//!
//! Literal text before the first field or after the last one is not part of
//! the mask. It is kept in [`Template::leading`] and [`Template::trailing`]
//! for inspection only; templates should start and end with a field.

use crate::error::{MaskError, Result};

/// Marks the start of a field in a template.
pub const FIELD_MARKER: char = '%';

/// A split format template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    codes: Vec<char>,
    delimiters: Vec<String>,
    leading: String,
    trailing: String,
}

impl Template {
    /// Split a template into field codes and interior delimiters.
    ///
    /// # Errors
    ///
    /// - [`MaskError::MalformedTemplate`] if the template ends with a bare `%`
    /// - [`MaskError::EmptyTemplate`] if it contains no field at all
    pub fn parse(source: &str) -> Result<Self> {
        let mut codes = Vec::new();
        let mut delimiters = Vec::new();
        let mut buffer = String::new();

        let mut chars = source.chars().enumerate();
        while let Some((position, c)) = chars.next() {
            if c != FIELD_MARKER {
                buffer.push(c);
                continue;
            }
            match chars.next() {
                Some((_, code)) => {
                    delimiters.push(std::mem::take(&mut buffer));
                    codes.push(code);
                }
                None => {
                    return Err(MaskError::MalformedTemplate {
                        template: source.to_string(),
                        position,
                    })
                }
            }
        }

        if codes.is_empty() {
            return Err(MaskError::EmptyTemplate(source.to_string()));
        }

        // The first delimiter is whatever preceded the first field.
        let leading = delimiters.remove(0);

        Ok(Self {
            source: source.to_string(),
            codes,
            delimiters,
            leading,
            trailing: buffer,
        })
    }

    /// The template as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Field codes in template order.
    pub fn codes(&self) -> &[char] {
        &self.codes
    }

    /// Literal text between consecutive fields; one fewer than [`codes`](Self::codes).
    pub fn delimiters(&self) -> &[String] {
        &self.delimiters
    }

    /// Literal text before the first field, dropped from the mask.
    pub fn leading(&self) -> &str {
        &self.leading
    }

    /// Literal text after the last field, dropped from the mask.
    pub fn trailing(&self) -> &str {
        &self.trailing
    }

    /// Whether any literal text falls outside the first and last field.
    pub fn has_affixes(&self) -> bool {
        !self.leading.is_empty() || !self.trailing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_time_template() {
        let t = Template::parse("%H:%M:%S").unwrap();
        assert_eq!(t.codes(), &['H', 'M', 'S']);
        assert_eq!(t.delimiters(), &[":", ":"]);
        assert!(!t.has_affixes());
    }

    #[test]
    fn multi_character_delimiters() {
        let t = Template::parse("%Y / %m / %d").unwrap();
        assert_eq!(t.codes(), &['Y', 'm', 'd']);
        assert_eq!(t.delimiters(), &[" / ", " / "]);
    }

    #[test]
    fn adjacent_fields_have_empty_delimiter() {
        let t = Template::parse("%H%M").unwrap();
        assert_eq!(t.delimiters(), &[""]);
    }

    #[test]
    fn single_field_has_no_delimiters() {
        let t = Template::parse("%Y").unwrap();
        assert_eq!(t.codes(), &['Y']);
        assert!(t.delimiters().is_empty());
    }

    #[test]
    fn affixes_are_split_off() {
        let t = Template::parse("at %H:%M sharp").unwrap();
        assert_eq!(t.codes(), &['H', 'M']);
        assert_eq!(t.delimiters(), &[":"]);
        assert_eq!(t.leading(), "at ");
        assert_eq!(t.trailing(), " sharp");
        assert!(t.has_affixes());
    }

    #[test]
    fn percent_consumes_next_character_as_code() {
        let t = Template::parse("%%%H").unwrap();
        assert_eq!(t.codes(), &['%', 'H']);
        assert_eq!(t.delimiters(), &[""]);
    }

    #[test]
    fn trailing_percent_is_malformed() {
        let err = Template::parse("%H:%").unwrap_err();
        assert!(matches!(
            err,
            MaskError::MalformedTemplate { position: 3, .. }
        ));
    }

    #[test]
    fn template_without_fields_is_rejected() {
        assert!(matches!(
            Template::parse("hh:mm"),
            Err(MaskError::EmptyTemplate(_))
        ));
        assert!(matches!(Template::parse(""), Err(MaskError::EmptyTemplate(_))));
    }

    #[test]
    fn positions_count_characters() {
        let err = Template::parse("é%").unwrap_err();
        assert!(matches!(err, MaskError::MalformedTemplate { position: 1, .. }));
    }
}
