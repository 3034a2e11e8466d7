//! Token descriptor catalog.
//!
//! A [`TokenTable`] maps the one-character code that follows `%` in a format
//! template to a [`TokenDescriptor`]: the field's kind, its fixed display
//! width, the placeholder glyphs shown before any input, and the kind-specific
//! payload (a numeric upper bound, or a closed vocabulary with shorthands).
//!
//! The table is plain data. It is built once, never mutated while formats
//! compiled from it are in use, and passed to
//! [`CompiledFormat::compile`](crate::CompiledFormat::compile) by reference.
//!
//! # Built-in Catalog
//!
//! | Code | Field | Width | Bound |
//! |------|-------|-------|-------|
//! | `H` | hour | 2 | 23 |
//! | `M` | minute | 2 | 59 |
//! | `S` | second | 2 | 59 |
//! | `d` | day of month | 2 | 31 |
//! | `j` | day of year | 3 | 366 |
//! | `U`, `W` | week of year | 2 | 53 |
//! | `m` | month | 2 | 12 |
//! | `y` | short year | 2 | 99 |
//! | `Y` | long year | 4 | 9999 |
//! | `a` | weekday name | 3 | `mon` .. `sun` |
//! | `b` | month name | 3 | `jan` .. `dec` |
//!
//! # Catalog Files
//!
//! Tables serialize to and from YAML or JSON:
//!
//! ```yaml
//! tokens:
//!   H: { kind: numeric, width: 2, placeholder: HH, max: 23 }
//!   a:
//!     kind: enumerated
//!     placeholder: Day
//!     values: [mon, tue, wed, thu, fri, sat, sun]
//!     shorthands: { m: mon, tu: tue, w: wed, th: thu, f: fri, sa: sat, su: sun }
//! ```
//!
//! ```rust
//! use standout_mask::TokenTable;
//!
//! let table = TokenTable::from_yaml(r#"
//! tokens:
//!   q: { kind: numeric, width: 1, placeholder: Q, max: 4 }
//! "#).unwrap();
//!
//! assert_eq!(table.lookup('q').unwrap().width(), 1);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{MaskError, Result};

/// Widest numeric field whose zero-padded probe still fits a `u64`.
pub const MAX_NUMERIC_WIDTH: usize = 18;

static BUILTIN: Lazy<TokenTable> = Lazy::new(builtin_catalog);

/// Ordered canonical values of an enumerated field plus its shorthand map.
///
/// Each canonical value carries an editor-chosen shorthand: the shortest
/// input that identifies it unambiguously. The shorthand map is the inverse
/// of that annotation. Values whose every proper prefix collides with another
/// value (`mar`/`may`, `jun`/`jul`) use themselves as shorthand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    values: Vec<String>,
    shorthands: BTreeMap<String, String>,
}

impl Vocabulary {
    /// Create a vocabulary from canonical values and a shorthand map.
    ///
    /// Shorthand keys are kept as given; lookups ignore case, so keys that
    /// only differ in case are rejected by [`TokenDescriptor::validate`].
    pub fn new(values: Vec<String>, shorthands: BTreeMap<String, String>) -> Self {
        Self { values, shorthands }
    }

    /// Create a vocabulary from `(canonical value, shorthand)` pairs.
    pub fn from_entries(entries: &[(&str, &str)]) -> Self {
        let values = entries.iter().map(|(value, _)| value.to_string()).collect();
        let shorthands = entries
            .iter()
            .map(|(value, short)| (short.to_string(), value.to_string()))
            .collect();
        Self::new(values, shorthands)
    }

    /// The canonical values, in catalog order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The shorthand map, keyed by shorthand.
    pub fn shorthands(&self) -> &BTreeMap<String, String> {
        &self.shorthands
    }

    /// Expand a partial input through the shorthand map, ignoring case.
    pub fn expand(&self, partial: &str) -> Option<&str> {
        let partial = partial.to_lowercase();
        self.shorthands
            .iter()
            .find(|(short, _)| short.to_lowercase() == partial)
            .map(|(_, target)| target.as_str())
    }

    /// Whether `full` is one of the canonical values, ignoring case.
    pub fn contains(&self, full: &str) -> bool {
        let full = full.to_lowercase();
        self.values.iter().any(|v| v.to_lowercase() == full)
    }
}

/// What a field accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Decimal digits, bounded above by `max`.
    Numeric { max: u64 },
    /// One of a closed set of fixed-length words.
    Enumerated(Vocabulary),
}

impl TokenKind {
    /// Short name used in catalog files and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Numeric { .. } => "numeric",
            Self::Enumerated(_) => "enumerated",
        }
    }
}

/// Everything the compiler needs to know about one token code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDescriptor {
    code: char,
    width: usize,
    placeholder: String,
    kind: TokenKind,
}

impl TokenDescriptor {
    /// Create a numeric descriptor.
    ///
    /// # Errors
    ///
    /// [`MaskError::InvalidDescriptor`] if the width is zero or wider than
    /// [`MAX_NUMERIC_WIDTH`], or the placeholder is not `width` characters.
    pub fn numeric(code: char, width: usize, placeholder: &str, max: u64) -> Result<Self> {
        let descriptor = Self::build(code, width, placeholder, TokenKind::Numeric { max });
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Create an enumerated descriptor from `(value, shorthand)` pairs.
    ///
    /// The width is the placeholder's length.
    ///
    /// # Errors
    ///
    /// [`MaskError::InvalidDescriptor`] if a value is not exactly `width`
    /// characters, or a shorthand does not lead to any value.
    pub fn enumerated(code: char, placeholder: &str, entries: &[(&str, &str)]) -> Result<Self> {
        Self::with_vocabulary(code, placeholder, Vocabulary::from_entries(entries))
    }

    /// Create an enumerated descriptor from a prepared vocabulary.
    pub fn with_vocabulary(code: char, placeholder: &str, vocabulary: Vocabulary) -> Result<Self> {
        let width = placeholder.chars().count();
        let descriptor = Self::build(code, width, placeholder, TokenKind::Enumerated(vocabulary));
        descriptor.validate()?;
        Ok(descriptor)
    }

    fn build(code: char, width: usize, placeholder: &str, kind: TokenKind) -> Self {
        Self {
            code,
            width,
            placeholder: placeholder.to_string(),
            kind,
        }
    }

    /// The token code, the character after `%`.
    pub fn code(&self) -> char {
        self.code
    }

    /// Fixed number of content characters this field occupies.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Glyphs shown in the placeholder for this field.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Kind and payload.
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Check the catalog invariants for this descriptor.
    pub fn validate(&self) -> Result<()> {
        let code = self.code;
        if self.width == 0 {
            return Err(MaskError::invalid(code, "width must be at least 1"));
        }
        if self.placeholder.chars().count() != self.width {
            return Err(MaskError::invalid(
                code,
                format!(
                    "placeholder '{}' must be {} characters wide",
                    self.placeholder, self.width
                ),
            ));
        }

        match &self.kind {
            TokenKind::Numeric { .. } => {
                if self.width > MAX_NUMERIC_WIDTH {
                    return Err(MaskError::invalid(
                        code,
                        format!("numeric width {} exceeds {}", self.width, MAX_NUMERIC_WIDTH),
                    ));
                }
            }
            TokenKind::Enumerated(vocabulary) => {
                if vocabulary.values().is_empty() {
                    return Err(MaskError::invalid(code, "vocabulary is empty"));
                }
                if let Some(value) = vocabulary
                    .values()
                    .iter()
                    .find(|v| v.chars().count() != self.width)
                {
                    return Err(MaskError::invalid(
                        code,
                        format!("value '{}' must be {} characters wide", value, self.width),
                    ));
                }
                let mut seen = BTreeSet::new();
                for (short, target) in vocabulary.shorthands() {
                    if short.is_empty() {
                        return Err(MaskError::invalid(code, "shorthand must not be empty"));
                    }
                    if !seen.insert(short.to_lowercase()) {
                        return Err(MaskError::invalid(
                            code,
                            format!("shorthand '{}' collides with another ignoring case", short),
                        ));
                    }
                    let target = target.to_lowercase();
                    let leads_somewhere = vocabulary
                        .values()
                        .iter()
                        .any(|v| v.to_lowercase().starts_with(&target));
                    if !leads_somewhere {
                        return Err(MaskError::invalid(
                            code,
                            format!("shorthand '{}' expands to unknown value '{}'", short, target),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Immutable map from token code to descriptor.
///
/// Build one at startup (or use [`TokenTable::builtin`]) and pass it by
/// reference to the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile", into = "CatalogFile")]
pub struct TokenTable {
    tokens: BTreeMap<char, TokenDescriptor>,
}

impl TokenTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            tokens: BTreeMap::new(),
        }
    }

    /// The shared built-in catalog.
    pub fn builtin() -> &'static TokenTable {
        &BUILTIN
    }

    /// Add a descriptor, builder style.
    pub fn with(mut self, descriptor: TokenDescriptor) -> Self {
        self.insert(descriptor);
        self
    }

    /// Add or replace a descriptor.
    pub fn insert(&mut self, descriptor: TokenDescriptor) {
        self.tokens.insert(descriptor.code(), descriptor);
    }

    /// Overlay `other` on this table; `other` wins on shared codes.
    pub fn merge(mut self, other: TokenTable) -> Self {
        self.tokens.extend(other.tokens);
        self
    }

    /// Look up the descriptor for a code.
    pub fn lookup(&self, code: char) -> Result<&TokenDescriptor> {
        self.tokens.get(&code).ok_or(MaskError::UnknownToken(code))
    }

    /// Registered codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = char> + '_ {
        self.tokens.keys().copied()
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no codes are registered.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Parse a catalog from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_yaml::from_str(yaml).map_err(|e| MaskError::config(None, e.to_string()))?;
        Self::try_from(file)
    }

    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| MaskError::config(None, e.to_string()))?;
        Self::try_from(file)
    }

    /// Load a catalog file; the extension selects YAML or JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml,
            Some("json") => Self::from_json,
            _ => return Err(MaskError::UnsupportedConfig(path.to_path_buf())),
        };

        let content = std::fs::read_to_string(path).map_err(|source| MaskError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        parse(&content).map_err(|e| match e {
            MaskError::Config { message, .. } => MaskError::config(Some(path.to_path_buf()), message),
            other => other,
        })
    }

    /// Render the table as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| MaskError::config(None, e.to_string()))
    }

    /// Render the table as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| MaskError::config(None, e.to_string()))
    }
}

impl Default for TokenTable {
    fn default() -> Self {
        builtin_catalog()
    }
}

// === Serialized form ===

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    tokens: BTreeMap<String, DescriptorEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum DescriptorEntry {
    Numeric {
        width: usize,
        placeholder: String,
        max: u64,
    },
    Enumerated {
        placeholder: String,
        values: Vec<String>,
        #[serde(default)]
        shorthands: BTreeMap<String, String>,
    },
}

impl TryFrom<CatalogFile> for TokenTable {
    type Error = MaskError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        let mut table = TokenTable::new();
        for (key, descriptor) in file.tokens {
            let mut chars = key.chars();
            let code = match (chars.next(), chars.next()) {
                (Some(code), None) => code,
                _ => {
                    return Err(MaskError::config(
                        None,
                        format!("token key '{}' must be a single character", key),
                    ))
                }
            };

            let descriptor = match descriptor {
                DescriptorEntry::Numeric {
                    width,
                    placeholder,
                    max,
                } => TokenDescriptor::numeric(code, width, &placeholder, max)?,
                DescriptorEntry::Enumerated {
                    placeholder,
                    values,
                    shorthands,
                } => TokenDescriptor::with_vocabulary(
                    code,
                    &placeholder,
                    Vocabulary::new(values, shorthands),
                )?,
            };
            table.insert(descriptor);
        }
        Ok(table)
    }
}

impl From<TokenTable> for CatalogFile {
    fn from(table: TokenTable) -> Self {
        let tokens = table
            .tokens
            .into_values()
            .map(|d| {
                let entry = match d.kind {
                    TokenKind::Numeric { max } => DescriptorEntry::Numeric {
                        width: d.width,
                        placeholder: d.placeholder,
                        max,
                    },
                    TokenKind::Enumerated(vocabulary) => DescriptorEntry::Enumerated {
                        placeholder: d.placeholder,
                        values: vocabulary.values,
                        shorthands: vocabulary.shorthands,
                    },
                };
                (d.code.to_string(), entry)
            })
            .collect();
        Self { tokens }
    }
}

// === Built-in catalog ===

const WEEKDAYS: &[(&str, &str)] = &[
    ("mon", "m"),
    ("tue", "tu"),
    ("wed", "w"),
    ("thu", "th"),
    ("fri", "f"),
    ("sat", "sa"),
    ("sun", "su"),
];

const MONTHS: &[(&str, &str)] = &[
    ("jan", "j"),
    ("feb", "f"),
    ("mar", "mar"),
    ("apr", "ap"),
    ("may", "may"),
    ("jun", "jun"),
    ("jul", "jul"),
    ("aug", "au"),
    ("sep", "s"),
    ("oct", "o"),
    ("nov", "n"),
    ("dec", "d"),
];

fn builtin_catalog() -> TokenTable {
    let numeric = |code, width, placeholder: &str, max| {
        TokenDescriptor::build(code, width, placeholder, TokenKind::Numeric { max })
    };
    let enumerated = |code, placeholder: &str, entries| {
        TokenDescriptor::build(
            code,
            3,
            placeholder,
            TokenKind::Enumerated(Vocabulary::from_entries(entries)),
        )
    };

    TokenTable::new()
        .with(numeric('H', 2, "HH", 23))
        .with(numeric('M', 2, "MM", 59))
        .with(numeric('S', 2, "SS", 59))
        .with(numeric('d', 2, "DD", 31))
        .with(numeric('j', 3, "DDD", 366))
        .with(numeric('U', 2, "WW", 53))
        .with(numeric('W', 2, "WW", 53))
        .with(numeric('m', 2, "MM", 12))
        .with(numeric('y', 2, "YY", 99))
        .with(numeric('Y', 4, "YYYY", 9999))
        .with(enumerated('a', "Day", WEEKDAYS))
        .with(enumerated('b', "Mon", MONTHS))
}
