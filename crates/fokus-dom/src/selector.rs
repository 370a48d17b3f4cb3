//! Single-fragment selectors.
//!
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) restricted to one
//! simple selector: a class, an ID or a type (tag) selector. Compound
//! selectors, combinators, attribute selectors and pseudo-classes are
//! rejected at parse time.

use std::fmt;
use std::str::FromStr;

use crate::DomError;

/// A parsed selector fragment.
///
/// Parsing happens once per lookup, before traversal, so matching a node is a
/// plain comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    ///
    /// Examples: `.hidden`, `.app__form-textarea`
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    ///
    /// Examples: `#btn-remover-todas`
    Id(String),

    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// Matched case-insensitively against the element's tag name.
    ///
    /// Examples: `button`, `ul`, `TEXTAREA`
    Tag(String),
}

impl Selector {
    /// Parse a selector fragment.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidSelector`] for an empty input, a bare `.` or
    /// `#`, or anything outside the three supported forms (e.g. `div.x`,
    /// `ul li`, `[disabled]`, `*`).
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let trimmed = input.trim();
        let invalid = || DomError::InvalidSelector(input.to_string());

        if let Some(class) = trimmed.strip_prefix('.') {
            return is_identifier(class)
                .then(|| Self::Class(class.to_string()))
                .ok_or_else(invalid);
        }
        if let Some(id) = trimmed.strip_prefix('#') {
            return is_identifier(id)
                .then(|| Self::Id(id.to_string()))
                .ok_or_else(invalid);
        }
        is_tag_name(trimmed)
            .then(|| Self::Tag(trimmed.to_string()))
            .ok_or_else(invalid)
    }
}

/// Characters that would start another simple selector or a combinator.
const RESERVED: &[char] = &[
    '.', '#', '[', ']', ':', '>', '+', '~', ',', '*', '(', ')', '=', '"', '\'',
];

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || RESERVED.contains(&c))
}

fn is_tag_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(class) => write!(f, ".{class}"),
            Self::Id(id) => write!(f, "#{id}"),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}
