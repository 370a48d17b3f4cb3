//! [§ 7.1 Interface DOMTokenList](https://dom.spec.whatwg.org/#interface-domtokenlist)
//!
//! An element's class tokens, kept in lock-step with its `class` attribute.
//! Reads go through [`ClassList`]; writes go through [`ClassListMut`], which
//! borrows the owning [`Element`] so it can rewrite the attribute after every
//! mutation.

use std::fmt;

use crate::Element;

/// Ordered set of class tokens.
///
/// Tokens are unique and never empty. Iteration order is insertion order,
/// which is also the serialization order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create an empty class list.
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Build a class list from a `class` attribute value.
    #[must_use]
    pub fn from_attribute(value: &str) -> Self {
        let mut list = Self::new();
        list.set_from_attribute(value);
        list
    }

    /// [§ 7.1 contains](https://dom.spec.whatwg.org/#dom-domtokenlist-contains)
    ///
    /// "The contains(token) method steps are to return true if this's token set[token] exists;
    /// otherwise false."
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the tokens in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Replace the whole token set by splitting `value` on runs of whitespace.
    ///
    /// Empty tokens are discarded and duplicates collapse onto their first
    /// occurrence. This does not touch any attribute; [`Element::set_attribute`]
    /// calls it after storing the raw `class` string.
    pub fn set_from_attribute(&mut self, value: &str) {
        self.tokens.clear();
        for token in value.split_whitespace() {
            let _ = self.insert(token);
        }
    }

    pub(crate) fn insert(&mut self, token: &str) -> bool {
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    pub(crate) fn delete(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        self.tokens.len() != before
    }
}

impl fmt::Display for ClassList {
    /// [§ 7.1 serialize steps](https://dom.spec.whatwg.org/#concept-ordered-set-serializer)
    ///
    /// Tokens joined by a single space; the empty set serializes to "".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

/// Mutable view of an element's class list.
///
/// Every mutating call resynchronizes the element's `class` attribute: a
/// non-empty set is written back space-joined, an empty set removes the
/// attribute entirely.
pub struct ClassListMut<'a> {
    element: &'a mut Element,
}

impl<'a> ClassListMut<'a> {
    pub(crate) const fn new(element: &'a mut Element) -> Self {
        Self { element }
    }

    /// [§ 7.1 add](https://dom.spec.whatwg.org/#dom-domtokenlist-add)
    ///
    /// Inserts each non-empty token. Re-adding a present token is a no-op.
    pub fn add<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let _ = self.element.class_list.insert(token.as_ref());
        }
        self.element.sync_class_attribute();
    }

    /// [§ 7.1 remove](https://dom.spec.whatwg.org/#dom-domtokenlist-remove)
    ///
    /// Deletes each token that is present.
    pub fn remove<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let _ = self.element.class_list.delete(token.as_ref());
        }
        self.element.sync_class_attribute();
    }

    /// [§ 7.1 toggle](https://dom.spec.whatwg.org/#dom-domtokenlist-toggle)
    ///
    /// Removes `token` and returns false if present, otherwise adds it and
    /// returns true. An empty token is ignored and yields false.
    pub fn toggle(&mut self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        let added = if self.element.class_list.delete(token) {
            false
        } else {
            self.element.class_list.insert(token)
        };
        self.element.sync_class_attribute();
        added
    }

    /// Membership test, same as [`ClassList::contains`].
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.element.class_list.contains(token)
    }
}
