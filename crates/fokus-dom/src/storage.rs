//! [§ 12.2.1 The Storage interface](https://html.spec.whatwg.org/multipage/webstorage.html#the-storage-interface)
//!
//! In-memory `localStorage`. A [`LocalStorage`] is a handle: clones share
//! the same entries, the way every script in a page sees the same
//! `window.localStorage`. The store lives as long as its last handle.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// String-to-string key-value store.
///
/// Keys enumerate in sorted order, which is stable between mutations.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl LocalStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// [getItem](https://html.spec.whatwg.org/multipage/webstorage.html#dom-storage-getitem)
    ///
    /// "The getItem(key) method steps are to return the result of getting
    /// this's map[key]", or `None` if the key is absent.
    #[must_use]
    pub fn get_item(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// [setItem](https://html.spec.whatwg.org/multipage/webstorage.html#dom-storage-setitem)
    ///
    /// Stores `value` as a string, silently overwriting any previous value.
    pub fn set_item(&self, key: &str, value: impl ToString) {
        let _ = self
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// [removeItem](https://html.spec.whatwg.org/multipage/webstorage.html#dom-storage-removeitem)
    ///
    /// No-op when the key is absent.
    pub fn remove_item(&self, key: &str) {
        let _ = self.entries.borrow_mut().remove(key);
    }

    /// [clear](https://html.spec.whatwg.org/multipage/webstorage.html#dom-storage-clear)
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// [key](https://html.spec.whatwg.org/multipage/webstorage.html#dom-storage-key)
    ///
    /// The key at enumeration position `index`, or `None` when out of range.
    #[must_use]
    pub fn key(&self, index: usize) -> Option<String> {
        self.entries.borrow().keys().nth(index).cloned()
    }

    /// [length](https://html.spec.whatwg.org/multipage/webstorage.html#dom-storage-length)
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True when the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// True if both handles point at the same store.
    #[must_use]
    pub fn same_store(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}
