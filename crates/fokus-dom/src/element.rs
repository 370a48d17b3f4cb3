//! [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
//!
//! Element-local state: tag name, attributes, class list and the scalar
//! accessors the widget reads and writes directly. Anything that needs the
//! tree (appending, listeners, lookup) lives on [`crate::Document`].

use crate::class_list::{ClassList, ClassListMut};
use crate::event::Listener;
use crate::selector::Selector;
use crate::AttributesMap;

/// Element-specific data.
///
/// NOTE: only the local name is stored, uppercased as `tagName` reports it
/// for HTML elements. There is no namespace handling.
#[derive(Debug, Clone)]
pub struct Element {
    /// "An element's qualified name"
    tag_name: String,
    /// "An element has an associated attribute list"
    attrs: AttributesMap,
    pub(crate) class_list: ClassList,
    /// Mirror of the `id` attribute.
    id: Option<String>,
    /// Set by any `disabled` attribute, whatever its value.
    disabled: bool,
    value: String,
    text_content: String,
    /// Opaque markup. It is never parsed into children.
    inner_html: String,
    /// Legacy `onclick` handler slot, run by [`crate::Document::click`]
    /// before any registered click listener.
    pub(crate) onclick: Option<Listener>,
}

impl Element {
    pub(crate) fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_uppercase(),
            attrs: AttributesMap::new(),
            class_list: ClassList::new(),
            id: None,
            disabled: false,
            value: String::new(),
            text_content: String::new(),
            inner_html: String::new(),
            onclick: None,
        }
    }

    /// [§ 4.9 tagName](https://dom.spec.whatwg.org/#dom-element-tagname)
    ///
    /// Always uppercase.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// The element's ID, mirrored from the `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// True once a `disabled` attribute has been set, until it is removed.
    #[must_use]
    pub const fn disabled(&self) -> bool {
        self.disabled
    }

    /// All attributes. Order is unspecified.
    #[must_use]
    pub const fn attributes(&self) -> &AttributesMap {
        &self.attrs
    }

    /// [§ 4.9 getAttribute](https://dom.spec.whatwg.org/#dom-element-getattribute)
    ///
    /// Returns `None` when the attribute is absent, which is distinct from an
    /// attribute set to the empty string.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// [§ 4.9 hasAttribute](https://dom.spec.whatwg.org/#dom-element-hasattribute)
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// [§ 4.9 setAttribute](https://dom.spec.whatwg.org/#dom-element-setattribute)
    ///
    /// Stores `value` as a string. `class` replaces the class list from the
    /// stored string, `id` updates [`Element::id`], and `disabled` sets
    /// [`Element::disabled`] regardless of the value.
    pub fn set_attribute(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match name {
            "class" => self.class_list.set_from_attribute(&value),
            "id" => self.id = Some(value.clone()),
            "disabled" => self.disabled = true,
            _ => {}
        }
        let _ = self.attrs.insert(name.to_string(), value);
    }

    /// [§ 4.9 removeAttribute](https://dom.spec.whatwg.org/#dom-element-removeattribute)
    ///
    /// Removing an absent attribute is a no-op. Removing `class` empties the
    /// class list; `id` and `disabled` reset their mirrors.
    pub fn remove_attribute(&mut self, name: &str) {
        let _ = self.attrs.remove(name);
        match name {
            "class" => self.class_list.set_from_attribute(""),
            "id" => self.id = None,
            "disabled" => self.disabled = false,
            _ => {}
        }
    }

    /// [§ 4.9 classList](https://dom.spec.whatwg.org/#dom-element-classlist)
    #[must_use]
    pub const fn class_list(&self) -> &ClassList {
        &self.class_list
    }

    /// Mutable class list; every change is written back to `class`.
    pub const fn class_list_mut(&mut self) -> ClassListMut<'_> {
        ClassListMut::new(self)
    }

    /// [§ 4.9 matches](https://dom.spec.whatwg.org/#dom-element-matches)
    #[must_use]
    pub fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Class(token) => self.class_list.contains(token),
            Selector::Id(id) => self.get_attribute("id") == Some(id.as_str()),
            Selector::Tag(tag) => self.tag_name.eq_ignore_ascii_case(tag),
        }
    }

    /// Form control value. Independent of attributes and children.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the form control value.
    pub fn set_value(&mut self, value: impl ToString) {
        self.value = value.to_string();
    }

    /// Text content. Independent of children: setting it does not replace them.
    #[must_use]
    pub fn text_content(&self) -> &str {
        &self.text_content
    }

    /// Set the text content.
    pub fn set_text_content(&mut self, text: impl ToString) {
        self.text_content = text.to_string();
    }

    /// Opaque inner markup.
    #[must_use]
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Set the inner markup. It is stored verbatim and never parsed.
    pub fn set_inner_html(&mut self, html: impl ToString) {
        self.inner_html = html.to_string();
    }

    /// Write the class list back to the `class` attribute, removing the
    /// attribute when the list is empty.
    pub(crate) fn sync_class_attribute(&mut self) {
        if self.class_list.is_empty() {
            let _ = self.attrs.remove("class");
        } else {
            let _ = self
                .attrs
                .insert("class".to_string(), self.class_list.to_string());
        }
    }
}
