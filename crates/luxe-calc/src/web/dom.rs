//! Mock DOM
//!
//! Just enough of a document to drive the web calculator page headlessly:
//! elements with text, attributes and classes, looked up by id or by class in
//! document order.

use std::collections::HashMap;

/// A DOM element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID (may be empty)
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes, including `data-*`
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Flips a class, returning whether it is now present
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    /// Adds or removes a class
    pub fn set_class(&mut self, class: &str, present: bool) {
        if present {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Gets a `data-*` attribute, e.g. `data("action")` reads `data-action`
    #[must_use]
    pub fn data(&self, key: &str) -> Option<&str> {
        self.get_attr(&format!("data-{key}"))
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Document-level key press, `key` as in `KeyboardEvent.key`
    KeyDown {
        /// The key that was pressed
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a key down event
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }
}

/// Mock DOM document
#[derive(Debug, Default)]
pub struct MockDom {
    /// Elements by ID
    elements: HashMap<String, DomElement>,
    /// Element IDs in document order
    order: Vec<String>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
}

impl MockDom {
    /// Creates an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element to the document.
    ///
    /// Elements without an ID cannot be looked up and are dropped. A second
    /// element with the same ID replaces the first in place.
    pub fn register_element(&mut self, element: DomElement) {
        if element.id.is_empty() {
            return;
        }
        if !self.elements.contains_key(&element.id) {
            self.order.push(element.id.clone());
        }
        self.elements.insert(element.id.clone(), element);
    }

    /// Number of registered elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the document is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// IDs of elements carrying `class`, in document order
    #[must_use]
    pub fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.query_by_class(class)
            .into_iter()
            .map(|e| e.id.clone())
            .collect()
    }

    /// Elements carrying `class`, in document order
    #[must_use]
    pub fn query_by_class(&self, class: &str) -> Vec<&DomElement> {
        self.order
            .iter()
            .filter_map(|id| self.elements.get(id))
            .filter(|e| e.has_class(class))
            .collect()
    }

    /// Records an event in the history
    pub fn record_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== DomElement tests =====

    #[test]
    fn test_dom_element_new() {
        let elem = DomElement::new("span");
        assert_eq!(elem.tag, "span");
        assert!(elem.id.is_empty());
        assert!(elem.text_content.is_empty());
    }

    #[test]
    fn test_dom_element_default() {
        assert_eq!(DomElement::default().tag, "div");
    }

    #[test]
    fn test_dom_element_builders() {
        let elem = DomElement::new("button")
            .with_id("btn-7")
            .with_text("7")
            .with_class("btn")
            .with_attr("data-value", "7");
        assert_eq!(elem.id, "btn-7");
        assert_eq!(elem.text_content, "7");
        assert!(elem.has_class("btn"));
        assert_eq!(elem.data("value"), Some("7"));
        assert_eq!(elem.data("action"), None);
    }

    #[test]
    fn test_dom_element_add_class_no_duplicates() {
        let mut elem = DomElement::new("div");
        elem.add_class("foo");
        elem.add_class("bar");
        elem.add_class("foo");
        assert_eq!(elem.classes.len(), 2);
    }

    #[test]
    fn test_dom_element_remove_class() {
        let mut elem = DomElement::new("div").with_class("foo").with_class("bar");
        elem.remove_class("foo");
        assert!(!elem.has_class("foo"));
        assert!(elem.has_class("bar"));
    }

    #[test]
    fn test_dom_element_toggle_class() {
        let mut elem = DomElement::new("body");
        assert!(elem.toggle_class("dark-theme"));
        assert!(elem.has_class("dark-theme"));
        assert!(!elem.toggle_class("dark-theme"));
        assert!(!elem.has_class("dark-theme"));
    }

    #[test]
    fn test_dom_element_set_class() {
        let mut elem = DomElement::new("button");
        elem.set_class("active", true);
        elem.set_class("active", true);
        assert_eq!(elem.classes, vec!["active".to_string()]);
        elem.set_class("active", false);
        assert!(elem.classes.is_empty());
    }

    // ===== DomEvent tests =====

    #[test]
    fn test_dom_event_constructors() {
        assert!(matches!(DomEvent::click("btn"), DomEvent::Click { element_id } if element_id == "btn"));
        assert!(matches!(DomEvent::key_down("Enter"), DomEvent::KeyDown { key } if key == "Enter"));
    }

    // ===== MockDom tests =====

    #[test]
    fn test_mock_dom_register_and_lookup() {
        let mut dom = MockDom::new();
        assert!(dom.is_empty());
        dom.register_element(DomElement::new("div").with_id("display").with_text("0"));
        assert_eq!(dom.len(), 1);
        assert_eq!(dom.get_element_text("display"), Some("0"));

        dom.set_element_text("display", "42");
        assert_eq!(dom.get_element_text("display"), Some("42"));
        assert!(dom.get_element("missing").is_none());
    }

    #[test]
    fn test_mock_dom_ignores_anonymous_elements() {
        let mut dom = MockDom::new();
        dom.register_element(DomElement::new("div"));
        assert!(dom.is_empty());
    }

    #[test]
    fn test_mock_dom_replace_keeps_order() {
        let mut dom = MockDom::new();
        dom.register_element(DomElement::new("div").with_id("a").with_class("x"));
        dom.register_element(DomElement::new("div").with_id("b").with_class("x"));
        dom.register_element(DomElement::new("span").with_id("a").with_class("x"));
        assert_eq!(dom.len(), 2);
        assert_eq!(dom.ids_with_class("x"), vec!["a", "b"]);
        assert_eq!(dom.get_element("a").map(|e| e.tag.as_str()), Some("span"));
    }

    #[test]
    fn test_mock_dom_query_by_class() {
        let mut dom = MockDom::new();
        dom.register_element(DomElement::new("button").with_id("one").with_class("btn"));
        dom.register_element(DomElement::new("div").with_id("two"));
        dom.register_element(
            DomElement::new("button")
                .with_id("three")
                .with_class("btn")
                .with_class("btn-operator"),
        );
        assert_eq!(dom.ids_with_class("btn"), vec!["one", "three"]);
        assert_eq!(dom.query_by_class("btn-operator").len(), 1);
    }

    #[test]
    fn test_mock_dom_event_history() {
        let mut dom = MockDom::new();
        dom.record_event(DomEvent::click("btn-1"));
        dom.record_event(DomEvent::key_down("2"));
        assert_eq!(dom.event_history().len(), 2);
        dom.clear_event_history();
        assert!(dom.event_history().is_empty());
    }

    #[test]
    fn test_mock_dom_mutate_element() {
        let mut dom = MockDom::new();
        dom.register_element(DomElement::new("body").with_id("body"));
        if let Some(body) = dom.get_element_mut("body") {
            body.add_class("dark-theme");
        }
        assert!(dom.get_element("body").is_some_and(|b| b.has_class("dark-theme")));
    }
}
