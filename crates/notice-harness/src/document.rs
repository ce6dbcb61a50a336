#![forbid(unsafe_code)]

//! In-memory [`Document`] implementation.

use notice_core::{ClickAction, Document, Element};

/// Body children kept as plain [`Element`] trees.
///
/// Lookups by id search whole subtrees (`getElementById`); class queries
/// return every element carrying the class that has an id
/// (`getElementsByClassName`).
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    body: Vec<Element>,
    appended: usize,
    detached: usize,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level body children in document order.
    #[must_use]
    pub fn body(&self) -> &[Element] {
        &self.body
    }

    /// Number of body children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Total appends and detaches performed so far.
    #[must_use]
    pub fn counters(&self) -> (usize, usize) {
        (self.appended, self.detached)
    }

    /// Find an element by id anywhere in the document.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.body
            .iter()
            .flat_map(Element::walk)
            .find(|e| e.id.as_deref() == Some(id))
    }

    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    /// Current value of an inline style property.
    #[must_use]
    pub fn style(&self, id: &str, property: &str) -> Option<&str> {
        self.element(id)?
            .style
            .iter()
            .rev()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    /// Number of elements (at any depth) carrying `class`.
    #[must_use]
    pub fn count_with_class(&self, class: &str) -> usize {
        self.body
            .iter()
            .flat_map(Element::walk)
            .filter(|e| e.has_class(class))
            .count()
    }

    /// Number of elements with the given id (should never exceed one).
    #[must_use]
    pub fn count_with_id(&self, id: &str) -> usize {
        self.body
            .iter()
            .flat_map(Element::walk)
            .filter(|e| e.id.as_deref() == Some(id))
            .count()
    }

    /// Click actions inside the element with `id`, in document order.
    #[must_use]
    pub fn click_actions(&self, id: &str) -> Vec<ClickAction> {
        self.element(id).map(Element::click_actions).unwrap_or_default()
    }

    /// Outer HTML of the element with `id`.
    #[must_use]
    pub fn html(&self, id: &str) -> Option<String> {
        self.element(id).map(Element::to_html)
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        fn find<'a>(nodes: &'a mut [Element], id: &str) -> Option<&'a mut Element> {
            for node in nodes {
                if node.id.as_deref() == Some(id) {
                    return Some(node);
                }
                if let Some(found) = find(&mut node.children, id) {
                    return Some(found);
                }
            }
            None
        }
        find(&mut self.body, id)
    }
}

fn detach_from(nodes: &mut Vec<Element>, id: &str) -> bool {
    if let Some(pos) = nodes.iter().position(|n| n.id.as_deref() == Some(id)) {
        nodes.remove(pos);
        return true;
    }
    nodes.iter_mut().any(|n| detach_from(&mut n.children, id))
}

impl Document for MemoryDocument {
    fn append(&mut self, element: Element) {
        self.appended += 1;
        self.body.push(element);
    }

    fn contains(&self, id: &str) -> bool {
        self.contains_id(id)
    }

    fn detach(&mut self, id: &str) -> bool {
        let removed = detach_from(&mut self.body, id);
        if removed {
            self.detached += 1;
        }
        removed
    }

    fn set_style(&mut self, id: &str, property: &str, value: &str) -> bool {
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        match element.style.iter_mut().find(|(k, _)| k == property) {
            Some((_, v)) => *v = value.to_string(),
            None => element.style.push((property.to_string(), value.to_string())),
        }
        true
    }

    fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.body
            .iter()
            .flat_map(Element::walk)
            .filter(|e| e.has_class(class))
            .filter_map(|e| e.id.clone())
            .collect()
    }
}
