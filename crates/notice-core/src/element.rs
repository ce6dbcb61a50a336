#![forbid(unsafe_code)]

//! Plain-data element trees handed to a [`Document`](crate::Document).
//!
//! Dialog builders never touch a live DOM. They produce an [`Element`] tree
//! and the host renders it. Clickable nodes carry a [`ClickAction`] that the
//! host routes back through [`Notifier::click`](crate::Notifier::click).
//!
//! # Trust boundary
//!
//! [`Content::Text`] is escaped when rendered as markup. [`Content::Markup`]
//! is inserted verbatim; callers must sanitize untrusted input themselves.

use std::fmt::Write as _;

use crate::id::DialogId;

/// Body of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain text, escaped on insertion.
    Text(String),
    /// Raw markup, inserted as-is.
    Markup(String),
}

impl Content {
    /// Plain text content.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Raw markup content. Only use with trusted input.
    pub fn markup(value: impl Into<String>) -> Self {
        Self::Markup(value.into())
    }

    /// Markup form of this content.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Text(text) => escape_html(text),
            Self::Markup(markup) => markup.clone(),
        }
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// What a click on an element means to the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClickAction {
    /// Click on an alert body.
    Dismiss(DialogId),
    /// Button of a force dialog.
    Acknowledge(DialogId),
    /// Submit button of a confirm dialog.
    Submit(DialogId),
    /// Cancel button of a confirm dialog.
    Cancel(DialogId),
    /// Click on the overlay backdrop.
    Overlay,
}

/// A node to be inserted into the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Initial inline style, applied before insertion.
    pub style: Vec<(String, String)>,
    pub content: Option<Content>,
    pub children: Vec<Element>,
    pub on_click: Option<ClickAction>,
}

impl Element {
    /// Empty `<div>`.
    #[must_use]
    pub fn div() -> Self {
        Self {
            tag: "div",
            id: None,
            classes: Vec::new(),
            style: Vec::new(),
            content: None,
            children: Vec::new(),
            on_click: None,
        }
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    #[must_use]
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.push((property.into(), value.into()));
        self
    }

    #[must_use]
    pub fn content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn on_click(mut self, action: ClickAction) -> Self {
        self.on_click = Some(action);
        self
    }

    /// Whether this node carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first pre-order iterator over this node and its descendants.
    pub fn walk(&self) -> impl Iterator<Item = &Element> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Click actions in document order.
    #[must_use]
    pub fn click_actions(&self) -> Vec<ClickAction> {
        self.walk().filter_map(|e| e.on_click.clone()).collect()
    }

    /// Serialize as outer HTML (inline style included).
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", escape_html(id));
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_html(&self.classes.join(" ")));
        }
        if !self.style.is_empty() {
            let style = self
                .style
                .iter()
                .map(|(k, v)| format!("{k}: {v};"))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = write!(out, " style=\"{}\"", escape_html(&style));
        }
        out.push('>');
        if let Some(content) = &self.content {
            out.push_str(&content.to_html());
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escape the five HTML-significant characters.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_is_escaped_markup_is_not() {
        assert_eq!(
            Content::text("<b>hi</b> & 'bye'").to_html(),
            "&lt;b&gt;hi&lt;/b&gt; &amp; &#39;bye&#39;"
        );
        assert_eq!(Content::markup("<b>hi</b>").to_html(), "<b>hi</b>");
    }

    #[test]
    fn duplicate_classes_are_ignored() {
        let el = Element::div().class("a").class("b").class("a");
        assert_eq!(el.classes, vec!["a", "b"]);
    }

    #[test]
    fn walk_is_document_order() {
        let id = DialogId::from("d");
        let tree = Element::div()
            .id("root")
            .child(Element::div().id("a").child(Element::div().id("a1")))
            .child(Element::div().id("b").on_click(ClickAction::Submit(id.clone())))
            .child(Element::div().id("c").on_click(ClickAction::Cancel(id.clone())));
        let ids: Vec<_> = tree.walk().filter_map(|e| e.id.as_deref()).collect();
        assert_eq!(ids, vec!["root", "a", "a1", "b", "c"]);
        assert_eq!(
            tree.click_actions(),
            vec![ClickAction::Submit(id.clone()), ClickAction::Cancel(id)]
        );
    }

    #[test]
    fn html_serialization() {
        let el = Element::div()
            .id("x")
            .class("box")
            .style("opacity", "0")
            .child(Element::div().class("inner").content(Content::text("a<b")));
        assert_eq!(
            el.to_html(),
            r#"<div id="x" class="box" style="opacity: 0;"><div class="inner">a&lt;b</div></div>"#
        );
    }
}
