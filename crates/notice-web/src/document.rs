#![forbid(unsafe_code)]

//! [`Document`] over the live browser DOM.

use ahash::AHashMap;
use notice_core::{ClickAction, Content, Document, Element};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::link::Link;

type ClickHandler = Closure<dyn FnMut()>;

/// Renders element trees into `document.body`.
///
/// Click handlers are kept alive per top-level id and dropped when that
/// element is detached.
pub struct WebDocument {
    document: web_sys::Document,
    body: HtmlElement,
    link: Link,
    handlers: AHashMap<String, Vec<ClickHandler>>,
}

impl WebDocument {
    pub(crate) fn new(document: web_sys::Document, link: Link) -> Result<Self, JsValue> {
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no <body>"))?;
        Ok(Self {
            document,
            body,
            link,
            handlers: AHashMap::new(),
        })
    }

    fn html_element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn render(
        &self,
        element: &Element,
        handlers: &mut Vec<ClickHandler>,
    ) -> Result<HtmlElement, JsValue> {
        let node = self
            .document
            .create_element(element.tag)?
            .dyn_into::<HtmlElement>()?;
        if let Some(id) = &element.id {
            node.set_id(id);
        }
        if !element.classes.is_empty() {
            node.set_class_name(&element.classes.join(" "));
        }
        let style = node.style();
        for (property, value) in &element.style {
            style.set_property(property, value)?;
        }
        match &element.content {
            Some(Content::Text(text)) => node.set_text_content(Some(text)),
            Some(Content::Markup(markup)) => node.set_inner_html(markup),
            None => {}
        }
        for child in &element.children {
            node.append_child(&self.render(child, handlers)?)?;
        }
        if let Some(action) = &element.on_click {
            let handler = self.click_handler(action.clone());
            node.set_onclick(Some(handler.as_ref().unchecked_ref()));
            handlers.push(handler);
        }
        Ok(node)
    }

    fn click_handler(&self, action: ClickAction) -> ClickHandler {
        let link = self.link.clone();
        Closure::new(move || {
            let action = action.clone();
            link.dispatch(move |notifier| notifier.click(action));
        })
    }
}

impl Document for WebDocument {
    fn append(&mut self, element: Element) {
        let mut handlers = Vec::new();
        let result = self
            .render(&element, &mut handlers)
            .and_then(|node| self.body.append_child(&node));
        match result {
            Ok(_) => {
                if let Some(id) = element.id {
                    self.handlers.insert(id, handlers);
                }
            }
            Err(err) => tracing::warn!(?err, id = ?element.id, "failed to insert element"),
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn detach(&mut self, id: &str) -> bool {
        let Some(node) = self.document.get_element_by_id(id) else {
            return false;
        };
        node.remove();
        self.handlers.remove(id);
        true
    }

    fn set_style(&mut self, id: &str, property: &str, value: &str) -> bool {
        self.html_element(id)
            .is_some_and(|el| el.style().set_property(property, value).is_ok())
    }

    fn ids_with_class(&self, class: &str) -> Vec<String> {
        let found = self.document.get_elements_by_class_name(class);
        (0..found.length())
            .filter_map(|i| found.item(i))
            .map(|el| el.id())
            .filter(|id| !id.is_empty())
            .collect()
    }
}
