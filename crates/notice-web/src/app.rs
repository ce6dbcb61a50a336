#![forbid(unsafe_code)]

//! The browser-facing notifier and its JavaScript surface.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use notice_core::{
    AlertOptions, Callback, ConfirmOptions, DialogId, ForceOptions, Key, Notifier, Options,
    OptionsPatch,
};
use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use crate::document::WebDocument;
use crate::dto::{self, AlertDto, ConfirmDto, ForceDto};
use crate::error::WebError;
use crate::link::Link;
use crate::scheduler::WebScheduler;
use crate::WebNotifier;

type KeyListener = Closure<dyn FnMut(KeyboardEvent)>;

/// Notifier bound to `window.document`.
///
/// Dropping the app removes its `keydown` listener; dialogs already on
/// screen stay until their pending timers find the notifier gone.
#[wasm_bindgen]
pub struct NoticeApp {
    notifier: Rc<RefCell<WebNotifier>>,
    document: web_sys::Document,
    keydown: KeyListener,
}

impl NoticeApp {
    /// Attach to the current window.
    ///
    /// The default locale comes from `navigator.language`; `patch` is merged
    /// on top of it.
    ///
    /// # Errors
    ///
    /// [`WebError::Dom`] outside a browser window, [`WebError::Notice`] if
    /// the merged options are invalid.
    pub fn new(patch: OptionsPatch) -> Result<Self, WebError> {
        let window = web_sys::window().ok_or_else(|| WebError::Dom("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| WebError::Dom("no document".into()))?;

        let mut base = Options::default();
        if let Some(language) = window.navigator().language() {
            base.locale = language;
        }
        let options = base.merged(patch)?;

        let link = Link::default();
        let notifier = Notifier::new(
            WebDocument::new(document.clone(), link.clone())?,
            WebScheduler::new(window, link.clone()),
            options,
        )?;
        let notifier = Rc::new(RefCell::new(notifier));
        link.bind(&notifier);

        let keys = link.clone();
        let keydown = KeyListener::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_dom_key(&event.key()) {
                keys.dispatch(|notifier| notifier.key(key));
            }
        });
        document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;

        tracing::debug!("notice app attached");
        Ok(Self {
            notifier,
            document,
            keydown,
        })
    }

    fn with<T>(
        &self,
        op: impl FnOnce(&mut WebNotifier) -> Result<T, notice_core::NoticeError>,
    ) -> Result<T, WebError> {
        let mut notifier = self.notifier.try_borrow_mut().map_err(|_| WebError::Busy)?;
        op(&mut notifier).map_err(WebError::from)
    }

    /// Show a toast.
    ///
    /// # Errors
    ///
    /// See [`Notifier::alert`].
    pub fn alert(&self, options: AlertOptions) -> Result<DialogId, WebError> {
        self.with(|n| n.alert(options))
    }

    /// Show a single-button modal.
    ///
    /// # Errors
    ///
    /// See [`Notifier::force`].
    pub fn force(
        &self,
        options: ForceOptions,
        callback: Option<Callback>,
    ) -> Result<DialogId, WebError> {
        self.with(|n| n.force(options, callback))
    }

    /// Show a submit/cancel modal.
    ///
    /// # Errors
    ///
    /// See [`Notifier::confirm`].
    pub fn confirm(
        &self,
        options: ConfirmOptions,
        submit: Option<Callback>,
        cancel: Option<Callback>,
    ) -> Result<DialogId, WebError> {
        self.with(|n| n.confirm(options, submit, cancel))
    }

    /// Fade out every visible alert.
    ///
    /// # Errors
    ///
    /// [`WebError::Busy`] when called while the notifier is borrowed.
    pub fn hide_alerts(&self, callback: Option<Callback>) -> Result<usize, WebError> {
        self.with(|n| Ok(n.hide_alerts(callback)))
    }

    /// Merge configuration.
    ///
    /// # Errors
    ///
    /// See [`Notifier::set_options`].
    pub fn set_options(&self, patch: OptionsPatch) -> Result<(), WebError> {
        self.with(|n| n.set_options(patch))
    }

    /// Snapshot of the current configuration.
    ///
    /// # Errors
    ///
    /// [`WebError::Busy`] when called while the notifier is borrowed.
    pub fn options(&self) -> Result<Options, WebError> {
        self.with(|n| Ok(n.options().clone()))
    }
}

/// Wrap a JS function as a callback. Exceptions are logged, not rethrown.
fn js_callback(function: Option<Function>) -> Option<Callback> {
    let function = function?;
    Some(Box::new(move || {
        if let Err(err) = function.call0(&JsValue::NULL) {
            tracing::warn!(?err, "notice callback threw");
        }
    }))
}

/// Function-valued property of an options object, if any.
fn js_property(options: &JsValue, name: &str) -> Option<Function> {
    if !options.is_object() {
        return None;
    }
    js_sys::Reflect::get(options, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// Accept either a JSON string or a plain object. Functions on the object
/// are dropped by `JSON.stringify` and read separately.
fn options_json(options: &JsValue) -> Result<String, WebError> {
    if let Some(json) = options.as_string() {
        return Ok(json);
    }
    if options.is_undefined() || options.is_null() {
        return Ok(String::new());
    }
    Ok(String::from(js_sys::JSON::stringify(options)?))
}

#[wasm_bindgen]
impl NoticeApp {
    /// `new NoticeApp(options?)`.
    #[wasm_bindgen(constructor)]
    pub fn js_new(options: JsValue) -> Result<NoticeApp, JsValue> {
        let patch: OptionsPatch = dto::parse(&options_json(&options)?)?;
        Ok(Self::new(patch)?)
    }

    /// `alert({ type, text, time, stay, markup })`, returning the dialog id.
    #[wasm_bindgen(js_name = alert)]
    pub fn js_alert(&self, options: JsValue) -> Result<String, JsValue> {
        let dto: AlertDto = dto::parse(&options_json(&options)?)?;
        Ok(self.alert(dto.into())?.to_string())
    }

    /// `force({ type, text, buttonText, callback, markup }, callback?)`.
    #[wasm_bindgen(js_name = force)]
    pub fn js_force(&self, options: JsValue, callback: Option<Function>) -> Result<String, JsValue> {
        let dto: ForceDto = dto::parse(&options_json(&options)?)?;
        let mut force_options = ForceOptions::from(dto);
        force_options.callback = js_callback(js_property(&options, "callback"));
        Ok(self.force(force_options, js_callback(callback))?.to_string())
    }

    /// `confirm({ text, submitText, cancelText, submitCallback, cancelCallback,
    /// markup }, submitCallback?, cancelCallback?)`.
    #[wasm_bindgen(js_name = confirm)]
    pub fn js_confirm(
        &self,
        options: JsValue,
        submit_callback: Option<Function>,
        cancel_callback: Option<Function>,
    ) -> Result<String, JsValue> {
        let dto: ConfirmDto = dto::parse(&options_json(&options)?)?;
        let mut confirm_options = ConfirmOptions::from(dto);
        confirm_options.submit_callback = js_callback(js_property(&options, "submitCallback"));
        confirm_options.cancel_callback = js_callback(js_property(&options, "cancelCallback"));
        let id = self.confirm(
            confirm_options,
            js_callback(submit_callback),
            js_callback(cancel_callback),
        )?;
        Ok(id.to_string())
    }

    /// `hideAlerts(callback?)`, returning how many alerts were found.
    #[wasm_bindgen(js_name = hideAlerts)]
    pub fn js_hide_alerts(&self, callback: Option<Function>) -> Result<u32, JsValue> {
        let count = self.hide_alerts(js_callback(callback))?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    /// `setOptions({ alertTime, classes: { ... }, ... })`.
    #[wasm_bindgen(js_name = setOptions)]
    pub fn js_set_options(&self, options: JsValue) -> Result<(), JsValue> {
        let patch: OptionsPatch = dto::parse(&options_json(&options)?)?;
        Ok(self.set_options(patch)?)
    }
}

impl Drop for NoticeApp {
    fn drop(&mut self) {
        if let Err(err) = self
            .document
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref())
        {
            tracing::warn!(?err, "failed to remove keydown listener");
        }
    }
}
