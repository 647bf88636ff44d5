//! Element Factory
//!
//! Builds one DOM node from a declarative descriptor and appends it to a
//! parent. Knows nothing about lists or items.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

type Handler = Box<dyn FnMut(web_sys::Event)>;

/// Descriptor for a single element
pub struct ElementSpec {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    value: Option<String>,
    content: Option<String>,
    events: Vec<(String, Handler)>,
}

/// A `checked` attribute with a falsy value is left off entirely, since
/// its mere presence checks a checkbox.
fn is_omitted(name: &str, value: &str) -> bool {
    name == "checked" && matches!(value, "" | "false" | "0")
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            classes: Vec::new(),
            value: None,
            content: None,
            events: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((name.into(), value.to_string()));
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn classes<I, C>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Initial live `value` property (inputs and textareas)
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn on(mut self, event: impl Into<String>, handler: impl FnMut(web_sys::Event) + 'static) -> Self {
        self.events.push((event.into(), Box::new(handler)));
        self
    }

    /// Attributes that will actually be set
    pub fn effective_attributes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .filter(|(name, value)| !is_omitted(name, value))
    }

    /// Create the element, apply the descriptor and append it to `parent`
    pub fn build(self, parent: &web_sys::Node) -> Result<ElementHandle, JsValue> {
        let document = parent
            .owner_document()
            .or_else(|| web_sys::window().and_then(|w| w.document()))
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let element = document.create_element(&self.tag)?;

        for (name, value) in self.effective_attributes() {
            element.set_attribute(name, value)?;
        }
        for class in &self.classes {
            element.class_list().add_1(class)?;
        }
        if let Some(value) = &self.value {
            if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
                input.set_value(value);
            } else if let Some(area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
                area.set_value(value);
            }
        }

        let handle = ElementHandle { element };
        for (event, handler) in self.events {
            handle.bind(&event, handler)?;
        }
        if let Some(content) = &self.content {
            handle.element.set_text_content(Some(content));
        }

        parent.append_child(&handle.element)?;
        Ok(handle)
    }
}

/// A built element; lets callers bind handlers that need the element itself
#[derive(Debug, Clone)]
pub struct ElementHandle {
    element: web_sys::Element,
}

impl ElementHandle {
    pub fn element(&self) -> &web_sys::Element {
        &self.element
    }

    pub fn add_event(
        &self,
        event: &str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<(), JsValue> {
        self.bind(event, Box::new(handler))
    }

    fn bind(&self, event: &str, handler: Handler) -> Result<(), JsValue> {
        let callback = Closure::wrap(handler);
        self.element
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        // Lives as long as the page
        callback.forget();
        Ok(())
    }
}
