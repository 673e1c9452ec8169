//! Device automation driver interface.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Driver (trait, blocking)                                    │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────────────┐          ┌────────────────────────┐  │
//! │  │  RemoteDriver      │          │  SimulatedApp          │  │
//! │  │  W3C WebDriver     │          │  in-process screens    │  │
//! │  │  JSON over HTTP    │          │  for harness tests     │  │
//! │  │  to Appium         │          │                        │  │
//! │  └────────────────────┘          └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call blocks until the backend answers or the implicit wait
//! configured on the session expires. Methods take `&mut self`: one
//! in-flight command per session.

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::locator::Selector;
use crate::result::ProbeResult;

/// Attribute holding an element's accessibility label on Android.
pub const CONTENT_DESC: &str = "content-desc";

/// Attribute holding an input's placeholder text.
pub const HINT: &str = "hint";

/// Opaque reference to an element on the current screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Backend element id
    pub id: String,
    /// Criterion the element was found with
    pub selector: Selector,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, selector: Selector) -> Self {
        Self {
            id: id.into(),
            selector,
        }
    }
}

/// Blocking driver for one automation session.
///
/// Lookups report absence as `Ok(None)` / an empty vector; `Err` is reserved
/// for protocol or session failures.
pub trait Driver {
    /// First element matching `selector`
    fn find_element(&mut self, selector: &Selector) -> ProbeResult<Option<ElementHandle>>;

    /// Every element matching `selector`, in screen order
    fn find_elements(&mut self, selector: &Selector) -> ProbeResult<Vec<ElementHandle>>;

    /// Tap the element
    fn click(&mut self, element: &ElementHandle) -> ProbeResult<()>;

    /// Empty an editable element
    fn clear(&mut self, element: &ElementHandle) -> ProbeResult<()>;

    /// Type into an editable element
    fn send_keys(&mut self, element: &ElementHandle, text: &str) -> ProbeResult<()>;

    /// Visible text of the element
    fn text(&mut self, element: &ElementHandle) -> ProbeResult<String>;

    /// Named attribute, `None` when the element has no such attribute
    fn attribute(&mut self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>>;

    /// Whether the element is currently displayed
    fn is_displayed(&mut self, element: &ElementHandle) -> ProbeResult<bool>;

    /// End the session. Calling it twice is not an error.
    fn quit(&mut self) -> ProbeResult<()>;
}

/// Opens driver sessions from a configuration.
pub trait Connect {
    /// Driver produced by this connector
    type Driver: Driver;

    /// Create a session
    fn connect(&self, config: &SessionConfig) -> ProbeResult<Self::Driver>;
}

impl<F, D> Connect for F
where
    F: Fn(&SessionConfig) -> ProbeResult<D>,
    D: Driver,
{
    type Driver = D;

    fn connect(&self, config: &SessionConfig) -> ProbeResult<D> {
        self(config)
    }
}

impl<D: Driver + ?Sized> Driver for &mut D {
    fn find_element(&mut self, selector: &Selector) -> ProbeResult<Option<ElementHandle>> {
        (**self).find_element(selector)
    }

    fn find_elements(&mut self, selector: &Selector) -> ProbeResult<Vec<ElementHandle>> {
        (**self).find_elements(selector)
    }

    fn click(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        (**self).click(element)
    }

    fn clear(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        (**self).clear(element)
    }

    fn send_keys(&mut self, element: &ElementHandle, text: &str) -> ProbeResult<()> {
        (**self).send_keys(element, text)
    }

    fn text(&mut self, element: &ElementHandle) -> ProbeResult<String> {
        (**self).text(element)
    }

    fn attribute(&mut self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>> {
        (**self).attribute(element, name)
    }

    fn is_displayed(&mut self, element: &ElementHandle) -> ProbeResult<bool> {
        (**self).is_displayed(element)
    }

    fn quit(&mut self) -> ProbeResult<()> {
        (**self).quit()
    }
}

/// Recording driver for unit tests of the resolver and screen objects.
///
/// Elements are registered up front; every call is appended to the history.
#[derive(Debug, Default)]
pub struct MockDriver {
    /// Registered elements with their text and attributes
    pub elements: Vec<MockElement>,
    /// Call history for verification
    pub call_history: Vec<String>,
    /// When set, every call fails with this driver error
    pub fail_with: Option<String>,
    /// Whether `quit` was called
    pub quit_called: bool,
}

/// An element known to [`MockDriver`]
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    pub id: String,
    pub selectors: Vec<Selector>,
    pub text: String,
    pub attributes: Vec<(String, String)>,
    pub displayed: bool,
}

impl MockElement {
    /// Displayed element matched by one selector
    #[must_use]
    pub fn new(id: impl Into<String>, selector: Selector) -> Self {
        Self {
            id: id.into(),
            selectors: vec![selector],
            displayed: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mock element
    pub fn add_element(&mut self, element: MockElement) {
        self.elements.push(element);
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.call_history
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history.iter().any(|c| c.starts_with(method))
    }

    fn check(&mut self, call: String) -> ProbeResult<()> {
        self.call_history.push(call);
        match &self.fail_with {
            Some(message) => Err(crate::result::ProbeError::driver(message.clone())),
            None => Ok(()),
        }
    }

    fn element_mut(&mut self, handle: &ElementHandle) -> ProbeResult<&mut MockElement> {
        self.elements
            .iter_mut()
            .find(|e| e.id == handle.id)
            .ok_or_else(|| crate::result::ProbeError::driver(format!("stale element: {}", handle.id)))
    }
}

impl Driver for MockDriver {
    fn find_element(&mut self, selector: &Selector) -> ProbeResult<Option<ElementHandle>> {
        self.check(format!("find_element:{selector}"))?;
        Ok(self
            .elements
            .iter()
            .find(|e| e.selectors.contains(selector))
            .map(|e| ElementHandle::new(e.id.clone(), selector.clone())))
    }

    fn find_elements(&mut self, selector: &Selector) -> ProbeResult<Vec<ElementHandle>> {
        self.check(format!("find_elements:{selector}"))?;
        Ok(self
            .elements
            .iter()
            .filter(|e| e.selectors.contains(selector))
            .map(|e| ElementHandle::new(e.id.clone(), selector.clone()))
            .collect())
    }

    fn click(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.check(format!("click:{}", element.id))?;
        self.element_mut(element).map(|_| ())
    }

    fn clear(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.check(format!("clear:{}", element.id))?;
        self.element_mut(element)?.text.clear();
        Ok(())
    }

    fn send_keys(&mut self, element: &ElementHandle, text: &str) -> ProbeResult<()> {
        self.check(format!("send_keys:{}:{text}", element.id))?;
        self.element_mut(element)?.text.push_str(text);
        Ok(())
    }

    fn text(&mut self, element: &ElementHandle) -> ProbeResult<String> {
        self.check(format!("text:{}", element.id))?;
        Ok(self.element_mut(element)?.text.clone())
    }

    fn attribute(&mut self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>> {
        self.check(format!("attribute:{}:{name}", element.id))?;
        Ok(self
            .element_mut(element)?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone()))
    }

    fn is_displayed(&mut self, element: &ElementHandle) -> ProbeResult<bool> {
        self.check(format!("is_displayed:{}", element.id))?;
        Ok(self.element_mut(element)?.displayed)
    }

    fn quit(&mut self) -> ProbeResult<()> {
        self.call_history.push("quit".to_string());
        self.quit_called = true;
        Ok(())
    }
}
