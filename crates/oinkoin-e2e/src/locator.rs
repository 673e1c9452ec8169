//! Element selection and the locator resolver.
//!
//! # Design
//!
//! - **Stable identifiers first**: `Id` and `AccessibilityId` are the normal
//!   criteria; `UiSelector` (class + ordinal) is only for widgets the app
//!   exposes no identifier for, such as stock date picker buttons.
//! - **Absence is an answer**: [`Resolver::exists`] never fails. Only
//!   [`Resolver::find`] turns absence into [`ProbeError::ElementMissing`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::driver::{Driver, ElementHandle};
use crate::result::{ProbeError, ProbeResult};

/// Android class of editable text inputs
pub const EDIT_TEXT_CLASS: &str = "android.widget.EditText";

/// Android class of stock buttons
pub const BUTTON_CLASS: &str = "android.widget.Button";

/// Criterion for locating an element on the current screen
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// Resource/semantics identifier (e.g. `save-button`)
    Id(String),
    /// Accessibility label, exact match
    AccessibilityId(String),
    /// Widget class name; matches the first instance
    ClassName(String),
    /// Widget class plus zero-based ordinal among widgets of that class
    UiSelector {
        /// Widget class name
        class: String,
        /// Zero-based instance index
        instance: usize,
    },
}

impl Selector {
    /// Create an identifier selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create an accessibility label selector
    #[must_use]
    pub fn accessibility_id(label: impl Into<String>) -> Self {
        Self::AccessibilityId(label.into())
    }

    /// Create a class name selector
    #[must_use]
    pub fn class_name(class: impl Into<String>) -> Self {
        Self::ClassName(class.into())
    }

    /// Create a structural selector
    #[must_use]
    pub fn ui_selector(class: impl Into<String>, instance: usize) -> Self {
        Self::UiSelector {
            class: class.into(),
            instance,
        }
    }

    /// W3C `using` strategy name
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::AccessibilityId(_) => "accessibility id",
            Self::ClassName(_) => "class name",
            Self::UiSelector { .. } => "-android uiautomator",
        }
    }

    /// W3C `value` for the strategy
    #[must_use]
    pub fn query(&self) -> String {
        match self {
            Self::Id(v) | Self::AccessibilityId(v) | Self::ClassName(v) => v.clone(),
            Self::UiSelector { class, instance } => {
                format!("new UiSelector().className(\"{class}\").instance({instance})")
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(v) => write!(f, "id={v:?}"),
            Self::AccessibilityId(v) => write!(f, "accessibility-id={v:?}"),
            Self::ClassName(v) => write!(f, "class={v:?}"),
            Self::UiSelector { class, instance } => write!(f, "class={class:?}[{instance}]"),
        }
    }
}

/// Resolves selectors against the screen currently shown by a driver.
///
/// Holds the driver mutably; screen objects are built on top of a resolver
/// and hand it on with [`Resolver::reborrow`].
#[derive(Debug)]
pub struct Resolver<'d, D: Driver + ?Sized> {
    driver: &'d mut D,
}

impl<'d, D: Driver + ?Sized> Resolver<'d, D> {
    /// Wrap a driver
    pub fn new(driver: &'d mut D) -> Self {
        Self { driver }
    }

    /// Shorter-lived resolver over the same driver
    pub fn reborrow(&mut self) -> Resolver<'_, D> {
        Resolver {
            driver: &mut *self.driver,
        }
    }

    /// Underlying driver
    pub fn driver(&mut self) -> &mut D {
        self.driver
    }

    /// Required lookup; absence is an error naming the selector
    pub fn find(&mut self, selector: &Selector) -> ProbeResult<ElementHandle> {
        debug!(%selector, "find");
        self.driver
            .find_element(selector)?
            .ok_or_else(|| ProbeError::ElementMissing {
                selector: selector.clone(),
            })
    }

    /// Lookup that reports absence as `None`
    pub fn find_optional(&mut self, selector: &Selector) -> ProbeResult<Option<ElementHandle>> {
        debug!(%selector, "find optional");
        self.driver.find_element(selector)
    }

    /// All matches, possibly none
    pub fn find_all(&mut self, selector: &Selector) -> ProbeResult<Vec<ElementHandle>> {
        let found = self.driver.find_elements(selector)?;
        debug!(%selector, count = found.len(), "find all");
        Ok(found)
    }

    /// Whether a matching element is present and displayed.
    ///
    /// Never fails: driver errors are logged and read as "not there".
    pub fn exists(&mut self, selector: &Selector) -> bool {
        let displayed = match self.driver.find_element(selector) {
            Ok(Some(handle)) => self.driver.is_displayed(&handle),
            Ok(None) => Ok(false),
            Err(e) => Err(e),
        };
        match displayed {
            Ok(displayed) => {
                debug!(%selector, displayed, "exists");
                displayed
            }
            Err(e) => {
                debug!(%selector, error = %e, "exists probe failed, treating as absent");
                false
            }
        }
    }

    /// Tap a required element
    pub fn click(&mut self, selector: &Selector) -> ProbeResult<()> {
        let handle = self.find(selector)?;
        debug!(%selector, "click");
        self.driver.click(&handle)
    }

    /// Click the field, clear it, then type `text`
    pub fn fill(&mut self, selector: &Selector, text: &str) -> ProbeResult<()> {
        let handle = self.find(selector)?;
        debug!(%selector, text, "fill");
        self.driver.click(&handle)?;
        self.driver.clear(&handle)?;
        self.driver.send_keys(&handle, text)
    }

    /// Visible text of a required element
    pub fn text(&mut self, selector: &Selector) -> ProbeResult<String> {
        let handle = self.find(selector)?;
        self.driver.text(&handle)
    }

    /// Attribute of a required element; a missing attribute reads as empty
    pub fn attribute(&mut self, selector: &Selector, name: &str) -> ProbeResult<String> {
        let handle = self.find(selector)?;
        Ok(self.driver.attribute(&handle, name)?.unwrap_or_default())
    }
}
