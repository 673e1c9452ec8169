//! Remote driver speaking W3C WebDriver JSON to an Appium server.
//!
//! Blocking HTTP via `reqwest::blocking`; one request per driver call.
//! Every response carries a top-level `value`. Failures put
//! `{"error": <code>, "message": <text>}` in it.

use reqwest::blocking::Client;
use reqwest::Method;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::SessionConfig;
use crate::driver::{Connect, Driver, ElementHandle};
use crate::locator::Selector;
use crate::result::{ProbeError, ProbeResult};

/// Key under which W3C servers return element references
pub const W3C_ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Key used by pre-W3C (JSONWP) servers
const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

/// Upper bound for one HTTP exchange; session creation installs the app
const HTTP_TIMEOUT_SECS: u64 = 300;

/// Error code of a lookup that matched nothing
const NO_SUCH_ELEMENT: &str = "no such element";

/// Error code of a request against an ended session
const INVALID_SESSION: &str = "invalid session id";

/// Error object carried in a W3C response's `value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct W3cError {
    /// Error code, e.g. `no such element`
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl W3cError {
    /// Extract the error object from a response body, if any
    #[must_use]
    pub fn from_body(body: &Value) -> Option<Self> {
        let value = body.get("value")?;
        let code = value.get("error")?.as_str()?;
        Some(Self {
            code: code.to_string(),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }

    fn into_probe_error(self) -> ProbeError {
        if self.code == INVALID_SESSION {
            ProbeError::SessionClosed
        } else {
            ProbeError::driver(format!("{}: {}", self.code, self.message))
        }
    }
}

/// Element id from a W3C element reference object
#[must_use]
pub fn element_id(reference: &Value) -> Option<String> {
    reference
        .get(W3C_ELEMENT_KEY)
        .or_else(|| reference.get(LEGACY_ELEMENT_KEY))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Request body for the `element` and `elements` endpoints
#[must_use]
pub fn locator_body(selector: &Selector) -> Value {
    json!({ "using": selector.strategy(), "value": selector.query() })
}

/// Request body for `POST /session`
#[must_use]
pub fn new_session_body(config: &SessionConfig) -> Value {
    json!({
        "capabilities": {
            "alwaysMatch": config.capabilities(),
            "firstMatch": [{}],
        }
    })
}

/// Base URL with a trailing slash so relative joins keep any path prefix
/// (`/wd/hub` on older servers).
fn base_url(config: &SessionConfig) -> ProbeResult<Url> {
    let mut url = config.parsed_server_url()?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Connector producing [`RemoteDriver`] sessions
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteConnector;

impl Connect for RemoteConnector {
    type Driver = RemoteDriver;

    fn connect(&self, config: &SessionConfig) -> ProbeResult<RemoteDriver> {
        RemoteDriver::connect(config)
    }
}

/// Live Appium session
#[derive(Debug)]
pub struct RemoteDriver {
    client: Client,
    base: Url,
    session_id: Option<String>,
}

impl RemoteDriver {
    /// Validate `config`, create a session and apply the implicit wait.
    ///
    /// Any failure is a [`ProbeError::SessionSetup`] keeping its cause.
    pub fn connect(config: &SessionConfig) -> ProbeResult<Self> {
        config.validate()?;
        let base = base_url(config)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProbeError::session_setup("cannot build HTTP client", e))?;

        info!(server = %base, udid = %config.udid, "creating session");
        let mut driver = Self {
            client,
            base,
            session_id: None,
        };

        let created = driver
            .send(Method::POST, "session", Some(new_session_body(config)))
            .map_err(|e| ProbeError::session_setup("session creation rejected", e))?;
        let session_id = created
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| ProbeError::session_setup_msg("server returned no sessionId"))?
            .to_string();
        driver.session_id = Some(session_id);

        let wait_ms = config.implicit_wait_secs.saturating_mul(1000);
        if let Err(e) = driver.session_command(Method::POST, "timeouts", Some(json!({ "implicit": wait_ms }))) {
            let _ = driver.quit();
            return Err(ProbeError::session_setup("cannot set implicit wait", e));
        }
        info!(session = driver.session_id.as_deref().unwrap_or_default(), "session ready");
        Ok(driver)
    }

    /// Current session id, `None` once quit
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// One HTTP exchange; returns the response's `value`
    fn send(&self, method: Method, path: &str, body: Option<Value>) -> ProbeResult<Value> {
        let url = self
            .base
            .join(path)
            .map_err(|e| ProbeError::driver(format!("bad endpoint {path}: {e}")))?;
        debug!(%method, %url, "webdriver request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request
            .send()
            .map_err(|e| ProbeError::driver(format!("request to {path} failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| ProbeError::driver(format!("unreadable response from {path} ({status}): {e}")))?;

        if let Some(err) = W3cError::from_body(&body) {
            return Err(err.into_probe_error());
        }
        if !status.is_success() {
            return Err(ProbeError::driver(format!("{path} answered {status}")));
        }
        Ok(body.get("value").cloned().unwrap_or(Value::Null))
    }

    fn session_command(&self, method: Method, path: &str, body: Option<Value>) -> ProbeResult<Value> {
        let id = self.session_id.as_deref().ok_or(ProbeError::SessionClosed)?;
        self.send(method, &format!("session/{id}/{path}"), body)
    }

    fn element_command(
        &self,
        method: Method,
        element: &ElementHandle,
        path: &str,
        body: Option<Value>,
    ) -> ProbeResult<Value> {
        self.session_command(method, &format!("element/{}/{path}", element.id), body)
    }
}

impl Driver for RemoteDriver {
    fn find_element(&mut self, selector: &Selector) -> ProbeResult<Option<ElementHandle>> {
        match self.session_command(Method::POST, "element", Some(locator_body(selector))) {
            Ok(reference) => {
                let id = element_id(&reference)
                    .ok_or_else(|| ProbeError::driver(format!("malformed element reference for {selector}")))?;
                Ok(Some(ElementHandle::new(id, selector.clone())))
            }
            Err(ProbeError::Driver { message }) if message.starts_with(NO_SUCH_ELEMENT) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn find_elements(&mut self, selector: &Selector) -> ProbeResult<Vec<ElementHandle>> {
        let found = self.session_command(Method::POST, "elements", Some(locator_body(selector)))?;
        Ok(found
            .as_array()
            .map(|refs| {
                refs.iter()
                    .filter_map(element_id)
                    .map(|id| ElementHandle::new(id, selector.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn click(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.element_command(Method::POST, element, "click", Some(json!({})))
            .map(|_| ())
    }

    fn clear(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.element_command(Method::POST, element, "clear", Some(json!({})))
            .map(|_| ())
    }

    fn send_keys(&mut self, element: &ElementHandle, text: &str) -> ProbeResult<()> {
        self.element_command(Method::POST, element, "value", Some(json!({ "text": text })))
            .map(|_| ())
    }

    fn text(&mut self, element: &ElementHandle) -> ProbeResult<String> {
        let value = self.element_command(Method::GET, element, "text", None)?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn attribute(&mut self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>> {
        let value = self.element_command(Method::GET, element, &format!("attribute/{name}"), None)?;
        Ok(match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
    }

    fn is_displayed(&mut self, element: &ElementHandle) -> ProbeResult<bool> {
        let value = self.element_command(Method::GET, element, "displayed", None)?;
        Ok(value.as_bool().unwrap_or(false))
    }

    fn quit(&mut self) -> ProbeResult<()> {
        let Some(id) = self.session_id.take() else {
            return Ok(());
        };
        info!(session = %id, "deleting session");
        match self.send(Method::DELETE, &format!("session/{id}"), None) {
            Ok(_) | Err(ProbeError::SessionClosed) => Ok(()),
            Err(e) => {
                warn!(session = %id, error = %e, "session delete failed");
                Err(e)
            }
        }
    }
}
