//! Session configuration.
//!
//! One injected value instead of process-wide constants, so several device
//! targets can be driven side by side. Layering: defaults, then a YAML file,
//! then `OINKOIN_E2E_*` environment variables.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::result::{ProbeError, ProbeResult};

/// Default Appium server
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4723";

/// Default implicit wait for element lookups (5 seconds)
pub const DEFAULT_IMPLICIT_WAIT_SECS: u64 = 5;

/// Default idle timeout before the server drops the session (1 hour)
pub const DEFAULT_NEW_COMMAND_TIMEOUT_SECS: u64 = 3600;

/// Environment variable pointing at a YAML configuration file
pub const CONFIG_PATH_ENV: &str = "OINKOIN_E2E_CONFIG";

const ENV_SERVER_URL: &str = "OINKOIN_E2E_SERVER_URL";
const ENV_PLATFORM_VERSION: &str = "OINKOIN_E2E_PLATFORM_VERSION";
const ENV_UDID: &str = "OINKOIN_E2E_UDID";
const ENV_APP_PATH: &str = "OINKOIN_E2E_APP_PATH";
const ENV_APP_PACKAGE: &str = "OINKOIN_E2E_APP_PACKAGE";

/// How much app state is wiped when a session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetPolicy {
    /// Reinstall the app: every test starts from a clean slate
    #[default]
    Full,
    /// Keep the installed app and its data
    Partial,
}

/// Automation backend tuning flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationTuning {
    /// Send ids verbatim instead of prefixing the app package
    pub disable_id_locator_autocompletion: bool,
    /// Seconds the server waits for the next command before ending the session
    pub new_command_timeout_secs: u64,
    /// Route host keyboard input to the device
    pub connect_hardware_keyboard: bool,
}

impl Default for AutomationTuning {
    fn default() -> Self {
        Self {
            disable_id_locator_autocompletion: true,
            new_command_timeout_secs: DEFAULT_NEW_COMMAND_TIMEOUT_SECS,
            connect_hardware_keyboard: true,
        }
    }
}

/// Everything needed to open a device session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Appium server base URL
    pub server_url: String,
    /// Device platform (`Android`)
    pub platform_name: String,
    /// OS version of the device
    pub platform_version: String,
    /// Device identity (adb serial)
    pub udid: String,
    /// Path to the application binary on the server host
    pub app_path: String,
    /// Application package identifier
    pub app_package: String,
    /// Automation backend (`UiAutomator2`)
    pub automation_name: String,
    /// State reset between runs
    pub reset_policy: ResetPolicy,
    /// Implicit wait applied to every element lookup, in seconds
    pub implicit_wait_secs: u64,
    /// Backend tuning flags
    pub tuning: AutomationTuning,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            platform_name: "Android".to_string(),
            platform_version: "15".to_string(),
            udid: "your-device-id".to_string(),
            app_path: "/path/to/your/apk/app-pro-debug.apk".to_string(),
            app_package: "com.github.emavgl.piggybankpro".to_string(),
            automation_name: "UiAutomator2".to_string(),
            reset_policy: ResetPolicy::Full,
            implicit_wait_secs: DEFAULT_IMPLICIT_WAIT_SECS,
            tuning: AutomationTuning::default(),
        }
    }
}

impl SessionConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server URL
    #[must_use]
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Set the platform version
    #[must_use]
    pub fn platform_version(mut self, version: impl Into<String>) -> Self {
        self.platform_version = version.into();
        self
    }

    /// Set the device identity
    #[must_use]
    pub fn udid(mut self, udid: impl Into<String>) -> Self {
        self.udid = udid.into();
        self
    }

    /// Set the application binary path
    #[must_use]
    pub fn app_path(mut self, path: impl Into<String>) -> Self {
        self.app_path = path.into();
        self
    }

    /// Set the application package
    #[must_use]
    pub fn app_package(mut self, package: impl Into<String>) -> Self {
        self.app_package = package.into();
        self
    }

    /// Set the reset policy
    #[must_use]
    pub const fn reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    /// Set the implicit wait
    #[must_use]
    pub const fn implicit_wait_secs(mut self, secs: u64) -> Self {
        self.implicit_wait_secs = secs;
        self
    }

    /// Implicit wait as a duration
    #[must_use]
    pub const fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_secs)
    }

    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> ProbeResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read a YAML file. Contents that do not describe a session are a
    /// [`ProbeError::Config`] naming the file.
    pub fn from_file(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading session config");
        let text = std::fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&text).map_err(|e| ProbeError::config(format!("{}: {e}", path.display())))
    }

    /// Serialize as YAML
    pub fn to_yaml(&self) -> ProbeResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Apply `OINKOIN_E2E_*` overrides read through `lookup`
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields: [(&str, &mut String); 5] = [
            (ENV_SERVER_URL, &mut self.server_url),
            (ENV_PLATFORM_VERSION, &mut self.platform_version),
            (ENV_UDID, &mut self.udid),
            (ENV_APP_PATH, &mut self.app_path),
            (ENV_APP_PACKAGE, &mut self.app_package),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                debug!(key, "config override from environment");
                *field = value;
            }
        }
        self
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Resolve the effective configuration: `path` (or `$OINKOIN_E2E_CONFIG`)
    /// when given, otherwise defaults, then environment overrides.
    pub fn load(path: Option<&Path>) -> ProbeResult<Self> {
        let from_env = std::env::var_os(CONFIG_PATH_ENV).map(std::path::PathBuf::from);
        let base = match path.map(Path::to_path_buf).or(from_env) {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    /// Parsed server URL
    pub fn parsed_server_url(&self) -> ProbeResult<Url> {
        let url = Url::parse(&self.server_url)
            .map_err(|e| ProbeError::session_setup(format!("Invalid URL for Appium server: {}", self.server_url), e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProbeError::session_setup_msg(format!(
                "Appium server URL must be http or https, got {}",
                url.scheme()
            )));
        }
        Ok(url)
    }

    /// Check the configuration can be used to open a session
    pub fn validate(&self) -> ProbeResult<()> {
        self.parsed_server_url()?;
        let required = [
            ("platform_name", &self.platform_name),
            ("udid", &self.udid),
            ("app_path", &self.app_path),
            ("app_package", &self.app_package),
            ("automation_name", &self.automation_name),
        ];
        if let Some((name, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ProbeError::session_setup_msg(format!("{name} must not be empty")));
        }
        if self.implicit_wait_secs == 0 {
            return Err(ProbeError::session_setup_msg("implicit_wait_secs must be at least 1"));
        }
        Ok(())
    }

    /// W3C capabilities for an Appium UiAutomator2 session
    #[must_use]
    pub fn capabilities(&self) -> Value {
        let mut caps = Map::new();
        let mut put = |key: &str, value: Value| {
            let _ = caps.insert(key.to_string(), value);
        };
        put("platformName", json!(self.platform_name));
        put("appium:automationName", json!(self.automation_name));
        put("appium:platformVersion", json!(self.platform_version));
        put("appium:udid", json!(self.udid));
        put("appium:app", json!(self.app_path));
        put("appium:appPackage", json!(self.app_package));
        put("appium:fullReset", json!(self.reset_policy == ResetPolicy::Full));
        put("appium:noReset", json!(false));
        put(
            "appium:settings[disableIdLocatorAutocompletion]",
            json!(self.tuning.disable_id_locator_autocompletion),
        );
        put("appium:newCommandTimeout", json!(self.tuning.new_command_timeout_secs));
        put("appium:connectHardwareKeyboard", json!(self.tuning.connect_hardware_keyboard));
        Value::Object(caps)
    }
}
