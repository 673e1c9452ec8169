//! Test lifecycle: one device session per test.
//!
//! [`SessionFixture::run`] acquires a session, runs the test body and
//! releases the session on every exit path: success, error and panic.
//!
//! ```ignore
//! let mut fixture = SessionFixture::new(RemoteConnector, SessionConfig::load(None)?);
//! fixture.run(|session| {
//!     let mut home = session.home()?;
//!     home.show_records_per_year(2020)?;
//!     assert_eq!(home.date_range_text()?, "Jan 1 - Dec 31, 2020");
//!     Ok(())
//! })?;
//! ```

use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::driver::{Connect, Driver};
use crate::locator::Resolver;
use crate::pages::{HomePage, NavigationBar};
use crate::result::{ProbeError, ProbeResult};

/// Trait for test fixtures that can be set up and torn down.
pub trait Fixture {
    /// Set up the fixture before test execution.
    ///
    /// # Errors
    ///
    /// Returns an error if fixture setup fails.
    fn setup(&mut self) -> ProbeResult<()>;

    /// Tear down the fixture after test execution. Must be safe to call
    /// when setup never ran or already failed.
    ///
    /// # Errors
    ///
    /// Returns an error if fixture teardown fails.
    fn teardown(&mut self) -> ProbeResult<()>;

    /// Get the fixture name for logging/debugging.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Exclusive owner of a live driver session; quits on drop.
#[derive(Debug)]
pub struct Session<D: Driver> {
    driver: Option<D>,
}

impl<D: Driver> Session<D> {
    /// Take ownership of a connected driver
    pub fn new(driver: D) -> Self {
        Self { driver: Some(driver) }
    }

    /// Whether the session has been released
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.driver.is_none()
    }

    /// The driver, while the session is open
    pub fn driver(&mut self) -> ProbeResult<&mut D> {
        self.driver.as_mut().ok_or(ProbeError::SessionClosed)
    }

    /// Resolver over the session
    pub fn resolver(&mut self) -> ProbeResult<Resolver<'_, D>> {
        Ok(Resolver::new(self.driver()?))
    }

    /// Home screen of the app
    pub fn home(&mut self) -> ProbeResult<HomePage<'_, D>> {
        Ok(HomePage::new(self.resolver()?))
    }

    /// Bottom navigation bar
    pub fn navigation(&mut self) -> ProbeResult<NavigationBar<'_, D>> {
        Ok(NavigationBar::new(self.resolver()?))
    }

    /// Quit the backend session. Idempotent.
    pub fn close(&mut self) -> ProbeResult<()> {
        match self.driver.take() {
            Some(mut driver) => {
                info!("releasing session");
                driver.quit()
            }
            None => Ok(()),
        }
    }

    /// Give up ownership of the driver without quitting it
    pub fn into_driver(mut self) -> Option<D> {
        self.driver.take()
    }
}

impl<D: Driver> Drop for Session<D> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "session release on drop failed");
        }
    }
}

/// Fixture opening one session from a connector and a configuration.
pub struct SessionFixture<C: Connect> {
    connector: C,
    config: SessionConfig,
    session: Option<Session<C::Driver>>,
}

impl<C: Connect> std::fmt::Debug for SessionFixture<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionFixture")
            .field("server_url", &self.config.server_url)
            .field("udid", &self.config.udid)
            .field("connected", &self.session.is_some())
            .finish()
    }
}

impl<C: Connect> SessionFixture<C> {
    /// Create a fixture; nothing is connected until setup
    pub fn new(connector: C, config: SessionConfig) -> Self {
        Self {
            connector,
            config,
            session: None,
        }
    }

    /// Configuration sessions are opened with
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Live session, after a successful setup
    pub fn session(&mut self) -> ProbeResult<&mut Session<C::Driver>> {
        self.session.as_mut().ok_or(ProbeError::SessionClosed)
    }

    /// Run `test` between setup and teardown.
    ///
    /// Teardown runs even when `test` fails or panics. When both the test
    /// and the teardown fail, the test's error is returned and the teardown
    /// error is logged.
    pub fn run<T, F>(&mut self, test: F) -> ProbeResult<T>
    where
        F: FnOnce(&mut Session<C::Driver>) -> ProbeResult<T>,
    {
        self.setup()?;
        let mut guard = TeardownGuard {
            fixture: self,
            armed: true,
        };
        let outcome = guard.fixture.session().and_then(test);
        guard.armed = false;
        let teardown = guard.fixture.teardown();

        match (outcome, teardown) {
            (Err(e), Err(t)) => {
                warn!(error = %t, "teardown failed after test failure");
                Err(e)
            }
            (Ok(_), Err(t)) => Err(t),
            (outcome, Ok(())) => outcome,
        }
    }
}

impl<C: Connect> Fixture for SessionFixture<C> {
    fn setup(&mut self) -> ProbeResult<()> {
        if self.session.is_some() {
            return Ok(());
        }
        info!(fixture = self.name(), "acquiring session");
        let driver = self.connector.connect(&self.config)?;
        self.session = Some(Session::new(driver));
        Ok(())
    }

    fn teardown(&mut self) -> ProbeResult<()> {
        match self.session.take() {
            Some(mut session) => session.close(),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "session"
    }
}

/// Releases the session if the test body unwinds
struct TeardownGuard<'a, C: Connect> {
    fixture: &'a mut SessionFixture<C>,
    armed: bool,
}

impl<C: Connect> Drop for TeardownGuard<'_, C> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = self.fixture.teardown() {
                warn!(error = %e, "teardown failed while unwinding");
            }
        }
    }
}
