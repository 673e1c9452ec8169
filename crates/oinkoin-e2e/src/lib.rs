//! End-to-end UI harness for the Oinkoin personal finance app.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Test case                                                      │
//! │     │  SessionFixture::run ── Session (quits on drop)           │
//! │     ▼                                                           │
//! │  Flow (HomePage::add_record / open_record / delete_record)      │
//! │     │                      ╲                                    │
//! │     ▼                       ▼                                   │
//! │  Screens (Home, CategorySelection, EditRecord, DateFilter,      │
//! │           NavigationBar)           Codec (locators, labels)     │
//! │     │                                                           │
//! │     ▼                                                           │
//! │  Resolver (find / find_all / exists)                            │
//! │     │                                                           │
//! │     ▼                                                           │
//! │  Driver ── RemoteDriver (Appium, W3C JSON over HTTP)            │
//! │         └─ SimulatedApp (in process)                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is synchronous: each driver call blocks until the backend
//! answers or the session's implicit wait expires.

#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod codec;
pub mod config;
pub mod driver;
pub mod fixture;
pub mod flow;
pub mod locator;
pub mod logging;
pub mod model;
pub mod pages;
#[cfg(feature = "remote")]
pub mod remote;
pub mod result;
pub mod simulator;

pub use config::{AutomationTuning, ResetPolicy, SessionConfig};
pub use driver::{Connect, Driver, ElementHandle, MockDriver, MockElement};
pub use fixture::{Fixture, Session, SessionFixture};
pub use locator::{Resolver, Selector};
pub use logging::Verbosity;
pub use model::{Amount, CategoryType, DateRangeSelection, Record, RecordKey, RepeatOption};
pub use pages::{
    CategorySelectionPage, DateFilterDialog, EditRecordPage, FilterMode, HomePage, NavigationBar, Screen, Tab,
    TabState,
};
#[cfg(feature = "remote")]
pub use remote::{RemoteConnector, RemoteDriver};
pub use result::{ProbeError, ProbeResult};
pub use simulator::SimulatedApp;

/// Commonly used items
pub mod prelude {
    pub use crate::codec::{encode_key, encode_locator, format_date_range_text};
    pub use crate::config::SessionConfig;
    pub use crate::driver::{Connect, Driver};
    pub use crate::fixture::{Fixture, Session, SessionFixture};
    pub use crate::model::{Amount, CategoryType, DateRangeSelection, Record, RecordKey, RepeatOption};
    pub use crate::pages::{HomePage, NavigationBar, Screen, Tab, TabState};
    pub use crate::result::{ProbeError, ProbeResult};
    pub use crate::simulator::SimulatedApp;
}
