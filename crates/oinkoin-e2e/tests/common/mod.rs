//! Shared harness for the scenario suites.
//!
//! Every scenario is generic over the driver. `scenario_tests!` runs each one
//! against the simulated app and, behind `#[ignore]`, against a real device
//! configured through `OINKOIN_E2E_CONFIG` / `OINKOIN_E2E_*` variables.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use chrono::{Datelike, Days, Months, NaiveDate};
use oinkoin_e2e::logging::{self, Verbosity};
use oinkoin_e2e::prelude::*;

/// Fixed "today" for simulated runs
pub fn simulated_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 19).unwrap()
}

/// Run `scenario` in a fresh simulated session
pub fn on_simulator<F>(scenario: F)
where
    F: FnOnce(&mut Session<SimulatedApp>, NaiveDate) -> ProbeResult<()>,
{
    let _ = logging::init(Verbosity::Normal);
    let today = simulated_today();
    let mut fixture = SessionFixture::new(SimulatedApp::connector(today), SessionConfig::default());
    fixture
        .run(|session| scenario(session, today))
        .expect("scenario failed");
}

/// Run `scenario` in a fresh device session
#[cfg(feature = "remote")]
pub fn on_device<F>(scenario: F)
where
    F: FnOnce(&mut Session<oinkoin_e2e::RemoteDriver>, NaiveDate) -> ProbeResult<()>,
{
    let _ = logging::init(Verbosity::Verbose);
    let config = SessionConfig::load(None).expect("device configuration");
    let today = chrono::Local::now().date_naive();
    let mut fixture = SessionFixture::new(oinkoin_e2e::RemoteConnector, config);
    fixture
        .run(|session| scenario(session, today))
        .expect("scenario failed");
}

/// Generate a simulated test and an ignored device test per scenario
macro_rules! scenario_tests {
    ($($name:ident),+ $(,)?) => {
        mod simulated {
            $(
                #[test]
                fn $name() {
                    $crate::common::on_simulator(|session, today| super::$name(session, today));
                }
            )+
        }

        #[cfg(feature = "remote")]
        mod device {
            $(
                #[test]
                #[ignore = "needs an Appium server and a connected device"]
                fn $name() {
                    $crate::common::on_device(|session, today| super::$name(session, today));
                }
            )+
        }
    };
}

pub fn months_ago(today: NaiveDate, months: u32) -> NaiveDate {
    today.checked_sub_months(Months::new(months)).unwrap()
}

pub fn days_ago(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap()
}

pub fn years_ago(today: NaiveDate, years: i32) -> NaiveDate {
    today
        .with_year(today.year() - years)
        .unwrap_or_else(|| days_ago(today, 365))
}

/// Add `records`, run `check`, then delete whatever was added.
///
/// Cleanup runs when adding or `check` fails too; the first error wins.
pub fn with_records<D, T>(
    session: &mut Session<D>,
    records: &[Record],
    check: impl FnOnce(&mut HomePage<'_, D>) -> ProbeResult<T>,
) -> ProbeResult<T>
where
    D: Driver,
{
    let mut home = session.home()?;
    let mut added = Vec::with_capacity(records.len());
    let mut outcome = Ok(());
    for record in records {
        outcome = home.add_record(record);
        if outcome.is_err() {
            break;
        }
        added.push(record);
    }
    let outcome = outcome.and_then(|()| check(&mut home));

    let mut cleanup = Ok(());
    for record in added {
        let deleted = home.delete_record(&record.key(), record.date);
        if cleanup.is_ok() {
            cleanup = deleted;
        }
    }
    let value = outcome?;
    cleanup?;
    Ok(value)
}
