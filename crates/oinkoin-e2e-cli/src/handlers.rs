//! Command handlers. Each returns the text to print so it can be tested
//! without spawning the binary.

use chrono::Month;
use oinkoin_e2e::codec::{decode_amount, encode_locator, format_date_range_text};
use oinkoin_e2e::{Connect, DateRangeSelection, SessionConfig, SessionFixture, Tab, TabState};
use tracing::info;

use crate::commands::{LocatorArgs, RangeCommand};
use crate::error::{CliError, CliResult};

/// Resolved configuration as YAML followed by the capabilities JSON
pub fn config_report(config: &SessionConfig, capabilities_only: bool) -> CliResult<String> {
    let capabilities = serde_json::to_string_pretty(&config.capabilities())?;
    if capabilities_only {
        return Ok(capabilities);
    }
    Ok(format!("{}\n# capabilities\n{capabilities}", config.to_yaml()?.trim_end()))
}

/// Validate `config` and describe the target
pub fn check(config: &SessionConfig) -> CliResult<String> {
    config.validate()?;
    Ok(format!(
        "configuration valid: {} on {} via {}",
        config.app_package, config.udid, config.server_url
    ))
}

pub fn locator(args: &LocatorArgs) -> CliResult<String> {
    let amount = decode_amount(&args.amount)
        .map_err(|_| CliError::invalid_argument(format!("not an amount: {:?}", args.amount)))?;
    let locator = encode_locator(&args.name, args.category_type.into(), amount);
    Ok(if args.raw {
        locator
    } else {
        locator.replace('\n', "\\n")
    })
}

pub fn range_text(range: RangeCommand) -> CliResult<String> {
    let selection = match range {
        RangeCommand::Month { year, month } => {
            let month = u8::try_from(month)
                .ok()
                .and_then(|m| Month::try_from(m).ok())
                .ok_or_else(|| CliError::invalid_argument(format!("no such month: {month}")))?;
            DateRangeSelection::Month { year, month }
        }
        RangeCommand::Year { year } => DateRangeSelection::year(year),
        RangeCommand::Custom { start, end } => {
            if end < start {
                return Err(CliError::invalid_argument(format!("range ends before it starts: {start} > {end}")));
            }
            DateRangeSelection::custom(start, end)
        }
    };
    Ok(format_date_range_text(&selection))
}

/// State each tab must be in right after launch
pub const fn start_state(tab: Tab) -> TabState {
    match tab {
        Tab::Home => TabState::Selected,
        Tab::Categories | Tab::Settings => TabState::Unselected,
    }
}

/// Open a session, read the navigation bar and release the session.
///
/// Fails with [`CliError::Smoke`] when any tab is not in its start state.
pub fn smoke<C: Connect>(connector: C, config: SessionConfig) -> CliResult<Vec<(Tab, TabState)>> {
    let mut fixture = SessionFixture::new(connector, config);
    let states = fixture.run(|session| {
        let mut nav = session.navigation()?;
        Ok(Tab::ALL.map(|tab| (tab, nav.tab_state(tab))))
    })?;
    info!(?states, "navigation bar read");

    let wrong: Vec<String> = states
        .iter()
        .filter(|(tab, state)| *state != start_state(*tab))
        .map(|(tab, state)| format!("{tab} is {state:?}, expected {:?}", start_state(*tab)))
        .collect();
    if wrong.is_empty() {
        Ok(states.to_vec())
    } else {
        Err(CliError::smoke(wrong.join("; ")))
    }
}
