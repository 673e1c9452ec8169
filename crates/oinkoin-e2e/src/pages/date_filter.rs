//! Date filter dialog: month, year and custom range selection.

use chrono::{Month, NaiveDate};
use tracing::debug;

use super::{Screen, OK};
use crate::codec::{format_date, month_abbrev};
use crate::driver::Driver;
use crate::locator::{Resolver, Selector, BUTTON_CLASS, EDIT_TEXT_CLASS};
use crate::result::ProbeResult;

/// Stock picker button that switches the range picker to text input
const RANGE_INPUT_MODE_BUTTON: usize = 2;

/// Period choices offered by the "show records per" dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Month,
    Year,
    DateRange,
}

impl FilterMode {
    /// Accessibility label of the option
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Month => "Month",
            Self::Year => "Year",
            Self::DateRange => "Date Range",
        }
    }
}

/// Dialog opened from the home screen's `select-date` button.
#[derive(Debug)]
pub struct DateFilterDialog<'d, D: Driver + ?Sized> {
    resolver: Resolver<'d, D>,
}

impl<'d, D: Driver + ?Sized> DateFilterDialog<'d, D> {
    /// Wrap a resolver; the dialog must already be open
    pub fn new(resolver: Resolver<'d, D>) -> Self {
        Self { resolver }
    }

    /// Switch the dialog to a period mode
    pub fn choose_mode(&mut self, mode: FilterMode) -> ProbeResult<()> {
        self.resolver.click(&Selector::accessibility_id(mode.label()))
    }

    /// Tap a value chip (a month abbreviation or a year)
    pub fn choose_value(&mut self, value: &str) -> ProbeResult<()> {
        self.resolver.click(&Selector::accessibility_id(value))
    }

    /// Tap a month chip (`Oct`)
    pub fn choose_month(&mut self, month: Month) -> ProbeResult<()> {
        self.choose_value(month_abbrev(month))
    }

    /// Tap a year chip (`2020`)
    pub fn choose_year(&mut self, year: i32) -> ProbeResult<()> {
        self.choose_value(&year.to_string())
    }

    /// Type both ends of a custom range into the range picker's text fields
    pub fn enter_range(&mut self, start: NaiveDate, end: NaiveDate) -> ProbeResult<()> {
        debug!(%start, %end, "enter date range");
        self.resolver
            .click(&Selector::ui_selector(BUTTON_CLASS, RANGE_INPUT_MODE_BUTTON))?;
        self.resolver
            .fill(&Selector::ui_selector(EDIT_TEXT_CLASS, 0), &format_date(start))?;
        self.resolver
            .fill(&Selector::ui_selector(EDIT_TEXT_CLASS, 1), &format_date(end))
    }

    /// Confirm and close the dialog
    pub fn confirm(mut self) -> ProbeResult<()> {
        self.resolver.click(&Selector::accessibility_id(OK))
    }
}

impl<D: Driver + ?Sized> Screen<D> for DateFilterDialog<'_, D> {
    fn anchor(&self) -> Selector {
        Selector::accessibility_id(FilterMode::Month.label())
    }

    fn resolver(&mut self) -> Resolver<'_, D> {
        self.resolver.reborrow()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};

    #[test]
    fn test_enter_range_uses_text_inputs() {
        let mut driver = MockDriver::new();
        driver.add_element(MockElement::new("b2", Selector::ui_selector(BUTTON_CLASS, 2)));
        driver.add_element(MockElement::new("e0", Selector::ui_selector(EDIT_TEXT_CLASS, 0)));
        driver.add_element(MockElement::new("e1", Selector::ui_selector(EDIT_TEXT_CLASS, 1)));
        driver.add_element(MockElement::new("ok", Selector::accessibility_id("OK")));

        {
            let mut dialog = DateFilterDialog::new(Resolver::new(&mut driver));
            dialog
                .enter_range(
                    NaiveDate::from_ymd_opt(2025, 10, 5).unwrap(),
                    NaiveDate::from_ymd_opt(2025, 11, 12).unwrap(),
                )
                .unwrap();
            dialog.confirm().unwrap();
        }
        assert!(driver.was_called("send_keys:e0:10/05/2025"));
        assert!(driver.was_called("send_keys:e1:11/12/2025"));
        assert_eq!(driver.history().last().map(String::as_str), Some("click:ok"));
    }

    #[test]
    fn test_choose_month_uses_abbreviation() {
        let mut driver = MockDriver::new();
        driver.add_element(MockElement::new("m", Selector::accessibility_id("Month")));
        driver.add_element(MockElement::new("oct", Selector::accessibility_id("Oct")));
        {
            let mut dialog = DateFilterDialog::new(Resolver::new(&mut driver));
            assert!(dialog.is_loaded());
            dialog.choose_mode(FilterMode::Month).unwrap();
            dialog.choose_month(Month::October).unwrap();
        }
        assert!(driver.was_called("click:oct"));
    }
}
