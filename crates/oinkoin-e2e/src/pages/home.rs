//! Home screen page object.

use chrono::{Month, NaiveDate};
use tracing::info;

use super::{CategorySelectionPage, DateFilterDialog, FilterMode, Screen};
use crate::driver::{Driver, CONTENT_DESC};
use crate::locator::{Resolver, Selector};
use crate::model::DateRangeSelection;
use crate::result::ProbeResult;

const SELECT_DATE: &str = "select-date";
const STATISTICS: &str = "statistics";
const THREE_DOTS: &str = "three-dots";
const DATE_TEXT: &str = "date-text";
const ADD_RECORD: &str = "add-record";

/// Home screen: the record list for the active date range.
///
/// Multi-screen flows (adding, opening and deleting records) live in
/// [`crate::flow`].
#[derive(Debug)]
pub struct HomePage<'d, D: Driver + ?Sized> {
    pub(crate) resolver: Resolver<'d, D>,
}

impl<'d, D: Driver + ?Sized> HomePage<'d, D> {
    pub fn new(resolver: Resolver<'d, D>) -> Self {
        Self { resolver }
    }

    /// Text describing the active date range (`October 2025`)
    pub fn date_range_text(&mut self) -> ProbeResult<String> {
        self.resolver.attribute(&Selector::id(DATE_TEXT), CONTENT_DESC)
    }

    /// Whether the statistics shortcut is shown
    pub fn has_statistics_button(&mut self) -> bool {
        self.resolver.exists(&Selector::id(STATISTICS))
    }

    /// Whether the overflow menu button is shown
    pub fn has_menu_button(&mut self) -> bool {
        self.resolver.exists(&Selector::id(THREE_DOTS))
    }

    /// Go to the home tab and open the "show records per" dialog
    pub fn open_date_filter(&mut self) -> ProbeResult<DateFilterDialog<'_, D>> {
        self.navigation().open_home_tab()?;
        self.resolver.click(&Selector::id(SELECT_DATE))?;
        Ok(DateFilterDialog::new(self.resolver.reborrow()))
    }

    /// Pick a period mode and a value chip, then confirm
    pub fn show_records_per(&mut self, mode: FilterMode, value: &str) -> ProbeResult<()> {
        info!(mode = mode.label(), value, "show records per");
        let mut dialog = self.open_date_filter()?;
        dialog.choose_mode(mode)?;
        dialog.choose_value(value)?;
        dialog.confirm()
    }

    /// Month of the year the dialog is currently anchored on
    pub fn show_records_per_month(&mut self, month: Month) -> ProbeResult<()> {
        self.show_records_per(FilterMode::Month, crate::codec::month_abbrev(month))
    }

    pub fn show_records_per_year(&mut self, year: i32) -> ProbeResult<()> {
        self.show_records_per(FilterMode::Year, &year.to_string())
    }

    /// Inclusive custom range
    pub fn show_records_per_date_range(&mut self, start: NaiveDate, end: NaiveDate) -> ProbeResult<()> {
        info!(%start, %end, "show records per date range");
        let mut dialog = self.open_date_filter()?;
        dialog.choose_mode(FilterMode::DateRange)?;
        dialog.enter_range(start, end)?;
        dialog.confirm()
    }

    /// Make `selection` the active filter.
    ///
    /// A month is reached through its year first, since month chips belong
    /// to whichever year the dialog is anchored on.
    pub fn apply_date_range(&mut self, selection: &DateRangeSelection) -> ProbeResult<()> {
        match *selection {
            DateRangeSelection::Month { year, month } => {
                self.show_records_per_year(year)?;
                self.show_records_per_month(month)
            }
            DateRangeSelection::Year { year } => self.show_records_per_year(year),
            DateRangeSelection::Custom { start, end } => self.show_records_per_date_range(start, end),
        }
    }

    /// Go to the home tab and tap the add button
    pub fn open_add_record(&mut self) -> ProbeResult<CategorySelectionPage<'_, D>> {
        self.navigation().open_home_tab()?;
        self.resolver.click(&Selector::id(ADD_RECORD))?;
        Ok(CategorySelectionPage::new(self.resolver.reborrow()))
    }
}

impl<D: Driver + ?Sized> Screen<D> for HomePage<'_, D> {
    fn anchor(&self) -> Selector {
        Selector::id(ADD_RECORD)
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

    fn home_screen() -> MockDriver {
        let mut driver = MockDriver::new();
        driver.add_element(MockElement::new("tab", Selector::id("home-tab-selected")));
        driver.add_element(MockElement::new("sel", Selector::id(SELECT_DATE)));
        driver.add_element(MockElement::new("add", Selector::id(ADD_RECORD)));
        driver.add_element(
            MockElement::new("txt", Selector::id(DATE_TEXT)).with_attribute(CONTENT_DESC, "Jan 1 - Dec 31, 2020"),
        );
        for label in ["Month", "Year", "Date Range", "OK", "2020", "Oct"] {
            driver.add_element(MockElement::new(label, Selector::accessibility_id(label)));
        }
        driver
    }

    fn clicks(driver: &MockDriver) -> Vec<String> {
        driver
            .history()
            .iter()
            .filter_map(|c| c.strip_prefix("click:"))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_date_range_text_reads_content_desc() {
        let mut driver = home_screen();
        let mut home = HomePage::new(Resolver::new(&mut driver));
        assert_eq!(home.date_range_text().unwrap(), "Jan 1 - Dec 31, 2020");
        assert!(home.is_loaded());
    }

    #[test]
    fn test_show_records_per_year_tap_sequence() {
        let mut driver = home_screen();
        HomePage::new(Resolver::new(&mut driver))
            .show_records_per_year(2020)
            .unwrap();
        assert_eq!(clicks(&driver), vec!["tab", "sel", "Year", "2020", "OK"]);
    }

    #[test]
    fn test_apply_month_goes_through_year() {
        let mut driver = home_screen();
        HomePage::new(Resolver::new(&mut driver))
            .apply_date_range(&DateRangeSelection::Month {
                year: 2020,
                month: Month::October,
            })
            .unwrap();
        assert_eq!(
            clicks(&driver),
            vec!["tab", "sel", "Year", "2020", "OK", "tab", "sel", "Month", "Oct", "OK"]
        );
    }

    #[test]
    fn test_missing_value_chip_is_reported() {
        let mut driver = home_screen();
        let err = HomePage::new(Resolver::new(&mut driver))
            .show_records_per_year(1999)
            .unwrap_err();
        assert!(err.to_string().contains("1999"));
    }
}
