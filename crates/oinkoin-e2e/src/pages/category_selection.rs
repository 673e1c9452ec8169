//! Category picker shown before the record editor opens.

use tracing::debug;

use super::{EditRecordPage, Screen};
use crate::driver::Driver;
use crate::locator::{Resolver, Selector};
use crate::model::CategoryType;
use crate::result::{ProbeError, ProbeResult};

const EXPENSES_TAB: &str = "expenses-tab";
const INCOME_TAB: &str = "income-tab";

/// Category picker shown after tapping "add record".
#[derive(Debug)]
pub struct CategorySelectionPage<'d, D: Driver + ?Sized> {
    resolver: Resolver<'d, D>,
}

impl<'d, D: Driver + ?Sized> CategorySelectionPage<'d, D> {
    pub fn new(resolver: Resolver<'d, D>) -> Self {
        Self { resolver }
    }

    pub fn select_expenses_tab(&mut self) -> ProbeResult<()> {
        self.resolver.click(&Selector::id(EXPENSES_TAB))
    }

    pub fn select_income_tab(&mut self) -> ProbeResult<()> {
        self.resolver.click(&Selector::id(INCOME_TAB))
    }

    /// Switch to the tab listing categories of `category_type`
    pub fn select_tab(&mut self, category_type: CategoryType) -> ProbeResult<()> {
        match category_type {
            CategoryType::Expense => self.select_expenses_tab(),
            CategoryType::Income => self.select_income_tab(),
        }
    }

    /// Pick a category and move on to the record editor.
    ///
    /// A missing tile is [`ProbeError::CategoryNotFound`].
    pub fn select_category(&mut self, category_type: CategoryType, name: &str) -> ProbeResult<EditRecordPage<'_, D>> {
        self.select_tab(category_type)?;
        debug!(%category_type, name, "select category");
        let tile = Selector::accessibility_id(name);
        match self.resolver.click(&tile) {
            Ok(()) => Ok(EditRecordPage::new(self.resolver.reborrow())),
            Err(ProbeError::ElementMissing { .. }) => Err(ProbeError::CategoryNotFound {
                category_type: category_type.display_name().to_string(),
                name: name.to_string(),
            }),
            Err(e) => Err(e),
        }
    }
}

impl<D: Driver + ?Sized> Screen<D> for CategorySelectionPage<'_, D> {
    fn anchor(&self) -> Selector {
        Selector::id(EXPENSES_TAB)
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

    fn picker() -> MockDriver {
        let mut driver = MockDriver::new();
        driver.add_element(MockElement::new("exp", Selector::id(EXPENSES_TAB)));
        driver.add_element(MockElement::new("inc", Selector::id(INCOME_TAB)));
        driver.add_element(MockElement::new("food", Selector::accessibility_id("Food")));
        driver
    }

    #[test]
    fn test_select_category_switches_tab_first() {
        let mut driver = picker();
        {
            let mut page = CategorySelectionPage::new(Resolver::new(&mut driver));
            let _editor = page.select_category(CategoryType::Expense, "Food").unwrap();
        }
        let clicks: Vec<_> = driver.history().iter().filter(|c| c.starts_with("click")).collect();
        assert_eq!(clicks, vec!["click:exp", "click:food"]);
    }

    #[test]
    fn test_unknown_category() {
        let mut driver = picker();
        let mut page = CategorySelectionPage::new(Resolver::new(&mut driver));
        let err = page.select_category(CategoryType::Income, "Lottery").unwrap_err();
        assert!(matches!(err, ProbeError::CategoryNotFound { .. }));
        assert_eq!(err.to_string(), "Category not found: Type: Income, Name: Lottery");
    }

    #[test]
    fn test_driver_failure_is_not_masked() {
        let mut driver = picker();
        driver.fail_with = Some("socket closed".to_string());
        let mut page = CategorySelectionPage::new(Resolver::new(&mut driver));
        let err = page.select_category(CategoryType::Expense, "Food").unwrap_err();
        assert!(matches!(err, ProbeError::Driver { .. }));
    }
}
