//! Home screen scenarios: date range text, record round trips and filter
//! scoping.

#![allow(clippy::unwrap_used, clippy::expect_used)]

#[macro_use]
mod common;

use chrono::{Datelike, NaiveDate};
use common::{days_ago, months_ago, with_records, years_ago};
use oinkoin_e2e::model::month_of;
use oinkoin_e2e::prelude::*;

scenario_tests!(
    month_filter_shows_month_and_year,
    year_filter_shows_whole_year_span,
    custom_filter_shows_both_ends,
    expense_record_round_trips,
    income_record_round_trips,
    deleted_record_disappears,
    month_filter_hides_other_months,
    year_filter_hides_other_years,
    custom_filter_hides_records_outside_range,
    custom_filter_includes_both_boundaries,
);

#[test]
fn simulated_date_texts_for_fixed_today() {
    common::on_simulator(|session, today| {
        let mut home = session.home()?;
        assert_eq!(home.date_range_text()?, "October 2025");
        home.show_records_per_year(2020)?;
        assert_eq!(home.date_range_text()?, "Jan 1 - Dec 31, 2020");
        home.show_records_per_date_range(days_ago(today, 14), today)?;
        assert_eq!(home.date_range_text()?, "Oct 5 - Oct 19, 2025");
        Ok(())
    });
}

#[test]
fn failed_add_still_removes_earlier_records() {
    common::on_simulator(|session, today| {
        let added = Record::new("Coffee", 4, CategoryType::Expense, "Food", today);
        let unnamed = Record::new(" ", 4, CategoryType::Expense, "Food", today);
        let err = with_records(session, &[added.clone(), unnamed], |_| Ok(())).unwrap_err();
        assert!(matches!(err, ProbeError::Parse { .. }));
        assert!(!session.home()?.is_record_displayed(&added.key())?);
        Ok(())
    });
}

fn month_filter_shows_month_and_year<D: Driver>(session: &mut Session<D>, today: NaiveDate) -> ProbeResult<()> {
    let mut home = session.home()?;
    home.show_records_per_month(month_of(today))?;

    // e.g. "October 2025"
    let expected = today.format("%B %Y").to_string();
    assert_eq!(home.date_range_text()?, expected);
    Ok(())
}

fn year_filter_shows_whole_year_span<D: Driver>(session: &mut Session<D>, _today: NaiveDate) -> ProbeResult<()> {
    let mut home = session.home()?;
    home.show_records_per_year(2020)?;
    assert_eq!(home.date_range_text()?, "Jan 1 - Dec 31, 2020");
    Ok(())
}

fn custom_filter_shows_both_ends<D: Driver>(session: &mut Session<D>, today: NaiveDate) -> ProbeResult<()> {
    let start = days_ago(months_ago(today, 2), 3);
    let end = days_ago(today, 4);

    let mut home = session.home()?;
    home.show_records_per_date_range(start, end)?;

    // e.g. "Aug 16 - Oct 15, 2025"
    let expected = format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"));
    assert_eq!(home.date_range_text()?, expected);
    Ok(())
}

fn expense_record_round_trips<D: Driver>(session: &mut Session<D>, today: NaiveDate) -> ProbeResult<()> {
    let record = Record::new("Groceries", Amount::from_cents(5025), CategoryType::Expense, "Food", today)
        .with_note("Grocery shopping");

    let mut home = session.home()?;
    home.add_record(&record)?;
    let saved = home.get_record(&record.key(), record.date)?;
    home.delete_record(&record.key(), record.date)?;

    assert_eq!(saved, record);
    Ok(())
}

fn income_record_round_trips<D: Driver>(session: &mut Session<D>, today: NaiveDate) -> ProbeResult<()> {
    let record = Record::new("Salary", 1500, CategoryType::Income, "Salary", today)
        .with_repeat(RepeatOption::EveryMonth)
        .with_note("Monthly salary payment");

    let mut home = session.home()?;
    home.add_record(&record)?;
    let saved = home.get_record(&record.key(), record.date)?;
    home.delete_record(&record.key(), record.date)?;

    assert_eq!(saved.name, record.name);
    assert_eq!(saved.amount, record.amount);
    assert_eq!(saved.category_type, CategoryType::Income);
    assert_eq!(saved.category, record.category);
    assert_eq!(saved.date, record.date);
    assert_eq!(saved.repeat_option, RepeatOption::EveryMonth);
    assert_eq!(saved.note, record.note);
    Ok(())
}

fn deleted_record_disappears<D: Driver>(session: &mut Session<D>, today: NaiveDate) -> ProbeResult<()> {
    let record = Record::new("Coffee", Amount::from_cents(350), CategoryType::Expense, "Food", today);

    let mut home = session.home()?;
    home.add_record(&record)?;
    home.delete_record(&record.key(), record.date)?;

    assert!(!home.is_record_displayed(&record.key())?);
    let err = home.get_record(&record.key(), record.date).unwrap_err();
    assert!(matches!(err, ProbeError::RecordNotFound { .. }));
    Ok(())
}

fn month_filter_hides_other_months<D: Driver>(session: &mut Session<D>, today: NaiveDate) -> ProbeResult<()> {
    let current = Record::new("Groceries", 100, CategoryType::Expense, "Food", today);
    let older = Record::new("Rent", 500, CategoryType::Expense, "House", months_ago(today, 2));

    with_records(session, &[current.clone(), older.clone()], |home| {
        home.apply_date_range(&DateRangeSelection::month_of(today))?;
        assert!(home.is_record_displayed(&current.key())?);
        assert!(!home.is_record_displayed(&older.key())?);
        Ok(())
    })
}

fn year_filter_hides_other_years<D: Driver>(session: &mut Session<D>, today: NaiveDate) -> ProbeResult<()> {
    let this_year = Record::new("Salary", 2000, CategoryType::Income, "Salary", today);
    let last_year = Record::new("Bonus", 1500, CategoryType::Income, "Salary", years_ago(today, 1));

    with_records(session, &[this_year.clone(), last_year.clone()], |home| {
        home.show_records_per_year(today.year())?;
        assert!(home.is_record_displayed(&this_year.key())?);
        assert!(!home.is_record_displayed(&last_year.key())?);
        Ok(())
    })
}

fn custom_filter_hides_records_outside_range<D: Driver>(
    session: &mut Session<D>,
    today: NaiveDate,
) -> ProbeResult<()> {
    let start = days_ago(today, 21);
    let end = days_ago(today, 7);
    let inside = Record::new("Dinner", 75, CategoryType::Expense, "Food", days_ago(today, 20));
    let outside = Record::new("Movie", 25, CategoryType::Expense, "Food", months_ago(today, 2));

    with_records(session, &[inside.clone(), outside.clone()], |home| {
        home.show_records_per_date_range(start, end)?;
        assert!(home.is_record_displayed(&inside.key())?);
        assert!(!home.is_record_displayed(&outside.key())?);
        Ok(())
    })
}

fn custom_filter_includes_both_boundaries<D: Driver>(session: &mut Session<D>, today: NaiveDate) -> ProbeResult<()> {
    let start = days_ago(today, 10);
    let end = days_ago(today, 3);
    let first = Record::new("Bus pass", 30, CategoryType::Expense, "Transport", start);
    let last = Record::new("Pharmacy", 12, CategoryType::Expense, "Health", end);
    let after = Record::new("Taxi", 18, CategoryType::Expense, "Transport", days_ago(today, 2));

    with_records(session, &[first.clone(), last.clone(), after.clone()], |home| {
        home.show_records_per_date_range(start, end)?;
        assert!(home.is_record_displayed(&first.key())?);
        assert!(home.is_record_displayed(&last.key())?);
        assert!(!home.is_record_displayed(&after.key())?);
        Ok(())
    })
}
