//! Record codec: locator strings, composite labels and date range text.
//!
//! Pure functions, no driver access. The same functions are used when the
//! harness writes into the UI and when a test computes what it expects to
//! read back, so the two can never drift apart.
//!
//! All formatting is fixed to one convention (period decimal separator,
//! `,` grouping, English month names) whatever the host locale is.

use chrono::{Datelike, Month, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

use crate::model::{month_of, Amount, CategoryType, DateRangeSelection, RecordKey, RepeatOption};
use crate::result::{ProbeError, ProbeResult};

/// Date pattern used by record labels and date input fields (`MM/dd/yyyy`).
pub const DATE_FORMAT: &str = "%m/%d/%Y";

const DATE_PATTERN_DESC: &str = "a first line in MM/dd/yyyy form";

fn date_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("date pattern is a valid regex"))
}

/// Locator string for a record tile: `name + "\n" + sign + amount`.
///
/// Expenses carry a `-` sign, incomes none; the amount always has two
/// fractional digits and `,` grouping (`1,500.00`).
#[must_use]
pub fn encode_locator(name: &str, category_type: CategoryType, amount: Amount) -> String {
    format!("{name}\n{}{}", category_type.sign(), amount.grouped())
}

/// [`encode_locator`] for a [`RecordKey`]
#[must_use]
pub fn encode_key(key: &RecordKey) -> String {
    encode_locator(&key.name, key.category_type, key.amount)
}

/// Format a date the way date fields accept and render it
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Label of the edit screen's date field: the date, plus the repeat option
/// on a second line when the record repeats.
#[must_use]
pub fn encode_composite_label(date: NaiveDate, repeat_option: RepeatOption) -> String {
    if repeat_option.is_repeating() {
        format!("{}\n{}", format_date(date), repeat_option.display_name())
    } else {
        format_date(date)
    }
}

/// Date from the first line of a composite label.
///
/// Strict: anything other than `MM/dd/yyyy` is a [`ProbeError::Parse`].
pub fn decode_date(label: &str) -> ProbeResult<NaiveDate> {
    let first = label.lines().next().unwrap_or_default().trim();
    if !date_line_regex().is_match(first) {
        return Err(ProbeError::parse(label, DATE_PATTERN_DESC));
    }
    NaiveDate::parse_from_str(first, DATE_FORMAT).map_err(|_| ProbeError::parse(label, DATE_PATTERN_DESC))
}

/// Repeat option from the second line of a composite label.
///
/// Lenient by policy: a missing second line, or one that matches none of
/// the known options, means [`RepeatOption::NotRepeat`].
#[must_use]
pub fn decode_repeat_option(label: &str) -> RepeatOption {
    label
        .lines()
        .nth(1)
        .and_then(RepeatOption::from_display_name)
        .unwrap_or_default()
}

/// Category type from the amount field's hint, whose first line is the sign.
#[must_use]
pub fn decode_category_type(hint: &str) -> CategoryType {
    match hint.lines().next().map(str::trim) {
        Some("-") => CategoryType::Expense,
        _ => CategoryType::Income,
    }
}

/// Amount from a field's text; grouping separators are accepted.
pub fn decode_amount(text: &str) -> ProbeResult<Amount> {
    text.parse()
}

/// Three-letter English month abbreviation (`Oct`)
#[must_use]
pub fn month_abbrev(month: Month) -> &'static str {
    // every chrono month name is ASCII and at least three letters long
    &month.name()[..3]
}

/// Text the home screen shows for a date range.
///
/// - month: `October 2025`
/// - year: `Jan 1 - Dec 31, 2020`
/// - custom: `Oct 5 - Nov 12, 2025` (year of the end date)
#[must_use]
pub fn format_date_range_text(selection: &DateRangeSelection) -> String {
    match *selection {
        DateRangeSelection::Month { year, month } => format!("{} {year}", month.name()),
        DateRangeSelection::Year { year } => format!("Jan 1 - Dec 31, {year}"),
        DateRangeSelection::Custom { start, end } => format!(
            "{} {} - {} {}, {}",
            month_abbrev(month_of(start)),
            start.day(),
            month_abbrev(month_of(end)),
            end.day(),
            end.year()
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_expense_locator() {
            let locator = encode_locator("Groceries", CategoryType::Expense, Amount::from_cents(5025));
            assert_eq!(locator, "Groceries\n-50.25");
        }

        #[test]
        fn test_income_locator_has_no_sign() {
            let locator = encode_locator("Salary", CategoryType::Income, Amount::from(1500));
            assert_eq!(locator, "Salary\n1,500.00");
        }

        #[test]
        fn test_key_matches_parts() {
            let key = RecordKey::new("Rent", CategoryType::Expense, 500);
            assert_eq!(encode_key(&key), "Rent\n-500.00");
        }

        #[test]
        fn test_identical_keys_collide() {
            let a = RecordKey::new("Rent", CategoryType::Expense, 500);
            let b = RecordKey::new("Rent", CategoryType::Expense, Amount::from_cents(50_000));
            assert_eq!(encode_key(&a), encode_key(&b));
        }
    }

    mod label_tests {
        use super::*;

        #[test]
        fn test_decode_date_single_line() {
            assert_eq!(decode_date("11/30/2024").unwrap(), date(2024, 11, 30));
        }

        #[test]
        fn test_decode_date_with_repeat_line() {
            assert_eq!(decode_date("11/30/2024\nEvery day").unwrap(), date(2024, 11, 30));
        }

        #[test]
        fn test_decode_date_rejects_other_shapes() {
            for bad in ["", "2024-11-30", "1/5/2024", "11/30/24", "13/01/2024", "Today"] {
                let err = decode_date(bad).unwrap_err();
                assert!(matches!(err, ProbeError::Parse { .. }), "{bad:?} should not parse");
            }
        }

        #[test]
        fn test_decode_repeat_option() {
            assert_eq!(decode_repeat_option("11/30/2024\nEvery day"), RepeatOption::EveryDay);
            assert_eq!(
                decode_repeat_option("11/30/2024\nEVERY THREE MONTHS"),
                RepeatOption::EveryThreeMonths
            );
        }

        #[test]
        fn test_decode_repeat_option_defaults() {
            assert_eq!(decode_repeat_option("11/30/2024"), RepeatOption::NotRepeat);
            assert_eq!(decode_repeat_option("11/30/2024\nSometimes"), RepeatOption::NotRepeat);
            assert_eq!(decode_repeat_option(""), RepeatOption::NotRepeat);
        }

        #[test]
        fn test_composite_label_shape() {
            assert_eq!(
                encode_composite_label(date(2024, 11, 30), RepeatOption::EveryDay),
                "11/30/2024\nEvery day"
            );
            assert_eq!(encode_composite_label(date(2024, 1, 2), RepeatOption::NotRepeat), "01/02/2024");
        }

        #[test]
        fn test_decode_category_type() {
            assert_eq!(decode_category_type("-\n0.00"), CategoryType::Expense);
            assert_eq!(decode_category_type("+\n0.00"), CategoryType::Income);
            assert_eq!(decode_category_type(""), CategoryType::Income);
        }

        #[test]
        fn test_decode_amount() {
            assert_eq!(decode_amount("50.25").unwrap(), Amount::from_cents(5025));
            assert_eq!(decode_amount("1,500.00").unwrap(), Amount::from(1500));
            assert!(decode_amount("n/a").is_err());
        }
    }

    mod date_range_text_tests {
        use super::*;

        #[test]
        fn test_month() {
            let selection = DateRangeSelection::Month {
                year: 2025,
                month: Month::October,
            };
            assert_eq!(format_date_range_text(&selection), "October 2025");
        }

        #[test]
        fn test_year() {
            assert_eq!(
                format_date_range_text(&DateRangeSelection::year(2020)),
                "Jan 1 - Dec 31, 2020"
            );
        }

        #[test]
        fn test_custom() {
            let selection = DateRangeSelection::custom(date(2025, 10, 5), date(2025, 11, 12));
            assert_eq!(format_date_range_text(&selection), "Oct 5 - Nov 12, 2025");
        }

        #[test]
        fn test_custom_across_years_uses_end_year() {
            let selection = DateRangeSelection::custom(date(2024, 12, 20), date(2025, 1, 3));
            assert_eq!(format_date_range_text(&selection), "Dec 20 - Jan 3, 2025");
        }

        #[test]
        fn test_month_abbrev() {
            assert_eq!(month_abbrev(Month::October), "Oct");
            assert_eq!(month_abbrev(Month::May), "May");
            assert_eq!(month_abbrev(Month::September), "Sep");
        }
    }

    fn repeat_strategy() -> impl Strategy<Value = RepeatOption> {
        (0usize..8).prop_map(|i| RepeatOption::ALL[i])
    }

    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (1000i32..=9999, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| date(y, m, d))
    }

    proptest! {
        /// Composite labels decode back to the date and repeat option
        #[test]
        fn prop_composite_label_round_trip(d in date_strategy(), repeat in repeat_strategy()) {
            let label = encode_composite_label(d, repeat);
            prop_assert_eq!(decode_date(&label).unwrap(), d);
            prop_assert_eq!(decode_repeat_option(&label), repeat);
            prop_assert_eq!(label.contains('\n'), repeat.is_repeating());
        }

        /// Locators are deterministic and distinguish expense from income
        #[test]
        fn prop_locator_determinism(name in "[A-Za-z ]{1,20}", cents in 0i64..10_000_000) {
            let amount = Amount::from_cents(cents);
            prop_assert_eq!(
                encode_locator(&name, CategoryType::Expense, amount),
                encode_locator(&name, CategoryType::Expense, amount)
            );
            prop_assert_ne!(
                encode_locator(&name, CategoryType::Expense, amount),
                encode_locator(&name, CategoryType::Income, amount)
            );
        }

        /// The amount part of a locator parses back to the same amount
        #[test]
        fn prop_locator_amount_round_trip(cents in 0i64..10_000_000) {
            let amount = Amount::from_cents(cents);
            let locator = encode_locator("x", CategoryType::Expense, amount);
            let rendered = locator.lines().nth(1).unwrap().trim_start_matches('-');
            prop_assert_eq!(decode_amount(rendered).unwrap(), amount);
        }
    }
}
