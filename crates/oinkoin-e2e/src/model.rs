//! Financial record types written into and read back from the app.

use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::result::{ProbeError, ProbeResult};

/// Fractional digits every rendered amount carries.
pub const AMOUNT_SCALE: u32 = 2;

/// Whether a record takes money out or puts it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    /// Money out, rendered with a leading `-`
    Expense,
    /// Money in, rendered without a sign
    Income,
}

impl CategoryType {
    /// Label used by the app
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }

    /// Prefix placed before the amount on a record tile
    #[must_use]
    pub const fn sign(self) -> &'static str {
        match self {
            Self::Expense => "-",
            Self::Income => "",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CategoryType {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" | "expenses" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(ProbeError::parse(s, "expense or income")),
        }
    }
}

/// Recurrence of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatOption {
    /// One-off record
    #[default]
    NotRepeat,
    EveryDay,
    EveryWeek,
    EveryTwoWeeks,
    EveryMonth,
    EveryThreeMonths,
    EveryFourMonths,
    EveryYear,
}

impl RepeatOption {
    /// Every variant, in the order the app lists them
    pub const ALL: [Self; 8] = [
        Self::NotRepeat,
        Self::EveryDay,
        Self::EveryWeek,
        Self::EveryTwoWeeks,
        Self::EveryMonth,
        Self::EveryThreeMonths,
        Self::EveryFourMonths,
        Self::EveryYear,
    ];

    /// Text shown by the app (also the option's accessibility label)
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::NotRepeat => "Not repeat",
            Self::EveryDay => "Every day",
            Self::EveryWeek => "Every week",
            Self::EveryTwoWeeks => "Every two weeks",
            Self::EveryMonth => "Every month",
            Self::EveryThreeMonths => "Every three months",
            Self::EveryFourMonths => "Every four months",
            Self::EveryYear => "Every year",
        }
    }

    /// Case-insensitive lookup by display text
    #[must_use]
    pub fn from_display_name(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|option| option.display_name().eq_ignore_ascii_case(text))
    }

    #[must_use]
    pub const fn is_repeating(self) -> bool {
        !matches!(self, Self::NotRepeat)
    }
}

impl fmt::Display for RepeatOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Monetary value held with exactly two fractional digits.
///
/// Construction rounds half-to-even, so `Amount::from(1500)` and
/// `"1,500.004".parse()` both hold `1500.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Wrap a decimal, rescaling it to two places.
    ///
    /// Fails when the integer part is too large to keep two fractional
    /// digits.
    pub fn new(value: Decimal) -> ProbeResult<Self> {
        let mut scaled = value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven);
        scaled.rescale(AMOUNT_SCALE);
        if scaled.scale() == AMOUNT_SCALE {
            Ok(Self(scaled))
        } else {
            Err(ProbeError::parse(value.to_string(), "an amount that fits two decimal places"))
        }
    }

    /// Build from an integer count of cents
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, AMOUNT_SCALE))
    }

    /// Underlying decimal value
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Render with `,` thousands separators, e.g. `1,500.00`.
    ///
    /// Independent of the host locale.
    #[must_use]
    pub fn grouped(&self) -> String {
        let plain = self.to_string();
        let (sign, digits) = match plain.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", plain.as_str()),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{sign}{grouped}.{frac_part}")
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Decimal's Display keeps the scale, which is always AMOUNT_SCALE here.
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim().replace(',', "");
        let value = Decimal::from_str(&cleaned)
            .map_err(|_| ProbeError::parse(s, "a decimal amount such as 1,500.00"))?;
        Self::new(value)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ProbeError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<i64> for Amount {
    fn from(units: i64) -> Self {
        // |i64| * 100 stays well inside Decimal's 96-bit mantissa
        Self(Decimal::from_i128_with_scale(i128::from(units) * 100, AMOUNT_SCALE))
    }
}

impl From<i32> for Amount {
    fn from(units: i32) -> Self {
        Self::from(i64::from(units))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// The fields that make a record findable on the home screen.
///
/// Two records sharing all three fields produce the same locator and cannot
/// be told apart inside one filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub name: String,
    pub category_type: CategoryType,
    pub amount: Amount,
}

impl RecordKey {
    #[must_use]
    pub fn new(name: impl Into<String>, category_type: CategoryType, amount: impl Into<Amount>) -> Self {
        Self {
            name: name.into(),
            category_type,
            amount: amount.into(),
        }
    }
}

/// A single income or expense entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub amount: Amount,
    pub category_type: CategoryType,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub repeat_option: RepeatOption,
    #[serde(default)]
    pub note: String,
}

impl Record {
    /// Create a one-off record with an empty note
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<Amount>,
        category_type: CategoryType,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            category_type,
            category: category.into(),
            date,
            repeat_option: RepeatOption::NotRepeat,
            note: String::new(),
        }
    }

    #[must_use]
    pub const fn with_repeat(mut self, repeat_option: RepeatOption) -> Self {
        self.repeat_option = repeat_option;
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Identity used to locate the record's tile
    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey {
            name: self.name.clone(),
            category_type: self.category_type,
            amount: self.amount,
        }
    }
}

/// Date window the home screen lists records for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DateRangeSelection {
    /// A calendar month
    Month { year: i32, month: Month },
    /// A whole calendar year
    Year { year: i32 },
    /// Inclusive custom range
    Custom { start: NaiveDate, end: NaiveDate },
}

impl DateRangeSelection {
    /// Month containing `date`
    #[must_use]
    pub fn month_of(date: NaiveDate) -> Self {
        Self::Month {
            year: date.year(),
            month: month_of(date),
        }
    }

    #[must_use]
    pub const fn year(year: i32) -> Self {
        Self::Year { year }
    }

    /// Custom range; endpoints are swapped if given in reverse
    #[must_use]
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self::Custom { start, end }
        } else {
            Self::Custom {
                start: end,
                end: start,
            }
        }
    }

    /// Whether `date` falls in the window (both endpoints inclusive)
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Self::Month { year, month } => date.year() == year && date.month() == month.number_from_month(),
            Self::Year { year } => date.year() == year,
            Self::Custom { start, end } => start <= date && date <= end,
        }
    }

    /// Year the month picker operates on while this selection is active
    #[must_use]
    pub fn anchor_year(&self) -> i32 {
        match *self {
            Self::Month { year, .. } | Self::Year { year } => year,
            Self::Custom { end, .. } => end.year(),
        }
    }
}

/// Calendar month of a date
#[must_use]
pub fn month_of(date: NaiveDate) -> Month {
    // month() is always 1..=12
    Month::try_from(date.month() as u8).unwrap_or(Month::January)
}

/// Validate a record before writing it into the UI.
pub fn validate_record(record: &Record) -> ProbeResult<()> {
    if record.name.trim().is_empty() {
        return Err(ProbeError::parse(&record.name, "a non-empty record name"));
    }
    if record.amount.value().is_sign_negative() {
        return Err(ProbeError::parse(
            record.amount.to_string(),
            "a non-negative amount; the category type carries the sign",
        ));
    }
    Ok(())
}
