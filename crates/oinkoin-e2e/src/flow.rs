//! Multi-screen user flows started from the home screen.
//!
//! ```text
//!   Home ──add──▶ CategorySelection ──category──▶ EditRecord ──save──▶ Home
//!    │ ▲                                              │
//!    │ └──────────────── back / delete + Yes ─────────┘
//!    └──select-date──▶ DateFilter ──OK──▶ Home
//! ```
//!
//! None of these flows is idempotent: every `add_record` creates one more
//! visible record, so tests delete what they add.

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::codec::{encode_key, format_date_range_text};
use crate::driver::Driver;
use crate::locator::Selector;
use crate::model::{month_of, validate_record, DateRangeSelection, Record, RecordKey};
use crate::pages::{EditRecordPage, HomePage};
use crate::result::{ProbeError, ProbeResult};

/// Selector of the tile showing a record with this identity
#[must_use]
pub fn record_tile(key: &RecordKey) -> Selector {
    Selector::accessibility_id(encode_key(key))
}

impl<'d, D: Driver + ?Sized> HomePage<'d, D> {
    /// Create `record` through the UI and return to the home screen
    pub fn add_record(&mut self, record: &Record) -> ProbeResult<()> {
        validate_record(record)?;
        info!(name = %record.name, category = %record.category, date = %record.date, "add record");
        self.open_add_record()?
            .select_category(record.category_type, &record.category)?
            .fill_and_save(record)
    }

    /// Narrow the filter to the month of `date` and open the record's editor.
    ///
    /// Fails with [`ProbeError::RecordNotFound`] naming the locator and the
    /// filter that was active when the lookup failed.
    pub fn open_record(&mut self, key: &RecordKey, date: NaiveDate) -> ProbeResult<EditRecordPage<'_, D>> {
        self.show_records_per_year(date.year())?;
        self.show_records_per_month(month_of(date))?;

        let tile = record_tile(key);
        info!(%tile, "open record");
        match self.resolver.find_optional(&tile)? {
            Some(handle) => {
                self.resolver.driver().click(&handle)?;
                Ok(EditRecordPage::new(self.resolver.reborrow()))
            }
            None => {
                let filter = self
                    .date_range_text()
                    .unwrap_or_else(|_| format_date_range_text(&DateRangeSelection::month_of(date)));
                Err(ProbeError::RecordNotFound {
                    locator: encode_key(key),
                    filter,
                })
            }
        }
    }

    /// Read a record back; leaves the app on the home screen
    pub fn get_record(&mut self, key: &RecordKey, date: NaiveDate) -> ProbeResult<Record> {
        self.open_record(key, date)?.read_and_close()
    }

    /// Delete a record, confirming the dialog
    pub fn delete_record(&mut self, key: &RecordKey, date: NaiveDate) -> ProbeResult<()> {
        self.open_record(key, date)?.delete()
    }

    /// Whether a tile for `key` is listed under the current filter
    pub fn is_record_displayed(&mut self, key: &RecordKey) -> ProbeResult<bool> {
        Ok(!self.resolver.find_all(&record_tile(key))?.is_empty())
    }
}
