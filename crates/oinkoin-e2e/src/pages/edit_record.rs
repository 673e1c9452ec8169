//! Record editor: field accessors, pickers and the save/back/delete
//! actions.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::{Screen, BACK, OK, YES};
use crate::codec::{decode_amount, decode_category_type, decode_date, decode_repeat_option, format_date};
use crate::driver::{Driver, CONTENT_DESC, HINT};
use crate::locator::{Resolver, Selector, BUTTON_CLASS, EDIT_TEXT_CLASS};
use crate::model::{Amount, CategoryType, Record, RepeatOption};
use crate::result::ProbeResult;

const AMOUNT_FIELD: &str = "amount-field";
const RECORD_NAME_FIELD: &str = "record-name-field";
const CATEGORY_FIELD: &str = "category-field";
const DATE_FIELD: &str = "date-field";
const REPEAT_FIELD: &str = "repeat-field";
const NOTE_FIELD: &str = "note-field";
const SAVE_BUTTON: &str = "save-button";
const DELETE_BUTTON: &str = "delete-button";

/// The date picker's first stock button switches it to text input
const DATE_INPUT_MODE_BUTTON: usize = 0;

/// Record editor, used both for new and existing records.
#[derive(Debug)]
pub struct EditRecordPage<'d, D: Driver + ?Sized> {
    resolver: Resolver<'d, D>,
}

impl<'d, D: Driver + ?Sized> EditRecordPage<'d, D> {
    pub fn new(resolver: Resolver<'d, D>) -> Self {
        Self { resolver }
    }

    /// Type of the record, read from the sign on the first line of the
    /// amount field's hint
    pub fn category_type(&mut self) -> ProbeResult<CategoryType> {
        let hint = self.resolver.attribute(&Selector::id(AMOUNT_FIELD), HINT)?;
        Ok(decode_category_type(&hint))
    }

    pub fn amount(&mut self) -> ProbeResult<Amount> {
        let text = self.resolver.text(&Selector::id(AMOUNT_FIELD))?;
        decode_amount(&text)
    }

    pub fn set_amount(&mut self, amount: Amount) -> ProbeResult<()> {
        self.resolver.fill(&Selector::id(AMOUNT_FIELD), &amount.to_string())
    }

    pub fn record_name(&mut self) -> ProbeResult<String> {
        self.resolver.text(&Selector::id(RECORD_NAME_FIELD))
    }

    pub fn set_record_name(&mut self, name: &str) -> ProbeResult<()> {
        self.resolver.fill(&Selector::id(RECORD_NAME_FIELD), name)
    }

    pub fn category(&mut self) -> ProbeResult<String> {
        self.resolver.attribute(&Selector::id(CATEGORY_FIELD), CONTENT_DESC)
    }

    /// Composite label of the date field: date, then repeat option when set
    pub fn date_label(&mut self) -> ProbeResult<String> {
        self.resolver.attribute(&Selector::id(DATE_FIELD), CONTENT_DESC)
    }

    pub fn date(&mut self) -> ProbeResult<NaiveDate> {
        decode_date(&self.date_label()?)
    }

    /// Open the date picker, switch it to text input and type the date
    pub fn set_date(&mut self, date: NaiveDate) -> ProbeResult<()> {
        debug!(%date, "set date");
        self.resolver.click(&Selector::id(DATE_FIELD))?;
        self.resolver
            .click(&Selector::ui_selector(BUTTON_CLASS, DATE_INPUT_MODE_BUTTON))?;
        self.resolver
            .fill(&Selector::class_name(EDIT_TEXT_CLASS), &format_date(date))?;
        self.resolver.click(&Selector::accessibility_id(OK))
    }

    pub fn repeat_option(&mut self) -> ProbeResult<RepeatOption> {
        Ok(decode_repeat_option(&self.date_label()?))
    }

    /// Pick a repeat option; `NotRepeat` is the editor's default and leaves
    /// the field untouched
    pub fn set_repeat_option(&mut self, repeat_option: RepeatOption) -> ProbeResult<()> {
        if !repeat_option.is_repeating() {
            return Ok(());
        }
        self.resolver.click(&Selector::id(REPEAT_FIELD))?;
        self.resolver
            .click(&Selector::accessibility_id(repeat_option.display_name()))
    }

    pub fn note(&mut self) -> ProbeResult<String> {
        self.resolver.text(&Selector::id(NOTE_FIELD))
    }

    pub fn set_note(&mut self, note: &str) -> ProbeResult<()> {
        self.resolver.fill(&Selector::id(NOTE_FIELD), note)
    }

    pub fn save(mut self) -> ProbeResult<()> {
        self.resolver.click(&Selector::id(SAVE_BUTTON))
    }

    /// Leave the editor without saving
    pub fn back(mut self) -> ProbeResult<()> {
        self.resolver.click(&Selector::accessibility_id(BACK))
    }

    /// Delete the record and confirm
    pub fn delete(mut self) -> ProbeResult<()> {
        info!("delete record");
        self.resolver.click(&Selector::id(DELETE_BUTTON))?;
        self.resolver.click(&Selector::accessibility_id(YES))
    }

    /// Fill every field from `record` and save.
    ///
    /// Category and type are chosen before the editor opens.
    pub fn fill_and_save(mut self, record: &Record) -> ProbeResult<()> {
        self.set_amount(record.amount)?;
        self.set_record_name(&record.name)?;
        self.set_date(record.date)?;
        self.set_repeat_option(record.repeat_option)?;
        self.set_note(&record.note)?;
        self.save()
    }

    fn read_fields(&mut self) -> ProbeResult<Record> {
        let label = self.date_label()?;
        Ok(Record {
            name: self.record_name()?,
            amount: self.amount()?,
            category_type: self.category_type()?,
            category: self.category()?,
            date: decode_date(&label)?,
            repeat_option: decode_repeat_option(&label),
            note: self.note()?,
        })
    }

    /// Read every field, then leave with "Back".
    ///
    /// "Back" is clicked even when a read fails; the read error is reported
    /// ahead of any error from leaving.
    pub fn read_and_close(mut self) -> ProbeResult<Record> {
        let read = self.read_fields();
        if let Err(err) = &read {
            warn!(error = %err, "reading record failed, leaving editor");
        }
        let left = self.back();
        let record = read?;
        left?;
        Ok(record)
    }
}

impl<D: Driver + ?Sized> Screen<D> for EditRecordPage<'_, D> {
    fn anchor(&self) -> Selector {
        Selector::id(SAVE_BUTTON)
    }

    fn resolver(&mut self) -> Resolver<'_, D> {
        self.resolver.reborrow()
    }
}
