//! In-process stand-in for the app under test.
//!
//! [`SimulatedApp`] implements [`Driver`] by rendering the current screen
//! into a flat list of nodes (resource id, accessibility label, class, text,
//! hint) and matching selectors against it, the way UiAutomator2 matches
//! against the accessibility tree. Screens, identifiers and label formats
//! follow the real app, so every screen object and flow runs unchanged
//! against it.
//!
//! Dialogs are modal: while one is open only its nodes are rendered.
//! Element ids are stable per widget for the whole session; a handle whose
//! widget is not on the current screen is a stale element.

use chrono::{Datelike, Month, NaiveDate};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::codec::{encode_composite_label, encode_locator, format_date, format_date_range_text, month_abbrev, DATE_FORMAT};
use crate::config::SessionConfig;
use crate::driver::{Driver, ElementHandle, CONTENT_DESC, HINT};
use crate::locator::{Selector, BUTTON_CLASS, EDIT_TEXT_CLASS};
use crate::model::{Amount, CategoryType, DateRangeSelection, Record, RepeatOption};
use crate::pages::{FilterMode, Tab, BACK, OK, YES};
use crate::result::{ProbeError, ProbeResult};

/// Class of non-editable, non-button nodes
pub const VIEW_CLASS: &str = "android.view.View";

/// Years offered by the year chips, counted back from today
const YEAR_CHIP_SPAN: i32 = 30;

const DATE_HINT: &str = "mm/dd/yyyy";

/// Categories installed with a fresh app
pub const DEFAULT_CATEGORIES: [(CategoryType, &str); 6] = [
    (CategoryType::Expense, "Food"),
    (CategoryType::Expense, "House"),
    (CategoryType::Expense, "Transport"),
    (CategoryType::Expense, "Health"),
    (CategoryType::Income, "Salary"),
    (CategoryType::Income, "Gifts"),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Widget {
    Tab(Tab, bool),
    SelectDate,
    Statistics,
    ThreeDots,
    DateText,
    AddRecord,
    RecordTile(u64),
    TypeTab(CategoryType),
    CategoryTile(CategoryType, String),
    AmountField,
    NameField,
    CategoryField,
    DateField,
    RepeatField,
    NoteField,
    SaveButton,
    DeleteButton,
    Back,
    Mode(FilterMode),
    MonthChip(u32),
    YearChip(i32),
    RangeCancel,
    RangeCalendar,
    RangeInputToggle,
    RangeStart,
    RangeEnd,
    PickerInputToggle,
    PickerCancel,
    PickerInput,
    RepeatChoice(RepeatOption),
    ConfirmYes,
    ConfirmNo,
    Ok,
}

#[derive(Debug, Clone)]
struct Node {
    widget: Widget,
    resource_id: Option<&'static str>,
    desc: Option<String>,
    class: &'static str,
    text: String,
    hint: Option<String>,
}

impl Node {
    fn view(widget: Widget) -> Self {
        Self {
            widget,
            resource_id: None,
            desc: None,
            class: VIEW_CLASS,
            text: String::new(),
            hint: None,
        }
    }

    fn id(mut self, id: &'static str) -> Self {
        self.resource_id = Some(id);
        self
    }

    fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    fn class(mut self, class: &'static str) -> Self {
        self.class = class;
        self
    }

    fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn edit(widget: Widget, text: &str) -> Self {
        Self::view(widget).class(EDIT_TEXT_CLASS).text(text)
    }

    fn button(widget: Widget, label: &str) -> Self {
        Self::view(widget).class(BUTTON_CLASS).text(label)
    }
}

fn positions(nodes: &[Node], pred: impl Fn(&Node) -> bool) -> Vec<usize> {
    nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| pred(n))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of nodes matching `selector`, in screen order
fn matching(nodes: &[Node], selector: &Selector) -> Vec<usize> {
    match selector {
        Selector::Id(id) => positions(nodes, |n| n.resource_id == Some(id.as_str())),
        Selector::AccessibilityId(label) => positions(nodes, |n| n.desc.as_deref() == Some(label.as_str())),
        Selector::ClassName(class) => positions(nodes, |n| n.class == class.as_str()),
        Selector::UiSelector { class, instance } => positions(nodes, |n| n.class == class.as_str())
            .get(*instance)
            .map(|i| vec![*i])
            .unwrap_or_default(),
    }
}

/// A record being edited
#[derive(Debug, Clone)]
struct Editor {
    existing: Option<u64>,
    category_type: CategoryType,
    category: String,
    amount: String,
    name: String,
    date: NaiveDate,
    repeat_option: RepeatOption,
    note: String,
}

impl Editor {
    fn blank(category_type: CategoryType, category: String, today: NaiveDate) -> Self {
        Self {
            existing: None,
            category_type,
            category,
            amount: String::new(),
            name: String::new(),
            date: today,
            repeat_option: RepeatOption::NotRepeat,
            note: String::new(),
        }
    }

    fn of(id: u64, record: &Record) -> Self {
        Self {
            existing: Some(id),
            category_type: record.category_type,
            category: record.category.clone(),
            amount: record.amount.to_string(),
            name: record.name.clone(),
            date: record.date,
            repeat_option: record.repeat_option,
            note: record.note.clone(),
        }
    }

    fn to_record(&self) -> Option<Record> {
        let amount: Amount = self.amount.parse().ok()?;
        Some(Record {
            name: self.name.clone(),
            amount,
            category_type: self.category_type,
            category: self.category.clone(),
            date: self.date,
            repeat_option: self.repeat_option,
            note: self.note.clone(),
        })
    }
}

#[derive(Debug, Clone)]
enum Screen {
    Home,
    Categories,
    Settings,
    CategorySelection(CategoryType),
    EditRecord(Editor),
}

impl Screen {
    const fn top_level_tab(&self) -> Option<Tab> {
        match self {
            Self::Home => Some(Tab::Home),
            Self::Categories => Some(Tab::Categories),
            Self::Settings => Some(Tab::Settings),
            Self::CategorySelection(_) | Self::EditRecord(_) => None,
        }
    }
}

/// Pending choices in the "show records per" dialog
#[derive(Debug, Clone)]
struct FilterDraft {
    mode: FilterMode,
    month: Option<u32>,
    year: Option<i32>,
    range_input: bool,
    start: String,
    end: String,
}

impl FilterDraft {
    fn for_selection(selection: &DateRangeSelection) -> Self {
        let mode = match selection {
            DateRangeSelection::Month { .. } => FilterMode::Month,
            DateRangeSelection::Year { .. } => FilterMode::Year,
            DateRangeSelection::Custom { .. } => FilterMode::DateRange,
        };
        Self {
            mode,
            month: None,
            year: None,
            range_input: false,
            start: String::new(),
            end: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
enum Overlay {
    DateFilter(FilterDraft),
    DatePicker { input_mode: bool, text: String },
    RepeatPicker,
    DeleteConfirm,
}

fn parse_input_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// The app under test, simulated in process.
#[derive(Debug)]
pub struct SimulatedApp {
    today: NaiveDate,
    categories: Vec<(CategoryType, String)>,
    records: Vec<(u64, Record)>,
    next_record_id: u64,
    filter: DateRangeSelection,
    screen: Screen,
    overlay: Option<Overlay>,
    element_ids: HashMap<Widget, String>,
    closed: bool,
}

impl SimulatedApp {
    /// Fresh install: home screen, current month, default categories
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|(t, name)| (*t, (*name).to_string()))
                .collect(),
            records: Vec::new(),
            next_record_id: 1,
            filter: DateRangeSelection::month_of(today),
            screen: Screen::Home,
            overlay: None,
            element_ids: HashMap::new(),
            closed: false,
        }
    }

    /// Validate `config` like a real session would, then start fresh
    pub fn launch(config: &SessionConfig, today: NaiveDate) -> ProbeResult<Self> {
        config.validate()?;
        debug!(package = %config.app_package, %today, "launching simulated app");
        Ok(Self::new(today))
    }

    /// Connector for [`crate::fixture::SessionFixture`]
    pub fn connector(today: NaiveDate) -> impl Fn(&SessionConfig) -> ProbeResult<Self> {
        move |config| Self::launch(config, today)
    }

    /// Pre-existing record, as if created in an earlier session
    #[must_use]
    pub fn with_record(mut self, record: Record) -> Self {
        self.insert(record);
        self
    }

    /// Extra category
    #[must_use]
    pub fn with_category(mut self, category_type: CategoryType, name: impl Into<String>) -> Self {
        self.categories.push((category_type, name.into()));
        self
    }

    /// Every stored record, oldest first
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().map(|(_, r)| r)
    }

    /// Active home screen filter
    #[must_use]
    pub const fn filter(&self) -> DateRangeSelection {
        self.filter
    }

    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Whether the session was quit
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    fn insert(&mut self, record: Record) {
        self.records.push((self.next_record_id, record));
        self.next_record_id += 1;
    }

    fn ensure_open(&self) -> ProbeResult<()> {
        if self.closed {
            Err(ProbeError::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn element_id(&mut self, widget: &Widget) -> String {
        self.element_ids
            .entry(widget.clone())
            .or_insert_with(|| Uuid::new_v4().to_string())
            .clone()
    }

    fn render(&self) -> Vec<Node> {
        if let Some(overlay) = &self.overlay {
            return self.render_overlay(overlay);
        }
        let mut nodes = Vec::new();
        match &self.screen {
            Screen::Home => self.render_home(&mut nodes),
            Screen::Categories | Screen::Settings => {}
            Screen::CategorySelection(tab) => {
                nodes.push(Node::view(Widget::Back).desc(BACK));
                nodes.push(Node::view(Widget::TypeTab(CategoryType::Expense)).id("expenses-tab"));
                nodes.push(Node::view(Widget::TypeTab(CategoryType::Income)).id("income-tab"));
                nodes.extend(
                    self.categories
                        .iter()
                        .filter(|(t, _)| t == tab)
                        .map(|(t, name)| Node::view(Widget::CategoryTile(*t, name.clone())).desc(name.clone())),
                );
            }
            Screen::EditRecord(editor) => Self::render_editor(editor, &mut nodes),
        }
        if let Some(current) = self.screen.top_level_tab() {
            for tab in Tab::ALL {
                let selected = tab == current;
                let id = if selected { tab.selected_id() } else { tab.id() };
                nodes.push(Node::view(Widget::Tab(tab, selected)).id(id));
            }
        }
        nodes
    }

    fn render_home(&self, nodes: &mut Vec<Node>) {
        nodes.push(Node::view(Widget::SelectDate).id("select-date"));
        nodes.push(Node::view(Widget::Statistics).id("statistics"));
        nodes.push(Node::view(Widget::ThreeDots).id("three-dots"));
        nodes.push(
            Node::view(Widget::DateText)
                .id("date-text")
                .desc(format_date_range_text(&self.filter)),
        );
        nodes.push(Node::view(Widget::AddRecord).id("add-record"));

        let mut visible: Vec<_> = self
            .records
            .iter()
            .filter(|(_, r)| self.filter.contains(r.date))
            .collect();
        visible.sort_by(|(ia, a), (ib, b)| b.date.cmp(&a.date).then(ia.cmp(ib)));
        nodes.extend(visible.into_iter().map(|(id, r)| {
            Node::view(Widget::RecordTile(*id)).desc(encode_locator(&r.name, r.category_type, r.amount))
        }));
    }

    fn render_editor(editor: &Editor, nodes: &mut Vec<Node>) {
        let sign = match editor.category_type {
            CategoryType::Expense => "-",
            CategoryType::Income => "+",
        };
        nodes.push(Node::view(Widget::Back).desc(BACK));
        nodes.push(
            Node::edit(Widget::AmountField, &editor.amount)
                .id("amount-field")
                .hint(format!("{sign}\n0.00")),
        );
        nodes.push(Node::edit(Widget::NameField, &editor.name).id("record-name-field"));
        nodes.push(
            Node::view(Widget::CategoryField)
                .id("category-field")
                .desc(editor.category.clone()),
        );
        nodes.push(
            Node::view(Widget::DateField)
                .id("date-field")
                .desc(encode_composite_label(editor.date, editor.repeat_option)),
        );
        nodes.push(
            Node::view(Widget::RepeatField)
                .id("repeat-field")
                .desc(editor.repeat_option.display_name()),
        );
        nodes.push(Node::edit(Widget::NoteField, &editor.note).id("note-field"));
        nodes.push(Node::view(Widget::SaveButton).id("save-button"));
        if editor.existing.is_some() {
            nodes.push(Node::view(Widget::DeleteButton).id("delete-button"));
        }
    }

    fn render_overlay(&self, overlay: &Overlay) -> Vec<Node> {
        let mut nodes = Vec::new();
        match overlay {
            Overlay::DateFilter(draft) => {
                for mode in [FilterMode::Month, FilterMode::Year, FilterMode::DateRange] {
                    nodes.push(Node::view(Widget::Mode(mode)).desc(mode.label()));
                }
                match draft.mode {
                    FilterMode::Month => nodes.extend(
                        (1u8..=12)
                            .filter_map(|n| Month::try_from(n).ok())
                            .map(|m| Node::view(Widget::MonthChip(m.number_from_month())).desc(month_abbrev(m))),
                    ),
                    FilterMode::Year => {
                        let newest = self.today.year() + 1;
                        nodes.extend(
                            (newest - YEAR_CHIP_SPAN..=newest)
                                .rev()
                                .map(|y| Node::view(Widget::YearChip(y)).desc(y.to_string())),
                        );
                    }
                    FilterMode::DateRange => {
                        nodes.push(Node::button(Widget::RangeCancel, "Cancel"));
                        nodes.push(Node::button(Widget::RangeCalendar, "Calendar"));
                        nodes.push(Node::button(Widget::RangeInputToggle, "Edit"));
                        if draft.range_input {
                            nodes.push(Node::edit(Widget::RangeStart, &draft.start).hint(DATE_HINT));
                            nodes.push(Node::edit(Widget::RangeEnd, &draft.end).hint(DATE_HINT));
                        }
                    }
                }
                nodes.push(Node::view(Widget::Ok).desc(OK));
            }
            Overlay::DatePicker { input_mode, text } => {
                nodes.push(Node::button(Widget::PickerInputToggle, "Edit"));
                nodes.push(Node::button(Widget::PickerCancel, "Cancel"));
                if *input_mode {
                    nodes.push(Node::edit(Widget::PickerInput, text).hint(DATE_HINT));
                }
                nodes.push(Node::view(Widget::Ok).desc(OK));
            }
            Overlay::RepeatPicker => nodes.extend(
                RepeatOption::ALL
                    .iter()
                    .map(|o| Node::view(Widget::RepeatChoice(*o)).desc(o.display_name())),
            ),
            Overlay::DeleteConfirm => {
                nodes.push(Node::view(Widget::ConfirmYes).desc(YES));
                nodes.push(Node::view(Widget::ConfirmNo).desc("No"));
            }
        }
        nodes
    }

    /// Node currently rendered for `handle`, or a stale element error
    fn resolve(&self, handle: &ElementHandle) -> ProbeResult<Node> {
        self.render()
            .into_iter()
            .find(|n| self.element_ids.get(&n.widget) == Some(&handle.id))
            .ok_or_else(|| {
                ProbeError::driver(format!(
                    "stale element reference: {} ({}) is no longer on screen",
                    handle.id, handle.selector
                ))
            })
    }

    fn editable_text(&mut self, widget: &Widget) -> Option<&mut String> {
        match (widget, &mut self.overlay, &mut self.screen) {
            (Widget::PickerInput, Some(Overlay::DatePicker { text, .. }), _) => Some(text),
            (Widget::RangeStart, Some(Overlay::DateFilter(draft)), _) => Some(&mut draft.start),
            (Widget::RangeEnd, Some(Overlay::DateFilter(draft)), _) => Some(&mut draft.end),
            (Widget::AmountField, None, Screen::EditRecord(e)) => Some(&mut e.amount),
            (Widget::NameField, None, Screen::EditRecord(e)) => Some(&mut e.name),
            (Widget::NoteField, None, Screen::EditRecord(e)) => Some(&mut e.note),
            _ => None,
        }
    }

    fn edit_text(&mut self, handle: &ElementHandle, edit: impl FnOnce(&mut String)) -> ProbeResult<()> {
        let node = self.resolve(handle)?;
        match self.editable_text(&node.widget) {
            Some(text) => {
                edit(text);
                Ok(())
            }
            None => Err(ProbeError::driver(format!(
                "invalid element state: {} is not editable",
                handle.selector
            ))),
        }
    }

    fn activate(&mut self, widget: Widget) {
        debug!(?widget, "simulated tap");
        match widget {
            Widget::Tab(tab, _) => {
                self.overlay = None;
                self.screen = match tab {
                    Tab::Home => Screen::Home,
                    Tab::Categories => Screen::Categories,
                    Tab::Settings => Screen::Settings,
                };
            }
            Widget::SelectDate => self.overlay = Some(Overlay::DateFilter(FilterDraft::for_selection(&self.filter))),
            Widget::AddRecord => self.screen = Screen::CategorySelection(CategoryType::Expense),
            Widget::RecordTile(id) => {
                if let Some((_, record)) = self.records.iter().find(|(rid, _)| *rid == id) {
                    self.screen = Screen::EditRecord(Editor::of(id, record));
                }
            }
            Widget::TypeTab(category_type) => {
                if let Screen::CategorySelection(tab) = &mut self.screen {
                    *tab = category_type;
                }
            }
            Widget::CategoryTile(category_type, name) => {
                self.screen = Screen::EditRecord(Editor::blank(category_type, name, self.today));
            }
            Widget::DateField => {
                if let Screen::EditRecord(editor) = &self.screen {
                    self.overlay = Some(Overlay::DatePicker {
                        input_mode: false,
                        text: format_date(editor.date),
                    });
                }
            }
            Widget::RepeatField => self.overlay = Some(Overlay::RepeatPicker),
            Widget::SaveButton => self.save(),
            Widget::DeleteButton => self.overlay = Some(Overlay::DeleteConfirm),
            Widget::Back => self.screen = Screen::Home,
            Widget::Mode(mode) => self.with_filter_draft(|d| d.mode = mode),
            Widget::MonthChip(m) => self.with_filter_draft(|d| d.month = Some(m)),
            Widget::YearChip(y) => self.with_filter_draft(|d| d.year = Some(y)),
            Widget::RangeInputToggle => self.with_filter_draft(|d| d.range_input = true),
            Widget::RangeCalendar => self.with_filter_draft(|d| d.range_input = false),
            Widget::RangeCancel | Widget::PickerCancel | Widget::ConfirmNo => self.overlay = None,
            Widget::PickerInputToggle => {
                if let Some(Overlay::DatePicker { input_mode, .. }) = &mut self.overlay {
                    *input_mode = !*input_mode;
                }
            }
            Widget::RepeatChoice(option) => {
                if let Screen::EditRecord(editor) = &mut self.screen {
                    editor.repeat_option = option;
                }
                self.overlay = None;
            }
            Widget::ConfirmYes => self.delete_current(),
            Widget::Ok => self.confirm_overlay(),
            Widget::Statistics
            | Widget::ThreeDots
            | Widget::DateText
            | Widget::AmountField
            | Widget::NameField
            | Widget::CategoryField
            | Widget::NoteField
            | Widget::RangeStart
            | Widget::RangeEnd
            | Widget::PickerInput => {}
        }
    }

    fn with_filter_draft(&mut self, change: impl FnOnce(&mut FilterDraft)) {
        if let Some(Overlay::DateFilter(draft)) = &mut self.overlay {
            change(draft);
        }
    }

    fn confirm_overlay(&mut self) {
        match self.overlay.take() {
            Some(Overlay::DateFilter(draft)) => {
                let chosen = match draft.mode {
                    FilterMode::Month => draft
                        .month
                        .and_then(|m| u8::try_from(m).ok())
                        .and_then(|m| Month::try_from(m).ok())
                        .map(|month| DateRangeSelection::Month {
                            year: self.filter.anchor_year(),
                            month,
                        }),
                    FilterMode::Year => draft.year.map(DateRangeSelection::year),
                    FilterMode::DateRange => match (parse_input_date(&draft.start), parse_input_date(&draft.end)) {
                        (Some(start), Some(end)) => Some(DateRangeSelection::custom(start, end)),
                        _ => None,
                    },
                };
                if let Some(selection) = chosen {
                    debug!(?selection, "filter applied");
                    self.filter = selection;
                }
            }
            Some(Overlay::DatePicker { input_mode, text }) => {
                if !input_mode {
                    return;
                }
                match (parse_input_date(&text), &mut self.screen) {
                    (Some(date), Screen::EditRecord(editor)) => editor.date = date,
                    // invalid input keeps the picker open
                    _ => self.overlay = Some(Overlay::DatePicker { input_mode, text }),
                }
            }
            other => self.overlay = other,
        }
    }

    fn save(&mut self) {
        let Screen::EditRecord(editor) = &self.screen else {
            return;
        };
        let Some(record) = editor.to_record() else {
            debug!(amount = %editor.amount, "save ignored: invalid amount");
            return;
        };
        let existing = editor.existing;
        match existing {
            Some(id) => {
                if let Some(slot) = self.records.iter_mut().find(|(rid, _)| *rid == id) {
                    slot.1 = record;
                }
            }
            None => self.insert(record),
        }
        self.screen = Screen::Home;
    }

    fn delete_current(&mut self) {
        self.overlay = None;
        if let Screen::EditRecord(Editor { existing: Some(id), .. }) = &self.screen {
            let id = *id;
            self.records.retain(|(rid, _)| *rid != id);
        }
        self.screen = Screen::Home;
    }
}

impl Driver for SimulatedApp {
    fn find_element(&mut self, selector: &Selector) -> ProbeResult<Option<ElementHandle>> {
        Ok(self.find_elements(selector)?.into_iter().next())
    }

    fn find_elements(&mut self, selector: &Selector) -> ProbeResult<Vec<ElementHandle>> {
        self.ensure_open()?;
        let nodes = self.render();
        let found: Vec<ElementHandle> = matching(&nodes, selector)
            .into_iter()
            .map(|i| ElementHandle::new(self.element_id(&nodes[i].widget), selector.clone()))
            .collect();
        Ok(found)
    }

    fn click(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.ensure_open()?;
        let node = self.resolve(element)?;
        self.activate(node.widget);
        Ok(())
    }

    fn clear(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.ensure_open()?;
        self.edit_text(element, String::clear)
    }

    fn send_keys(&mut self, element: &ElementHandle, text: &str) -> ProbeResult<()> {
        self.ensure_open()?;
        self.edit_text(element, |current| current.push_str(text))
    }

    fn text(&mut self, element: &ElementHandle) -> ProbeResult<String> {
        self.ensure_open()?;
        Ok(self.resolve(element)?.text)
    }

    fn attribute(&mut self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>> {
        self.ensure_open()?;
        let node = self.resolve(element)?;
        Ok(match name {
            CONTENT_DESC => node.desc,
            HINT => node.hint,
            "resource-id" => node.resource_id.map(str::to_string),
            "class" => Some(node.class.to_string()),
            "text" => Some(node.text),
            "displayed" => Some("true".to_string()),
            _ => None,
        })
    }

    fn is_displayed(&mut self, element: &ElementHandle) -> ProbeResult<bool> {
        self.ensure_open()?;
        Ok(self.resolve(element).is_ok())
    }

    fn quit(&mut self) -> ProbeResult<()> {
        if !self.closed {
            debug!("simulated session closed");
        }
        self.closed = true;
        Ok(())
    }
}
