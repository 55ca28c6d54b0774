//! The clock-face time picker component.

use crate::ampm::infer_from_hour;
use crate::debounce::{Debouncer, DEFAULT_DELAY};
use crate::field::Field;
use crate::format::TimeFormat;
use crate::ring::{self, BaseView, ViewMode, RING_SIZE, SLOTS};
use crate::time::{AmPm, TimeValue};
use chrono::{Local, NaiveTime};
use clockface_core::{Command, Component};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use std::time::Duration;
use tracing::{debug, trace};
use unicode_width::UnicodeWidthStr;

const CELL_WIDTH: u16 = 4;
const FACE_WIDTH: u16 = CELL_WIDTH * 5;
const FACE_HEIGHT: u16 = 5;
const CENTER_WIDTH: u16 = CELL_WIDTH * 3;

/// Picker configuration.
#[derive(Debug, Clone)]
pub struct ClockfaceOptions {
    /// Output template, see [`TimeFormat`]. Default `H:mm`.
    pub format: String,
    /// Toggle label for the am bucket (12-hour formats only). Default `AM`.
    pub am_label: String,
    /// Toggle label for the pm bucket (12-hour formats only). Default `PM`.
    pub pm_label: String,
    /// Pause after the last keystroke before a typed value is acted on.
    pub debounce: Duration,
}

impl Default for ClockfaceOptions {
    fn default() -> Self {
        Self {
            format: "H:mm".to_string(),
            am_label: "AM".to_string(),
            pm_label: "PM".to_string(),
            debounce: DEFAULT_DELAY,
        }
    }
}

impl ClockfaceOptions {
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_labels(mut self, am: impl Into<String>, pm: impl Into<String>) -> Self {
        self.am_label = am.into();
        self.pm_label = pm.into();
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }
}

/// Style configuration for the picker.
#[derive(Debug, Clone)]
pub struct ClockfaceStyle {
    /// Base style of every dial value.
    pub cell: Style,
    /// Style of the highlighted dial value.
    pub active_cell: Style,
    /// Accent patched onto dial values while hours are shown.
    pub hour_accent: Style,
    /// Accent patched onto dial values while minutes are shown.
    pub minute_accent: Style,
    /// Style of the am/pm toggle label.
    pub toggle: Style,
    /// Style of the hour and minute fields.
    pub field: Style,
    /// Style of the field being edited while the picker has focus.
    pub focused_field: Style,
}

impl Default for ClockfaceStyle {
    fn default() -> Self {
        Self {
            cell: Style::default(),
            active_cell: Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
            hour_accent: Style::default().fg(Color::Cyan),
            minute_accent: Style::default().fg(Color::Magenta),
            toggle: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
            field: Style::default().add_modifier(Modifier::BOLD),
            focused_field: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// Which text field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveField {
    Hour,
    Minute,
}

impl ActiveField {
    fn view(self) -> BaseView {
        match self {
            ActiveField::Hour => BaseView::Hour,
            ActiveField::Minute => BaseView::Minute,
        }
    }
}

/// Messages for the picker.
#[derive(Debug, Clone)]
pub enum Message {
    /// A keyboard event. Ignored unless the picker has focus.
    KeyPress(KeyEvent),
    /// A mouse event, hit-tested against the last drawn face.
    Mouse(MouseEvent),
    /// Move editing to the hour field and show the hour dial.
    FocusHour,
    /// Move editing to the minute field and show the minute dial.
    FocusMinute,
    /// Debounce timer for the hour field fired.
    HourSettled(u64),
    /// Debounce timer for the minute field fired.
    MinuteSettled(u64),
    /// Select the value at a dial position.
    ClickCell(usize),
    /// Flip the am/pm bucket. Ignored while the toggle is hidden.
    ToggleAmPm,
    /// Apply a new time.
    SetTime(TimeValue),
    /// Emitted with the formatted time after the selection changes.
    Changed(String),
    /// Emitted with the formatted time when Enter is pressed.
    Submit(String),
}

#[derive(Debug, Clone, Copy, Default)]
struct FaceLayout {
    cells: [Rect; RING_SIZE],
    ampm: Rect,
    hour: Rect,
    colon: Rect,
    minute: Rect,
}

/// A clock-face time picker.
///
/// Twelve dial positions surround an `hour:minute` pair of fields and an
/// am/pm toggle. Editing the hour shows an hour dial (`0-11` or `12-23`, or
/// `0-11` / `12,1-11` for 12-hour formats); editing the minute shows
/// `00-55` in steps of five. Picking a dial value writes it into the field
/// being shown; typing into a field highlights the matching dial value once
/// typing pauses.
///
/// # Example
///
/// ```ignore
/// let mut picker = Clockface::new(
///     ClockfaceOptions::default().with_format("hh:mm A"),
/// );
/// picker.show("9:05 p");
/// picker.focus();
/// assert_eq!(picker.get_time(), "09:05 PM");
///
/// // In the parent's update:  picker.update(msg).map(AppMsg::Picker)
/// // In the parent's view:    picker.view(frame, area)
/// ```
pub struct Clockface {
    format: TimeFormat,
    am_label: String,
    pm_label: String,
    hour: Field,
    minute: Field,
    ampm: AmPm,
    view_mode: Option<ViewMode>,
    group: BaseView,
    ring: [u32; RING_SIZE],
    labels: [String; RING_SIZE],
    highlighted: Option<usize>,
    ampm_visible: bool,
    active: ActiveField,
    focus: bool,
    shown: bool,
    hour_debounce: Debouncer,
    minute_debounce: Debouncer,
    hour_edited: bool,
    minute_edited: bool,
    clock: fn() -> NaiveTime,
    style: ClockfaceStyle,
    block: Option<Block<'static>>,
    layout: Cell<Option<FaceLayout>>,
}

fn system_clock() -> NaiveTime {
    Local::now().time()
}

impl Clockface {
    /// Create a picker seeded with the current wall-clock time.
    ///
    /// The 12/24-hour mode is fixed here from the format; build a new picker
    /// to change it. 24-hour pickers label the toggle `0-11` / `12-23`
    /// instead of the configured am/pm labels.
    pub fn new(options: ClockfaceOptions) -> Self {
        let format = TimeFormat::parse(options.format);
        let (am_label, pm_label) = if format.is_24() {
            ("0-11".to_string(), "12-23".to_string())
        } else {
            (options.am_label, options.pm_label)
        };

        let mut picker = Self {
            format,
            am_label,
            pm_label,
            hour: Field::new(),
            minute: Field::new(),
            ampm: AmPm::Am,
            view_mode: None,
            group: BaseView::Hour,
            ring: [0; RING_SIZE],
            labels: Default::default(),
            highlighted: None,
            ampm_visible: true,
            active: ActiveField::Hour,
            focus: false,
            shown: false,
            hour_debounce: Debouncer::new(options.debounce),
            minute_debounce: Debouncer::new(options.debounce),
            hour_edited: false,
            minute_edited: false,
            clock: system_clock,
            style: ClockfaceStyle::default(),
            block: None,
            layout: Cell::new(None),
        };
        picker.set_time(TimeValue::Now);
        picker
    }

    /// Replace the wall-clock source and reseed the time from it.
    pub fn with_clock(mut self, clock: fn() -> NaiveTime) -> Self {
        self.clock = clock;
        self.set_time(TimeValue::Now);
        self
    }

    /// Set custom styles.
    pub fn with_style(mut self, style: ClockfaceStyle) -> Self {
        self.style = style;
        self
    }

    /// Wrap the face in the given block (border/title).
    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    /// Mount the face and apply `value`. Nothing is drawn before the first call.
    pub fn show(&mut self, value: impl Into<TimeValue>) {
        self.shown = true;
        self.set_time(value);
    }

    /// Whether [`show`](Clockface::show) has been called.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Parse and apply a time, then switch to the hour dial.
    ///
    /// Never fails: text that does not parse resolves to the current hour,
    /// minute `00`, am. In 12-hour mode an hour up to 11 takes its bucket
    /// from the value's am/pm letter; every other hour goes through the same
    /// inference as a typed hour.
    pub fn set_time(&mut self, value: impl Into<TimeValue>) {
        let parsed = value.into().resolve((self.clock)());
        debug!(hour = parsed.hour, minute = parsed.minute, ampm = %parsed.ampm, "time set");

        self.hour.set_value(&parsed.hour.to_string());
        self.minute.set_value(&parsed.minute_text());

        if !self.format.is_24() && parsed.hour <= 11 {
            self.set_am_pm(parsed.ampm);
        } else {
            self.set_am_pm_by_hour();
        }
        self.focus_field(ActiveField::Hour);
    }

    /// The fields formatted with the configured template.
    pub fn get_time(&self) -> String {
        self.format
            .format(self.hour.number(), self.minute.number(), self.ampm)
    }

    /// The selection as a 24-hour time of day, if both fields hold a valid value.
    ///
    /// 12-hour pickers read `12` in the am bucket as midnight.
    pub fn time(&self) -> Option<NaiveTime> {
        let hour = self.hour.number()?;
        let minute = self.minute.number()?;
        let hour = match (self.format.is_24(), self.ampm, hour) {
            (false, AmPm::Pm, h) if h < 12 => h + 12,
            (false, AmPm::Am, 12) => 0,
            (_, _, h) => h,
        };
        NaiveTime::from_hms_opt(hour, minute, 0)
    }

    /// Give the picker keyboard focus.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Remove keyboard focus.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn format(&self) -> &TimeFormat {
        &self.format
    }

    pub fn ampm(&self) -> AmPm {
        self.ampm
    }

    /// Current toggle text.
    pub fn ampm_label(&self) -> &str {
        match self.ampm {
            AmPm::Am => &self.am_label,
            AmPm::Pm => &self.pm_label,
        }
    }

    /// Whether the toggle is drawn. 24-hour pickers hide it on the minute dial.
    pub fn ampm_visible(&self) -> bool {
        self.ampm_visible
    }

    /// The dial currently shown, `None` before the first render.
    pub fn view_mode(&self) -> Option<ViewMode> {
        self.view_mode
    }

    pub fn active_field(&self) -> ActiveField {
        self.active
    }

    pub fn hour_text(&self) -> String {
        self.hour.value()
    }

    pub fn minute_text(&self) -> String {
        self.minute.value()
    }

    /// Values on the dial, in position order.
    pub fn ring_values(&self) -> &[u32; RING_SIZE] {
        &self.ring
    }

    /// Text on the dial, in position order.
    pub fn ring_labels(&self) -> &[String; RING_SIZE] {
        &self.labels
    }

    /// Position of the highlighted value, if the field's value is on the dial.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Refill the dial if the view changed, then re-highlight the field value.
    fn render(&mut self, view: BaseView) {
        let is_24 = self.format.is_24();
        let mode = ViewMode::resolve(view, self.ampm);

        if self.view_mode != Some(mode) {
            self.view_mode = Some(mode);
            self.group = view;
            self.ring = ring::values(mode, is_24);
            self.labels = ring::labels(mode, &self.ring);
            trace!(mode = mode.key(), "dial refilled");
        }

        let value = match mode.base() {
            BaseView::Hour => self.hour.number(),
            BaseView::Minute => self.minute.number(),
        };
        self.highlighted = value.and_then(|v| ring::position_of(&self.ring, v));

        if is_24 {
            self.ampm_visible = mode != ViewMode::Minute;
        }
    }

    fn focus_field(&mut self, field: ActiveField) {
        self.active = field;
        self.render(field.view());
    }

    /// The field the shown dial writes into.
    fn dial_target(&self) -> ActiveField {
        match self.view_mode {
            Some(ViewMode::Minute) => ActiveField::Minute,
            _ => ActiveField::Hour,
        }
    }

    fn set_am_pm(&mut self, ampm: AmPm) {
        if ampm == self.ampm {
            return;
        }
        self.ampm = ampm;
        debug!(ampm = %ampm, label = self.ampm_label(), "bucket changed");
    }

    fn set_am_pm_by_hour(&mut self) {
        let Some(hour) = self.hour.number() else {
            return;
        };
        let inference = infer_from_hour(hour, self.format.is_24(), self.ampm);
        if let Some(rewrite) = inference.rewrite {
            self.hour.set_value(&rewrite.to_string());
        }
        self.set_am_pm(inference.ampm);
    }

    fn click_cell(&mut self, index: usize) -> Command<Message> {
        let Some(label) = self.labels.get(index).cloned() else {
            return Command::none();
        };
        let target = self.dial_target();
        match target {
            ActiveField::Hour => self.hour.set_value(&label),
            ActiveField::Minute => self.minute.set_value(&label),
        }
        self.focus_field(target);
        self.changed()
    }

    /// Flip the bucket from the toggle. A hidden toggle cannot be used.
    fn click_am_pm(&mut self) -> Command<Message> {
        if !self.ampm_visible {
            return Command::none();
        }
        self.set_am_pm(self.ampm.toggled());
        self.focus_field(self.dial_target());
        self.changed()
    }

    fn changed(&self) -> Command<Message> {
        Command::message(Message::Changed(self.get_time()))
    }

    fn settled(&self, edited: bool) -> Command<Message> {
        if edited {
            self.changed()
        } else {
            Command::none()
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if key.kind == KeyEventKind::Release {
            return Command::none();
        }
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                let next = match self.active {
                    ActiveField::Hour => ActiveField::Minute,
                    ActiveField::Minute => ActiveField::Hour,
                };
                self.focus_field(next);
                Command::none()
            }
            KeyCode::Up => self.click_cell(ring::step(self.highlighted, 1)),
            KeyCode::Down => self.click_cell(ring::step(self.highlighted, -1)),
            KeyCode::Char(' ') => self.click_am_pm(),
            KeyCode::Enter => Command::message(Message::Submit(self.get_time())),
            _ => match self.active {
                ActiveField::Hour => {
                    self.hour_edited |= self.hour.handle_key(key);
                    self.hour_debounce.schedule(Message::HourSettled)
                }
                ActiveField::Minute => {
                    self.minute_edited |= self.minute.handle_key(key);
                    self.minute_debounce.schedule(Message::MinuteSettled)
                }
            },
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Command<Message> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Command::none();
        }
        let Some(layout) = self.layout.get() else {
            return Command::none();
        };
        let pos = Position::new(mouse.column, mouse.row);

        if let Some(index) = layout.cells.iter().position(|r| r.contains(pos)) {
            return self.click_cell(index);
        }
        if self.ampm_visible && layout.ampm.contains(pos) {
            return self.click_am_pm();
        }
        if layout.hour.contains(pos) {
            self.focus_field(ActiveField::Hour);
        } else if layout.minute.contains(pos) {
            self.focus_field(ActiveField::Minute);
        }
        Command::none()
    }

    fn field_style(&self, field: ActiveField) -> Style {
        if self.focus && self.active == field {
            self.style.field.patch(self.style.focused_field)
        } else {
            self.style.field
        }
    }
}

/// Place the 5 x 5 face in the middle of `area`, clipped to it.
fn face_layout(area: Rect, label_width: u16) -> FaceLayout {
    let x0 = area.x + area.width.saturating_sub(FACE_WIDTH) / 2;
    let y0 = area.y + area.height.saturating_sub(FACE_HEIGHT) / 2;
    let clip = |r: Rect| r.intersection(area);

    let cells =
        SLOTS.map(|(row, col)| clip(Rect::new(x0 + col * CELL_WIDTH, y0 + row, CELL_WIDTH, 1)));
    let label_width = label_width.clamp(1, CENTER_WIDTH);
    let center_x = x0 + CELL_WIDTH;

    FaceLayout {
        cells,
        ampm: clip(Rect::new(
            center_x + (CENTER_WIDTH - label_width) / 2,
            y0 + 1,
            label_width,
            1,
        )),
        hour: clip(Rect::new(x0 + 7, y0 + 2, 2, 1)),
        colon: clip(Rect::new(x0 + 9, y0 + 2, 1, 1)),
        minute: clip(Rect::new(x0 + 10, y0 + 2, 2, 1)),
    }
}

fn draw(frame: &mut Frame, rect: Rect, span: Span<'_>, alignment: Alignment) {
    if rect.is_empty() {
        return;
    }
    frame.render_widget(Paragraph::new(Line::from(span)).alignment(alignment), rect);
}

impl Component for Clockface {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::KeyPress(_) => Command::none(),
            Message::Mouse(mouse) => self.handle_mouse(mouse),
            Message::FocusHour => {
                self.focus_field(ActiveField::Hour);
                Command::none()
            }
            Message::FocusMinute => {
                self.focus_field(ActiveField::Minute);
                Command::none()
            }
            Message::HourSettled(generation) => {
                if !self.hour_debounce.settle(generation) {
                    trace!(generation, "stale hour tick");
                    return Command::none();
                }
                self.set_am_pm_by_hour();
                self.render(self.active.view());
                let edited = std::mem::take(&mut self.hour_edited);
                self.settled(edited)
            }
            Message::MinuteSettled(generation) => {
                if !self.minute_debounce.settle(generation) {
                    trace!(generation, "stale minute tick");
                    return Command::none();
                }
                self.render(self.active.view());
                let edited = std::mem::take(&mut self.minute_edited);
                self.settled(edited)
            }
            Message::ClickCell(index) => self.click_cell(index),
            Message::ToggleAmPm => self.click_am_pm(),
            Message::SetTime(value) => {
                self.set_time(value);
                self.changed()
            }
            Message::Changed(_) | Message::Submit(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if !self.shown || area.width == 0 || area.height == 0 {
            self.layout.set(None);
            return;
        }

        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            frame.render_widget(block.clone(), area);
            inner
        } else {
            area
        };

        let label = self.ampm_label();
        let layout = face_layout(inner, label.width().min(u16::MAX as usize) as u16);
        self.layout.set(Some(layout));

        let accent = match self.group {
            BaseView::Hour => self.style.hour_accent,
            BaseView::Minute => self.style.minute_accent,
        };
        for (i, rect) in layout.cells.iter().enumerate() {
            let style = if self.highlighted == Some(i) {
                self.style.active_cell
            } else {
                self.style.cell.patch(accent)
            };
            draw(frame, *rect, Span::styled(self.labels[i].as_str(), style), Alignment::Center);
        }

        if self.ampm_visible {
            draw(frame, layout.ampm, Span::styled(label, self.style.toggle), Alignment::Center);
        }

        let hour = self.hour.value();
        let minute = self.minute.value();
        let placeholder = |s: String| if s.is_empty() { "--".to_string() } else { s };
        draw(
            frame,
            layout.hour,
            Span::styled(placeholder(hour), self.field_style(ActiveField::Hour)),
            Alignment::Right,
        );
        draw(frame, layout.colon, Span::raw(":"), Alignment::Left);
        draw(
            frame,
            layout.minute,
            Span::styled(placeholder(minute), self.field_style(ActiveField::Minute)),
            Alignment::Left,
        );
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clockface_core::testing::TestHarness;
    use crossterm::event::KeyModifiers;

    fn four_twenty() -> NaiveTime {
        NaiveTime::from_hms_opt(16, 20, 0).unwrap()
    }

    fn picker(format: &str) -> Clockface {
        Clockface::new(ClockfaceOptions::default().with_format(format)).with_clock(four_twenty)
    }

    fn shown(format: &str, value: &str) -> TestHarness<Clockface> {
        let mut p = picker(format);
        p.show(value);
        p.focus();
        TestHarness::new(p)
    }

    fn key(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Message {
        Message::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn twenty_four_hour_scenario() {
        let h = shown("H:mm", "14:30");
        let p = h.component();
        assert!(p.format().is_24());
        assert_eq!(p.ampm(), AmPm::Pm);
        assert_eq!(p.view_mode(), Some(ViewMode::HourPm));
        assert_eq!(p.highlighted(), Some(4));
        assert_eq!(p.get_time(), "14:30");
    }

    #[test]
    fn twelve_hour_scenario() {
        let h = shown("hh:mm A", "9:05 p");
        let p = h.component();
        assert_eq!(p.hour_text(), "9");
        assert_eq!(p.minute_text(), "05");
        assert_eq!(p.ampm(), AmPm::Pm);
        assert_eq!(p.ampm_label(), "PM");
        assert_eq!(p.get_time(), "09:05 PM");
        assert_eq!(p.time(), NaiveTime::from_hms_opt(21, 5, 0));
    }

    #[test]
    fn clicking_twelve_on_pm_dial() {
        let mut h = shown("h:mm a", "3:00 p");
        assert_eq!(h.component().view_mode(), Some(ViewMode::HourPm));
        assert_eq!(h.component().ring_labels()[1], "12");

        h.send(Message::ClickCell(1));
        let p = h.component();
        assert_eq!(p.hour_text(), "12");
        assert_eq!(p.ampm(), AmPm::Pm);
        assert_eq!(p.highlighted(), Some(1));
        assert_eq!(p.get_time(), "12:00 pm");
        assert!(matches!(h.pending(), [Message::Changed(t)] if t == "12:00 pm"));
    }

    #[test]
    fn clicking_minute_writes_padded_label() {
        let mut h = shown("H:mm", "8:40");
        h.send(Message::FocusMinute);
        h.send(Message::ClickCell(2));
        let p = h.component();
        assert_eq!(p.minute_text(), "05");
        assert_eq!(p.active_field(), ActiveField::Minute);
        assert_eq!(p.get_time(), "8:05");
    }

    #[test]
    fn rapid_keystrokes_settle_once_with_last_value() {
        let mut h = shown("H:mm", "9:00");
        assert_eq!(h.component().ampm(), AmPm::Am);

        for code in [KeyCode::Backspace, KeyCode::Char('1'), KeyCode::Char('5')] {
            h.send(key(code));
        }
        assert_eq!(h.deferred(), 3);
        assert_eq!(h.component().hour_text(), "15");

        h.send(Message::HourSettled(1));
        h.send(Message::HourSettled(2));
        assert_eq!(h.component().ampm(), AmPm::Am);
        assert_eq!(h.component().view_mode(), Some(ViewMode::HourAm));
        assert!(h.pending().is_empty());

        h.send(Message::HourSettled(3));
        let p = h.component();
        assert_eq!(p.ampm(), AmPm::Pm);
        assert_eq!(p.view_mode(), Some(ViewMode::HourPm));
        assert_eq!(p.highlighted(), ring::position_of(p.ring_values(), 15));
        assert_eq!(h.pending().len(), 1);
    }

    #[test]
    fn typed_afternoon_hour_folds_in_twelve_hour_mode() {
        let mut h = shown("h:mm a", "1:00 a");
        h.send(key(KeyCode::Backspace));
        h.send(key(KeyCode::Char('1')));
        h.send(key(KeyCode::Char('3')));
        h.send(Message::HourSettled(3));
        let p = h.component();
        assert_eq!(p.hour_text(), "1");
        assert_eq!(p.ampm(), AmPm::Pm);
        assert_eq!(p.get_time(), "1:00 pm");
    }

    #[test]
    fn typed_twenty_four_becomes_zero() {
        let mut h = shown("H:mm", "23:00");
        h.send(key(KeyCode::Backspace));
        h.send(key(KeyCode::Backspace));
        h.send(key(KeyCode::Char('2')));
        h.send(key(KeyCode::Char('4')));
        h.send(Message::HourSettled(4));
        let p = h.component();
        assert_eq!(p.hour_text(), "0");
        assert_eq!(p.ampm(), AmPm::Am);
        assert_eq!(p.highlighted(), Some(1));
    }

    #[test]
    fn minute_keystrokes_do_not_touch_bucket() {
        let mut h = shown("H:mm", "14:30");
        h.send(key(KeyCode::Tab));
        h.send(key(KeyCode::Backspace));
        h.send(key(KeyCode::Char('5')));
        h.send(Message::MinuteSettled(2));
        let p = h.component();
        assert_eq!(p.minute_text(), "35");
        assert_eq!(p.ampm(), AmPm::Pm);
        assert_eq!(p.highlighted(), ring::position_of(p.ring_values(), 35));
    }

    #[test]
    fn keys_are_ignored_without_focus() {
        let mut p = picker("H:mm");
        p.show("10:10");
        let mut h = TestHarness::new(p);
        h.send(key(KeyCode::Char('1')));
        assert_eq!(h.deferred(), 0);
        assert_eq!(h.component().hour_text(), "10");
    }

    #[test]
    fn toggle_switches_hour_dial() {
        let mut h = shown("h:mm a", "4:15 a");
        assert_eq!(h.component().view_mode(), Some(ViewMode::HourAm));
        h.send(Message::ToggleAmPm);
        let p = h.component();
        assert_eq!(p.ampm(), AmPm::Pm);
        assert_eq!(p.ampm_label(), "PM");
        assert_eq!(p.view_mode(), Some(ViewMode::HourPm));
        assert_eq!(p.get_time(), "4:15 pm");
    }

    #[test]
    fn twenty_four_hour_toggle_hides_on_minutes() {
        let mut h = shown("H:mm", "7:45");
        assert_eq!(h.component().ampm_label(), "0-11");
        assert!(h.component().ampm_visible());

        h.send(Message::FocusMinute);
        assert!(!h.component().ampm_visible());

        h.send(key(KeyCode::Char(' ')));
        h.send(Message::ToggleAmPm);
        let p = h.component();
        assert_eq!(p.ampm(), AmPm::Am);
        assert_eq!(p.ampm_label(), "0-11");
        assert_eq!(p.view_mode(), Some(ViewMode::Minute));
        assert!(h.pending().is_empty());

        h.send(Message::FocusHour);
        assert!(h.component().ampm_visible());
        assert_eq!(h.component().view_mode(), Some(ViewMode::HourAm));
        assert_eq!(h.component().highlighted(), ring::position_of(h.component().ring_values(), 7));

        h.send(key(KeyCode::Char(' ')));
        let p = h.component();
        assert_eq!(p.ampm(), AmPm::Pm);
        assert_eq!(p.ampm_label(), "12-23");
        assert_eq!(p.view_mode(), Some(ViewMode::HourPm));
        assert_eq!(p.highlighted(), None);
        assert_eq!(p.get_time(), "7:45");
    }

    #[test]
    fn tab_shows_minute_dial() {
        let mut h = shown("H:mm", "14:30");
        h.send(key(KeyCode::Tab));
        let p = h.component();
        assert_eq!(p.active_field(), ActiveField::Minute);
        assert_eq!(p.view_mode(), Some(ViewMode::Minute));
        assert_eq!(p.highlighted(), Some(10));
    }

    #[test]
    fn arrows_walk_the_dial() {
        let mut h = shown("H:mm", "14:30");
        h.send(key(KeyCode::Up));
        assert_eq!(h.component().hour_text(), "15");
        h.send(key(KeyCode::Down));
        h.send(key(KeyCode::Down));
        assert_eq!(h.component().hour_text(), "13");
    }

    #[test]
    fn enter_submits_formatted_time() {
        let mut h = shown("HH:mm", "6:07");
        h.send(key(KeyCode::Enter));
        assert!(matches!(h.pending(), [Message::Submit(t)] if t == "06:07"));
    }

    #[test]
    fn unparsed_text_uses_clock_hour() {
        let h = shown("H:mm", "soon");
        let p = h.component();
        assert_eq!(p.hour_text(), "16");
        assert_eq!(p.minute_text(), "00");
        assert_eq!(p.get_time(), "16:00");
    }

    #[test]
    fn construction_seeds_from_clock() {
        let p = picker("HH:mm");
        assert_eq!(p.get_time(), "16:20");
        assert!(!p.is_shown());
    }

    #[test]
    fn structured_time_is_accepted() {
        let mut p = picker("h:mm a");
        p.set_time(NaiveTime::from_hms_opt(18, 5, 0).unwrap());
        assert_eq!(p.hour_text(), "6");
        assert_eq!(p.ampm(), AmPm::Pm);
        assert_eq!(p.get_time(), "6:05 pm");
    }

    #[test]
    fn out_of_range_values_are_kept_unhighlighted() {
        let h = shown("H:mm", "99:75");
        let p = h.component();
        assert_eq!(p.highlighted(), None);
        assert_eq!(p.get_time(), "99:75");
        assert_eq!(p.time(), None);
        assert!(h.render_string(20, 5).contains("99:75"));
    }

    #[test]
    fn eleven_keeps_previous_bucket_in_24h() {
        let mut h = shown("H:mm", "15:00");
        h.send(Message::SetTime("11:00".into()));
        let p = h.component();
        assert_eq!(p.ampm(), AmPm::Pm);
        assert_eq!(p.highlighted(), None);
    }

    #[test]
    fn round_trip_24h() {
        let mut p = picker("HH:mm");
        for hour in 0..24 {
            for minute in (0..60).step_by(7) {
                let text = format!("{hour:02}:{minute:02}");
                p.set_time(text.as_str());
                assert_eq!(p.get_time(), text);
            }
        }
    }

    #[test]
    fn round_trip_12h() {
        let mut p = picker("hh:mm a");
        let am = (0..12).map(|h| (h, "am"));
        let pm = (1..=12).map(|h| (h, "pm"));
        for (hour, bucket) in am.chain(pm) {
            for minute in [0, 5, 30, 59] {
                let text = format!("{hour:02}:{minute:02} {bucket}");
                p.set_time(text.as_str());
                assert_eq!(p.get_time(), text);
                assert_eq!(p.ampm().as_str(), bucket);
            }
        }
    }

    #[test]
    fn independent_instances() {
        let mut a = picker("H:mm");
        let mut b = picker("H:mm");
        a.set_time("20:00");
        b.set_time("3:00");
        assert_eq!(a.ampm(), AmPm::Pm);
        assert_eq!(b.ampm(), AmPm::Am);
    }

    #[test]
    fn renders_face() {
        let h = shown("H:mm", "14:30");
        let out = h.render_string(20, 5);
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows[0], "     23  12  13     ");
        assert_eq!(rows[1], " 22    12-23     14 ");
        assert_eq!(rows[2], " 21    14:30     15 ");
        assert_eq!(rows[4], "     19  18  17     ");
    }

    #[test]
    fn hidden_until_shown() {
        let p = picker("H:mm");
        let h = TestHarness::new(p);
        assert_eq!(h.render_string(20, 5).trim(), "");
    }

    #[test]
    fn mouse_clicks_hit_cells_and_toggle() {
        let mut h = shown("h:mm a", "2:00 p");
        let _ = h.render(20, 5);

        // Top-middle cell is position 1 ("12" on the pm dial).
        h.send(click(9, 0));
        assert_eq!(h.component().hour_text(), "12");

        // Toggle label sits in the centre of row 1.
        h.send(click(10, 1));
        assert_eq!(h.component().ampm(), AmPm::Am);

        // Minute field.
        h.send(click(11, 2));
        assert_eq!(h.component().active_field(), ActiveField::Minute);
    }

    #[test]
    fn late_hour_timer_keeps_minute_dial() {
        let mut h = shown("H:mm", "9:40");
        for code in [KeyCode::Backspace, KeyCode::Char('1'), KeyCode::Char('5')] {
            h.send(key(code));
        }
        h.send(key(KeyCode::Tab));
        h.send(Message::HourSettled(3));
        let p = h.component();
        assert_eq!(p.ampm(), AmPm::Pm);
        assert_eq!(p.active_field(), ActiveField::Minute);
        assert_eq!(p.view_mode(), Some(ViewMode::Minute));

        h.send(Message::ClickCell(2));
        let p = h.component();
        assert_eq!(p.hour_text(), "15");
        assert_eq!(p.minute_text(), "05");
        assert_eq!(p.active_field(), ActiveField::Minute);
    }

    #[test]
    fn late_minute_timer_keeps_hour_dial() {
        let mut h = shown("H:mm", "14:30");
        h.send(key(KeyCode::Tab));
        h.send(key(KeyCode::Backspace));
        h.send(key(KeyCode::Tab));
        h.send(Message::MinuteSettled(1));
        let p = h.component();
        assert_eq!(p.active_field(), ActiveField::Hour);
        assert_eq!(p.view_mode(), Some(ViewMode::HourPm));
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_timers_deliver_only_the_last_keystroke() {
        let mut h = shown("H:mm", "9:00");
        for code in [KeyCode::Backspace, KeyCode::Char('1'), KeyCode::Char('5')] {
            h.send(key(code));
        }
        assert_eq!(h.component().ampm(), AmPm::Am);

        let start = tokio::time::Instant::now();
        assert_eq!(h.run_deferred().await, 3);
        assert!(start.elapsed() >= DEFAULT_DELAY);

        let p = h.component();
        assert_eq!(p.ampm(), AmPm::Pm);
        assert_eq!(p.view_mode(), Some(ViewMode::HourPm));
        assert_eq!(p.highlighted(), ring::position_of(p.ring_values(), 15));
        assert!(matches!(h.pending(), [Message::Changed(t)] if t == "15:00"));
    }

    #[tokio::test(start_paused = true)]
    async fn cursor_keys_settle_without_change_notice() {
        let mut h = shown("H:mm", "14:30");
        h.send(key(KeyCode::Tab));
        for code in [KeyCode::Left, KeyCode::Home, KeyCode::Char('x'), KeyCode::End] {
            h.send(key(code));
        }
        assert_eq!(h.run_deferred().await, 4);
        let p = h.component();
        assert_eq!(p.minute_text(), "30");
        assert_eq!(p.highlighted(), Some(10));
        assert!(h.pending().is_empty());
    }

    #[test]
    fn twelve_in_am_bucket_is_midnight() {
        let mut h = shown("h:mm a", "12:15 p");
        assert_eq!(h.component().time(), NaiveTime::from_hms_opt(12, 15, 0));
        h.send(Message::ToggleAmPm);
        let p = h.component();
        assert_eq!(p.ampm(), AmPm::Am);
        assert_eq!(p.get_time(), "12:15 am");
        assert_eq!(p.time(), NaiveTime::from_hms_opt(0, 15, 0));
    }
}
