use super::{
    calendar::CalendarPane,
    input::{amount_input::AmountInput, note_input::NoteInput},
    list::entries::EntryList,
    Component,
};
use crate::{
    app::AppFocus,
    config::Config,
    model::{
        entry::{EntryStore, LogEntry},
        profile::ProfileManager,
    },
    persistence::PersistedComponent,
    system::{
        command::{Command, CommandGroup},
        event::Event,
        message::{AppAction, JournalAction, Message},
        relay::ViewRelay,
        signal::SignalQueue,
    },
    utils::units::Measurement,
};
use chrono::{Local, NaiveDate};
use ratatui::{
    prelude::*,
    widgets::{Block, Clear},
};
use serde::{Deserialize, Serialize};
use std::{cell::Cell, rc::Rc};

/// The day-key convention shared by the screens on either side of the relay.
/// The relay itself never interprets the keys.
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JournalScrFocus {
    #[default]
    Calendar,
    EntryList,
    AmountIn,
    NoteIn,
}

/// The main screen: a month calendar next to the selected day's entries,
/// with an overlay form for new entries. While focused it also polls the
/// relay for day requests filed by other parts of the app.
#[derive(Debug)]
pub struct JournalScreen {
    focus: Rc<Cell<AppFocus>>,
    relay: ViewRelay,
    store: EntryStore,
    calendar: CalendarPane,
    entry_list: EntryList,
    amount_input: AmountInput,
    note_input: NoteInput,
}

impl Default for JournalScreen {
    fn default() -> Self {
        let focus = Rc::new(Cell::new(AppFocus::JournalScr(JournalScrFocus::default())));
        let cursor_pos = Rc::new(Cell::new((0, 0)));
        let store = EntryStore::default();

        Self {
            calendar: CalendarPane::new(focus.clone(), store.clone(), Config::default()),
            entry_list: EntryList::new(
                focus.clone(),
                store.clone(),
                ProfileManager::default(),
                Config::default(),
            ),
            amount_input: AmountInput::new(focus.clone(), cursor_pos.clone()),
            note_input: NoteInput::new(focus.clone(), cursor_pos),
            relay: ViewRelay::default(),
            store,
            focus,
        }
    }
}

impl JournalScreen {
    pub fn new(
        focus: Rc<Cell<AppFocus>>,
        relay: ViewRelay,
        store: EntryStore,
        profile: ProfileManager,
        config: Config,
        cursor_pos: Rc<Cell<(u16, u16)>>,
    ) -> Self {
        let calendar = CalendarPane::new(focus.clone(), store.clone(), config.clone());
        let entry_list = EntryList::new(focus.clone(), store.clone(), profile, config);
        let amount_input = AmountInput::new(focus.clone(), cursor_pos.clone());
        let note_input = NoteInput::new(focus.clone(), cursor_pos);

        Self {
            focus,
            relay,
            store,
            calendar,
            entry_list,
            amount_input,
            note_input,
        }
    }

    /// Narrows the shared `AppFocus` variable into the focus enum for this componenent
    fn internal_focus(&self) -> Option<JournalScrFocus> {
        match self.focus.get() {
            AppFocus::JournalScr(focus) => Some(focus),
            _ => None,
        }
    }

    /// Applies a day key taken from the relay. Keys that don't parse are
    /// reported and dropped; the relay has already forgotten them either way.
    fn apply_day_request(&self, date_key: &str, queue: &mut SignalQueue) {
        match NaiveDate::parse_from_str(date_key, DAY_KEY_FORMAT) {
            Ok(day) => {
                queue.push(Event::DaySelected(day));
                queue.push(Event::DayListOpened(day));
            }
            Err(_) => {
                tracing::warn!("Dropping day request with unusable key {date_key:?}");
                queue.push(Event::ErrorOccurred(format!(
                    "Could not show day \"{date_key}\"."
                )));
            }
        }
    }

    fn finish_entry(&mut self, queue: &mut SignalQueue) {
        let amount = self.amount_input.value().trim();
        let measure = if amount.is_empty() {
            None
        } else {
            match amount.parse::<Measurement>() {
                Ok(measure) => Some(measure),
                Err(err) => {
                    // leave the form up so the amount can be fixed
                    queue.push(Event::ErrorOccurred(err.to_string()));
                    self.note_input.stop_editing();
                    self.amount_input.focus();
                    self.amount_input.start_editing();
                    return;
                }
            }
        };

        let entry = LogEntry::new(
            self.calendar.selected_day(),
            Local::now().time(),
            measure,
            self.note_input.value().trim().to_string(),
        );

        self.note_input.stop_editing();
        self.entry_list.focus();
        queue.push(Event::EntryCreated(entry));
        queue.push(Message::to_app(AppAction::ExitRawMode));
    }

    fn cancel_entry(&mut self, queue: &mut SignalQueue) {
        self.amount_input.stop_editing();
        self.note_input.stop_editing();
        self.amount_input.clear();
        self.note_input.clear();
        self.entry_list.focus();
        queue.push(Event::FocusedChanged);
    }
}

impl Component for JournalScreen {
    fn commands(&self) -> Vec<CommandGroup> {
        match self.internal_focus() {
            Some(JournalScrFocus::Calendar) => self.calendar.commands(),
            Some(JournalScrFocus::EntryList) => self.entry_list.commands(),
            Some(JournalScrFocus::AmountIn) => self.amount_input.commands(),
            Some(JournalScrFocus::NoteIn) => self.note_input.commands(),
            None => vec![],
        }
    }

    fn handle_command(&mut self, command: &Command, queue: &mut SignalQueue) {
        match self.internal_focus() {
            Some(JournalScrFocus::Calendar) => self.calendar.handle_command(command, queue),
            Some(JournalScrFocus::EntryList) => self.entry_list.handle_command(command, queue),
            Some(JournalScrFocus::AmountIn) => self.amount_input.handle_command(command, queue),
            Some(JournalScrFocus::NoteIn) => self.note_input.handle_command(command, queue),
            None => {}
        }
    }

    fn handle_raw_event(&mut self, event: &crossterm::event::Event, queue: &mut SignalQueue) {
        match self.internal_focus() {
            Some(JournalScrFocus::AmountIn) => self.amount_input.handle_raw_event(event, queue),
            Some(JournalScrFocus::NoteIn) => self.note_input.handle_raw_event(event, queue),
            _ => {}
        }
    }

    fn handle_event(&mut self, event: &Event, queue: &mut SignalQueue) {
        match event {
            Event::Tick => {
                if self.is_focused() {
                    if let Some(date_key) = self.relay.take_day_list_request() {
                        self.apply_day_request(&date_key, queue);
                    }
                }
            }
            Event::ProfileLoaded(..) | Event::SetupCompleted(..) | Event::SummaryDayChosen(..) => {
                self.calendar.focus();
            }
            Event::DayListOpened(..) => {
                self.entry_list.focus();
                queue.push(Event::FocusedChanged);
            }
            Event::EntryCreationStarted => {
                self.amount_input.focus();
                self.amount_input.start_editing();
                queue.push(Message::to_app(AppAction::EnterRawMode));
            }
            Event::EntryCreated(entry) => {
                self.store.add(entry.clone()).unwrap_or_else(|_| {
                    queue.push(Event::ErrorOccurred(
                        "Could not save updated entries.".to_string(),
                    ));
                });
            }
            _ => {}
        }

        self.calendar.handle_event(event, queue);
        self.entry_list.handle_event(event, queue);
        self.amount_input.handle_event(event, queue);
        self.note_input.handle_event(event, queue);
    }

    fn handle_message(&mut self, message: &Message, queue: &mut SignalQueue) {
        match message.read_as_journal_scr() {
            Some(JournalAction::FocusNoteInput) => {
                self.amount_input.stop_editing();
                self.note_input.focus();
                self.note_input.start_editing();
            }
            Some(JournalAction::FinishEntry) => self.finish_entry(queue),
            Some(JournalAction::CancelEntry) => self.cancel_entry(queue),
            None => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(25), Constraint::Min(25)])
            .split(area);

        self.calendar.render(frame, content_layout[0]);
        self.entry_list.render(frame, content_layout[1]);

        // render new entry inputs in an overlay
        if matches!(
            self.internal_focus(),
            Some(JournalScrFocus::AmountIn | JournalScrFocus::NoteIn)
        ) {
            let overlay_layout = Layout::default()
                .constraints([Constraint::Fill(1)])
                .horizontal_margin(3)
                .vertical_margin(2)
                .split(area);
            let overlay = overlay_layout[0];

            let inputs_layout = Layout::default()
                .constraints(vec![
                    Constraint::Fill(1),
                    Constraint::Length(3),
                    Constraint::Fill(1),
                    Constraint::Length(3),
                    Constraint::Fill(1),
                ])
                .horizontal_margin(2)
                .split(overlay);

            frame.render_widget(Clear, overlay);
            let block = Block::bordered()
                .title(" New Entry ")
                .style(Style::default().green());
            frame.render_widget(block, overlay);

            self.amount_input.render(frame, inputs_layout[1]);
            self.note_input.render(frame, inputs_layout[3]);
        }
    }

    fn focus(&self) {
        self.focus
            .set(AppFocus::JournalScr(JournalScrFocus::default()));
    }

    fn is_focused(&self) -> bool {
        matches!(self.focus.get(), AppFocus::JournalScr(..))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedJournalScreen {
    pub selected_day: NaiveDate,
}

impl PersistedComponent for JournalScreen {
    type StorageType = PersistedJournalScreen;

    fn persist(&self) -> Self::StorageType {
        PersistedJournalScreen {
            selected_day: self.calendar.selected_day(),
        }
    }

    fn hydrate(&mut self, storage: Self::StorageType) {
        self.calendar.set_selected(storage.selected_day);
        self.entry_list.set_day(storage.selected_day);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mock_storage::MockStorage, ComponentTestHarness};
    use chrono::NaiveTime;

    impl JournalScreen {
        fn new_mock(relay: ViewRelay, entries: Vec<LogEntry>) -> Self {
            let screen = JournalScreen::default();
            let store = EntryStore::new(entries, Rc::new(MockStorage::default()));
            JournalScreen {
                relay: relay.clone(),
                store: store.clone(),
                calendar: CalendarPane::new(screen.focus.clone(), store.clone(), Config::default()),
                entry_list: EntryList::new(
                    screen.focus.clone(),
                    store,
                    ProfileManager::default(),
                    Config::default(),
                ),
                ..screen
            }
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test dates should be valid")
    }

    #[test]
    fn pending_day_request_is_applied_on_tick() {
        let relay = ViewRelay::default();
        relay.request_day_list("2024-06-01");

        let mut test = ComponentTestHarness::new(JournalScreen::new_mock(relay.clone(), vec![]));
        test.given_event(Event::Tick);

        test.expect_event(|e| matches!(e, Event::DayListOpened(d) if *d == day("2024-06-01")));
        assert_eq!(test.component().calendar.selected_day(), day("2024-06-01"));

        // the request was consumed along the way
        assert_eq!(relay.take_day_list_request(), None);
    }

    #[test]
    fn day_request_is_applied_only_once() {
        let relay = ViewRelay::default();
        relay.request_day_list("2024-06-01");

        let mut test = ComponentTestHarness::new(JournalScreen::new_mock(relay, vec![]));
        test.given_event(Event::Tick);
        assert_eq!(test.component().calendar.selected_day(), day("2024-06-01"));

        test.given_event(Event::DaySelected(Local::now().date_naive()));
        test.given_event(Event::Tick);

        // the second tick must not re-apply the consumed request
        assert_eq!(
            test.component().calendar.selected_day(),
            Local::now().date_naive()
        );
    }

    #[test]
    fn unusable_day_key_is_consumed_and_reported() {
        let relay = ViewRelay::default();
        relay.request_day_list("not-a-date");

        let mut test = ComponentTestHarness::new(JournalScreen::new_mock(relay.clone(), vec![]));
        test.given_event(Event::Tick);

        test.expect_event(|e| matches!(e, Event::ErrorOccurred(..)));
        test.expect_no_event(|e| matches!(e, Event::DayListOpened(..)));
        assert_eq!(relay.take_day_list_request(), None);
    }

    #[test]
    fn no_request_means_no_jump() {
        let relay = ViewRelay::default();
        let mut test = ComponentTestHarness::new(JournalScreen::new_mock(relay, vec![]));

        test.given_event(Event::Tick);

        test.expect_no_event(|e| matches!(e, Event::DayListOpened(..)));
    }

    #[test]
    fn requests_wait_until_the_screen_is_focused() {
        let relay = ViewRelay::default();
        relay.request_day_list("2024-06-01");

        let screen = JournalScreen::new_mock(relay.clone(), vec![]);
        screen.focus.set(AppFocus::SummaryScr);
        let mut test = ComponentTestHarness::new(screen);

        test.given_event(Event::Tick);
        test.expect_no_event(|e| matches!(e, Event::DayListOpened(..)));

        // regaining focus picks the request up on the next tick
        test.component().focus();
        test.given_event(Event::Tick);
        test.expect_event(|e| matches!(e, Event::DayListOpened(..)));
        assert_eq!(relay.take_day_list_request(), None);
    }

    #[test]
    fn finished_entry_form_saves_an_entry() {
        let relay = ViewRelay::default();
        let mut test = ComponentTestHarness::new(JournalScreen::new_mock(relay, vec![]));

        test.given_event(Event::DaySelected(day("2024-06-01")));
        test.given_event(Event::EntryCreationStarted);
        test.given_string("120 ml");
        test.given_command(Command::Confirm);
        test.given_string("morning feed");
        test.given_command(Command::Confirm);

        test.expect_event(|e| {
            matches!(e, Event::EntryCreated(entry) if entry.note == "morning feed")
        });
        assert_eq!(test.component().store.count_for_day(day("2024-06-01")), 1);
    }

    #[test]
    fn bad_amount_keeps_the_form_open() {
        let relay = ViewRelay::default();
        let mut test = ComponentTestHarness::new(JournalScreen::new_mock(relay, vec![]));

        test.given_event(Event::EntryCreationStarted);
        test.given_string("lots");
        test.given_command(Command::Confirm);
        test.given_command(Command::Confirm);

        test.expect_event(|e| matches!(e, Event::ErrorOccurred(..)));
        test.expect_no_event(|e| matches!(e, Event::EntryCreated(..)));

        // fix the amount and resubmit
        test.given_key("backspace");
        test.given_key("backspace");
        test.given_key("backspace");
        test.given_key("backspace");
        test.given_string("40 ml");
        test.given_command(Command::Confirm);
        test.given_command(Command::Confirm);

        test.expect_event(|e| matches!(e, Event::EntryCreated(..)));
    }

    #[test]
    fn hydrate_restores_the_selected_day() {
        let relay = ViewRelay::default();
        let mut screen = JournalScreen::new_mock(relay, vec![]);

        screen.hydrate(PersistedJournalScreen {
            selected_day: day("2024-06-01"),
        });

        assert_eq!(screen.calendar.selected_day(), day("2024-06-01"));
    }

}
