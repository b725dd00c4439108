use super::InnerList;
use crate::{
    app::AppFocus,
    components::{confirm_modal::ConfirmKind, journal_screen::JournalScrFocus, Component},
    config::{color_map::ColorKey, Config},
    model::{
        entry::{EntryStore, LogEntry},
        profile::ProfileManager,
    },
    system::{
        command::{Command, CommandGroup},
        event::Event,
        message::{AppAction, Message},
        signal::SignalQueue,
    },
};
use chrono::{Local, NaiveDate};
use ratatui::{prelude::*, widgets::ListItem};
use std::{cell::Cell, rc::Rc};

#[derive(Debug)]
pub struct EntryList {
    focus: Rc<Cell<AppFocus>>,
    store: EntryStore,
    profile: ProfileManager,
    config: Config,
    day: NaiveDate,
    items: Vec<LogEntry>,
    list: InnerList,
}

impl Default for EntryList {
    fn default() -> Self {
        Self {
            focus: Rc::default(),
            store: EntryStore::default(),
            profile: ProfileManager::default(),
            config: Config::default(),
            day: Local::now().date_naive(),
            items: vec![],
            list: InnerList::new("Entries", Config::default()),
        }
    }
}

impl EntryList {
    pub fn new(
        focus: Rc<Cell<AppFocus>>,
        store: EntryStore,
        profile: ProfileManager,
        config: Config,
    ) -> Self {
        let day = Local::now().date_naive();
        let items = store.for_day(day);

        Self {
            focus,
            store,
            profile,
            config: config.clone(),
            day,
            items,
            list: InnerList::new("Entries", config),
        }
    }

    pub fn set_day(&mut self, day: NaiveDate) {
        self.day = day;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.items = self.store.for_day(self.day);
        self.list
            .state
            .select((!self.items.is_empty()).then_some(0));
    }
}

impl Component for EntryList {
    fn is_focused(&self) -> bool {
        self.focus.get() == AppFocus::JournalScr(JournalScrFocus::EntryList)
    }

    fn focus(&self) {
        self.focus
            .set(AppFocus::JournalScr(JournalScrFocus::EntryList));
    }

    fn commands(&self) -> Vec<CommandGroup> {
        let mut out = InnerList::base_commands();
        out.push(CommandGroup::new(vec![Command::CreateNew], "new entry"));
        if !self.items.is_empty() {
            out.push(CommandGroup::new(vec![Command::Delete], "delete entry"));
        }
        out.push(CommandGroup::new(vec![Command::Back], "calendar"));
        out
    }

    fn handle_command(&mut self, command: &Command, queue: &mut SignalQueue) {
        self.list
            .handle_base_command(command, self.items.len(), queue);

        match command {
            Command::CreateNew => {
                queue.push(Event::EntryCreationStarted);
            }
            Command::Delete => {
                if self.list.state.selected().is_some() {
                    queue.push(Message::to_app(AppAction::RequestConfirmation(
                        ConfirmKind::DeleteEntry,
                    )));
                }
            }
            Command::Back => {
                self.focus
                    .set(AppFocus::JournalScr(JournalScrFocus::Calendar));
                queue.push(Event::FocusedChanged);
            }
            _ => {}
        }
    }

    fn handle_event(&mut self, event: &Event, queue: &mut SignalQueue) {
        match event {
            Event::DaySelected(day) => {
                self.set_day(*day);
            }
            Event::EntryCreated(..) | Event::EntryDeleted => {
                self.refresh();
            }
            Event::ConfirmYes(Command::Delete) if self.is_focused() => {
                let entry = self
                    .list
                    .state
                    .selected()
                    .and_then(|index| self.items.get(index));
                if let Some(entry) = entry {
                    if self.store.delete(entry.id()).is_ok() {
                        queue.push(Event::EntryDeleted);
                    } else {
                        queue.push(Event::ErrorOccurred(
                            "Could not save updated entries.".to_string(),
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let units = self.profile.units();
        let time_color = self.config.color_map.get(&ColorKey::FgSecondary);
        let amount_color = self.config.color_map.get(&ColorKey::CalendarMarker);

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|entry| {
                let mut spans = vec![Span::styled(
                    entry.time.format("%H:%M ").to_string(),
                    Style::default().fg(time_color),
                )];

                if let Some(measure) = entry.measure {
                    spans.push(Span::styled(
                        format!(" {} ", measure.converted_to(units)),
                        Style::default().fg(amount_color),
                    ));
                }

                if !entry.note.is_empty() {
                    spans.push(Span::raw(format!(" {}", entry.note)));
                }

                ListItem::new(Line::from(spans))
            })
            .collect();

        self.list.render(frame, area, items, self.is_focused());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::entry::LogEntry,
        testing::{mock_storage::MockStorage, ComponentTestHarness},
    };
    use chrono::NaiveTime;

    fn list_with(entries: Vec<LogEntry>) -> EntryList {
        let store = EntryStore::new(entries, Rc::new(MockStorage::default()));
        EntryList {
            store,
            ..Default::default()
        }
    }

    fn entry_today(note: &str) -> LogEntry {
        LogEntry::new(
            Local::now().date_naive(),
            NaiveTime::default(),
            None,
            note.to_string(),
        )
    }

    #[test]
    fn creating_an_entry_starts_the_input_form() {
        let mut test = ComponentTestHarness::new(list_with(vec![]));

        test.given_command(Command::CreateNew);

        test.expect_event(|e| matches!(e, Event::EntryCreationStarted));
    }

    #[test]
    fn confirmed_delete_removes_the_selected_entry() {
        let mut test = ComponentTestHarness::new(list_with(vec![entry_today("feed")]));
        test.component().focus();
        test.component_mut().set_day(Local::now().date_naive());

        test.given_command(Command::NavDown);
        test.given_command(Command::Delete);
        test.expect_message(|m| {
            matches!(
                m.read_as_app(),
                Some(AppAction::RequestConfirmation(ConfirmKind::DeleteEntry))
            )
        });

        test.given_event(Event::ConfirmYes(Command::Delete));
        test.expect_event(|e| matches!(e, Event::EntryDeleted));
        assert!(test.component().items.is_empty());
    }

    #[test]
    fn unconfirmed_delete_keeps_the_entry() {
        let mut test = ComponentTestHarness::new(list_with(vec![entry_today("feed")]));
        test.component().focus();
        test.component_mut().set_day(Local::now().date_naive());

        test.given_command(Command::NavDown);
        test.given_command(Command::Delete);
        test.given_event(Event::ConfirmNo);

        assert_eq!(test.component().items.len(), 1);
    }
}
