use super::{journal_screen, journal_screen::JournalScrFocus, list::InnerList, Component};
use crate::{
    app::AppFocus,
    config::Config,
    model::{entry::EntryStore, profile::ProfileManager},
    system::{
        command::{Command, CommandGroup},
        event::Event,
        relay::ViewRelay,
        signal::SignalQueue,
    },
};
use chrono::{Duration, Local, NaiveDate};
use ratatui::{prelude::*, widgets::ListItem};
use std::{cell::Cell, rc::Rc};

const DAYS_SHOWN: i64 = 7;

/// The last week at a glance. Confirming a row asks the journal, via the
/// relay, to show that day's entry list; this screen never touches the
/// journal directly.
#[derive(Debug)]
pub struct SummaryScreen {
    focus: Rc<Cell<AppFocus>>,
    relay: ViewRelay,
    store: EntryStore,
    profile: ProfileManager,
    days: Vec<NaiveDate>,
    list: InnerList,
}

impl Default for SummaryScreen {
    fn default() -> Self {
        Self {
            focus: Rc::default(),
            relay: ViewRelay::default(),
            store: EntryStore::default(),
            profile: ProfileManager::default(),
            days: last_days(),
            list: InnerList::new("Last 7 Days", Config::default()),
        }
    }
}

fn last_days() -> Vec<NaiveDate> {
    let today = Local::now().date_naive();
    (0..DAYS_SHOWN).map(|i| today - Duration::days(i)).collect()
}

impl SummaryScreen {
    pub fn new(
        focus: Rc<Cell<AppFocus>>,
        relay: ViewRelay,
        store: EntryStore,
        profile: ProfileManager,
        config: Config,
    ) -> Self {
        Self {
            focus,
            relay,
            store,
            profile,
            days: last_days(),
            list: InnerList::new("Last 7 Days", config),
        }
    }

    fn selected_day(&self) -> Option<NaiveDate> {
        self.list
            .state
            .selected()
            .and_then(|index| self.days.get(index))
            .copied()
    }
}

impl Component for SummaryScreen {
    fn is_focused(&self) -> bool {
        self.focus.get() == AppFocus::SummaryScr
    }

    fn focus(&self) {
        self.focus.set(AppFocus::SummaryScr);
    }

    fn commands(&self) -> Vec<CommandGroup> {
        let mut out = InnerList::base_commands();
        out.push(CommandGroup::new(vec![Command::Confirm], "open day"));
        out.push(CommandGroup::new(vec![Command::Back], "journal"));
        out
    }

    fn handle_command(&mut self, command: &Command, queue: &mut SignalQueue) {
        self.list
            .handle_base_command(command, self.days.len(), queue);

        match command {
            Command::Confirm => {
                if let Some(day) = self.selected_day() {
                    self.relay
                        .request_day_list(day.format(journal_screen::DAY_KEY_FORMAT).to_string());
                    queue.push(Event::SummaryDayChosen(day));
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

    fn handle_event(&mut self, event: &Event, _queue: &mut SignalQueue) {
        // recompute the window whenever this screen comes to the front
        if matches!(event, Event::FocusedChanged) && self.is_focused() {
            self.days = last_days();
            self.list.state.select(Some(0));
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let units = self.profile.units();

        let items: Vec<ListItem> = self
            .days
            .iter()
            .map(|day| {
                let count = self.store.count_for_day(*day);
                let total = self.store.volume_for_day(*day, units);

                let mut spans = vec![Span::raw(format!("{}  ", day.format("%a %Y-%m-%d")))];
                spans.push(match count {
                    0 => Span::raw("no entries").gray(),
                    1 => Span::raw("1 entry"),
                    n => Span::raw(format!("{n} entries")),
                });
                if let Some(total) = total {
                    spans.push(Span::raw(format!("   {total}")).yellow());
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
    use crate::testing::ComponentTestHarness;

    #[test]
    fn confirming_a_row_files_a_relay_request() {
        let relay = ViewRelay::default();
        let screen = SummaryScreen {
            relay: relay.clone(),
            ..Default::default()
        };
        screen.focus();

        let mut test = ComponentTestHarness::new(screen);
        test.given_event(Event::FocusedChanged);
        test.given_command(Command::NavDown);
        test.given_command(Command::Confirm);

        test.expect_event(|e| matches!(e, Event::SummaryDayChosen(..)));

        let expected = (Local::now().date_naive() - Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        assert_eq!(relay.take_day_list_request(), Some(expected));
    }

    #[test]
    fn nothing_is_filed_without_a_selection() {
        let relay = ViewRelay::default();
        let screen = SummaryScreen {
            relay: relay.clone(),
            ..Default::default()
        };

        let mut test = ComponentTestHarness::new(screen);
        test.given_command(Command::Confirm);

        test.expect_no_event(|e| matches!(e, Event::SummaryDayChosen(..)));
        assert_eq!(relay.take_day_list_request(), None);
    }
}
