use crate::{
    app::AppFocus,
    components::{journal_screen::JournalScrFocus, Component},
    config::{color_map::ColorKey, Config},
    model::entry::EntryStore,
    system::{
        command::{Command, CommandGroup},
        event::Event,
        signal::SignalQueue,
    },
};
use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};
use std::{cell::Cell, rc::Rc};

const WEEKS_SHOWN: i64 = 6;

#[derive(Debug)]
pub struct CalendarPane {
    focus: Rc<Cell<AppFocus>>,
    store: EntryStore,
    config: Config,
    visible_month: NaiveDate,
    selected: NaiveDate,
}

impl Default for CalendarPane {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            focus: Rc::default(),
            store: EntryStore::default(),
            config: Config::default(),
            visible_month: first_of_month(today),
            selected: today,
        }
    }
}

/// The first day of the month containing `day`.
fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

/// The monday on or before the first of the month, ie. the first grid cell.
fn grid_start(month: NaiveDate) -> NaiveDate {
    month - Duration::days(i64::from(month.weekday().num_days_from_monday()))
}

impl CalendarPane {
    pub fn new(focus: Rc<Cell<AppFocus>>, store: EntryStore, config: Config) -> Self {
        Self {
            focus,
            store,
            config,
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn selected_day(&self) -> NaiveDate {
        self.selected
    }

    pub fn set_selected(&mut self, day: NaiveDate) {
        self.selected = day;
        self.visible_month = first_of_month(day);
    }

    fn move_selection(&mut self, days: i64, queue: &mut SignalQueue) {
        self.set_selected(self.selected + Duration::days(days));
        queue.push(Event::DaySelected(self.selected));
    }

    fn move_month(&mut self, months_forward: bool, queue: &mut SignalQueue) {
        // chrono clamps the day when the target month is shorter
        let moved = if months_forward {
            self.selected.checked_add_months(Months::new(1))
        } else {
            self.selected.checked_sub_months(Months::new(1))
        };
        if let Some(day) = moved {
            self.set_selected(day);
            queue.push(Event::DaySelected(self.selected));
        }
    }
}

impl Component for CalendarPane {
    fn is_focused(&self) -> bool {
        self.focus.get() == AppFocus::JournalScr(JournalScrFocus::Calendar)
    }

    fn focus(&self) {
        self.focus
            .set(AppFocus::JournalScr(JournalScrFocus::Calendar));
    }

    fn commands(&self) -> Vec<CommandGroup> {
        vec![
            CommandGroup::new(
                vec![
                    Command::NavLeft,
                    Command::NavDown,
                    Command::NavUp,
                    Command::NavRight,
                ],
                "navigate",
            ),
            CommandGroup::new(vec![Command::PrevMonth, Command::NextMonth], "change month"),
            CommandGroup::new(vec![Command::GotoToday], "today"),
            CommandGroup::new(vec![Command::Confirm], "open day"),
        ]
    }

    fn handle_command(&mut self, command: &Command, queue: &mut SignalQueue) {
        match command {
            Command::NavLeft => self.move_selection(-1, queue),
            Command::NavRight => self.move_selection(1, queue),
            Command::NavUp => self.move_selection(-7, queue),
            Command::NavDown => self.move_selection(7, queue),
            Command::PrevMonth => self.move_month(false, queue),
            Command::NextMonth => self.move_month(true, queue),
            Command::GotoToday => {
                self.set_selected(Local::now().date_naive());
                queue.push(Event::DaySelected(self.selected));
            }
            Command::Confirm => {
                queue.push(Event::DaySelected(self.selected));
                queue.push(Event::DayListOpened(self.selected));
            }
            _ => {}
        }
    }

    fn handle_event(&mut self, event: &Event, _queue: &mut SignalQueue) {
        if let Event::DaySelected(day) = event {
            if *day != self.selected {
                self.set_selected(*day);
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.is_focused();
        let colors = &self.config.color_map;
        let border_color = if focused {
            colors.get(&ColorKey::PanelActiveBorder)
        } else {
            colors.get(&ColorKey::PanelInactiveBorder)
        };

        let today = Local::now().date_naive();
        let start = grid_start(self.visible_month);

        let mut lines = vec![Line::from(Span::styled(
            " Mo Tu We Th Fr Sa Su",
            Style::default().fg(colors.get(&ColorKey::FgSecondary)),
        ))];

        for week in 0..WEEKS_SHOWN {
            let mut spans = vec![];
            for weekday in 0..7 {
                let day = start + Duration::days(week * 7 + weekday);
                let in_month = day.month() == self.visible_month.month();

                let mut style = if in_month {
                    Style::default().fg(colors.get(&ColorKey::FgPrimary))
                } else {
                    Style::default().fg(colors.get(&ColorKey::FgSecondary)).dim()
                };
                if self.store.count_for_day(day) > 0 {
                    style = style.fg(colors.get(&ColorKey::CalendarMarker));
                }
                if day == today {
                    style = style.fg(colors.get(&ColorKey::CalendarToday)).bold();
                }
                if day == self.selected {
                    style = if focused {
                        Style::default()
                            .fg(colors.get(&ColorKey::SelectionFg))
                            .bg(colors.get(&ColorKey::SelectionBg))
                            .bold()
                    } else {
                        style.underlined()
                    };
                }

                spans.push(Span::raw(" "));
                spans.push(Span::styled(format!("{:>2}", day.day()), style));
            }
            lines.push(Line::from(spans));
        }

        let title = self.visible_month.format("%B %Y").to_string();
        let content = Paragraph::new(lines).block(
            Block::bordered()
                .title(format!(" {title} "))
                .border_style(Style::default().fg(border_color)),
        );

        frame.render_widget(content, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ComponentTestHarness;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test dates should be valid")
    }

    #[test]
    fn arrow_navigation_moves_by_day_and_week() {
        let mut test = ComponentTestHarness::new(CalendarPane::default());
        test.component_mut().set_selected(day("2024-06-15"));

        test.given_command(Command::NavRight);
        assert_eq!(test.component().selected_day(), day("2024-06-16"));

        test.given_command(Command::NavUp);
        assert_eq!(test.component().selected_day(), day("2024-06-09"));

        test.expect_event(|e| matches!(e, Event::DaySelected(..)));
    }

    #[test]
    fn crossing_a_month_boundary_scrolls_the_view() {
        let mut test = ComponentTestHarness::new(CalendarPane::default());
        test.component_mut().set_selected(day("2024-06-30"));

        test.given_command(Command::NavRight);

        assert_eq!(test.component().selected_day(), day("2024-07-01"));
        assert_eq!(test.component().visible_month, day("2024-07-01"));
    }

    #[test]
    fn month_jump_clamps_the_day() {
        let mut test = ComponentTestHarness::new(CalendarPane::default());
        test.component_mut().set_selected(day("2024-05-31"));

        test.given_command(Command::NextMonth);

        assert_eq!(test.component().selected_day(), day("2024-06-30"));
    }

    #[test]
    fn confirm_opens_the_selected_day() {
        let mut test = ComponentTestHarness::new(CalendarPane::default());
        test.component_mut().set_selected(day("2024-06-01"));

        test.given_command(Command::Confirm);

        test.expect_event(|e| matches!(e, Event::DayListOpened(d) if *d == day("2024-06-01")));
    }
}
