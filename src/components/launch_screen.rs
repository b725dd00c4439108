use crate::{
    app::AppFocus,
    components::Component,
    model::profile::ProfileManager,
    system::{event::Event, signal::SignalQueue},
};
use ratatui::{prelude::*, widgets::Paragraph};
use std::{cell::Cell, rc::Rc};

/// Shown only while the app decides where to go: once per focus it loads the
/// stored profile and redirects to either the setup wizard or the journal.
#[derive(Debug, Default)]
pub struct LaunchScreen {
    focus: Rc<Cell<AppFocus>>,
    profile: ProfileManager,
}

impl LaunchScreen {
    pub fn new(focus: Rc<Cell<AppFocus>>, profile: ProfileManager) -> Self {
        Self { focus, profile }
    }
}

impl Component for LaunchScreen {
    fn is_focused(&self) -> bool {
        self.focus.get() == AppFocus::LaunchScr
    }

    fn focus(&self) {
        self.focus.set(AppFocus::LaunchScr);
    }

    fn handle_event(&mut self, event: &Event, queue: &mut SignalQueue) {
        if !matches!(event, Event::Tick) || !self.is_focused() {
            return;
        }

        match self.profile.load() {
            Ok(Some(profile)) => queue.push(Event::ProfileLoaded(profile)),
            Ok(None) => queue.push(Event::SetupRequired),
            Err(err) => {
                tracing::error!("Could not read stored profile: {err}");
                queue.push(Event::ErrorOccurred(
                    "Could not read your stored profile.".to_string(),
                ));
                queue.push(Event::SetupRequired);
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical(vec![
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .split(area);

        let content = Paragraph::new(vec![
            Line::from("daybook").bold(),
            Line::from("opening your journal...").gray(),
        ])
        .centered();

        frame.render_widget(content, layout[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::profile::UserProfile,
        testing::{mock_storage::MockStorage, ComponentTestHarness},
    };

    fn screen_with(profile: Option<UserProfile>) -> LaunchScreen {
        let storage = MockStorage {
            profile,
            ..Default::default()
        };
        LaunchScreen {
            focus: Rc::default(),
            profile: ProfileManager::new(Rc::new(storage)),
        }
    }

    #[test]
    fn redirects_to_the_journal_when_a_profile_exists() {
        let mut test = ComponentTestHarness::new(screen_with(Some(UserProfile::default())));

        test.given_event(Event::Tick);

        test.expect_event(|e| matches!(e, Event::ProfileLoaded(..)));
    }

    #[test]
    fn redirects_to_setup_on_first_run() {
        let mut test = ComponentTestHarness::new(screen_with(None));

        test.given_event(Event::Tick);

        test.expect_event(|e| matches!(e, Event::SetupRequired));
    }

    #[test]
    fn does_nothing_while_unfocused() {
        let screen = screen_with(None);
        screen.focus.set(AppFocus::SummaryScr);
        let mut test = ComponentTestHarness::new(screen);

        test.given_event(Event::Tick);

        test.expect_no_event(|e| matches!(e, Event::ProfileLoaded(..) | Event::SetupRequired));
    }
}
