use super::{
    input::name_input::NameInput,
    list::units::UnitsList,
    Component,
};
use crate::{
    app::AppFocus,
    config::Config,
    model::profile::UserProfile,
    system::{
        command::{Command, CommandGroup},
        event::Event,
        message::{AppAction, Message, SetupAction},
        signal::SignalQueue,
    },
};
use ratatui::{
    prelude::*,
    widgets::{Block, Clear, Paragraph},
};
use serde::{Deserialize, Serialize};
use std::{cell::Cell, rc::Rc};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetupScrFocus {
    #[default]
    NameIn,
    UnitsList,
}

/// First-run wizard: collects a display name and a preferred unit system,
/// then hands the finished profile to the rest of the app.
#[derive(Debug)]
pub struct SetupScreen {
    focus: Rc<Cell<AppFocus>>,
    name_input: NameInput,
    units_list: UnitsList,
}

impl Default for SetupScreen {
    fn default() -> Self {
        let focus = Rc::new(Cell::new(AppFocus::SetupScr(SetupScrFocus::default())));
        let cursor_pos = Rc::new(Cell::new((0, 0)));

        Self {
            name_input: NameInput::new(focus.clone(), cursor_pos),
            units_list: UnitsList::new(focus.clone(), Config::default()),
            focus,
        }
    }
}

impl SetupScreen {
    pub fn new(
        focus: Rc<Cell<AppFocus>>,
        cursor_pos: Rc<Cell<(u16, u16)>>,
        config: Config,
    ) -> Self {
        let name_input = NameInput::new(focus.clone(), cursor_pos);
        let units_list = UnitsList::new(focus.clone(), config);

        Self {
            focus,
            name_input,
            units_list,
        }
    }

    /// Narrows the shared `AppFocus` variable into the focus enum for this componenent
    fn internal_focus(&self) -> Option<SetupScrFocus> {
        match self.focus.get() {
            AppFocus::SetupScr(focus) => Some(focus),
            _ => None,
        }
    }
}

impl Component for SetupScreen {
    fn commands(&self) -> Vec<CommandGroup> {
        match self.internal_focus() {
            Some(SetupScrFocus::NameIn) => self.name_input.commands(),
            Some(SetupScrFocus::UnitsList) => self.units_list.commands(),
            None => vec![],
        }
    }

    fn handle_command(&mut self, command: &Command, queue: &mut SignalQueue) {
        match self.internal_focus() {
            Some(SetupScrFocus::NameIn) => self.name_input.handle_command(command, queue),
            Some(SetupScrFocus::UnitsList) => self.units_list.handle_command(command, queue),
            None => {}
        }
    }

    fn handle_raw_event(&mut self, event: &crossterm::event::Event, queue: &mut SignalQueue) {
        self.name_input.handle_raw_event(event, queue);
    }

    fn handle_event(&mut self, event: &Event, queue: &mut SignalQueue) {
        if matches!(event, Event::SetupRequired) {
            self.name_input.focus();
            self.name_input.start_editing();
            queue.push(Message::to_app(AppAction::EnterRawMode));
        }

        self.name_input.handle_event(event, queue);
        self.units_list.handle_event(event, queue);
    }

    fn handle_message(&mut self, message: &Message, queue: &mut SignalQueue) {
        match message.read_as_setup_scr() {
            Some(SetupAction::FocusUnitsList) => {
                self.name_input.stop_editing();
                self.units_list.focus();
                queue.push(Event::FocusedChanged);
            }
            Some(SetupAction::FinishSetup) => {
                let profile = UserProfile {
                    name: self.name_input.value().trim().to_string(),
                    units: self.units_list.selected_system(),
                };
                queue.push(Event::SetupCompleted(profile));
            }
            None => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay_layout = Layout::default()
            .constraints([Constraint::Fill(1)])
            .horizontal_margin(6)
            .vertical_margin(3)
            .split(area);
        let overlay = overlay_layout[0];

        let inner_layout = Layout::vertical(vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Fill(1),
        ])
        .horizontal_margin(2)
        .vertical_margin(1)
        .split(overlay);

        frame.render_widget(Clear, overlay);
        let block = Block::bordered()
            .title(" Welcome to daybook ")
            .style(Style::default().green());
        frame.render_widget(block, overlay);

        let step = match self.internal_focus() {
            Some(SetupScrFocus::UnitsList) => 2,
            _ => 1,
        };
        let intro = Paragraph::new(vec![
            Line::from("Let's set up your journal."),
            Line::from(format!("Step {step} of 2")).gray(),
        ]);
        frame.render_widget(intro, inner_layout[0]);

        self.name_input.render(frame, inner_layout[1]);
        self.units_list.render(frame, inner_layout[2]);
    }

    fn focus(&self) {
        self.focus.set(AppFocus::SetupScr(SetupScrFocus::default()));
    }

    fn is_focused(&self) -> bool {
        matches!(self.focus.get(), AppFocus::SetupScr(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{testing::ComponentTestHarness, utils::units::UnitSystem};

    #[test]
    fn complete_the_wizard() {
        let mut test = ComponentTestHarness::new(SetupScreen::default());

        test.given_event(Event::SetupRequired);

        // name step
        test.given_string("Frankie");
        test.given_command(Command::Confirm);

        // units step: move to the second system and confirm
        test.given_command(Command::NavDown);
        test.given_command(Command::Confirm);

        test.expect_event(|e| {
            matches!(
                e,
                Event::SetupCompleted(p) if p.name == "Frankie" && p.units == UnitSystem::Imperial
            )
        });
    }

    #[test]
    fn name_is_required_before_advancing() {
        let mut test = ComponentTestHarness::new(SetupScreen::default());

        test.given_event(Event::SetupRequired);
        test.given_command(Command::Confirm);

        test.expect_event(|e| matches!(e, Event::ErrorOccurred(..)));
        test.expect_no_event(|e| matches!(e, Event::SetupCompleted(..)));
    }
}
