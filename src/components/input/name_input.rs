use super::InnerInput;
use crate::{
    app::AppFocus,
    components::{setup_screen::SetupScrFocus, Component},
    system::{
        command::{Command, CommandGroup},
        event::Event,
        message::{AppAction, Message, SetupAction},
        signal::SignalQueue,
    },
};
use ratatui::prelude::{Frame, Rect};
use std::{cell::Cell, rc::Rc};

#[derive(Debug, Default, Clone)]
pub struct NameInput {
    focus: Rc<Cell<AppFocus>>,
    input: InnerInput,
}

impl NameInput {
    pub fn new(focus: Rc<Cell<AppFocus>>, cursor_pos: Rc<Cell<(u16, u16)>>) -> Self {
        let input = InnerInput::new("Display Name", cursor_pos);
        Self { focus, input }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub const fn start_editing(&mut self) {
        self.input.start_editing();
    }

    pub const fn stop_editing(&mut self) {
        self.input.stop_editing();
    }
}

impl Component for NameInput {
    fn is_focused(&self) -> bool {
        self.focus.get() == AppFocus::SetupScr(SetupScrFocus::NameIn)
    }

    fn focus(&self) {
        self.focus.set(AppFocus::SetupScr(SetupScrFocus::NameIn));
    }

    fn commands(&self) -> Vec<CommandGroup> {
        vec![CommandGroup::new(vec![Command::Confirm], "next step")]
    }

    fn handle_command(&mut self, command: &Command, queue: &mut SignalQueue) {
        if !self.input.is_editing() {
            return;
        }

        if matches!(command, Command::Confirm) {
            if self.input.value().trim().is_empty() {
                queue.push(Event::ErrorOccurred("Name cannot be empty.".to_string()));
            } else {
                queue.push(Message::to_setup_scr(SetupAction::FocusUnitsList));
                queue.push(Message::to_app(AppAction::ExitRawMode));
            }
        }
    }

    fn handle_raw_event(&mut self, event: &crossterm::event::Event, queue: &mut SignalQueue) {
        self.input.handle_raw_event(event, queue);
    }

    fn handle_event(&mut self, event: &Event, _queue: &mut SignalQueue) {
        if matches!(event, Event::SetupCompleted(..)) {
            self.input.set_value("");
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.input.render(frame, area, self.is_focused());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ComponentTestHarness;

    #[test]
    fn empty_name_is_rejected() {
        let mut test = ComponentTestHarness::new(NameInput::default());

        test.component_mut().start_editing();
        test.given_command(Command::Confirm);

        test.expect_event(|e| matches!(e, Event::ErrorOccurred(..)));
    }

    #[test]
    fn confirming_a_name_advances_the_wizard() {
        let mut test = ComponentTestHarness::new(NameInput::default());

        test.component_mut().start_editing();
        test.given_string("Frankie");
        test.given_command(Command::Confirm);

        test.expect_message(|m| {
            matches!(m.read_as_setup_scr(), Some(SetupAction::FocusUnitsList))
        });
    }
}
