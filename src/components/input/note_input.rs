use super::InnerInput;
use crate::{
    app::AppFocus,
    components::{journal_screen::JournalScrFocus, Component},
    system::{
        command::{Command, CommandGroup},
        event::Event,
        message::{AppAction, JournalAction, Message},
        signal::SignalQueue,
    },
};
use ratatui::prelude::{Frame, Rect};
use std::{cell::Cell, rc::Rc};

#[derive(Debug, Default, Clone)]
pub struct NoteInput {
    focus: Rc<Cell<AppFocus>>,
    input: InnerInput,
}

impl NoteInput {
    pub fn new(focus: Rc<Cell<AppFocus>>, cursor_pos: Rc<Cell<(u16, u16)>>) -> Self {
        let input = InnerInput::new("Note", cursor_pos);
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

    pub fn clear(&mut self) {
        self.input.set_value("");
    }
}

impl Component for NoteInput {
    fn is_focused(&self) -> bool {
        self.focus.get() == AppFocus::JournalScr(JournalScrFocus::NoteIn)
    }

    fn focus(&self) {
        self.focus.set(AppFocus::JournalScr(JournalScrFocus::NoteIn));
    }

    fn commands(&self) -> Vec<CommandGroup> {
        vec![
            CommandGroup::new(vec![Command::Confirm], "save entry"),
            CommandGroup::new(vec![Command::Back], "cancel"),
        ]
    }

    fn handle_command(&mut self, command: &Command, queue: &mut SignalQueue) {
        if !self.input.is_editing() {
            return;
        }

        match command {
            Command::Confirm => {
                queue.push(Message::to_journal_scr(JournalAction::FinishEntry));
            }
            Command::Back => {
                queue.push(Message::to_journal_scr(JournalAction::CancelEntry));
                queue.push(Message::to_app(AppAction::ExitRawMode));
            }
            _ => {}
        }
    }

    fn handle_raw_event(&mut self, event: &crossterm::event::Event, queue: &mut SignalQueue) {
        self.input.handle_raw_event(event, queue);
    }

    fn handle_event(&mut self, event: &Event, _queue: &mut SignalQueue) {
        if matches!(event, Event::EntryCreated(..)) {
            self.input.set_value("");
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.input.render(frame, area, self.is_focused());
    }
}
