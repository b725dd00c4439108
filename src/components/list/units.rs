use super::InnerList;
use crate::{
    app::AppFocus,
    components::{setup_screen::SetupScrFocus, Component},
    config::Config,
    system::{
        command::{Command, CommandGroup},
        event::Event,
        message::{Message, SetupAction},
        signal::SignalQueue,
    },
    utils::units::UnitSystem,
};
use ratatui::{prelude::*, widgets::ListItem};
use std::{cell::Cell, rc::Rc};
use strum::IntoEnumIterator;

#[derive(Debug)]
pub struct UnitsList {
    focus: Rc<Cell<AppFocus>>,
    list: InnerList,
}

impl Default for UnitsList {
    fn default() -> Self {
        Self {
            focus: Rc::default(),
            list: InnerList::new("Units", Config::default()),
        }
    }
}

impl UnitsList {
    pub fn new(focus: Rc<Cell<AppFocus>>, config: Config) -> Self {
        Self {
            focus,
            list: InnerList::new("Units", config),
        }
    }

    /// The currently-highlighted system, defaulting to metric when nothing
    /// has been highlighted yet.
    #[must_use]
    pub fn selected_system(&self) -> UnitSystem {
        self.list
            .state
            .selected()
            .and_then(|index| UnitSystem::iter().nth(index))
            .unwrap_or_default()
    }
}

impl Component for UnitsList {
    fn is_focused(&self) -> bool {
        self.focus.get() == AppFocus::SetupScr(SetupScrFocus::UnitsList)
    }

    fn focus(&self) {
        self.focus.set(AppFocus::SetupScr(SetupScrFocus::UnitsList));
    }

    fn commands(&self) -> Vec<CommandGroup> {
        let mut out = InnerList::base_commands();
        out.push(CommandGroup::new(vec![Command::Confirm], "choose units"));
        out
    }

    fn handle_command(&mut self, command: &Command, queue: &mut SignalQueue) {
        self.list
            .handle_base_command(command, UnitSystem::iter().count(), queue);

        if matches!(command, Command::Confirm) {
            queue.push(Message::to_setup_scr(SetupAction::FinishSetup));
        }
    }

    fn handle_event(&mut self, event: &Event, _queue: &mut SignalQueue) {
        if matches!(event, Event::SetupRequired) {
            self.list.state.select(Some(0));
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = UnitSystem::iter()
            .map(|system| {
                let text = Line::from(vec![
                    Span::raw(system.to_string()),
                    Span::raw(format!("  ({})", system.example_units())).gray(),
                ]);
                ListItem::new(text)
            })
            .collect();

        self.list.render(frame, area, items, self.is_focused());
    }
}
