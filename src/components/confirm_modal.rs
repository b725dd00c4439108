use ratatui::{
    prelude::*,
    widgets::{Block, Clear, Paragraph, Wrap},
};
use std::{cell::Cell, rc::Rc};

use crate::{
    app::AppFocus,
    components::Component,
    config::{color_map::ColorKey, Config},
    system::{
        command::{Command, CommandGroup},
        event::Event,
        signal::SignalQueue,
    },
};

const CONFIRM_MODAL_WIDTH: u16 = 40;
const CONFIRM_MODAL_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy)]
pub enum ConfirmKind {
    DeleteEntry,
}

impl ConfirmKind {
    const fn command(self) -> Command {
        match self {
            Self::DeleteEntry => Command::Delete,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ConfirmModal {
    focus: Rc<Cell<AppFocus>>,
    kind: Option<ConfirmKind>,
    config: Config,
}

impl ConfirmModal {
    pub fn new(focus: Rc<Cell<AppFocus>>, config: Config) -> Self {
        Self {
            focus,
            config,
            ..Default::default()
        }
    }

    pub fn show_with(&mut self, kind: ConfirmKind) {
        self.kind = Some(kind);
        self.focus();
    }

    const fn text_content(&self) -> Option<(&'static str, &'static str)> {
        match self.kind {
            Some(ConfirmKind::DeleteEntry) => Some((
                "Confirm Delete",
                "Are you sure you want to delete this entry? This cannot be undone.",
            )),
            None => None,
        }
    }
}

impl Component for ConfirmModal {
    fn is_focused(&self) -> bool {
        self.focus.get() == AppFocus::ConfModal
    }

    fn focus(&self) {
        self.focus.set(AppFocus::ConfModal);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some((title, message)) = self.text_content() else {
            return;
        };

        let layout = Layout::vertical(vec![
            Constraint::Fill(1),
            Constraint::Length(CONFIRM_MODAL_HEIGHT + 2),
            Constraint::Fill(1),
        ])
        .split(area);
        let layout = Layout::horizontal(vec![
            Constraint::Fill(1),
            Constraint::Length(CONFIRM_MODAL_WIDTH + 2),
            Constraint::Fill(1),
        ])
        .split(layout[1]);

        let content = Paragraph::new(message).wrap(Wrap { trim: true }).block(
            Block::bordered()
                .border_style(self.config.color_map.get(&ColorKey::PopupBorder))
                .title(format!(" {title} "))
                .fg(self.config.color_map.get(&ColorKey::FgPrimary))
                .bg(self.config.color_map.get(&ColorKey::PopupBg)),
        );

        frame.render_widget(Clear, layout[1]);
        frame.render_widget(content, layout[1]);
    }

    fn commands(&self) -> Vec<CommandGroup> {
        vec![
            CommandGroup::new(vec![Command::Confirm], "confirm"),
            CommandGroup::new(vec![Command::Back], "cancel"),
        ]
    }

    fn handle_command(&mut self, command: &Command, queue: &mut SignalQueue) {
        let Some(confirm_kind) = &self.kind else {
            return;
        };

        match command {
            Command::Confirm => queue.push(Event::ConfirmYes(confirm_kind.command())),
            Command::Back => queue.push(Event::ConfirmNo),
            _ => {}
        }
    }
}
