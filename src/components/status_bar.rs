use std::{
    rc::Rc,
    time::{Duration, Instant},
};

use crate::{
    components::Component,
    config::key_map::KeyMap,
    system::{command::CommandGroup, event::Event, signal::SignalQueue},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Padding, Paragraph, Wrap},
};

// should this be configurable?
const ERROR_MESSAGE_DURATION: Duration = Duration::from_secs(5);
const INFO_MESSAGE_DURATION: Duration = Duration::from_secs(4);
const SUCCESS_MESSAGE_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug)]
enum MessageKind {
    Error,
    Info,
    Success,
}

#[derive(Debug)]
struct Message {
    kind: MessageKind,
    content: String,
    start: Instant,
    duration: Duration,
}

impl Message {
    fn error(content: &str) -> Self {
        Self {
            kind: MessageKind::Error,
            content: content.to_string(),
            start: Instant::now(),
            duration: ERROR_MESSAGE_DURATION,
        }
    }

    fn info(content: &str) -> Self {
        Self {
            kind: MessageKind::Info,
            content: content.to_string(),
            start: Instant::now(),
            duration: INFO_MESSAGE_DURATION,
        }
    }

    fn success(content: &str) -> Self {
        Self {
            kind: MessageKind::Success,
            content: content.to_string(),
            start: Instant::now(),
            duration: SUCCESS_MESSAGE_DURATION,
        }
    }
}

#[derive(Debug, Default)]
pub struct StatusBar {
    pub commands: Vec<CommandGroup>,
    message: Option<Message>,

    key_map: Rc<KeyMap>,
}

impl StatusBar {
    pub fn new(key_map: Rc<KeyMap>) -> Self {
        Self {
            key_map,
            ..Default::default()
        }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content = self.message.as_ref().map_or_else(
            || {
                Line::from(
                    self.commands
                        .iter()
                        .flat_map(|group| self.key_map.cmd_group_to_span(group))
                        .collect::<Vec<Span>>(),
                )
            },
            |message| {
                let (prefix, style) = match message.kind {
                    MessageKind::Error => ("● Error: ", Style::default().red()),
                    MessageKind::Info => ("● ", Style::default().blue()),
                    MessageKind::Success => ("● ", Style::default().green()),
                };
                Line::from(vec![
                    Span::styled(prefix, style),
                    Span::from(message.content.clone()),
                ])
            },
        );

        let content = Paragraph::new(content)
            .wrap(Wrap::default())
            .block(Block::default().padding(Padding::horizontal(1)));

        frame.render_widget(content, area);
    }

    fn handle_event(&mut self, event: &Event, queue: &mut SignalQueue) {
        match event {
            Event::ErrorOccurred(error) => {
                self.message = Some(Message::error(error));
            }
            Event::SetupCompleted(profile) => {
                self.message = Some(Message::success(&format!("Welcome, {}!", profile.name)));
            }
            Event::EntryCreated(..) => {
                self.message = Some(Message::success("Entry added."));
            }
            Event::EntryDeleted => {
                self.message = Some(Message::success("Entry deleted."));
            }
            Event::DayListOpened(day) => {
                self.message = Some(Message::info(&format!("Showing {day}.")));
            }
            _ => (),
        }

        // check to see if it's time to clear the message
        if self.message.as_ref().is_some_and(
            |Message {
                 start, duration, ..
             }| start.elapsed() >= *duration,
        ) {
            self.message = None;
            queue.push(Event::StatusMessageCleared);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ComponentTestHarness;

    #[test]
    fn errors_replace_the_hint_line() {
        let mut test = ComponentTestHarness::new(StatusBar::default());

        test.given_event(Event::ErrorOccurred("something broke".to_string()));

        let message = test
            .component()
            .message
            .as_ref()
            .expect("an error should be showing");
        assert_eq!(message.content, "something broke");
        assert!(matches!(message.kind, MessageKind::Error));
    }
}
