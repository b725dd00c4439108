use crate::{
    components::{
        confirm_modal::ConfirmModal,
        journal_screen::{JournalScrFocus, JournalScreen, PersistedJournalScreen},
        launch_screen::LaunchScreen,
        setup_screen::{SetupScrFocus, SetupScreen},
        status_bar::StatusBar,
        summary_screen::SummaryScreen,
        Component,
    },
    config::{key_map::Key, key_map::KeyMap, Config},
    model::{entry::EntryStore, profile::ProfileManager},
    persistence::PersistedComponent,
    system::{
        command::{Command, CommandGroup},
        event::Event,
        message::{AppAction, Message},
        relay::ViewRelay,
        signal::{Signal, SignalQueue},
    },
    utils::storage::Storage,
};
use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use ratatui::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    cell::Cell,
    rc::Rc,
    time::Duration,
};

const DEBOUNCE: Duration = Duration::from_millis(20); // 50 FPS

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppFocus {
    #[default]
    LaunchScr,
    SetupScr(SetupScrFocus),
    JournalScr(JournalScrFocus),
    SummaryScr,
    ConfModal,
    NotFocused,
}

pub struct App {
    // components
    launch_screen: LaunchScreen,
    setup_screen: SetupScreen,
    journal_screen: JournalScreen,
    summary_screen: SummaryScreen,
    status_bar: StatusBar,
    confirm_modal: ConfirmModal,

    profile: ProfileManager,
    key_map: Rc<KeyMap>,
    storage: Rc<dyn Storage>,

    // used while displaying the confirm modal
    focus: Rc<Cell<AppFocus>>,
    background_focus: Option<AppFocus>,

    // while in raw mode, terminal events are fed to the editing input
    raw_mode: bool,
    cursor_pos: Rc<Cell<(u16, u16)>>,

    exiting: bool,
}

impl App {
    pub fn new(
        relay: ViewRelay,
        profile: ProfileManager,
        entries: EntryStore,
        key_map: KeyMap,
        config: Config,
        storage: Rc<dyn Storage>,
    ) -> Self {
        let focus = Rc::new(Cell::new(AppFocus::LaunchScr));
        let cursor_pos = Rc::new(Cell::new((0, 0)));
        let key_map = Rc::new(key_map);

        let launch_screen = LaunchScreen::new(focus.clone(), profile.clone());
        let setup_screen = SetupScreen::new(focus.clone(), cursor_pos.clone(), config.clone());
        let journal_screen = JournalScreen::new(
            focus.clone(),
            relay.clone(),
            entries.clone(),
            profile.clone(),
            config.clone(),
            cursor_pos.clone(),
        );
        let summary_screen = SummaryScreen::new(
            focus.clone(),
            relay,
            entries,
            profile.clone(),
            config.clone(),
        );
        let status_bar = StatusBar::new(key_map.clone());
        let confirm_modal = ConfirmModal::new(focus.clone(), config);

        Self {
            launch_screen,
            setup_screen,
            journal_screen,
            summary_screen,
            status_bar,
            confirm_modal,

            profile,
            key_map,
            storage,

            focus,
            background_focus: None,

            raw_mode: false,
            cursor_pos,

            exiting: false,
        }
    }

    /// Runs the event loop until the user quits, then records the session
    /// for `--last`.
    ///
    /// # Errors
    /// If the terminal cannot be polled or drawn to.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        // initial draw call
        terminal.draw(|frame| self.draw(frame))?;

        loop {
            let mut queue = SignalQueue::default();
            queue.push(Event::Tick);

            if crossterm::event::poll(DEBOUNCE)? {
                let event = crossterm::event::read()?;
                self.dispatch_terminal_event(&event, &mut queue);
            }

            let redraw = self.process_signals(queue);

            if self.exiting {
                break;
            }

            if redraw {
                terminal.draw(|frame| self.draw(frame))?;
            }
        }

        if let Err(err) = self.storage.write_last_session(&self.persist()) {
            tracing::error!("Could not save session: {err}");
        }

        Ok(())
    }

    fn dispatch_terminal_event(&mut self, event: &CrosstermEvent, queue: &mut SignalQueue) {
        match event {
            CrosstermEvent::Key(key_event) => {
                if self.raw_mode {
                    self.handle_raw_event(event, queue);
                }

                let key = Key::from(*key_event);
                let command = self.key_map.get_filtered(key, &self.commands());
                if let Some(command) = command {
                    self.handle_command(&command, queue);
                }
            }
            CrosstermEvent::Resize(..) => queue.push(Event::ScreenResized),
            _ => {}
        }
    }

    /// Drains the queue, feeding follow-up signals back in until everything
    /// has settled. Returns whether anything happened that warrants a redraw.
    fn process_signals(&mut self, mut queue: SignalQueue) -> bool {
        let mut redraw = false;

        while let Some(signal) = queue.pop() {
            if !matches!(signal, Signal::Event(Event::Tick)) {
                tracing::debug!("processing signal: {signal}");
                redraw = true;
            }

            let mut follow_up = SignalQueue::default();
            match &signal {
                Signal::Event(event) => self.handle_event(event, &mut follow_up),
                Signal::Message(message) => self.handle_message(message, &mut follow_up),
            }

            while let Some(signal) = follow_up.pop() {
                queue.push(signal);
            }
        }

        redraw
    }

    fn draw(&mut self, frame: &mut Frame) {
        self.status_bar.commands = self.commands();

        let layout =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());
        let content = layout[0];

        match self.focus.get() {
            AppFocus::LaunchScr => self.launch_screen.render(frame, content),
            AppFocus::SetupScr(..) => self.setup_screen.render(frame, content),
            AppFocus::JournalScr(..) => self.journal_screen.render(frame, content),
            AppFocus::SummaryScr => self.summary_screen.render(frame, content),
            AppFocus::ConfModal => {
                match self.background_focus {
                    Some(AppFocus::SetupScr(..)) => self.setup_screen.render(frame, content),
                    Some(AppFocus::JournalScr(..)) => self.journal_screen.render(frame, content),
                    Some(AppFocus::SummaryScr) => self.summary_screen.render(frame, content),
                    _ => {}
                }
                self.confirm_modal.render(frame, content);
            }
            AppFocus::NotFocused => {}
        }

        self.status_bar.render(frame, layout[1]);

        if self.raw_mode {
            frame.set_cursor_position(self.cursor_pos.get());
        }
    }
}

impl Component for App {
    fn commands(&self) -> Vec<CommandGroup> {
        let mut out = vec![];

        match self.focus.get() {
            AppFocus::LaunchScr => out.append(&mut self.launch_screen.commands()),
            AppFocus::SetupScr(..) => out.append(&mut self.setup_screen.commands()),
            AppFocus::JournalScr(..) => out.append(&mut self.journal_screen.commands()),
            AppFocus::SummaryScr => out.append(&mut self.summary_screen.commands()),
            AppFocus::ConfModal => out.append(&mut self.confirm_modal.commands()),
            AppFocus::NotFocused => {}
        }

        if !self.raw_mode {
            if matches!(self.focus.get(), AppFocus::JournalScr(..)) {
                out.push(CommandGroup::new(vec![Command::ShowSummary], "summary"));
            }
            out.push(CommandGroup::new(vec![Command::Quit], "quit"));
        }

        out
    }

    fn handle_command(&mut self, command: &Command, queue: &mut SignalQueue) {
        match command {
            Command::Quit => {
                self.exiting = true;
                return;
            }
            Command::ShowSummary => {
                if matches!(self.focus.get(), AppFocus::JournalScr(..)) {
                    self.summary_screen.focus();
                    queue.push(Event::FocusedChanged);
                    return;
                }
            }
            _ => {}
        }

        match self.focus.get() {
            AppFocus::LaunchScr => self.launch_screen.handle_command(command, queue),
            AppFocus::SetupScr(..) => self.setup_screen.handle_command(command, queue),
            AppFocus::JournalScr(..) => self.journal_screen.handle_command(command, queue),
            AppFocus::SummaryScr => self.summary_screen.handle_command(command, queue),
            AppFocus::ConfModal => self.confirm_modal.handle_command(command, queue),
            AppFocus::NotFocused => {}
        }
    }

    fn handle_raw_event(&mut self, event: &CrosstermEvent, queue: &mut SignalQueue) {
        match self.focus.get() {
            AppFocus::SetupScr(..) => self.setup_screen.handle_raw_event(event, queue),
            AppFocus::JournalScr(..) => self.journal_screen.handle_raw_event(event, queue),
            _ => {}
        }
    }

    fn handle_event(&mut self, event: &Event, queue: &mut SignalQueue) {
        match event {
            Event::SetupCompleted(profile) => {
                if let Err(err) = self.profile.set(profile.clone()) {
                    tracing::error!("Could not save profile: {err}");
                    queue.push(Event::ErrorOccurred(
                        "Could not save your profile.".to_string(),
                    ));
                }
            }
            Event::ConfirmYes(..) | Event::ConfirmNo => {
                self.focus
                    .set(self.background_focus.take().unwrap_or_default());
            }
            _ => {}
        }

        self.launch_screen.handle_event(event, queue);
        self.setup_screen.handle_event(event, queue);
        self.journal_screen.handle_event(event, queue);
        self.summary_screen.handle_event(event, queue);
        self.status_bar.handle_event(event, queue);
    }

    fn handle_message(&mut self, message: &Message, queue: &mut SignalQueue) {
        if let Some(action) = message.read_as_app() {
            match action {
                AppAction::EnterRawMode => self.raw_mode = true,
                AppAction::ExitRawMode => self.raw_mode = false,
                AppAction::RequestConfirmation(kind) => {
                    self.background_focus = Some(self.focus.get());
                    self.confirm_modal.show_with(*kind);
                }
            }
        } else if message.read_as_setup_scr().is_some() {
            self.setup_screen.handle_message(message, queue);
        } else if message.read_as_journal_scr().is_some() {
            self.journal_screen.handle_message(message, queue);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedApp {
    pub focus: AppFocus,
    pub journal: PersistedJournalScreen,
}

impl PersistedComponent for App {
    type StorageType = PersistedApp;

    fn persist(&self) -> Self::StorageType {
        // don't save focus as a modal or mid-edit input, it gets weird
        let focus = match self.focus.get() {
            AppFocus::JournalScr(JournalScrFocus::AmountIn | JournalScrFocus::NoteIn) => {
                AppFocus::JournalScr(JournalScrFocus::EntryList)
            }
            focus @ (AppFocus::JournalScr(..) | AppFocus::SummaryScr) => focus,
            AppFocus::ConfModal | AppFocus::NotFocused => self
                .background_focus
                .unwrap_or(AppFocus::JournalScr(JournalScrFocus::Calendar)),
            // an interrupted setup starts over
            AppFocus::LaunchScr | AppFocus::SetupScr(..) => AppFocus::LaunchScr,
        };

        PersistedApp {
            focus,
            journal: self.journal_screen.persist(),
        }
    }

    fn hydrate(&mut self, storage: Self::StorageType) {
        self.focus.set(storage.focus);
        self.journal_screen.hydrate(storage.journal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mock_storage::MockStorage;

    fn mock_app() -> App {
        let storage: Rc<dyn Storage> = Rc::new(MockStorage::default());
        App::new(
            ViewRelay::default(),
            ProfileManager::new(storage.clone()),
            EntryStore::new(vec![], storage.clone()),
            KeyMap::default(),
            Config::default(),
            storage,
        )
    }

    fn drain(app: &mut App, signal: impl Into<Signal>) {
        let mut queue = SignalQueue::default();
        queue.push(signal.into());
        app.process_signals(queue);
    }

    #[test]
    fn first_tick_redirects_to_setup() {
        let mut app = mock_app();

        drain(&mut app, Event::Tick);

        assert!(matches!(app.focus.get(), AppFocus::SetupScr(..)));
        assert!(app.raw_mode);
    }

    #[test]
    fn first_tick_redirects_to_journal_when_profile_exists() {
        let storage: Rc<dyn Storage> = Rc::new(MockStorage {
            profile: Some(crate::model::profile::UserProfile::default()),
            ..Default::default()
        });
        let mut app = App::new(
            ViewRelay::default(),
            ProfileManager::new(storage.clone()),
            EntryStore::new(vec![], storage.clone()),
            KeyMap::default(),
            Config::default(),
            storage,
        );

        drain(&mut app, Event::Tick);

        assert!(matches!(app.focus.get(), AppFocus::JournalScr(..)));
    }

    #[test]
    fn completed_setup_is_saved_and_lands_on_the_journal() {
        let mut app = mock_app();

        drain(
            &mut app,
            Event::SetupCompleted(crate::model::profile::UserProfile {
                name: "Frankie".to_string(),
                units: crate::utils::units::UnitSystem::Metric,
            }),
        );

        assert!(matches!(app.focus.get(), AppFocus::JournalScr(..)));
        assert_eq!(
            app.profile.current().map(|p| p.name),
            Some("Frankie".to_string())
        );
    }

    #[test]
    fn persisted_focus_is_never_a_modal() {
        let mut app = mock_app();
        app.journal_screen.focus();

        let mut queue = SignalQueue::default();
        app.handle_message(
            &Message::to_app(AppAction::RequestConfirmation(
                crate::components::confirm_modal::ConfirmKind::DeleteEntry,
            )),
            &mut queue,
        );
        assert_eq!(app.focus.get(), AppFocus::ConfModal);

        let persisted = app.persist();
        assert!(matches!(persisted.focus, AppFocus::JournalScr(..)));
    }
}
