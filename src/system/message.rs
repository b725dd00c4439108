use crate::components::confirm_modal::ConfirmKind;

#[derive(Debug, Clone, strum_macros::Display)]
pub enum AppAction {
    EnterRawMode,
    ExitRawMode,
    RequestConfirmation(ConfirmKind),
}

#[derive(Debug, Clone, strum_macros::Display)]
pub enum SetupAction {
    FocusUnitsList,
    FinishSetup,
}

#[derive(Debug, Clone, strum_macros::Display)]
pub enum JournalAction {
    FocusNoteInput,
    FinishEntry,
    CancelEntry,
}

#[derive(Debug, Clone)]
enum Action {
    App(AppAction),
    SetupScreen(SetupAction),
    JournalScreen(JournalAction),
}

#[derive(Debug, Clone)]
pub struct Message(Action);

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Action::App(action) => write!(f, "App({action})"),
            Action::SetupScreen(action) => write!(f, "SetupScreen({action})"),
            Action::JournalScreen(action) => write!(f, "JournalScreen({action})"),
        }
    }
}

impl Message {
    pub const fn to_app(action: AppAction) -> Self {
        Self(Action::App(action))
    }

    pub const fn to_setup_scr(action: SetupAction) -> Self {
        Self(Action::SetupScreen(action))
    }

    pub const fn to_journal_scr(action: JournalAction) -> Self {
        Self(Action::JournalScreen(action))
    }

    pub const fn read_as_app(&self) -> Option<&AppAction> {
        if let Action::App(action) = &self.0 {
            Some(action)
        } else {
            None
        }
    }

    pub const fn read_as_setup_scr(&self) -> Option<&SetupAction> {
        if let Action::SetupScreen(action) = &self.0 {
            Some(action)
        } else {
            None
        }
    }

    pub const fn read_as_journal_scr(&self) -> Option<&JournalAction> {
        if let Action::JournalScreen(action) = &self.0 {
            Some(action)
        } else {
            None
        }
    }
}
