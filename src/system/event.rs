use super::command::Command;
use crate::model::{entry::LogEntry, profile::UserProfile};
use chrono::NaiveDate;

#[derive(Debug, Clone, strum_macros::Display)]
pub enum Event {
    /// Emitted every event loop iteration to give components an opportunity
    /// to check for and process pending work
    Tick,

    ListSelectionChanged,

    StatusMessageCleared,

    ProfileLoaded(UserProfile),
    SetupRequired,
    SetupCompleted(UserProfile),

    DaySelected(NaiveDate),
    DayListOpened(NaiveDate),
    SummaryDayChosen(NaiveDate),

    EntryCreationStarted,
    EntryCreated(LogEntry),
    EntryDeleted,

    ErrorOccurred(String),

    FocusedChanged,

    InputKeyPressed,

    ScreenResized,

    ConfirmYes(Command),
    ConfirmNo,
}
