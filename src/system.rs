/// Commands represent user intentions. They correspond one-to-one with key
/// presses, and are the things that users can configure key maps for. Each
/// command is passed to the root component (`App`) as well as to every
/// component in the component tree between the root and the currently-focused
/// component.
pub mod command;

/// Events represent things that happen within the program. Events are emitted
/// by components as a result of handling a command, a message, or another
/// event. The root component (`App`), the status bar, as well as every screen
/// component (even those that are not currently visible) receive every event.
pub mod event;

/// Messages represent direct imperative communications between components.
/// Like events, a component may emit a message when it handles a command,
/// event, or another message. Unlike events, messages are tagged with a
/// recipient component, and are only handled by that component.
pub mod message;

/// The single-slot mailbox used to pass a "show this day's entries" request
/// between screens that do not hold references to each other.
pub mod relay;

/// Signal utilities including the Signal enum and `SignalQueue` for managing
/// the communication between components in the event-driven system.
pub mod signal;
