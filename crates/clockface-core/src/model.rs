use crate::command::Command;
use crate::event::TerminalEvent;
use ratatui::Frame;

/// The top-level application driven by a [`Program`](crate::Program).
///
/// The runtime runs an **init -> view -> event -> update** cycle:
///
/// 1. [`init`](Model::init) builds the initial state and may return a
///    [`Command`] for early side effects.
/// 2. [`view`](Model::view) draws the current state.
/// 3. Terminal input is offered to [`on_event`](Model::on_event), which turns
///    the events the application cares about into messages.
/// 4. [`update`](Model::update) applies each message and may return further
///    commands (timers, immediate follow-up messages, quit).
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Initialization data passed to [`Model::init`]. Use `()` when none is needed.
    type Flags: Send + 'static;

    /// Create the initial model state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message, mutate state, and return a command for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state to a ratatui [`Frame`].
    fn view(&self, frame: &mut Frame);

    /// Map a terminal event to a message. Events mapped to `None` are dropped.
    ///
    /// The default implementation ignores every event.
    fn on_event(&self, event: TerminalEvent) -> Option<Self::Message> {
        let _ = event;
        None
    }
}
