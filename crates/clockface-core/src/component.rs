use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable piece of UI state that renders into a given [`Rect`].
///
/// A component owns its state exclusively and mutates it only inside
/// [`update`](Component::update). The parent decides *where* it is drawn by
/// passing a sub-region of the frame to [`view`](Component::view), and routes
/// input to it by wrapping the component's messages in one of its own:
///
/// ```rust,ignore
/// enum AppMsg { Picker(clockface::Message) }
///
/// fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///     match msg {
///         AppMsg::Picker(m) => self.picker.update(m).map(AppMsg::Picker),
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// The parent should call [`.map()`](Command::map) on the result to lift
    /// it into the parent message type.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area`. Implementations confine all drawing to it.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently has focus.
    ///
    /// A hint for input routing. The default implementation returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
