use crate::command::Command;
use crate::component::Component;
use futures::future::{self, BoxFuture};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless harness that drives a [`Component`] without a real terminal.
///
/// Messages sent with [`send`](TestHarness::send) go straight to
/// [`Component::update`]. Immediate follow-up messages are queued and flushed
/// by [`drain_messages`](TestHarness::drain_messages). Deferred commands
/// (timers, futures) are held until [`run_deferred`](TestHarness::run_deferred)
/// awaits them, so async tests can run timers under a paused tokio clock.
///
/// # Example
///
/// ```rust,ignore
/// use clockface_core::testing::TestHarness;
///
/// let mut h = TestHarness::new(Clockface::new(ClockfaceOptions::default()));
/// h.send(Message::ClickCell(1));
/// h.drain_messages();
/// assert!(h.render_string(24, 7).contains("12"));
/// ```
pub struct TestHarness<C: Component> {
    component: C,
    pending_messages: Vec<C::Message>,
    handled: usize,
    deferred: usize,
    timers: Vec<BoxFuture<'static, C::Message>>,
}

impl<C: Component> TestHarness<C> {
    /// Wrap a component.
    pub fn new(component: C) -> Self {
        Self {
            component,
            pending_messages: Vec::new(),
            handled: 0,
            deferred: 0,
            timers: Vec::new(),
        }
    }

    /// Send a message, triggering a single update cycle.
    pub fn send(&mut self, msg: C::Message) {
        let cmd = self.component.update(msg);
        self.handled += 1;
        self.collect(cmd);
    }

    /// Process queued immediate messages until none remain.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Await every deferred command returned so far, then send each
    /// resulting message through `update` in the order the commands were
    /// returned. Deferred commands produced by those updates are held for the
    /// next call. Returns how many messages were delivered.
    pub async fn run_deferred(&mut self) -> usize {
        let timers = std::mem::take(&mut self.timers);
        let messages = future::join_all(timers).await;
        let delivered = messages.len();
        for msg in messages {
            self.send(msg);
        }
        delivered
    }

    /// Messages waiting to be drained.
    pub fn pending(&self) -> &[C::Message] {
        &self.pending_messages
    }

    /// Total number of messages passed to `update` so far.
    pub fn handled(&self) -> usize {
        self.handled
    }

    /// Number of deferred commands returned so far.
    pub fn deferred(&self) -> usize {
        self.deferred
    }

    /// Shared access to the component for assertions.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Mutable access for arranging state outside the message cycle.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Render the component into a buffer of the given size.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend");
        terminal
            .draw(|frame| {
                let area = frame.area();
                self.component.view(frame, area);
            })
            .expect("draw");
        terminal.backend().buffer().clone()
    }

    /// Render and return the visible content, one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(buf[(x, y)].symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }

    fn collect(&mut self, cmd: Command<C::Message>) {
        let before = self.timers.len();
        cmd.flatten(&mut self.pending_messages, &mut self.timers);
        self.deferred += self.timers.len() - before;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;
    use ratatui::Frame;
    use std::time::Duration;

    struct Dial {
        value: u32,
        settled: u32,
    }

    #[derive(Debug)]
    enum DialMsg {
        Step,
        StepTwice,
        Settle,
        Settled,
    }

    impl Component for Dial {
        type Message = DialMsg;

        fn update(&mut self, msg: DialMsg) -> Command<DialMsg> {
            match msg {
                DialMsg::Step => {
                    self.value += 5;
                    Command::none()
                }
                DialMsg::StepTwice => {
                    Command::batch(vec![Command::message(DialMsg::Step), Command::message(DialMsg::Step)])
                }
                DialMsg::Settle => Command::tick(Duration::from_millis(400), |_| DialMsg::Settled),
                DialMsg::Settled => {
                    self.settled += 1;
                    Command::none()
                }
            }
        }

        fn view(&self, frame: &mut Frame, area: Rect) {
            frame.render_widget(Paragraph::new(format!("value {:02}", self.value)), area);
        }
    }

    fn dial() -> TestHarness<Dial> {
        TestHarness::new(Dial { value: 0, settled: 0 })
    }

    #[test]
    fn send_updates_component() {
        let mut h = dial();
        h.send(DialMsg::Step);
        assert_eq!(h.component().value, 5);
        assert_eq!(h.handled(), 1);
    }

    #[test]
    fn immediate_messages_wait_for_drain() {
        let mut h = dial();
        h.send(DialMsg::StepTwice);
        assert_eq!(h.pending().len(), 2);
        assert_eq!(h.component().value, 0);
        h.drain_messages();
        assert_eq!(h.component().value, 10);
        assert!(h.pending().is_empty());
    }

    #[test]
    fn deferred_commands_wait_to_be_run() {
        let mut h = dial();
        h.send(DialMsg::Settle);
        h.send(DialMsg::Settle);
        h.drain_messages();
        assert_eq!(h.deferred(), 2);
        assert_eq!(h.component().settled, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn run_deferred_delivers_timer_messages() {
        let mut h = dial();
        h.send(DialMsg::Settle);
        h.send(DialMsg::Settle);
        assert_eq!(h.run_deferred().await, 2);
        assert_eq!(h.component().settled, 2);
        assert_eq!(h.run_deferred().await, 0);
    }

    #[test]
    fn render_string_shows_view() {
        let mut h = dial();
        h.send(DialMsg::Step);
        assert_eq!(h.render_string(10, 1), "value 05  ");
    }
}
