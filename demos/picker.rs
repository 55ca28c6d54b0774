//! # Picker Example
//!
//! Embeds a [`Clockface`] in a small app:
//! - Routing terminal key and mouse events into the picker's messages
//! - Using `Command::map` to lift the picker's commands into the app
//! - Reacting to the picker's `Changed` / `Submit` notifications
//! - Logging with `tracing` to a file while the terminal belongs to the UI
//!
//! Run with: `cargo run -p clockface --example picker -- "hh:mm A" "9:05 p"`
//! Set `RUST_LOG=clockface=trace` to see every dial refill in `clockface.log`.

use clockface::crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};
use clockface::ratatui::layout::{Alignment, Constraint, Layout};
use clockface::ratatui::style::{Color, Style};
use clockface::ratatui::text::{Line, Span};
use clockface::ratatui::widgets::{Block, Borders, Paragraph};
use clockface::ratatui::Frame;
use clockface::{
    log_to_file, picker, Clockface, ClockfaceOptions, Command, Component, Model, ProgramOptions,
    TerminalEvent, TimeValue,
};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

struct Flags {
    format: String,
    initial: TimeValue,
}

struct PickerApp {
    picker: Clockface,
    current: String,
    submitted: Option<String>,
}

#[derive(Debug)]
enum Msg {
    Picker(picker::Message),
    Quit,
}

impl Model for PickerApp {
    type Message = Msg;
    type Flags = Flags;

    fn init(flags: Flags) -> (Self, Command<Msg>) {
        let mut picker = Clockface::new(ClockfaceOptions::default().with_format(flags.format))
            .with_block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" clockface "),
            );
        picker.show(flags.initial);
        picker.focus();
        let current = picker.get_time();
        (
            PickerApp {
                picker,
                current,
                submitted: None,
            },
            Command::none(),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Picker(picker::Message::Changed(time)) => {
                self.current = time;
                Command::none()
            }
            Msg::Picker(picker::Message::Submit(time)) => {
                tracing::info!(%time, "time submitted");
                self.submitted = Some(time);
                Command::none()
            }
            Msg::Picker(m) => self.picker.update(m).map(Msg::Picker),
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [_, face_area, status_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [_, face_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(24),
            Constraint::Fill(1),
        ])
        .areas(face_area);

        self.picker.view(frame, face_area);

        let mut status = vec![Line::from(vec![
            Span::styled("time ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.current.as_str()),
        ])];
        if let Some(ref submitted) = self.submitted {
            status.push(Line::from(Span::styled(
                format!("submitted {submitted}"),
                Style::default().fg(Color::Green),
            )));
        }
        frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), status_area);

        let help = Line::from(vec![
            Span::styled("0-9", Style::default().fg(Color::Cyan)),
            Span::raw(" type  "),
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(" hour/minute  "),
            Span::styled("↑↓", Style::default().fg(Color::Cyan)),
            Span::raw(" dial  "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" am/pm  "),
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" submit  "),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]);
        frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), help_area);
    }

    fn on_event(&self, event: TerminalEvent) -> Option<Msg> {
        match event {
            TerminalEvent::Key(key) => match (key.code, key.modifiers) {
                (KeyCode::Esc, _) => Some(Msg::Quit),
                (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Msg::Quit),
                _ => Some(Msg::Picker(picker::Message::KeyPress(key))),
            },
            TerminalEvent::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                Some(Msg::Picker(picker::Message::Mouse(mouse)))
            }
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log = log_to_file("clockface.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let mut args = std::env::args().skip(1);
    let format = args.next().unwrap_or_else(|| ClockfaceOptions::default().format);
    let initial = args.next().map(TimeValue::from).unwrap_or(TimeValue::Now);

    let options = ProgramOptions {
        mouse_capture: true,
        title: Some("clockface".into()),
        ..ProgramOptions::default()
    };
    let app = clockface::run_with::<PickerApp>(Flags { format, initial }, options).await?;
    println!("{}", app.picker.get_time());
    Ok(())
}
