use std::io;
use std::time::{Duration, Instant};

use board_scene::ChessBoard;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::player::Player;
use crate::script::{ScriptRunner, Step};
use crate::ui::board_widget::BoardWidget;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// A board, the player animating it, and the script driving both.
pub struct App {
    board: ChessBoard,
    player: Player,
    runner: ScriptRunner,
    theme: Theme,
    title: String,
    paused: bool,
    last_error: Option<String>,
}

impl App {
    pub fn new(board: ChessBoard, steps: Vec<Step>, run_time: Duration) -> Self {
        Self {
            board,
            player: Player::new(run_time),
            runner: ScriptRunner::new(steps),
            theme: Theme::default(),
            title: "♟ Chess Board ♟".to_string(),
            paused: false,
            last_error: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Script finished and nothing left to animate.
    pub fn is_finished(&self) -> bool {
        self.runner.is_done() && self.player.is_idle()
    }

    /// Advance animations and the script by `dt`. A failing step is logged,
    /// shown in the status line, and skipped.
    pub fn tick(&mut self, dt: Duration) {
        if self.paused {
            return;
        }
        self.player.tick(self.board.scene_mut(), dt);
        if let Err(e) = self.runner.tick(&mut self.board, &mut self.player, dt) {
            tracing::warn!("Script step failed: {}", e);
            self.last_error = Some(e.to_string());
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.kind != KeyEventKind::Press {
            return AppAction::Continue;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
                tracing::debug!(paused = self.paused, "Toggled pause");
                AppAction::Continue
            }
            KeyCode::Char('n') => {
                self.player.skip(self.board.scene_mut());
                AppAction::Continue
            }
            _ => AppAction::Continue,
        }
    }

    fn status_line(&self) -> String {
        let state = if self.paused {
            "paused"
        } else if self.is_finished() {
            "done"
        } else {
            "playing"
        };
        let mut line = format!(
            "step {}/{} · {} · space pause · n skip · q quit",
            self.runner.position(),
            self.runner.total(),
            state
        );
        if let Some(err) = &self.last_error {
            line.push_str(" · ");
            line.push_str(err);
        }
        line
    }

    pub fn render(&self, frame: &mut Frame) {
        self.render_area(frame, frame.area());
    }

    fn render_area(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let widget = BoardWidget::new(self.board.scene(), self.board.dims(), &self.theme)
            .title(&self.title);
        frame.render_widget(widget, chunks[0]);

        let color = if self.last_error.is_some() {
            self.theme.status_error
        } else {
            self.theme.status_text
        };
        let status = Paragraph::new(self.status_line()).style(Style::default().fg(color));
        frame.render_widget(status, chunks[1]);
    }
}

/// Take over the terminal, run the app until the user quits, restore the
/// terminal.
pub async fn run_app(mut app: App, frame_interval: Duration) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_ui_loop(&mut terminal, &mut app, frame_interval).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_ui_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    frame_interval: Duration,
) -> anyhow::Result<()> {
    let mut term_events = EventStream::new();

    // Frame tick drives animation; key events wake the loop immediately.
    let mut render_tick = tokio::time::interval(frame_interval);
    let mut last_frame = Instant::now();

    loop {
        let term_event = tokio::select! {
            biased;

            maybe_event = term_events.next() => {
                match maybe_event {
                    Some(Ok(ev)) => Some(ev),
                    Some(Err(e)) => {
                        tracing::warn!("Terminal event error: {}", e);
                        None
                    }
                    None => None,
                }
            }

            _ = render_tick.tick() => None,
        };

        let now = Instant::now();
        app.tick(now - last_frame);
        last_frame = now;

        terminal.draw(|f| app.render(f))?;

        if let Some(Event::Key(key)) = term_event {
            if app.handle_key(key) == AppAction::Quit {
                return Ok(());
            }
        }
    }
}
