//! Interactive review application
//!
//! Owns the terminal and the session. Effects from the reducer are spawned on
//! the tokio runtime; their results come back over an unbounded channel and
//! are fed to the reducer one at a time between frames.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::render;
use super::theme::Theme;
use crate::git::IgnoreMatcher;
use crate::log_debug;
use crate::pipeline::{Effect, EffectRunner, Lifecycle, PipelineEvent, PipelineSession, reduce};

const POLL_INTERVAL: Duration = Duration::from_millis(80);

/// How the interactive run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitResult {
    /// Nothing was staged, so the run had no work
    NothingStaged,
    /// Every committable file was committed
    Completed { committed: usize },
    /// The user left before finishing
    Quit,
    /// The run stopped on an error; the cause is kept for printing
    Failed(String),
}

pub struct ReviewApp {
    session: PipelineSession,
    matcher: IgnoreMatcher,
    runner: EffectRunner,
    theme: Theme,
    result_rx: mpsc::UnboundedReceiver<PipelineEvent>,
    result_tx: mpsc::UnboundedSender<PipelineEvent>,
    exit_at: Option<Instant>,
    quit_requested: bool,
}

/// Map a key press to a pipeline command for the current state
pub fn key_to_event(lifecycle: Lifecycle, key: KeyEvent) -> Option<PipelineEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(PipelineEvent::Quit);
    }

    match lifecycle {
        Lifecycle::Review => match key.code {
            KeyCode::Char('c') => Some(PipelineEvent::Confirm),
            KeyCode::Char('r') => Some(PipelineEvent::Retry),
            KeyCode::Char('q') | KeyCode::Esc => Some(PipelineEvent::Quit),
            KeyCode::Down | KeyCode::Char('j') => Some(PipelineEvent::SelectNext),
            KeyCode::Up | KeyCode::Char('k') => Some(PipelineEvent::SelectPrev),
            _ => None,
        },
        Lifecycle::Loading | Lifecycle::Processing | Lifecycle::Complete => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(PipelineEvent::Quit),
            _ => None,
        },
        Lifecycle::Error => Some(PipelineEvent::Quit),
    }
}

impl ReviewApp {
    pub fn new(runner: EffectRunner, matcher: IgnoreMatcher) -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        Self {
            session: PipelineSession::new(),
            matcher,
            runner,
            theme: Theme::default(),
            result_rx,
            result_tx,
            exit_at: None,
            quit_requested: false,
        }
    }

    /// Run the TUI until the pipeline exits. Must be called from inside a
    /// multi-threaded tokio runtime.
    pub fn run(&mut self) -> Result<ExitResult> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result?;
        Ok(self.exit_result())
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        self.dispatch(PipelineEvent::Start);

        loop {
            while let Ok(event) = self.result_rx.try_recv() {
                self.dispatch(event);
            }

            terminal.draw(|frame| render::draw(frame, &self.session, &self.theme))?;

            if self.quit_requested || self.exit_at.is_some_and(|at| Instant::now() >= at) {
                return Ok(());
            }

            if event::poll(POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && let Some(command) = key_to_event(self.session.lifecycle, key)
            {
                self.dispatch(command);
            }

            self.dispatch(PipelineEvent::Tick);
        }
    }

    fn dispatch(&mut self, event: PipelineEvent) {
        for effect in reduce(&mut self.session, event, &self.matcher) {
            match effect {
                Effect::Exit => self.quit_requested = true,
                Effect::ExitAfter(delay) => {
                    self.exit_at.get_or_insert_with(|| Instant::now() + delay);
                }
                other => self.spawn_effect(other),
            }
        }
    }

    fn spawn_effect(&self, effect: Effect) {
        log_debug!("Spawning effect: {:?}", effect);
        let runner = self.runner.clone();
        let tx = self.result_tx.clone();
        tokio::spawn(async move {
            if let Some(event) = runner.execute(effect).await {
                let _ = tx.send(event);
            }
        });
    }

    fn exit_result(&self) -> ExitResult {
        match self.session.lifecycle {
            Lifecycle::Complete if self.session.files.is_empty() => ExitResult::NothingStaged,
            Lifecycle::Complete => ExitResult::Completed {
                committed: self.session.committed_count(),
            },
            Lifecycle::Error => ExitResult::Failed(
                self.session
                    .last_error
                    .clone()
                    .unwrap_or_else(|| "unknown error".to_string()),
            ),
            Lifecycle::Loading | Lifecycle::Processing | Lifecycle::Review => ExitResult::Quit,
        }
    }
}
