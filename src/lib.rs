//! # quizgen
//!
//! Turns a PDF, Word or text document into a multiple-choice quiz using a
//! hosted model, then runs the quiz in the terminal.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quizgen::{Config, QuizApp};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let generator = config.gemini.client()?;
//!
//!     QuizApp::new(generator).run(None).await?;
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
pub mod document;
mod error;
pub mod generation;
pub mod logging;
mod models;
mod player;
mod review;
mod scoring;
mod setup;
mod shuffle;
pub mod terminal;
mod ui;
mod upload;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub use app::App;
pub use config::Config;
pub use document::{DocumentKind, DocumentPayload, SourceFile, read_document};
pub use error::{
    DocumentError, GENERATION_FAILED_MESSAGE, GenerationError, ProcessError, QuizError,
    TransitionError, UNSUPPORTED_FILE_MESSAGE,
};
pub use generation::{GeminiClient, QuizGenerator};
pub use models::{Answers, Phase, Question, QuizConfig, QuizState};
pub use player::{Player, Submission, TICK};
pub use review::Review;
pub use scoring::{Grade, ScoreReport};
pub use setup::{SetupField, SetupForm, parse_minutes};
pub use shuffle::{prepare_questions, randomize_order};
pub use upload::{UploadForm, UploadOutcome, process_file};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// Start reading and generating from this file in the background.
    Upload(SourceFile),
}

/// The terminal quiz application.
pub struct QuizApp {
    app: App,
    generator: Arc<dyn QuizGenerator>,
}

impl QuizApp {
    pub fn new(generator: impl QuizGenerator + 'static) -> Self {
        Self {
            app: App::new(),
            generator: Arc::new(generator),
        }
    }

    /// Get a reference to the underlying state machine.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Take over the terminal until the user quits.
    ///
    /// With `file`, the upload screen starts processing it right away.
    pub async fn run(mut self, file: Option<PathBuf>) -> Result<(), QuizError> {
        let (tx, rx) = mpsc::unbounded_channel();

        if let Some(path) = file {
            self.app = App::with_upload_path(path.to_string_lossy());
            if let Some(source) = self.app.upload_mut().prepare() {
                spawn_upload(source, Arc::clone(&self.generator), tx.clone());
            }
        }

        let mut session = terminal::TerminalSession::start()?;
        info!("Terminal UI started");
        run_event_loop(session.terminal(), &mut self.app, &self.generator, tx, rx)
    }
}

fn spawn_upload(
    file: SourceFile,
    generator: Arc<dyn QuizGenerator>,
    tx: mpsc::UnboundedSender<UploadOutcome>,
) {
    info!(file = %file.name, "Processing upload");
    tokio::spawn(async move {
        let result = process_file(&file, generator.as_ref()).await;
        let _ = tx.send(UploadOutcome {
            file_name: file.name,
            result,
        });
    });
}

fn run_event_loop(
    terminal: &mut terminal::Tui,
    app: &mut App,
    generator: &Arc<dyn QuizGenerator>,
    tx: mpsc::UnboundedSender<UploadOutcome>,
    mut rx: mpsc::UnboundedReceiver<UploadOutcome>,
) -> Result<(), QuizError> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        while let Ok(outcome) = rx.try_recv() {
            if let Err(e) = app.finish_upload(outcome.file_name, outcome.result) {
                warn!(error = %e, "Dropped upload result");
            }
        }

        // the clock only runs while the player is on screen
        let timeout = if app.phase() == Phase::Playing {
            for _ in 0..due_ticks(&mut last_tick, Instant::now()) {
                app.tick();
            }
            POLL_INTERVAL.min(TICK.saturating_sub(last_tick.elapsed()))
        } else {
            last_tick = Instant::now();
            POLL_INTERVAL
        };

        if !event::poll(timeout)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_input(app, key) {
            Action::Quit => break,
            Action::Upload(file) => spawn_upload(file, Arc::clone(generator), tx.clone()),
            Action::None => {}
        }
    }

    info!("Terminal UI closed");
    Ok(())
}

/// Counts the whole ticks elapsed since `last_tick` and advances it by that
/// many, so a late check never pushes later ticks back.
fn due_ticks(last_tick: &mut Instant, now: Instant) -> u32 {
    let mut due = 0;
    while now.saturating_duration_since(*last_tick) >= TICK {
        *last_tick += TICK;
        due += 1;
    }
    due
}

/// Routes a key press to the handler of the current phase.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match app.phase() {
        Phase::Upload => handle_upload_input(app, key.code),
        Phase::Config => handle_config_input(app, key.code),
        Phase::Playing => handle_playing_input(app, key.code),
        Phase::Result => handle_result_input(app, key.code),
    }
}

fn handle_upload_input(app: &mut App, key: KeyCode) -> Action {
    let form = app.upload_mut();

    if form.alert().is_some() {
        form.dismiss_alert();
        return Action::None;
    }
    if key == KeyCode::Esc {
        return Action::Quit;
    }
    if form.is_loading() {
        return Action::None;
    }

    match key {
        KeyCode::Char(c) => form.push(c),
        KeyCode::Backspace => form.pop(),
        KeyCode::Enter => {
            if let Some(file) = form.prepare() {
                return Action::Upload(file);
            }
        }
        _ => {}
    }
    Action::None
}

fn handle_config_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.setup_mut().previous_field(),
        KeyCode::Down | KeyCode::Char('j') => app.setup_mut().next_field(),
        KeyCode::Char(' ') => app.setup_mut().toggle(),
        KeyCode::Char(c) if c.is_ascii_digit() => app.setup_mut().push_digit(c),
        KeyCode::Backspace => app.setup_mut().pop_digit(),
        KeyCode::Char('+') | KeyCode::Right => app.setup_mut().increment_minutes(),
        KeyCode::Char('-') | KeyCode::Left => app.setup_mut().decrement_minutes(),
        KeyCode::Enter => {
            let config = app.setup().config();
            if let Err(e) = app.start(config) {
                warn!(error = %e, "Start ignored");
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') => app.new_upload(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Action::Quit,
        _ => {}
    }
    Action::None
}

fn handle_playing_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Char('s') | KeyCode::Char('S') => {
            if let Err(e) = app.submit() {
                warn!(error = %e, "Submit ignored");
            }
            return Action::None;
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.new_upload();
            return Action::None;
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
        _ => {}
    }

    let Some(player) = app.player_mut() else {
        return Action::None;
    };

    if player.grid_cursor().is_some() {
        match key {
            KeyCode::Left | KeyCode::Char('h') => player.move_grid(-1),
            KeyCode::Right | KeyCode::Char('l') => player.move_grid(1),
            KeyCode::Up | KeyCode::Char('k') => player.move_grid(-(ui::GRID_COLUMNS as isize)),
            KeyCode::Down | KeyCode::Char('j') => player.move_grid(ui::GRID_COLUMNS as isize),
            KeyCode::Enter => player.jump_to_grid_cursor(),
            KeyCode::Char('g') | KeyCode::Esc => player.toggle_grid(),
            _ => {}
        }
        return Action::None;
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => player.highlight_previous(),
        KeyCode::Down | KeyCode::Char('j') => player.highlight_next(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            player.select_highlighted();
        }
        KeyCode::Char(c @ 'a'..='d') => {
            player.select(c as usize - 'a' as usize);
        }
        KeyCode::Char(c @ '1'..='9') => {
            player.select(c as usize - '1' as usize);
        }
        KeyCode::Left | KeyCode::Char('h') => player.previous(),
        KeyCode::Right | KeyCode::Char('l') => player.next(),
        KeyCode::Char('g') => player.toggle_grid(),
        _ => {}
    }
    Action::None
}

fn handle_result_input(app: &mut App, key: KeyCode) -> Action {
    let total = app.questions().len();

    match key {
        KeyCode::Down | KeyCode::Char('j') => app.review_mut().move_down(total),
        KeyCode::Up | KeyCode::Char('k') => app.review_mut().move_up(),
        KeyCode::Enter | KeyCode::Char(' ') => app.review_mut().toggle(),
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if let Err(e) = app.retry() {
                warn!(error = %e, "Retry ignored");
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') => app.new_upload(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Action::Quit,
        _ => {}
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_ticks_keeps_one_second_cadence() {
        let start = Instant::now();
        let mut last_tick = start;

        assert_eq!(due_ticks(&mut last_tick, start + Duration::from_millis(999)), 0);
        assert_eq!(last_tick, start);

        // a check that lands late still schedules the next tick from the deadline
        assert_eq!(due_ticks(&mut last_tick, start + Duration::from_millis(1_090)), 1);
        assert_eq!(last_tick, start + TICK);
        assert_eq!(due_ticks(&mut last_tick, start + Duration::from_millis(2_000)), 1);
        assert_eq!(last_tick, start + TICK * 2);

        assert_eq!(due_ticks(&mut last_tick, start + Duration::from_millis(5_500)), 3);
        assert_eq!(last_tick, start + TICK * 5);
    }

    #[test]
    fn test_due_ticks_over_a_full_time_limit() {
        let start = Instant::now();
        let mut last_tick = start;
        let mut ticks = 0;

        // checks every 105ms, like an idle loop of poll plus draw
        let mut now = start;
        while now < start + Duration::from_secs(900) {
            now += Duration::from_millis(105);
            ticks += due_ticks(&mut last_tick, now);
        }

        assert_eq!(ticks, 900);
    }

    fn press(app: &mut App, code: KeyCode) -> Action {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app_with_questions() -> App {
        let mut app = App::new();
        let questions = (0..3)
            .map(|i| Question {
                id: format!("q{}", i),
                text: format!("Question {}", i),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_answer: "A".into(),
                explanation: None,
            })
            .collect();
        app.load_questions("quiz.txt".into(), questions).unwrap();
        app
    }

    #[test]
    fn test_upload_typing_and_submit() {
        let mut app = App::new();
        for c in "bai.pdf".chars() {
            press(&mut app, KeyCode::Char(c));
        }

        match press(&mut app, KeyCode::Enter) {
            Action::Upload(file) => assert_eq!(file.name, "bai.pdf"),
            other => panic!("expected upload, got {:?}", other),
        }
        assert!(app.upload().is_loading());

        // input is ignored while the job runs, but quitting still works
        assert_eq!(press(&mut app, KeyCode::Char('x')), Action::None);
        assert_eq!(app.upload().input(), "bai.pdf");
        assert_eq!(press(&mut app, KeyCode::Esc), Action::Quit);
    }

    #[test]
    fn test_q_is_text_on_upload_screen() {
        let mut app = App::new();

        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::None);
        assert_eq!(app.upload().input(), "q");
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = App::new();

        let action = handle_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );

        assert_eq!(action, Action::Quit);
    }

    #[test]
    fn test_keyboard_play_through() {
        let mut app = app_with_questions();

        // turn off question and option shuffling
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.phase(), Phase::Playing);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.player().unwrap().current_index(), 2);

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.phase(), Phase::Result);
        assert_eq!(app.score().correct, 1);
        assert_eq!(app.answers().get("q1").map(String::as_str), Some("B"));

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.phase(), Phase::Config);
        assert!(app.answers().is_empty());

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.phase(), Phase::Upload);
        assert!(app.questions().is_empty());
    }
}
