use chrono::Utc;
use rand::Rng;
use tracing::{error, info, warn};

use crate::error::{ProcessError, TransitionError};
use crate::models::{Answers, Phase, Question, QuizConfig, QuizState};
use crate::player::{Player, Submission};
use crate::review::Review;
use crate::scoring::ScoreReport;
use crate::setup::SetupForm;
use crate::shuffle::prepare_questions;
use crate::upload::UploadForm;

/// The upload → config → playing → result state machine plus per-screen UI state.
///
/// Transitions are only accepted from the phases listed in their docs; any
/// other call returns a [`TransitionError`] and leaves the state untouched.
#[derive(Debug, Default)]
pub struct App {
    state: QuizState,
    config: Option<QuizConfig>,
    player: Option<Player>,
    upload: UploadForm,
    setup: SetupForm,
    review: Review,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts on the upload screen with `path` already typed in.
    pub fn with_upload_path(path: impl Into<String>) -> Self {
        Self {
            upload: UploadForm::with_path(path),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.state.questions
    }

    pub fn answers(&self) -> &Answers {
        &self.state.answers
    }

    pub fn config(&self) -> Option<&QuizConfig> {
        self.config.as_ref()
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    pub fn upload(&self) -> &UploadForm {
        &self.upload
    }

    pub fn upload_mut(&mut self) -> &mut UploadForm {
        &mut self.upload
    }

    pub fn setup(&self) -> &SetupForm {
        &self.setup
    }

    pub fn setup_mut(&mut self) -> &mut SetupForm {
        &mut self.setup
    }

    pub fn review(&self) -> &Review {
        &self.review
    }

    pub fn review_mut(&mut self) -> &mut Review {
        &mut self.review
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), TransitionError> {
        if self.state.phase == expected {
            Ok(())
        } else {
            warn!(action, phase = ?self.state.phase, "Rejected transition");
            Err(TransitionError {
                action,
                phase: self.state.phase,
            })
        }
    }

    /// Applies the outcome of an upload job. Failures stay on the upload screen.
    pub fn finish_upload(
        &mut self,
        file_name: String,
        result: Result<Vec<Question>, ProcessError>,
    ) -> Result<(), TransitionError> {
        self.expect_phase(Phase::Upload, "finish upload")?;

        match result {
            Ok(questions) => self.load_questions(file_name, questions),
            Err(err) => {
                error!(file = %file_name, error = %err, "Processing uploaded file failed");
                self.upload.fail(&err);
                Ok(())
            }
        }
    }

    /// `upload → config`: installs a freshly generated question set.
    ///
    /// Questions without an id get `q_<millis>_<index>`.
    pub fn load_questions(
        &mut self,
        file_name: String,
        mut questions: Vec<Question>,
    ) -> Result<(), TransitionError> {
        self.expect_phase(Phase::Upload, "load questions")?;

        assign_missing_ids(&mut questions, Utc::now().timestamp_millis());
        info!(file = %file_name, question_count = questions.len(), "Questions loaded");

        self.upload = UploadForm::default();
        self.setup = SetupForm::default();
        self.state.questions = questions;
        self.state.file_name = Some(file_name);
        self.state.phase = Phase::Config;
        Ok(())
    }

    /// `config → playing` using the thread-local RNG for shuffling.
    pub fn start(&mut self, config: QuizConfig) -> Result<(), TransitionError> {
        self.start_with_rng(config, &mut rand::rng())
    }

    /// `config → playing`: shuffles as configured and clears the answers.
    pub fn start_with_rng<R: Rng + ?Sized>(
        &mut self,
        config: QuizConfig,
        rng: &mut R,
    ) -> Result<(), TransitionError> {
        self.expect_phase(Phase::Config, "start quiz")?;

        let questions = prepare_questions(&self.state.questions, &config, rng);
        let time_limit = config.time_limit_secs();
        info!(
            question_count = questions.len(),
            shuffle_questions = config.shuffle_questions,
            shuffle_options = config.shuffle_options,
            time_limit_secs = ?time_limit,
            "Quiz started"
        );

        self.player = Some(Player::new(questions.clone(), time_limit));
        self.state.questions = questions;
        self.state.answers = Answers::new();
        self.state.time_remaining = time_limit;
        self.state.time_used = 0;
        self.state.score = None;
        self.config = Some(config);
        self.state.phase = Phase::Playing;
        Ok(())
    }

    /// One-second clock. Does nothing outside the playing phase.
    pub fn tick(&mut self) {
        if self.state.phase != Phase::Playing {
            return;
        }
        let Some(player) = self.player.as_mut() else {
            return;
        };

        let submission = player.tick();
        self.state.time_remaining = player.time_left();
        if let Some(submission) = submission {
            info!("Time limit reached, submitting");
            if let Err(e) = self.finish(submission) {
                warn!(error = %e, "Timed submission ignored");
            }
        }
    }

    /// Explicit submission from the player screen.
    pub fn submit(&mut self) -> Result<(), TransitionError> {
        self.expect_phase(Phase::Playing, "submit")?;

        match self.player.as_mut().and_then(Player::submit) {
            Some(submission) => self.finish(submission),
            None => Ok(()),
        }
    }

    /// `playing → result`: stores the final answers and scores them.
    pub fn finish(&mut self, submission: Submission) -> Result<(), TransitionError> {
        self.expect_phase(Phase::Playing, "finish quiz")?;

        let report = ScoreReport::compute(&self.state.questions, &submission.answers);
        info!(
            correct = report.correct,
            total = report.total,
            score = report.score,
            time_used = submission.time_used,
            "Quiz submitted"
        );

        // dropping the player stops its clock
        self.player = None;
        self.review = Review::default();
        self.state.answers = submission.answers;
        self.state.time_used = submission.time_used;
        self.state.time_remaining = None;
        self.state.score = Some(report);
        self.state.phase = Phase::Result;
        Ok(())
    }

    /// `result → config`: same (already shuffled) questions, empty answers.
    pub fn retry(&mut self) -> Result<(), TransitionError> {
        self.expect_phase(Phase::Result, "retry")?;

        info!(question_count = self.state.questions.len(), "Retrying quiz");
        self.state.answers = Answers::new();
        self.state.score = None;
        self.setup = SetupForm::default();
        self.state.phase = Phase::Config;
        Ok(())
    }

    /// `any → upload`: drops everything and starts over.
    pub fn new_upload(&mut self) {
        info!(from = ?self.state.phase, "Starting over with a new document");
        *self = Self::default();
    }

    /// Score of the last submission; recomputed from the stored answers.
    pub fn score(&self) -> ScoreReport {
        ScoreReport::compute(&self.state.questions, &self.state.answers)
    }
}

/// Gives every question without an id a `q_<stamp>_<index>` identifier.
fn assign_missing_ids(questions: &mut [Question], stamp: i64) {
    for (index, question) in questions.iter_mut().enumerate() {
        if question.id.trim().is_empty() {
            question.id = format!("q_{}_{}", stamp, index);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::error::GenerationError;

    fn question(id: &str, correct: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {}", id),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct.to_string(),
            explanation: None,
        }
    }

    fn no_shuffle() -> QuizConfig {
        QuizConfig {
            shuffle_questions: false,
            shuffle_options: false,
            ..QuizConfig::default()
        }
    }

    fn app_in_config() -> App {
        let mut app = App::new();
        app.load_questions(
            "quiz.txt".to_string(),
            vec![question("1", "A"), question("2", "B"), question("3", "C")],
        )
        .unwrap();
        app
    }

    #[test]
    fn test_initial_state() {
        let app = App::new();

        assert_eq!(app.phase(), Phase::Upload);
        assert!(app.questions().is_empty());
        assert!(app.player().is_none());
    }

    #[test]
    fn test_assign_missing_ids() {
        let mut questions = vec![question("", "A"), question("keep", "A"), question(" ", "A")];

        assign_missing_ids(&mut questions, 1700000000000);

        assert_eq!(questions[0].id, "q_1700000000000_0");
        assert_eq!(questions[1].id, "keep");
        assert_eq!(questions[2].id, "q_1700000000000_2");
    }

    #[test]
    fn test_undefined_transitions_are_rejected() {
        let mut app = App::new();

        assert_eq!(
            app.submit(),
            Err(TransitionError {
                action: "submit",
                phase: Phase::Upload
            })
        );
        assert!(app.start(QuizConfig::default()).is_err());
        assert!(app.retry().is_err());
        assert_eq!(app.phase(), Phase::Upload);

        let mut app = app_in_config();
        assert!(app.load_questions("x".into(), vec![question("9", "A")]).is_err());
        assert!(app.submit().is_err());
        assert!(app.retry().is_err());
        assert_eq!(app.questions().len(), 3);
    }

    #[test]
    fn test_failed_upload_stays_on_upload() {
        let mut app = App::with_upload_path("quiz.txt");
        app.upload_mut().prepare();

        app.finish_upload(
            "quiz.txt".to_string(),
            Err(ProcessError::from(GenerationError::EmptyResponse)),
        )
        .unwrap();

        assert_eq!(app.phase(), Phase::Upload);
        assert!(!app.upload().is_loading());
        assert!(app.upload().alert().is_some());
    }

    #[test]
    fn test_start_resets_answers_and_creates_player() {
        let mut app = app_in_config();
        let mut rng = StdRng::seed_from_u64(1);

        app.start_with_rng(no_shuffle(), &mut rng).unwrap();

        assert_eq!(app.phase(), Phase::Playing);
        assert!(app.answers().is_empty());
        assert_eq!(app.player().unwrap().total(), 3);
        assert_eq!(app.state().time_remaining, None);
    }

    #[test]
    fn test_timer_expiry_moves_to_result_once() {
        let mut app = app_in_config();
        let config = QuizConfig {
            enable_timer: true,
            time_minutes: 1,
            ..no_shuffle()
        };
        app.start_with_rng(config, &mut StdRng::seed_from_u64(1)).unwrap();
        app.player_mut().unwrap().select(0);

        for _ in 0..59 {
            app.tick();
        }
        assert_eq!(app.phase(), Phase::Playing);
        assert_eq!(app.state().time_remaining, Some(1));

        app.tick();
        assert_eq!(app.phase(), Phase::Result);
        assert_eq!(app.state().time_used, 60);
        assert_eq!(app.score().correct, 1);

        app.tick();
        assert!(app.submit().is_err());
        assert_eq!(app.state().time_used, 60);
    }

    #[test]
    fn test_retry_keeps_shuffled_order() {
        let mut app = app_in_config();
        let mut rng = StdRng::seed_from_u64(99);
        app.start_with_rng(QuizConfig::default(), &mut rng).unwrap();
        let played = app.questions().to_vec();
        app.player_mut().unwrap().select(1);
        app.submit().unwrap();

        app.retry().unwrap();

        assert_eq!(app.phase(), Phase::Config);
        assert!(app.answers().is_empty());
        assert_eq!(app.questions(), played.as_slice());
        assert_eq!(app.state().file_name.as_deref(), Some("quiz.txt"));
    }

    #[test]
    fn test_new_upload_resets_from_every_phase() {
        let mut rng = StdRng::seed_from_u64(3);
        for target in [Phase::Upload, Phase::Config, Phase::Playing, Phase::Result] {
            let mut app = app_in_config();
            if target == Phase::Upload {
                app.new_upload();
            }
            if matches!(target, Phase::Playing | Phase::Result) {
                app.start_with_rng(QuizConfig::default(), &mut rng).unwrap();
                app.tick();
            }
            if target == Phase::Result {
                app.submit().unwrap();
            }

            app.new_upload();

            assert_eq!(app.state(), &QuizState::default(), "from {:?}", target);
            assert!(app.player().is_none());
            assert!(app.config().is_none());
        }
    }
}
