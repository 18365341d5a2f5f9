use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quizgen::{
    App, DocumentPayload, GenerationError, Phase, ProcessError, Question, QuizConfig, QuizGenerator,
    QuizState, SourceFile, process_file,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Stands in for the hosted model: returns canned questions and records what it was sent.
struct StubGenerator {
    questions: Vec<Question>,
    fail: bool,
    calls: AtomicUsize,
    last_payload: Mutex<Option<DocumentPayload>>,
}

impl StubGenerator {
    fn returning(questions: Vec<Question>) -> Self {
        Self {
            questions,
            fail: false,
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::returning(Vec::new())
        }
    }
}

#[async_trait]
impl QuizGenerator for StubGenerator {
    async fn generate(&self, payload: &DocumentPayload) -> Result<Vec<Question>, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = Some(payload.clone());
        if self.fail {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(self.questions.clone())
    }
}

fn three_questions() -> Vec<Question> {
    vec![
        Question {
            id: "q1".to_string(),
            text: "Thủ đô của Việt Nam là gì?".to_string(),
            options: vec![
                "Hà Nội".to_string(),
                "Huế".to_string(),
                "Đà Nẵng".to_string(),
                "Cần Thơ".to_string(),
            ],
            correct_answer: "Hà Nội".to_string(),
            explanation: Some("Hà Nội là thủ đô từ năm 1945.".to_string()),
        },
        Question {
            id: "q2".to_string(),
            text: "2 + 2 = ?".to_string(),
            options: vec!["3".to_string(), "4".to_string(), "5".to_string(), "6".to_string()],
            correct_answer: "4".to_string(),
            explanation: None,
        },
        Question {
            // generation left the id out
            id: String::new(),
            text: "Sông dài nhất thế giới?".to_string(),
            options: vec![
                "Nile".to_string(),
                "Amazon".to_string(),
                "Mekong".to_string(),
                "Dương Tử".to_string(),
            ],
            correct_answer: "Nile".to_string(),
            explanation: None,
        },
    ]
}

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quizgen-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn no_shuffle() -> QuizConfig {
    QuizConfig {
        shuffle_questions: false,
        shuffle_options: false,
        enable_timer: false,
        time_minutes: 15,
    }
}

/// Uploads the fixture through the stub and plays it: q1 right, q2 wrong, q3 blank.
async fn played_app() -> App {
    let path = write_fixture("three-questions.txt", "Câu 1... Câu 2... Câu 3...");
    let generator = StubGenerator::returning(three_questions());

    let mut app = App::with_upload_path(path.to_string_lossy());
    let file = app.upload_mut().prepare().expect("txt is accepted");
    let result = process_file(&file, &generator).await;
    app.finish_upload(file.name, result).unwrap();
    assert_eq!(app.phase(), Phase::Config);

    app.start_with_rng(no_shuffle(), &mut StdRng::seed_from_u64(0))
        .unwrap();
    let player = app.player_mut().unwrap();
    player.select(0);
    player.next();
    player.select(2);
    app.submit().unwrap();
    app
}

#[tokio::test]
async fn test_round_trip_scores_one_of_three() {
    let app = played_app().await;

    assert_eq!(app.phase(), Phase::Result);
    let report = app.state().score.expect("score recorded on submit");
    assert_eq!(report.correct, 1);
    assert_eq!(report.incorrect(), 2);
    assert_eq!(report.score, 3);
    assert_eq!(app.score(), report);
    assert_eq!(app.state().file_name.as_deref(), Some("three-questions.txt"));
    assert!(app.questions()[2].id.starts_with("q_"));
}

#[tokio::test]
async fn test_payload_sent_to_generator_is_base64_text() {
    use base64::Engine;

    let path = write_fixture("payload.txt", "Nội dung tài liệu");
    let generator = StubGenerator::returning(three_questions());

    process_file(&SourceFile::from_path(&path), &generator)
        .await
        .unwrap();

    let payload = generator.last_payload.lock().unwrap().clone().unwrap();
    assert_eq!(payload.mime_type, "text/plain");
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(payload.data)
        .unwrap();
    assert_eq!(String::from_utf8(decoded).unwrap(), "Nội dung tài liệu");
}

#[tokio::test]
async fn test_retry_keeps_questions_and_clears_answers() {
    let mut app = played_app().await;
    let before = app.questions().to_vec();

    app.retry().unwrap();

    assert_eq!(app.phase(), Phase::Config);
    assert!(app.answers().is_empty());
    assert_eq!(app.questions(), before.as_slice());

    app.start_with_rng(no_shuffle(), &mut StdRng::seed_from_u64(0))
        .unwrap();
    assert_eq!(app.questions(), before.as_slice());
}

#[tokio::test]
async fn test_new_upload_from_result_resets_everything() {
    let mut app = played_app().await;

    app.new_upload();

    assert_eq!(app.state(), &QuizState::default());
    assert_eq!(app.state().time_used, 0);
    assert!(app.questions().is_empty());
    assert!(app.answers().is_empty());
}

#[tokio::test]
async fn test_generation_failure_stays_on_upload_with_generic_alert() {
    let path = write_fixture("fails.txt", "anything");
    let generator = StubGenerator::failing();
    let mut app = App::with_upload_path(path.to_string_lossy());

    let file = app.upload_mut().prepare().unwrap();
    let result = process_file(&file, &generator).await;
    assert!(matches!(result, Err(ProcessError::Generation(_))));
    app.finish_upload(file.name, result).unwrap();

    assert_eq!(app.phase(), Phase::Upload);
    assert!(!app.upload().is_loading());
    assert_eq!(
        app.upload().alert(),
        Some(format!("Lỗi xử lý file: {}", quizgen::GENERATION_FAILED_MESSAGE).as_str())
    );
}

#[tokio::test]
async fn test_missing_file_is_a_read_failure() {
    let generator = StubGenerator::returning(three_questions());
    let file = SourceFile::from_path("/no/such/dir/quiz.txt");

    let result = process_file(&file, &generator).await;

    assert!(matches!(
        result,
        Err(ProcessError::Document(quizgen::DocumentError::Read(_)))
    ));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unsupported_file_never_reaches_generator() {
    let path = write_fixture("image.png", "not really a png");
    let generator = StubGenerator::returning(three_questions());
    let mut app = App::with_upload_path(path.to_string_lossy());

    assert!(app.upload_mut().prepare().is_none());
    assert_eq!(app.upload().error(), Some(quizgen::UNSUPPORTED_FILE_MESSAGE));

    let result = process_file(&SourceFile::from_path(&path), &generator).await;
    assert!(matches!(
        result,
        Err(ProcessError::Document(quizgen::DocumentError::UnsupportedFileType(_)))
    ));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.phase(), Phase::Upload);
}

#[test]
fn test_timer_expiry_after_manual_submit_does_not_resubmit() {
    let mut app = App::new();
    app.load_questions("quiz.txt".to_string(), three_questions())
        .unwrap();
    let config = QuizConfig {
        enable_timer: true,
        time_minutes: 1,
        ..no_shuffle()
    };
    app.start_with_rng(config, &mut StdRng::seed_from_u64(0))
        .unwrap();
    app.player_mut().unwrap().select(0);
    for _ in 0..10 {
        app.tick();
    }

    app.submit().unwrap();
    let submitted = app.state().clone();
    for _ in 0..120 {
        app.tick();
    }

    assert_eq!(app.phase(), Phase::Result);
    assert_eq!(app.state(), &submitted);
    assert_eq!(app.state().time_used, 10);
}
