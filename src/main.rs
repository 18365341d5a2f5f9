use std::path::PathBuf;

use clap::Parser;
use quizgen::{Config, QuizApp, logging};
use tracing::error;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Document (.pdf, .docx or .txt) to turn into a quiz right away
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Model to request, overriding GEMINI_MODEL
    #[arg(short, long)]
    model: Option<String>,

    /// Directory for log files, overriding LOG_DIRECTORY
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(model) = args.model {
        config.gemini.model = Some(model);
    }
    if let Some(log_dir) = args.log_dir {
        config.logging.directory = log_dir;
    }

    let _guard = logging::init(&config.logging)?;
    config.log_summary();

    let generator = match config.gemini.client() {
        Ok(client) => client,
        Err(e) => {
            error!(code = e.code(), "Generation client is not configured");
            eprintln!("Error: {}. Set GEMINI_API_KEY (or API_KEY).", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = QuizApp::new(generator).run(args.file).await {
        error!(error = %e, "Quiz app exited with an error");
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
