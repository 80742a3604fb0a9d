//! Quickfire quiz server demo
//!
//! Usage: quiz-demo [port] [questions-file] [answers-file]
//!
//! Defaults to port 8080 with `questions.txt` / `answers.txt` in the
//! working directory: one question per line, the matching answer on the
//! same line of the other file. Point any line-oriented client at the
//! port and send `START_c` to begin.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use quickfire_core::{QuestionBank, QuizConfig};
use quickfire_runtime::QuizServer;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let port: u16 = match args.next().as_deref().unwrap_or("8080").parse() {
        Ok(port) => port,
        Err(_) => {
            eprintln!("usage: quiz-demo [port] [questions-file] [answers-file]");
            return ExitCode::FAILURE;
        }
    };
    let questions = PathBuf::from(args.next().unwrap_or_else(|| "questions.txt".into()));
    let answers = PathBuf::from(args.next().unwrap_or_else(|| "answers.txt".into()));

    // Corpus problems are fatal before the listener ever opens
    let bank = match QuestionBank::load(&questions, &answers) {
        Ok(bank) => bank,
        Err(e) => {
            tracing::error!("cannot load question corpus: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let server = match QuizServer::bind(addr, bank, QuizConfig::default()).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("cannot bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("server stopped: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
