mod actions;
mod app;
mod bridge;
mod config;
mod constants;
mod events;
mod keymap;
mod logging;
mod state;
mod ui;

use std::io;

use clap::Parser;
use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use cp_git::{GitError, Repo};
use cp_llm::{CompletionRequest, LlamaClient};

use app::App;
use config::Cli;
use constants::{N_PREDICT, TEMPERATURE};
use logging::Logger;

fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let logger = init_logging(&cli);

    let repo = match Repo::discover() {
        Ok(repo) => repo,
        Err(GitError::RepoNotFound) => {
            fatal("Repository not found: make sure you are running this command inside a git repository.")
        }
        Err(e) => fatal(&format!("Failed to open git repository: {}", e)),
    };

    let diff = match repo.diff_staged(&[]) {
        Ok(diff) => diff,
        Err(GitError::NoStagedChanges) => {
            println!("No staged files found. 'git add' one of these files to proceed:");
            match repo.status_files() {
                Ok(files) => print!("{}", files.render()),
                Err(e) => logger.error(&format!("status listing failed: {}", e)),
            }
            return Ok(());
        }
        Err(e) => fatal(&format!("failed to get 'git diff': {}", e)),
    };

    let llm = match LlamaClient::new(cli.model_endpoint.clone(), cli.request_timeout()) {
        Ok(llm) => llm,
        Err(e) => fatal(&format!("failed to build HTTP client: {}", e)),
    };

    let prompt = oneshot_prompt(&cli.model_type, &String::from_utf8_lossy(&diff));
    logger.debug(&format!("completion request: {} prompt bytes to {}", prompt.len(), cli.model_endpoint));
    let request = CompletionRequest::new(prompt, TEMPERATURE, N_PREDICT);

    // Panic hook: restore terminal state and log the panic to disk.
    // Without this, a panic leaves the terminal in raw mode + alternate
    // screen, which corrupts the session and the error is lost.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);

        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("[{}] {}\n\n{}\n\n---\n", ts, info, backtrace);
        let log_path = std::env::temp_dir().join("commit-pilot_panic.log");
        let _ = std::fs::OpenOptions::new().create(true).append(true).open(&log_path).and_then(|mut f| {
            use std::io::Write;
            f.write_all(msg.as_bytes())
        });

        default_hook(info);
    }));

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(llm, repo, request, logger);
    let run_result = app.run(&mut terminal);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    if let Some(farewell) = app.farewell() {
        println!("{}", farewell);
    }

    run_result
}

fn init_logging(cli: &Cli) -> Logger {
    if !cli.log {
        return Logger::discard();
    }

    let result = match &cli.log_directory {
        Some(dir) => Logger::to_file(&[dir.as_str()]),
        None => Logger::to_file(logging::DEFAULT_LOG_DIRS),
    };
    match result {
        Ok(logger) => {
            logger.debug(&format!("connecting to {}...", cli.model_endpoint));
            logger.debug(&format!("CLI arguments: {:?}", cli));
            logger
        }
        Err(e) => fatal(&format!("Failed to init file logging: {}", e)),
    }
}

/// Wrap the diff in the selected model's user-message frame, asking for a
/// commit subject that fits the 50-character rule.
fn oneshot_prompt(model_type: &str, diff: &str) -> String {
    let format = cp_prompt::get(model_type).expect("model type is validated by the CLI parser");
    format.user_content(&format!(
        "Given the following code diff, generate a concise subject for commit message (under {} characters) that summarizes the change clearly and effectively:\n{}",
        cp_git::COMMIT_SUBJECT_CHARS,
        diff
    ))
}

fn fatal(msg: &str) -> ! {
    eprintln!("{}", msg);
    std::process::exit(1);
}
