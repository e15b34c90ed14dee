//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use indicatif::{ProgressBar, ProgressStyle};
use parley_application::ChatTurnUseCase;
use parley_domain::{Model, Transcript};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::time::Duration;

/// Interactive chat REPL
///
/// Owns the session transcript: one REPL run is one session, and the
/// transcript is dropped when the loop exits.
pub struct ChatRepl {
    use_case: ChatTurnUseCase,
    model: Model,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: ChatTurnUseCase, model: Model) -> Self {
        Self {
            use_case,
            model,
            show_progress: true,
            history_file: None,
        }
    }

    /// Set whether to show the reply spinner
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Override the readline history file location
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;
        let mut transcript = Transcript::new();

        // Try to load history
        let history_path = self
            .history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("parley").join("history.txt")));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Empty submissions never reach the model
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line, &transcript) {
                            break;
                        }
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(line);

                    self.process_message(&mut transcript, line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              Parley - Chat Mode             │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Model: {}", self.model);
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /history  - Show the conversation so far");
        println!("  /quit     - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, cmd: &str, transcript: &Transcript) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /history         - Show the conversation so far");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                false
            }
            "/history" => {
                println!();
                println!("{}", ConsoleFormatter::format_transcript(transcript));
                println!();
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_message(&self, transcript: &mut Transcript, text: &str) {
        println!();

        let spinner = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap(),
            );
            pb.set_message("Waiting for reply...");
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let result = self.use_case.execute(transcript, text).await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        match result {
            Ok(reply) => {
                println!(
                    "{}",
                    ConsoleFormatter::format_reply(self.model.as_str(), &reply)
                );
            }
            Err(e) => {
                // The user turn stays recorded; the loop stays usable
                eprintln!("{}", ConsoleFormatter::format_turn_error(&e));
            }
        }
        println!();
    }
}
