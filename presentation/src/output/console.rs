//! Console output formatter for chat turns

use colored::Colorize;
use parley_application::ChatTurnError;
use parley_domain::{Role, Transcript, Turn};

/// Formats chat output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a single turn with a colored role prefix
    pub fn format_turn(turn: &Turn) -> String {
        match turn.role {
            Role::User => format!("{} {}", "you:".cyan().bold(), turn.content),
            Role::Model => format!("{} {}", "gemini:".green().bold(), turn.content),
        }
    }

    /// Format a model reply for display after an exchange
    pub fn format_reply(model: &str, reply: &str) -> String {
        format!("{}\n{}", format!("── {} ──", model).yellow().bold(), reply)
    }

    /// Format an error so the session visibly continues
    pub fn format_error(detail: &str) -> String {
        format!("{} {}", "Error:".red().bold(), detail)
    }

    /// Format a failed exchange.
    ///
    /// Service errors include the HTTP status the remote reported;
    /// transport errors get a hint since the session stays usable and
    /// the user can simply resend.
    pub fn format_turn_error(error: &ChatTurnError) -> String {
        let ChatTurnError::Gateway(gateway) = error;

        let mut detail = gateway.to_string();
        if let Some(code) = gateway.status() {
            detail.push_str(&format!(" (HTTP {code})"));
        }

        let mut output = Self::format_error(&detail);
        if gateway.is_transport() {
            output.push('\n');
            output.push_str(
                &"Check your network connection and send the message again."
                    .dimmed()
                    .to_string(),
            );
        }
        output
    }

    /// Format the full transcript in chronological order
    pub fn format_transcript(transcript: &Transcript) -> String {
        if transcript.is_empty() {
            return "(no messages yet)".dimmed().to_string();
        }

        transcript
            .turns()
            .iter()
            .map(Self::format_turn)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_application::GatewayError;

    #[test]
    fn test_format_transcript_keeps_order() {
        colored::control::set_override(false);

        let mut transcript = Transcript::new();
        transcript.push(Turn::user("Hello"));
        transcript.push(Turn::model("Hi there"));

        let output = ConsoleFormatter::format_transcript(&transcript);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["you: Hello", "gemini: Hi there"]);

        colored::control::unset_override();
    }

    #[test]
    fn test_format_empty_transcript() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_transcript(&Transcript::new());
        assert_eq!(output, "(no messages yet)");
        colored::control::unset_override();
    }

    #[test]
    fn test_format_error_mentions_detail() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_error("Transport error: timeout");
        assert_eq!(output, "Error: Transport error: timeout");
        colored::control::unset_override();
    }

    #[test]
    fn test_format_turn_error_includes_http_status() {
        colored::control::set_override(false);

        let error = ChatTurnError::Gateway(GatewayError::Service {
            status: Some(429),
            message: "quota exceeded".to_string(),
        });
        let output = ConsoleFormatter::format_turn_error(&error);
        assert_eq!(output, "Error: Gateway error: Service error: quota exceeded (HTTP 429)");

        colored::control::unset_override();
    }

    #[test]
    fn test_format_turn_error_transport_gets_retry_hint() {
        colored::control::set_override(false);

        let error =
            ChatTurnError::Gateway(GatewayError::Transport("connection reset".to_string()));
        let output = ConsoleFormatter::format_turn_error(&error);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Error: Gateway error: Transport error: connection reset");
        assert!(lines[1].contains("send the message again"));

        colored::control::unset_override();
    }
}
