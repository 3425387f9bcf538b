// ABOUTME: User-facing status lines written to stderr
// ABOUTME: Renders labelled messages and turns transcode failures into error + hint output

use card_transcoder::{EncodedImage, TranscodeError};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Hint,
    Success,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Error => "error:",
            Level::Warning => "warning:",
            Level::Hint => "hint:",
            Level::Success => "done:",
        }
    }
}

pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    /// Colour only when stderr is a terminal
    pub fn new() -> Self {
        Self::with_color(std::io::stderr().is_terminal())
    }

    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn format_line(&self, level: Level, message: &str) -> String {
        let label = level.label();
        if !self.use_color {
            return format!("{} {}", label, message);
        }

        let label = match level {
            Level::Error => label.red().bold().to_string(),
            Level::Warning => label.yellow().bold().to_string(),
            Level::Hint => label.cyan().bold().to_string(),
            Level::Success => label.green().bold().to_string(),
        };
        format!("{} {}", label, message)
    }

    pub fn print(&self, level: Level, message: &str) {
        eprintln!("{}", self.format_line(level, message));
    }

    pub fn warning(&self, message: &str) {
        self.print(Level::Warning, message);
    }

    /// Lines for a failed command: the full context chain, then a hint when
    /// the root cause is a transcode error that has one.
    pub fn failure_lines(&self, err: &anyhow::Error) -> Vec<String> {
        let mut lines = vec![self.format_line(Level::Error, &format!("{:#}", err))];
        if let Some(help) = err
            .downcast_ref::<TranscodeError>()
            .and_then(TranscodeError::help_text)
        {
            lines.push(self.format_line(Level::Hint, help));
        }
        lines
    }

    pub fn failure(&self, err: &anyhow::Error) {
        for line in self.failure_lines(err) {
            eprintln!("{}", line);
        }
    }

    pub fn written(&self, image: &EncodedImage, path: &Path) {
        let kind = if image.is_animated() {
            format!("animated, {} frames", image.frame_count)
        } else {
            "still".to_string()
        };
        self.print(
            Level::Success,
            &format!(
                "wrote {}x{} WebP ({}, {} bytes) to {}",
                image.width,
                image.height,
                kind,
                image.data.len(),
                path.display()
            ),
        );
    }
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_have_labels() {
        let out = CliOutput::with_color(false);
        assert_eq!(out.format_line(Level::Error, "boom"), "error: boom");
        assert_eq!(out.format_line(Level::Hint, "try again"), "hint: try again");
        assert_eq!(out.format_line(Level::Success, "ok"), "done: ok");
    }

    #[test]
    fn test_colored_lines_keep_message() {
        let out = CliOutput::with_color(true);
        let line = out.format_line(Level::Warning, "careful");
        assert!(line.contains("\x1b["));
        assert!(line.ends_with("careful"));
    }

    #[test]
    fn test_failure_adds_hint_for_transcode_errors() {
        let out = CliOutput::with_color(false);
        let err = anyhow::Error::new(TranscodeError::InvalidSize(0));

        let lines = out.failure_lines(&err);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("error: Invalid target size 0"));
        assert_eq!(lines[1], "hint: Pick a size between 1 and 16383 pixels");
    }

    #[test]
    fn test_failure_without_hint() {
        let out = CliOutput::with_color(false);
        let err = anyhow::anyhow!("Invalid Discord ID: abc");

        assert_eq!(out.failure_lines(&err), vec!["error: Invalid Discord ID: abc"]);
    }
}
