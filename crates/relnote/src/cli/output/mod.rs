//! Output formatting utilities

use std::fmt::Display;

use console::{style, Style};

/// Status lines that respect `--quiet`
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    quiet: bool,
}

impl Printer {
    /// Create a printer; a quiet printer drops status lines
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if let Some(line) = self.status_line(style("✓").green().bold(), message) {
            println!("{}", line);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if let Some(line) = self.status_line(style("!").yellow().bold(), message) {
            println!("{}", line);
        }
    }

    fn status_line(&self, glyph: impl Display, message: &str) -> Option<String> {
        (!self.quiet).then(|| format!("{} {}", glyph, message))
    }
}

/// Print an error message; errors are never silenced
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_printer_drops_status_lines() {
        assert!(Printer::new(true).status_line("✓", "written").is_none());
    }

    #[test]
    fn test_status_line() {
        let line = Printer::new(false).status_line("!", "no releases").unwrap();
        assert_eq!(line, "! no releases");
    }
}
