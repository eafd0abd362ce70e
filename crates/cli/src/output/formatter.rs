//! Output formatter for human-readable and JSON output
//!
//! One formatter per command invocation, built from the global flags. In
//! JSON mode every write is strict JSON on stdout (errors on stderr) with
//! no colors and no prompts.

use serde::Serialize;

use super::OutputConfig;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Formatter for CLI output
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

#[allow(dead_code)]
impl Formatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    fn paint(&self, color: &str, sigil: &str) -> String {
        if self.colors_enabled() {
            format!("{color}{sigil}{RESET}")
        } else {
            sigil.to_string()
        }
    }

    /// Output a success message
    ///
    /// Suppressed in quiet mode and in JSON mode, where success is carried
    /// by the exit code.
    pub fn success(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        println!("{} {message}", self.paint(GREEN, "✓"));
    }

    /// Output an error message
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        if self.config.json {
            let error = serde_json::json!({ "error": message });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&error).unwrap_or_else(|_| message.to_string())
            );
        } else {
            eprintln!("{} {message}", self.paint(RED, "✗"));
        }
    }

    /// Output a warning message
    pub fn warning(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        eprintln!("{} {message}", self.paint(YELLOW, "⚠"));
    }

    /// Output JSON directly
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Print a line of text (respects quiet mode)
    pub fn println(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        println!("{message}");
    }

    /// Ask a yes/no question on the terminal
    ///
    /// Returns false without prompting in quiet or JSON mode; callers must
    /// offer a --force flag for non-interactive use.
    pub fn confirm(&self, message: &str) -> bool {
        if self.config.quiet || self.config.json {
            return false;
        }

        eprint!("{message} [y/N]: ");

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        is_affirmative(&line)
    }
}

fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_default() {
        let formatter = Formatter::default();
        assert!(!formatter.is_json());
        assert!(!formatter.is_quiet());
        assert!(formatter.colors_enabled());
    }

    #[test]
    fn test_json_mode_disables_colors() {
        let config = OutputConfig {
            json: true,
            ..Default::default()
        };
        let formatter = Formatter::new(config);
        assert!(formatter.is_json());
        assert!(!formatter.colors_enabled());
    }

    #[test]
    fn test_no_color_flag() {
        let config = OutputConfig {
            no_color: true,
            ..Default::default()
        };
        let formatter = Formatter::new(config);
        assert!(!formatter.colors_enabled());
        assert_eq!(formatter.paint(GREEN, "✓"), "✓");
    }

    #[test]
    fn test_paint_wraps_sigil() {
        let formatter = Formatter::default();
        assert_eq!(formatter.paint(RED, "✗"), "\x1b[31m✗\x1b[0m");
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("YES\n"));
        assert!(is_affirmative("  yes  "));
        assert!(!is_affirmative("n\n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("maybe"));
    }
}
