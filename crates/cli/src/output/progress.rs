//! Progress indication for batch operations
//!
//! A batch blocks the caller until every item has been attempted, so the
//! CLI shows an indeterminate spinner while one runs. In quiet or JSON
//! mode, progress is suppressed.

use super::OutputConfig;

/// Spinner shown while a batch is in flight
#[derive(Debug)]
pub struct Spinner {
    bar: Option<indicatif::ProgressBar>,
}

#[allow(dead_code)]
impl Spinner {
    /// Start a spinner with a message
    pub fn new(config: &OutputConfig, message: &str) -> Self {
        let bar = if config.quiet || config.json || config.no_progress {
            None
        } else {
            let bar = indicatif::ProgressBar::new_spinner();
            bar.set_style(
                indicatif::ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .expect("valid template"),
            );
            bar.set_message(message.to_string());
            bar.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(bar)
        };

        Self { bar }
    }

    /// Stop and erase the spinner
    pub fn finish_and_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Check if the spinner is visible
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_quiet_mode() {
        let config = OutputConfig {
            quiet: true,
            ..Default::default()
        };
        let spinner = Spinner::new(&config, "working");
        assert!(!spinner.is_visible());
    }

    #[test]
    fn test_spinner_json_mode() {
        let config = OutputConfig {
            json: true,
            ..Default::default()
        };
        let spinner = Spinner::new(&config, "working");
        assert!(!spinner.is_visible());
    }

    #[test]
    fn test_spinner_no_progress() {
        let config = OutputConfig {
            no_progress: true,
            ..Default::default()
        };
        let spinner = Spinner::new(&config, "working");
        assert!(!spinner.is_visible());
    }

    #[test]
    fn test_spinner_normal() {
        let config = OutputConfig::default();
        let spinner = Spinner::new(&config, "working");
        assert!(spinner.is_visible());
        spinner.finish_and_clear();
    }
}
