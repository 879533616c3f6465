use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Thin wrapper around an `indicatif` spinner shown while waiting on GitHub.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    const TICK_RATE: Duration = Duration::from_millis(80);
    const TEMPLATE: &'static str = "{spinner:.green} {msg}";

    /// Start a spinner with the provided message.
    pub fn new(message: impl Into<String>) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template(Self::TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.into());
        pb.enable_steady_tick(Self::TICK_RATE);
        Spinner { pb }
    }

    /// Stop the spinner and clear it from the terminal.
    pub fn stop(&self) {
        self.pb.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_spinner_creation_and_stop() {
        let spinner = Spinner::new("Testing");
        thread::sleep(Duration::from_millis(200));
        spinner.stop();
    }

    #[test]
    fn test_drop_clears_unfinished_spinner() {
        let spinner = Spinner::new("Loading");
        thread::sleep(Duration::from_millis(100));
        drop(spinner);
    }
}
