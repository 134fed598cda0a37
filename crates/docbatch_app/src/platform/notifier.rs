use std::time::Duration;

use docbatch_core::{Notification, ToastStyle};
use docbatch_engine::Notifier;
use indicatif::{ProgressBar, ProgressStyle};

/// Terminal stand-in for the host's toast/HUD surface.
///
/// Animated notifications drive a spinner line; success and failure are
/// printed above it. "Closing the window" clears the spinner.
pub struct TerminalNotifier {
    spinner: ProgressBar,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        Self { spinner }
    }

    /// Removes the spinner line if still shown.
    pub fn finish(&self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.style {
            ToastStyle::Animated => {
                self.spinner.enable_steady_tick(Duration::from_millis(100));
                self.spinner.set_prefix(notification.title.clone());
                self.spinner.set_message(notification.message.clone());
            }
            ToastStyle::Success => self.spinner.suspend(|| {
                println!("✔ {}: {}", notification.title, notification.message);
            }),
            ToastStyle::Failure => self.spinner.suspend(|| {
                eprintln!("✖ {}: {}", notification.title, notification.message);
            }),
        }
    }

    fn show_hud(&self, message: &str) {
        println!("{message}");
    }

    fn close_window(&self) {
        self.finish();
    }
}
