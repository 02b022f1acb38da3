use arbor_core::ProgressReporter;
use indicatif::ProgressBar;

use crate::formatting::{create_spinner, Status};

/// Shows bootstrap steps on a spinner and keeps a log line for each one.
pub struct CliProgressReporter {
    spinner: ProgressBar,
}

impl CliProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: create_spinner(),
        }
    }

    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgressReporter {
    fn report(&self, message: &str) {
        self.spinner
            .println(format!("  {}", Status::Info.format(message)));
        self.spinner.set_message(message.to_string());
    }
}
