use crate::domain::model::SurveySubmission;
use crate::domain::ports::SubmissionSink;
use std::io::{Stdout, Write};

/// Shows a short success notice and logs the submitted values.
///
/// Nothing is sent anywhere; the record only ends up in the diagnostic log
/// (and on the writer as JSON when `echo_json` is set).
pub struct ConsoleNotifier<W: Write = Stdout> {
    writer: W,
    echo_json: bool,
    notified: usize,
    write_failures: usize,
}

impl ConsoleNotifier<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }
}

impl Default for ConsoleNotifier<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            echo_json: false,
            notified: 0,
            write_failures: 0,
        }
    }

    pub fn echo_json(mut self, enabled: bool) -> Self {
        self.echo_json = enabled;
        self
    }

    pub fn notified(&self) -> usize {
        self.notified
    }

    /// Writes to the console that failed; the submissions themselves still count.
    pub fn write_failures(&self) -> usize {
        self.write_failures
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> SubmissionSink for ConsoleNotifier<W> {
    fn on_success(&mut self, submission: &SurveySubmission) {
        self.notified += 1;

        match serde_json::to_string(submission) {
            Ok(json) => {
                tracing::info!("Validation success {}", json);
                if self.echo_json {
                    if let Err(e) = writeln!(self.writer, "{}", json) {
                        self.write_failures += 1;
                        tracing::warn!("Could not write submission JSON: {}", e);
                    }
                }
            }
            Err(e) => tracing::warn!("Could not serialize submission: {}", e),
        }

        // 寫入失敗（例如管線已關閉）不影響送出結果
        if let Err(e) = writeln!(self.writer, "✅ Success!").and_then(|_| self.writer.flush()) {
            self.write_failures += 1;
            tracing::warn!("Could not write success notice: {}", e);
        }
    }
}
