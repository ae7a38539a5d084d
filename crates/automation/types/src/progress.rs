//! Progress of an automation run
//!
//! `AutomationProgress` is what a job writes to while it is configured and
//! while it runs: coded configuration diagnostics plus the plain
//! info/warning/error lines that end up in the run report.

use crate::{Diagnostic, DiagnosticCode, DiagnosticSink, Severity};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Accumulated messages of an automation run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AutomationProgress {
    diagnostics: Vec<Diagnostic>,
    infos: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl AutomationProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(message = %message, "Progress info");
        self.infos.push(message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(message = %message, "Progress warning");
        self.warnings.push(message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(message = %message, "Progress error");
        self.errors.push(message);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics carrying a given code, in report order
    pub fn diagnostics_with_code(&self, code: DiagnosticCode) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.code == code).collect()
    }

    pub fn has_diagnostic(&self, code: DiagnosticCode) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    pub fn infos(&self) -> &[String] {
        &self.infos
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Diagnostics are kept with their codes and also echoed into the
/// matching message list, so a report shows them next to runtime output.
impl DiagnosticSink for AutomationProgress {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => self.info(diagnostic.message.clone()),
            Severity::Warning => self.warn(diagnostic.message.clone()),
            Severity::Error => self.error(diagnostic.message.clone()),
        }
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_messages_land_in_their_lists() {
        let mut progress = AutomationProgress::new();
        progress.info("started");
        progress.warn("slow");
        progress.error("broken");

        assert_eq!(progress.infos(), ["started".to_string()]);
        assert_eq!(progress.warnings(), ["slow".to_string()]);
        assert_eq!(progress.errors(), ["broken".to_string()]);
        assert!(progress.diagnostics().is_empty());
    }

    #[test]
    fn test_diagnostics_are_echoed_by_severity() {
        let mut progress = AutomationProgress::new();
        progress.report(Diagnostic::error(DiagnosticCode::NoValue, "t", "no value"));
        progress.report(Diagnostic::warning(DiagnosticCode::UnknownField, "t", "unknown key"));

        assert_eq!(progress.diagnostics().len(), 2);
        assert!(progress.has_errors());
        assert!(progress.has_warnings());
        assert!(progress.has_diagnostic(DiagnosticCode::NoValue));
        assert!(!progress.has_diagnostic(DiagnosticCode::BadOperator));
        assert_eq!(progress.diagnostics_with_code(DiagnosticCode::UnknownField).len(), 1);
        assert_eq!(progress.errors(), ["no value".to_string()]);
    }
}
