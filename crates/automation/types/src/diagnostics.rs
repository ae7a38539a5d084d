//! Configuration diagnostics
//!
//! Building a test never fails outright. Each problem found while binding
//! and validating a test's configuration is reported as a [`Diagnostic`]
//! into a [`DiagnosticSink`], and the host decides whether the accumulated
//! problems abort the plan.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a configuration problem
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// `onFail` is missing or not a recognized policy
    BadOnFail,
    /// `operator` is missing or empty
    NoOperator,
    /// `operator` is not one of the recognized symbols
    BadOperator,
    /// `statistic` is missing or empty
    NoStatistic,
    /// `value` is missing
    NoValue,
    /// The test configuration has a key nobody reads
    UnknownField,
    /// A field is present but holds the wrong kind of value
    BadFieldType,
    /// A plan entry declares a test type this runner does not handle
    UnsupportedTestType,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::BadOnFail => "bad-on-fail",
            DiagnosticCode::NoOperator => "no-operator",
            DiagnosticCode::BadOperator => "bad-operator",
            DiagnosticCode::NoStatistic => "no-statistic",
            DiagnosticCode::NoValue => "no-value",
            DiagnosticCode::UnknownField => "unknown-field",
            DiagnosticCode::BadFieldType => "bad-field-type",
            DiagnosticCode::UnsupportedTestType => "unsupported-test-type",
        }
    }

    /// Catalog key of the message template for this code
    pub fn message_key(self) -> &'static str {
        match self {
            DiagnosticCode::BadOnFail => "automation.tests.error.badonfail",
            DiagnosticCode::NoOperator => "automation.tests.stats.error.nooperator",
            DiagnosticCode::BadOperator => "automation.tests.stats.error.badoperator",
            DiagnosticCode::NoStatistic => "automation.tests.stats.error.nostatistic",
            DiagnosticCode::NoValue => "automation.tests.stats.error.novalue",
            DiagnosticCode::UnknownField => "automation.error.options.unknown",
            DiagnosticCode::BadFieldType => "automation.error.options.badtype",
            DiagnosticCode::UnsupportedTestType => "automation.tests.error.unsupported",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much a diagnostic matters to the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single configuration problem
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    /// Name of the test the problem belongs to
    pub test_name: String,
    /// Offending configuration key, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Rendered, human-readable message
    pub message: String,
}

impl Diagnostic {
    pub fn error(
        code: DiagnosticCode,
        test_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity: Severity::Error,
            test_name: test_name.into(),
            field: None,
            message: message.into(),
        }
    }

    pub fn warning(
        code: DiagnosticCode,
        test_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, test_name, message)
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Side channel collecting configuration problems without aborting
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}
