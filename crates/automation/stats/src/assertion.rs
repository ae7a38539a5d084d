//! Statistic threshold test
//!
//! `StatisticAssertion` is built once from plan configuration, validated
//! immediately, and may then be evaluated any number of times. Each
//! evaluation reads one counter, overwrites the stored observed value and
//! recomputes the verdict; nothing else changes after construction.

use crate::{
    CounterLookup, JobContext, StatisticTestData, FIELD_NAME, FIELD_ON_FAIL, FIELD_OPERATOR,
    FIELD_STATISTIC, FIELD_VALUE, TEST_TYPE,
};
use automation_types::{
    AutomationError, AutomationProgress, AutomationResult, Diagnostic, DiagnosticCode,
    DiagnosticSink, OnFail, Operator, MSG_TEST_FAIL, MSG_TEST_PASS,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use tracing::{debug, trace, warn};

/// Outcome of one evaluation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Passed,
    Failed,
    /// No threshold configured; the counter was not read
    NotEvaluated,
}

/// Verdict of one evaluation, with its explanation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub test_name: String,
    /// Counter value read by this evaluation (0 when not evaluated)
    pub observed_value: i64,
    pub passed: bool,
    pub status: EvaluationStatus,
    /// Pass explanation, fail explanation or the no-value diagnostic
    pub message: String,
    pub evaluated_at: DateTime<Utc>,
}

/// A test comparing a tracked counter against a threshold
#[derive(Clone, Debug)]
pub struct StatisticAssertion {
    job: JobContext,
    name: String,
    data: StatisticTestData,
    /// `data.operator` resolved once at construction
    operator: Option<Operator>,
    /// Counter value captured by the most recent evaluation
    observed: i64,
}

impl StatisticAssertion {
    /// Build from a raw plan mapping.
    ///
    /// Always returns a test. Binding and validation problems are all
    /// reported to `sink`; none of them stops the others being checked.
    pub fn new<S>(raw: &Mapping, job: &JobContext, sink: &mut S) -> Self
    where
        S: DiagnosticSink + ?Sized,
    {
        let data = StatisticTestData::bind(raw, job, sink);
        Self::from_data(data, job, sink)
    }

    /// Build from individual parameters, as an editor would
    pub fn from_params<S>(
        statistic: &str,
        name: &str,
        operator: &str,
        value: i64,
        on_fail: &str,
        job: &JobContext,
        sink: &mut S,
    ) -> Self
    where
        S: DiagnosticSink + ?Sized,
    {
        let mut raw = Mapping::new();
        raw.insert(FIELD_STATISTIC.into(), statistic.into());
        raw.insert(FIELD_NAME.into(), name.into());
        raw.insert(FIELD_OPERATOR.into(), operator.into());
        raw.insert(FIELD_VALUE.into(), value.into());
        raw.insert(FIELD_ON_FAIL.into(), on_fail.into());
        Self::new(&raw, job, sink)
    }

    /// Build from already-bound configuration
    pub fn from_data<S>(data: StatisticTestData, job: &JobContext, sink: &mut S) -> Self
    where
        S: DiagnosticSink + ?Sized,
    {
        let test = Self {
            job: job.clone(),
            name: data.effective_name(),
            operator: data.resolved_operator(),
            data,
            observed: 0,
        };
        test.validate(sink);

        debug!(
            job = test.job.job_type(),
            test = %test.name,
            statistic = ?test.data.statistic,
            operator = ?test.data.operator,
            value = ?test.data.value,
            "Statistic test created"
        );
        test
    }

    fn validate<S>(&self, sink: &mut S)
    where
        S: DiagnosticSink + ?Sized,
    {
        if self.data.on_fail.is_none() {
            sink.report(self.config_error(DiagnosticCode::BadOnFail, FIELD_ON_FAIL, &[]));
        }

        match self.data.operator.as_deref() {
            None | Some("") => {
                sink.report(self.config_error(DiagnosticCode::NoOperator, FIELD_OPERATOR, &[]));
            }
            Some(symbol) if self.operator.is_none() => {
                sink.report(self.config_error(
                    DiagnosticCode::BadOperator,
                    FIELD_OPERATOR,
                    &[symbol],
                ));
            }
            Some(_) => {}
        }

        if self.data.statistic.as_deref().unwrap_or_default().is_empty() {
            sink.report(self.config_error(DiagnosticCode::NoStatistic, FIELD_STATISTIC, &[]));
        }

        if self.data.value.is_none() {
            sink.report(self.config_error(DiagnosticCode::NoValue, FIELD_VALUE, &[]));
        }
    }

    fn config_error(&self, code: DiagnosticCode, field: &str, extra: &[&str]) -> Diagnostic {
        let mut args = Vec::with_capacity(extra.len() + 1);
        args.push(self.name.as_str());
        args.extend_from_slice(extra);
        let message = self.job.message(code.message_key(), &args);
        Diagnostic::error(code, self.name.as_str(), message).with_field(field)
    }

    /// Read the counter and compare it with the threshold.
    ///
    /// Without a threshold the counter is not read: the no-value diagnostic
    /// is reported and the result is [`EvaluationStatus::NotEvaluated`].
    /// An untracked counter reads as 0.
    ///
    /// # Errors
    ///
    /// [`AutomationError::UnexpectedOperator`] if the configured operator is
    /// not a recognized symbol. Validation has already reported that, so
    /// reaching it means the host evaluated a test it was told is invalid;
    /// the run must not treat it as an ordinary failed verdict.
    pub fn evaluate<C, S>(
        &mut self,
        counters: &C,
        sink: &mut S,
    ) -> AutomationResult<EvaluationResult>
    where
        C: CounterLookup + ?Sized,
        S: DiagnosticSink + ?Sized,
    {
        let Some(threshold) = self.data.value else {
            let diagnostic = self.config_error(DiagnosticCode::NoValue, FIELD_VALUE, &[]);
            let message = diagnostic.message.clone();
            sink.report(diagnostic);
            warn!(job = self.job.job_type(), test = %self.name, "Statistic test has no value");
            return Ok(EvaluationResult {
                test_name: self.name.clone(),
                observed_value: 0,
                passed: false,
                status: EvaluationStatus::NotEvaluated,
                message,
                evaluated_at: Utc::now(),
            });
        };

        self.observed = counters.counter(self.statistic()).unwrap_or(0);

        let operator = self.operator.ok_or_else(|| {
            AutomationError::UnexpectedOperator(self.data.operator.clone().unwrap_or_default())
        })?;

        let passed = operator.compare(self.observed, threshold);
        let (status, message) = if passed {
            (EvaluationStatus::Passed, self.passed_message())
        } else {
            (EvaluationStatus::Failed, self.failed_message())
        };

        debug!(
            job = self.job.job_type(),
            test = %self.name,
            observed = self.observed,
            operator = %operator,
            threshold = threshold,
            passed = passed,
            "Statistic test evaluated"
        );

        Ok(EvaluationResult {
            test_name: self.name.clone(),
            observed_value: self.observed,
            passed,
            status,
            message,
            evaluated_at: Utc::now(),
        })
    }

    /// `observed <op> threshold` for the configured operator
    pub fn pass_reason(&self) -> String {
        let symbol = match self.operator {
            Some(op) => op.symbol().to_string(),
            None => self.data.operator.clone().unwrap_or_default(),
        };
        format!("{} {} {}", self.observed, symbol, self.threshold_text())
    }

    /// `observed <inverse> threshold`, the relation that holds on failure.
    ///
    /// An unrecognized operator has no inverse and renders as `not <text>`.
    pub fn fail_reason(&self) -> String {
        let symbol = match self.operator {
            Some(op) => op.inverse().symbol().to_string(),
            None => format!("not {}", self.data.operator.as_deref().unwrap_or_default()),
        };
        format!("{} {} {}", self.observed, symbol, self.threshold_text())
    }

    pub fn passed_message(&self) -> String {
        let reason = self.pass_reason();
        self.job
            .message(MSG_TEST_PASS, &[TEST_TYPE, self.name.as_str(), reason.as_str()])
    }

    pub fn failed_message(&self) -> String {
        let reason = self.fail_reason();
        self.job
            .message(MSG_TEST_FAIL, &[TEST_TYPE, self.name.as_str(), reason.as_str()])
    }

    fn threshold_text(&self) -> String {
        self.data.value.map(|v| v.to_string()).unwrap_or_default()
    }

    /// Record an evaluation in the run's progress.
    ///
    /// A pass is recorded as info. A failure goes where `onFail` says;
    /// a failure with no valid policy is recorded as an error.
    pub fn log_to_progress(&self, result: &EvaluationResult, progress: &mut AutomationProgress) {
        match result.status {
            EvaluationStatus::Passed => progress.info(result.message.clone()),
            EvaluationStatus::Failed => match self.data.on_fail {
                Some(OnFail::Warn) => progress.warn(result.message.clone()),
                Some(OnFail::Info) => progress.info(result.message.clone()),
                Some(OnFail::Error) | None => progress.error(result.message.clone()),
                Some(OnFail::Ignore) => {
                    trace!(test = %self.name, "Statistic test failure ignored");
                }
            },
            // the no-value diagnostic was reported by evaluate
            EvaluationStatus::NotEvaluated => {}
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job_type(&self) -> &str {
        self.job.job_type()
    }

    pub fn test_type(&self) -> &'static str {
        TEST_TYPE
    }

    pub fn data(&self) -> &StatisticTestData {
        &self.data
    }

    pub fn statistic(&self) -> &str {
        self.data.statistic.as_deref().unwrap_or_default()
    }

    /// The recognized operator, `None` if the configured text is not one
    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn inverse_operator(&self) -> Option<Operator> {
        self.operator.map(Operator::inverse)
    }

    pub fn threshold(&self) -> Option<i64> {
        self.data.value
    }

    pub fn on_fail(&self) -> Option<OnFail> {
        self.data.on_fail
    }

    /// Counter value from the latest evaluation, 0 before the first
    pub fn observed_value(&self) -> i64 {
        self.observed
    }

    /// Plan representation of this test
    pub fn to_mapping(&self) -> Mapping {
        self.data.to_mapping()
    }
}
