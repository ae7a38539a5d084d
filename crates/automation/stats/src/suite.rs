//! The statistic tests of one job
//!
//! A job's plan section lists its tests under `tests:`. This module builds
//! the statistic tests out of that list, leaves other test types to their
//! own runners, and evaluates the lot against one counter snapshot.

use crate::{
    CounterLookup, EvaluationResult, JobContext, StatisticAssertion, FIELD_NAME, FIELD_TYPE,
    TEST_TYPE,
};
use automation_types::{
    AutomationError, AutomationProgress, AutomationResult, Diagnostic, DiagnosticCode,
    DiagnosticSink,
};
use serde_yaml::Value;
use tracing::{debug, info};

const TESTS_KEY: &str = "tests";

/// Statistic tests sharing a job
#[derive(Clone, Debug)]
pub struct StatisticTestSuite {
    job: JobContext,
    tests: Vec<StatisticAssertion>,
}

impl StatisticTestSuite {
    pub fn new(job: JobContext) -> Self {
        Self {
            job,
            tests: Vec::new(),
        }
    }

    /// Build the suite from a YAML document.
    ///
    /// The document is either a mapping with a `tests` list or the list
    /// itself. Entries whose `type` is not `stats` are skipped with a
    /// warning. Problems inside an entry are reported to `sink`.
    ///
    /// # Errors
    ///
    /// Unparseable YAML, or a document or entry with the wrong shape.
    pub fn from_yaml<S>(yaml: &str, job: JobContext, sink: &mut S) -> AutomationResult<Self>
    where
        S: DiagnosticSink + ?Sized,
    {
        if yaml.trim().is_empty() {
            return Ok(Self::new(job));
        }
        let document: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(&document, job, sink)
    }

    pub fn from_value<S>(
        document: &Value,
        job: JobContext,
        sink: &mut S,
    ) -> AutomationResult<Self>
    where
        S: DiagnosticSink + ?Sized,
    {
        let entries = match document {
            Value::Null => return Ok(Self::new(job)),
            Value::Sequence(entries) => entries,
            Value::Mapping(map) => match map.get(TESTS_KEY) {
                None | Some(Value::Null) => return Ok(Self::new(job)),
                Some(Value::Sequence(entries)) => entries,
                Some(_) => {
                    return Err(AutomationError::InvalidPlan(format!(
                        "'{}' must be a list",
                        TESTS_KEY
                    )))
                }
            },
            _ => {
                return Err(AutomationError::InvalidPlan(
                    "expected a list of tests or a mapping with a 'tests' list".into(),
                ))
            }
        };

        let mut suite = Self::new(job);
        for (index, entry) in entries.iter().enumerate() {
            let Value::Mapping(raw) = entry else {
                return Err(AutomationError::InvalidPlan(format!(
                    "test {} is not a mapping",
                    index + 1
                )));
            };

            let test_type = raw.get(FIELD_TYPE).and_then(Value::as_str);
            if test_type != Some(TEST_TYPE) {
                let name = raw
                    .get(FIELD_NAME)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{}", index + 1));
                let code = DiagnosticCode::UnsupportedTestType;
                let message = suite.job.message(
                    code.message_key(),
                    &[name.as_str(), test_type.unwrap_or("<none>")],
                );
                sink.report(Diagnostic::warning(code, name, message).with_field(FIELD_TYPE));
                continue;
            }

            let test = StatisticAssertion::new(raw, &suite.job, sink);
            suite.tests.push(test);
        }

        debug!(
            job = suite.job.job_type(),
            tests = suite.tests.len(),
            "Statistic test suite loaded"
        );
        Ok(suite)
    }

    pub fn push(&mut self, test: StatisticAssertion) {
        self.tests.push(test);
    }

    pub fn tests(&self) -> &[StatisticAssertion] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn job(&self) -> &JobContext {
        &self.job
    }

    /// Evaluate every test against one snapshot and log each outcome.
    ///
    /// # Errors
    ///
    /// Stops at the first test whose operator is not recognized; see
    /// [`StatisticAssertion::evaluate`].
    pub fn run<C>(
        &mut self,
        counters: &C,
        progress: &mut AutomationProgress,
    ) -> AutomationResult<Vec<EvaluationResult>>
    where
        C: CounterLookup + ?Sized,
    {
        let mut results = Vec::with_capacity(self.tests.len());
        for test in &mut self.tests {
            let result = test.evaluate(counters, progress)?;
            test.log_to_progress(&result, progress);
            results.push(result);
        }

        info!(
            job = self.job.job_type(),
            tests = results.len(),
            passed = results.iter().filter(|r| r.passed).count(),
            "Statistic tests run"
        );
        Ok(results)
    }
}

/// True when there is no result that did not pass
pub fn all_passed(results: &[EvaluationResult]) -> bool {
    results.iter().all(|r| r.passed)
}
