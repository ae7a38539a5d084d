//! Configuration of a statistic test
//!
//! Plans carry tests as loosely-typed YAML mappings. Binding turns such a
//! mapping into [`StatisticTestData`], reporting unknown keys and values of
//! the wrong kind as diagnostics instead of failing.

use crate::JobContext;
use automation_types::{Diagnostic, DiagnosticCode, DiagnosticSink, OnFail, Operator};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// Value of the `type` key identifying statistic tests
pub const TEST_TYPE: &str = "stats";

pub const FIELD_NAME: &str = "name";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_STATISTIC: &str = "statistic";
pub const FIELD_OPERATOR: &str = "operator";
pub const FIELD_VALUE: &str = "value";
pub const FIELD_ON_FAIL: &str = "onFail";

/// Configured fields of a statistic test, as written in the plan.
///
/// `operator` keeps the text that was configured so an editor can show it
/// even when it is not a valid symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticTestData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub statistic: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub on_fail: Option<OnFail>,
}

impl StatisticTestData {
    pub fn new(
        statistic: impl Into<String>,
        operator: Operator,
        value: i64,
        on_fail: OnFail,
    ) -> Self {
        Self {
            name: None,
            statistic: Some(statistic.into()),
            operator: Some(operator.symbol().to_string()),
            value: Some(value),
            on_fail: Some(on_fail),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The configured operator, if it is a recognized symbol
    pub fn resolved_operator(&self) -> Option<Operator> {
        self.operator.as_deref().and_then(Operator::from_symbol)
    }

    /// Configured name, or one derived from the other fields.
    ///
    /// `urls >= 100` when everything is present; missing parts are skipped,
    /// and with nothing to go on the name is the test type.
    pub fn effective_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        let value = self.value.map(|v| v.to_string());
        let parts: Vec<&str> = [
            self.statistic.as_deref(),
            self.operator.as_deref(),
            value.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

        if parts.is_empty() {
            TEST_TYPE.to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Plan representation, `type` included, in the order editors write it
    pub fn to_mapping(&self) -> Mapping {
        let mut map = Mapping::new();
        if let Some(name) = &self.name {
            map.insert(FIELD_NAME.into(), name.as_str().into());
        }
        map.insert(FIELD_TYPE.into(), TEST_TYPE.into());
        if let Some(statistic) = &self.statistic {
            map.insert(FIELD_STATISTIC.into(), statistic.as_str().into());
        }
        if let Some(operator) = &self.operator {
            map.insert(FIELD_OPERATOR.into(), operator.as_str().into());
        }
        if let Some(value) = self.value {
            map.insert(FIELD_VALUE.into(), value.into());
        }
        if let Some(on_fail) = self.on_fail {
            map.insert(FIELD_ON_FAIL.into(), on_fail.as_str().into());
        }
        map
    }

    /// Bind a raw plan mapping.
    ///
    /// Never fails. Unknown keys are reported as warnings, values of the
    /// wrong kind as errors, and the affected field is left unset. An
    /// `onFail` string that is not a policy is left unset without a type
    /// error; validation reports it as a bad on-fail value.
    pub fn bind<S>(raw: &Mapping, job: &JobContext, sink: &mut S) -> Self
    where
        S: DiagnosticSink + ?Sized,
    {
        let mut data = StatisticTestData::default();
        let mut problems: Vec<BindProblem> = Vec::new();

        for (key, value) in raw {
            let Some(key) = key.as_str() else {
                problems.push(BindProblem::Unknown(describe(key)));
                continue;
            };

            if value.is_null() {
                continue;
            }

            match key {
                FIELD_NAME => data.name = bind_string(key, value, &mut problems),
                FIELD_TYPE => {}
                FIELD_STATISTIC => data.statistic = bind_string(key, value, &mut problems),
                FIELD_OPERATOR => data.operator = bind_string(key, value, &mut problems),
                FIELD_VALUE => match value.as_i64() {
                    Some(v) => data.value = Some(v),
                    None => {
                        problems.push(BindProblem::BadType(key.to_string(), describe(value)))
                    }
                },
                FIELD_ON_FAIL => {
                    if let Some(text) = bind_string(key, value, &mut problems) {
                        data.on_fail = text.parse().ok();
                    }
                }
                _ => problems.push(BindProblem::Unknown(key.to_string())),
            }
        }

        let name = data.effective_name();
        for problem in problems {
            sink.report(problem.into_diagnostic(&name, job));
        }

        debug!(job = job.job_type(), test = %name, "Statistic test configuration bound");

        data
    }
}

enum BindProblem {
    Unknown(String),
    BadType(String, String),
}

impl BindProblem {
    fn into_diagnostic(self, test_name: &str, job: &JobContext) -> Diagnostic {
        match self {
            BindProblem::Unknown(key) => {
                let code = DiagnosticCode::UnknownField;
                let message = job.message(code.message_key(), &[test_name, key.as_str()]);
                Diagnostic::warning(code, test_name, message).with_field(key)
            }
            BindProblem::BadType(key, value) => {
                let code = DiagnosticCode::BadFieldType;
                let message = job.message(
                    code.message_key(),
                    &[test_name, key.as_str(), value.as_str()],
                );
                Diagnostic::error(code, test_name, message).with_field(key)
            }
        }
    }
}

fn bind_string(key: &str, value: &Value, problems: &mut Vec<BindProblem>) -> Option<String> {
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            problems.push(BindProblem::BadType(key.to_string(), describe(value)));
            None
        }
    }
}

/// Short single-line rendering of a YAML value for messages
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Sequence(_) => "[...]".to_string(),
        Value::Mapping(_) => "{...}".to_string(),
        Value::Tagged(tagged) => tagged.tag.to_string(),
    }
}
