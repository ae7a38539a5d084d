//! On-fail policies

use crate::AutomationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the hosting pipeline does with a test that fails
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnFail {
    /// Record the failure as a warning
    Warn,
    /// Record the failure as an error; the host may abort the plan
    Error,
    /// Record the failure as information only
    Info,
    /// Record nothing
    Ignore,
}

impl OnFail {
    pub const ALL: [OnFail; 4] = [OnFail::Warn, OnFail::Error, OnFail::Info, OnFail::Ignore];

    pub fn as_str(self) -> &'static str {
        match self {
            OnFail::Warn => "warn",
            OnFail::Error => "error",
            OnFail::Info => "info",
            OnFail::Ignore => "ignore",
        }
    }
}

impl fmt::Display for OnFail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, so `WARN` and `warn` are the same policy
impl FromStr for OnFail {
    type Err = AutomationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AutomationError::InvalidOnFail(s.to_string()))
    }
}
