//! Message catalog
//!
//! Every user-visible sentence is looked up by key and filled in with
//! positional `{0}`, `{1}`, ... arguments. The default catalog is English;
//! a host can load overrides from a YAML or JSON file.

use crate::AutomationResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Test passed. Args: job type, test type, test name, reason
pub const MSG_TEST_PASS: &str = "automation.tests.pass";
/// Test failed. Args: job type, test type, test name, reason
pub const MSG_TEST_FAIL: &str = "automation.tests.fail";

const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    (MSG_TEST_PASS, "Job {0} test of type {1} passed: {2} [{3}]"),
    (MSG_TEST_FAIL, "Job {0} test of type {1} failed: {2} [{3}]"),
    (
        "automation.tests.error.badonfail",
        "Job {0} test {1} has an invalid onFail value, expected one of warn, error, info, ignore",
    ),
    (
        "automation.tests.stats.error.nooperator",
        "Job {0} statistic test {1} has no operator",
    ),
    (
        "automation.tests.stats.error.badoperator",
        "Job {0} statistic test {1} has an invalid operator: {2}",
    ),
    (
        "automation.tests.stats.error.nostatistic",
        "Job {0} statistic test {1} has no statistic",
    ),
    (
        "automation.tests.stats.error.novalue",
        "Job {0} statistic test {1} has no value",
    ),
    (
        "automation.error.options.unknown",
        "Job {0} test {1} has an unrecognized option: {2}",
    ),
    (
        "automation.error.options.badtype",
        "Job {0} test {1} option {2} has an invalid value: {3}",
    ),
    (
        "automation.tests.error.unsupported",
        "Job {0} test {1} has an unsupported type: {2}",
    ),
];

/// Keyed message templates
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    templates: BTreeMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES
                .iter()
                .map(|(key, template)| (key.to_string(), template.to_string()))
                .collect(),
        }
    }
}

impl MessageCatalog {
    /// A catalog with no templates at all
    pub fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    pub fn with_template(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(key.into(), template.into());
        self
    }

    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Default templates overlaid with the ones in `path`.
    ///
    /// `.yaml` / `.yml` files are read as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> AutomationResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let overrides: BTreeMap<String, String> = match path.extension().and_then(|e| e.to_str())
        {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)?,
            _ => serde_json::from_str(&contents)?,
        };

        debug!(path = %path.display(), overrides = overrides.len(), "Message catalog loaded");

        let mut catalog = Self::default();
        catalog.templates.extend(overrides);
        Ok(catalog)
    }

    /// Render `key` with positional arguments.
    ///
    /// An unknown key renders as the key followed by its arguments, so a
    /// missing translation is visible rather than fatal.
    pub fn format(&self, key: &str, args: &[&str]) -> String {
        match self.templates.get(key) {
            Some(template) => substitute(template, args),
            None => {
                warn!(key = key, "Message key not found in catalog");
                if args.is_empty() {
                    key.to_string()
                } else {
                    format!("{} {}", key, args.join(" "))
                }
            }
        }
    }
}

/// Single pass over the template; substituted text is never rescanned.
/// Placeholders with no matching argument are left as written.
fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = after.find('}').and_then(|close| {
            after[..close]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
                .map(|value| (close, *value))
        });
        match arg {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog_formats_pass_and_fail() {
        let catalog = MessageCatalog::default();
        assert_eq!(
            catalog.format(MSG_TEST_PASS, &["spider", "stats", "urls", "42 < 50"]),
            "Job spider test of type stats passed: urls [42 < 50]"
        );
        assert_eq!(
            catalog.format(MSG_TEST_FAIL, &["spider", "stats", "urls", "42 >= 10"]),
            "Job spider test of type stats failed: urls [42 >= 10]"
        );
    }

    #[test]
    fn test_substitution_is_single_pass() {
        assert_eq!(substitute("{0}-{1}", &["{1}", "b"]), "{1}-b");
        assert_eq!(substitute("{1} then {0}", &["a", "b"]), "b then a");
    }

    #[test]
    fn test_unmatched_placeholders_are_kept() {
        assert_eq!(substitute("{0} {5} {x} {", &["a"]), "a {5} {x} {");
        assert_eq!(substitute("no placeholders", &["a"]), "no placeholders");
    }

    #[test]
    fn test_missing_key_renders_key_and_args() {
        let catalog = MessageCatalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.format("some.key", &[]), "some.key");
        assert_eq!(catalog.format("some.key", &["a", "b"]), "some.key a b");
    }

    #[test]
    fn test_load_yaml_overrides_merge_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "automation.tests.pass: \"PASS {{2}}: {{3}}\"").unwrap();

        let catalog = MessageCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), MessageCatalog::default().len());
        assert_eq!(
            catalog.format(MSG_TEST_PASS, &["job", "stats", "urls", "1 < 2"]),
            "PASS urls: 1 < 2"
        );
        assert_eq!(
            catalog.template(MSG_TEST_FAIL),
            MessageCatalog::default().template(MSG_TEST_FAIL)
        );
    }

    #[test]
    fn test_load_json_adds_new_keys() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"custom.key": "hello {{0}}"}}"#).unwrap();

        let catalog = MessageCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.format("custom.key", &["world"]), "hello world");
        assert_eq!(catalog.len(), MessageCatalog::default().len() + 1);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = MessageCatalog::load("/nonexistent/messages.yaml");
        assert!(matches!(result, Err(crate::AutomationError::Io(_))));
    }
}
