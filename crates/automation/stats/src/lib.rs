//! Statistic tests for the Automation Framework
//!
//! A statistic test compares a named counter, tracked by the host over the
//! lifetime of a run, against a threshold:
//!
//! ```yaml
//! tests:
//!   - name: enough URLs found
//!     type: stats
//!     statistic: stats.spider.url.found
//!     operator: ">="
//!     value: 100
//!     onFail: warn
//! ```
//!
//! Building a test never fails: every configuration problem is reported to
//! a [`DiagnosticSink`](automation_types::DiagnosticSink) and the test is
//! still created so its fields can be inspected. Evaluation reads one
//! counter through an injected [`CounterLookup`], treating an untracked
//! counter as zero, and explains the verdict as `observed <op> threshold`.
//! A failure is phrased with the inverse operator, the relation that
//! actually held.

#![deny(unsafe_code)]

mod assertion;
mod context;
mod counters;
mod data;
mod suite;

pub use assertion::*;
pub use context::*;
pub use counters::*;
pub use data::*;
pub use suite::*;
