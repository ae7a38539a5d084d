//! Automation Framework Types
//!
//! Shared vocabulary for declarative tests that run inside an automation
//! pipeline. A test is configured from a plan, validated once, evaluated
//! against state owned by the host, and explained in human-readable terms.
//!
//! # Key Concepts
//!
//! - **Operator**: one of six integer comparisons, each with a canonical
//!   symbol and exactly one inverse.
//! - **OnFail**: what the host pipeline does with a failed test
//!   (warn, error, info or ignore).
//! - **Diagnostic**: a non-fatal configuration problem tagged with a stable
//!   [`DiagnosticCode`]. Diagnostics accumulate in a [`DiagnosticSink`]
//!   instead of aborting construction, so a plan reports every problem at once.
//! - **AutomationProgress**: the default sink, also collecting the
//!   info/warning/error lines a job produces while it runs.
//! - **MessageCatalog**: keyed templates used to phrase every message.

#![deny(unsafe_code)]

mod diagnostics;
mod errors;
mod messages;
mod on_fail;
mod operator;
mod progress;

pub use diagnostics::*;
pub use errors::*;
pub use messages::*;
pub use on_fail::*;
pub use operator::*;
pub use progress::*;
