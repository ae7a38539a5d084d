//! Read access to counters tracked by the host
//!
//! The counter subsystem is injected into evaluation; nothing here reaches
//! for shared global state. Implementations must be plain reads.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::Arc;

/// Read-only view of named counters
pub trait CounterLookup {
    /// Current value of `key`, or `None` if it has never been tracked
    fn counter(&self, key: &str) -> Option<i64>;
}

impl<S: BuildHasher> CounterLookup for HashMap<String, i64, S> {
    fn counter(&self, key: &str) -> Option<i64> {
        self.get(key).copied()
    }
}

impl CounterLookup for BTreeMap<String, i64> {
    fn counter(&self, key: &str) -> Option<i64> {
        self.get(key).copied()
    }
}

impl<T: CounterLookup + ?Sized> CounterLookup for &T {
    fn counter(&self, key: &str) -> Option<i64> {
        (**self).counter(key)
    }
}

impl<T: CounterLookup + ?Sized> CounterLookup for Box<T> {
    fn counter(&self, key: &str) -> Option<i64> {
        (**self).counter(key)
    }
}

impl<T: CounterLookup + ?Sized> CounterLookup for Arc<T> {
    fn counter(&self, key: &str) -> Option<i64> {
        (**self).counter(key)
    }
}

/// A host without a counter subsystem tracks nothing
impl<T: CounterLookup> CounterLookup for Option<T> {
    fn counter(&self, key: &str) -> Option<i64> {
        self.as_ref().and_then(|lookup| lookup.counter(key))
    }
}

/// Adapts a closure into a [`CounterLookup`]
#[derive(Clone, Copy, Debug)]
pub struct FnCounters<F>(pub F);

impl<F> CounterLookup for FnCounters<F>
where
    F: Fn(&str) -> Option<i64>,
{
    fn counter(&self, key: &str) -> Option<i64> {
        (self.0)(key)
    }
}

/// Snapshot of counter values, e.g. captured at the end of a job
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryStats {
    counters: BTreeMap<String, i64>,
}

impl InMemoryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counter(mut self, key: impl Into<String>, value: i64) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: i64) {
        self.counters.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<i64> {
        self.counters.remove(key)
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.counters.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl CounterLookup for InMemoryStats {
    fn counter(&self, key: &str) -> Option<i64> {
        self.counters.get(key).copied()
    }
}

impl FromIterator<(String, i64)> for InMemoryStats {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self {
            counters: iter.into_iter().collect(),
        }
    }
}
