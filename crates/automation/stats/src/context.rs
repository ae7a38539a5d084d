//! The job a test belongs to

use automation_types::MessageCatalog;
use std::sync::Arc;

/// Job type and message catalog shared by every test of one job
#[derive(Clone, Debug)]
pub struct JobContext {
    job_type: String,
    catalog: Arc<MessageCatalog>,
}

impl JobContext {
    /// Context using the default English catalog
    pub fn new(job_type: impl Into<String>) -> Self {
        Self {
            job_type: job_type.into(),
            catalog: Arc::new(MessageCatalog::default()),
        }
    }

    pub fn with_catalog(mut self, catalog: impl Into<Arc<MessageCatalog>>) -> Self {
        self.catalog = catalog.into();
        self
    }

    pub fn job_type(&self) -> &str {
        &self.job_type
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Render `key` with the job type prepended to `args`
    pub fn message(&self, key: &str, args: &[&str]) -> String {
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(self.job_type.as_str());
        all.extend_from_slice(args);
        self.catalog.format(key, &all)
    }
}
