//! Collaborator façade (feature-gated, default off): the thin
//! persistence-adapter contract the external job manager drives the
//! engine through. Stripped to its synchronous essence. No `tokio`, no
//! `RwLock`.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{CronError, CronResult};
use crate::expression::CronExpression;

/// Severity taxonomy for `JobStore::log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Success,
    Info,
    Warning,
    Error,
    Critical,
}

/// A named, persisted cron job: the unit the external scheduler loads,
/// dispatches, and writes back through [`JobStore`].
#[derive(Debug, Clone)]
pub struct Job {
    pub name: String,
    pub expression: String,
    pub description: Option<String>,
    pub enabled: bool,
}

impl Job {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> CronResult<Self> {
        let expression = expression.into();
        CronExpression::parse(&expression)?;
        Ok(Self {
            name: name.into(),
            expression,
            description: None,
            enabled: true,
        })
    }
}

/// The six-method persistence contract: `has`, `get`, `add`,
/// `update`, `delete`, `all`, plus structured `log` writes. The core
/// engine never calls this. It is the façade the host drives the engine
/// through.
pub trait JobStore {
    fn has(&self, name: &str) -> bool;
    fn get(&self, name: &str) -> Option<Job>;
    fn add(&self, job: Job) -> CronResult<()>;
    fn update(&self, job: Job) -> CronResult<()>;
    fn delete(&self, name: &str) -> CronResult<()>;
    fn all(&self) -> Vec<Job>;
    fn log(&self, job: &Job, message: &str, level: LogLevel);
}

/// An in-memory [`JobStore`], useful for tests and examples. Not a
/// production persistence backend. The host is expected to supply its
/// own (key/value or relational) adapter satisfying the same trait.
pub struct MemoryJobStore {
    jobs: Mutex<BTreeMap<String, Job>>,
    log_lines: Mutex<Vec<(String, String, LogLevel)>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(BTreeMap::new()),
            log_lines: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything logged so far, oldest first.
    pub fn log_lines(&self) -> Vec<(String, String, LogLevel)> {
        self.log_lines.lock().unwrap().clone()
    }
}

impl Default for MemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JobStore for MemoryJobStore {
    fn has(&self, name: &str) -> bool {
        self.jobs.lock().unwrap().contains_key(name)
    }

    fn get(&self, name: &str) -> Option<Job> {
        self.jobs.lock().unwrap().get(name).cloned()
    }

    fn add(&self, job: Job) -> CronResult<()> {
        let mut jobs = self.jobs.lock().unwrap();
        if jobs.contains_key(&job.name) {
            return Err(CronError::invalid_value(0, job.name.clone(), "job already exists".to_string()));
        }
        jobs.insert(job.name.clone(), job);
        Ok(())
    }

    fn update(&self, job: Job) -> CronResult<()> {
        let mut jobs = self.jobs.lock().unwrap();
        if !jobs.contains_key(&job.name) {
            return Err(CronError::invalid_value(0, job.name.clone(), "job does not exist".to_string()));
        }
        jobs.insert(job.name.clone(), job);
        Ok(())
    }

    fn delete(&self, name: &str) -> CronResult<()> {
        let mut jobs = self.jobs.lock().unwrap();
        if jobs.remove(name).is_none() {
            return Err(CronError::invalid_value(0, name.to_string(), "job does not exist".to_string()));
        }
        Ok(())
    }

    fn all(&self) -> Vec<Job> {
        self.jobs.lock().unwrap().values().cloned().collect()
    }

    fn log(&self, job: &Job, message: &str, level: LogLevel) {
        tracing::debug!(job = %job.name, ?level, %message, "job store log");
        self.log_lines.lock().unwrap().push((job.name.clone(), message.to_string(), level));
    }
}
