//! Test doubles for the takeover collaborators

use super::fingerprint::{OsFingerprint, OsProber};
use crate::sqli::core::{DBMS, OS};
use crate::sqli::executor::CommandExecutor;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Injected,
    Stacked,
    OsCommand,
}

/// Executor that records every call and optionally fails them
pub struct RecordingExecutor {
    value: Option<String>,
    fail: bool,
    calls: Mutex<Vec<(Kind, String, bool)>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self {
            value: None,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::new()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    fn record(&self, kind: Kind, text: &str, silent: bool) -> Result<()> {
        self.calls.lock().unwrap().push((kind, text.to_string(), silent));
        if self.fail {
            anyhow::bail!("relation \"{}\" does not exist", text);
        }
        Ok(())
    }

    pub fn calls(&self) -> Vec<(Kind, String, bool)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn statements(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, text, _)| text).collect()
    }

    pub fn of_kind(&self, kind: Kind) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, text, _)| text)
            .collect()
    }
}

#[async_trait]
impl CommandExecutor for RecordingExecutor {
    async fn injected_query(&self, sql: &str, silent: bool) -> Result<Option<String>> {
        self.record(Kind::Injected, sql, silent)?;
        Ok(self.value.clone())
    }

    async fn stacked_query(&self, sql: &str, silent: bool) -> Result<()> {
        self.record(Kind::Stacked, sql, silent)
    }

    async fn os_command(&self, cmd: &str, silent: bool) -> Result<()> {
        self.record(Kind::OsCommand, cmd, silent)
    }
}

/// Prober returning a fixed answer
pub struct StubProber {
    answer: OsFingerprint,
    calls: AtomicUsize,
}

impl StubProber {
    pub fn new(os: Option<OS>, version: Option<&str>) -> Self {
        Self {
            answer: OsFingerprint {
                os,
                version: version.map(str::to_string),
            },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn silent() -> Self {
        Self::new(None, None)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OsProber for StubProber {
    async fn probe_os(&self, _dbms: DBMS, _detailed: bool) -> Result<OsFingerprint> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}
