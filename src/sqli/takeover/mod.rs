//! Post-exploitation helpers shared by the takeover features
//!
//! - fingerprint: OS detection through DBMS banners
//! - temp_path: remote writable directory
//! - version: DBMS version from its banner
//! - cleanup: removal of helper tables and UDFs
//! - matching: LIKE vs exact identifier matching
//! - remote: support tables and remote file deletion

pub mod backend;
pub mod cleanup;
pub mod error;
pub mod fingerprint;
pub mod matching;
pub mod prompt;
pub mod remote;
pub mod session;
pub mod temp_path;
pub mod udf;
pub mod version;

#[cfg(test)]
pub mod testing;

pub use backend::BackendDescriptor;
pub use cleanup::CleanupReport;
pub use error::TakeoverError;
pub use fingerprint::{OsProber, QueryProber};
pub use matching::MatchMode;
pub use prompt::{BatchPrompt, Prompt, ScriptedPrompt, StdinPrompt};
pub use session::{Session, SessionConfig};

use crate::sqli::executor::CommandExecutor;

/// Result of a statement whose failure is acceptable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Done,
    Suppressed(String),
}

/// Takeover operations bound to their collaborators
pub struct Takeover<'a> {
    executor: &'a dyn CommandExecutor,
    prober: &'a dyn OsProber,
    prompt: &'a dyn Prompt,
}

impl<'a> Takeover<'a> {
    pub fn new(
        executor: &'a dyn CommandExecutor,
        prober: &'a dyn OsProber,
        prompt: &'a dyn Prompt,
    ) -> Self {
        Self {
            executor,
            prober,
            prompt,
        }
    }

    /// Run a stacked statement, logging instead of propagating failure
    pub async fn best_effort(&self, sql: &str) -> DropOutcome {
        tracing::debug!("{}", sql);

        match self.executor.stacked_query(sql, true).await {
            Ok(()) => DropOutcome::Done,
            Err(e) => {
                tracing::debug!("ignoring failure of '{}': {}", sql, e);
                DropOutcome::Suppressed(e.to_string())
            }
        }
    }
}
