//! What is known about the back-end DBMS and its host

use super::error::{TakeoverError, TakeoverResult};
use crate::sqli::core::{DBMS, OS};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BackendDescriptor {
    pub dbms: DBMS,
    pub os: Option<OS>,
    pub os_version: Option<String>,
}

impl Default for BackendDescriptor {
    fn default() -> Self {
        Self::new(DBMS::Unknown)
    }
}

impl BackendDescriptor {
    pub fn new(dbms: DBMS) -> Self {
        Self {
            dbms,
            os: None,
            os_version: None,
        }
    }

    pub fn is_dbms(&self, dbms: DBMS) -> bool {
        self.dbms != DBMS::Unknown && self.dbms == dbms
    }

    pub fn is_os(&self, os: OS) -> bool {
        self.os == Some(os)
    }

    pub fn os_version(&self) -> Option<&str> {
        self.os_version.as_deref()
    }

    /// Identified DBMS, failing while detection has not settled on one
    pub fn identified_dbms(&self) -> TakeoverResult<DBMS> {
        match self.dbms {
            DBMS::Unknown => Err(TakeoverError::UnknownDbms),
            dbms => Ok(dbms),
        }
    }

    pub fn set_os(&mut self, os: OS) {
        if self.os != Some(os) {
            tracing::debug!("back-end DBMS operating system set to {}", os);
            self.os = Some(os);
        }
    }

    pub fn set_os_version(&mut self, version: impl Into<String>) {
        self.os_version = Some(version.into());
    }
}
