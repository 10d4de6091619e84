//! SQL Injection Module
//!
//! Post-exploitation over a confirmed injection point:
//! - core: settings, enums, agent, queries
//! - request: HTTP connection to the vulnerable parameter
//! - executor: statement and OS command execution
//! - takeover: temp paths, banner version, cleanup, matching

pub mod core;
pub mod executor;
pub mod request;
pub mod takeover;
