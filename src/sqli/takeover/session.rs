//! Per-target session state shared by the takeover operations

use super::backend::BackendDescriptor;
use crate::sqli::core::{Technique, CMD_TABLE_PREFIX, FILE_TABLE_PREFIX, HEX_TABLE_SUFFIX};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Operator settings relevant to post-exploitation
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionConfig {
    /// Remote writable directory; normalized once resolved
    pub tmp_path: Option<String>,
    /// Statements run over a native connection instead of the injection
    pub direct: bool,
    /// An out-of-band takeover left stager files behind
    pub os_pwn: bool,
}

/// Fields learned from the DBMS banner, each written once
#[derive(Debug, Clone, Default, Serialize)]
pub struct BannerFingerprint {
    fields: BTreeMap<String, String>,
}

impl BannerFingerprint {
    pub const DBMS_VERSION: &'static str = "dbmsVersion";

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Store `value` unless the field is already set; returns whether it was stored
    pub fn set_once(&mut self, field: &str, value: String) -> bool {
        if self.fields.contains_key(field) {
            return false;
        }
        self.fields.insert(field.to_string(), value);
        true
    }
}

/// Helper tables created on the target for file and command staging
#[derive(Debug, Clone, Serialize)]
pub struct SupportArtifacts {
    pub file_table: String,
    pub cmd_table: String,
}

impl Default for SupportArtifacts {
    fn default() -> Self {
        Self {
            file_table: FILE_TABLE_PREFIX.to_string(),
            cmd_table: CMD_TABLE_PREFIX.to_string(),
        }
    }
}

impl SupportArtifacts {
    pub fn hex_file_table(&self) -> String {
        format!("{}{}", self.file_table, HEX_TABLE_SUFFIX)
    }
}

/// Remote locations handed to upload and stager placement
#[derive(Debug, Clone, Default, Serialize)]
pub struct RemotePaths {
    pub temp: Option<String>,
}

impl RemotePaths {
    /// Full remote path of `file_name` inside the temporary directory
    pub fn stage_path(&self, file_name: &str) -> Option<String> {
        let temp = self.temp.as_deref()?;
        Some(format!("{}/{}", temp.trim_end_matches('/'), file_name.trim_start_matches('/')))
    }
}

/// State of one target engagement
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub backend: BackendDescriptor,
    pub config: SessionConfig,
    pub banner_fp: BannerFingerprint,
    pub artifacts: SupportArtifacts,
    pub remote_paths: RemotePaths,
    pub techniques: HashSet<Technique>,
}

impl Session {
    pub fn new(backend: BackendDescriptor, config: SessionConfig) -> Self {
        Self {
            backend,
            config,
            ..Self::default()
        }
    }

    pub fn is_technique_available(&self, technique: Technique) -> bool {
        self.techniques.contains(&technique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_fields_write_once() {
        let mut fp = BannerFingerprint::default();
        assert!(fp.set_once(BannerFingerprint::DBMS_VERSION, "5.7.30".to_string()));
        assert!(!fp.set_once(BannerFingerprint::DBMS_VERSION, "8.0".to_string()));
        assert_eq!(fp.get(BannerFingerprint::DBMS_VERSION), Some("5.7.30"));
    }

    #[test]
    fn test_stage_path() {
        let mut paths = RemotePaths::default();
        assert_eq!(paths.stage_path("lib.so"), None);
        paths.temp = Some("/tmp/".to_string());
        assert_eq!(paths.stage_path("lib.so").as_deref(), Some("/tmp/lib.so"));
    }

    #[test]
    fn test_default_artifacts() {
        let artifacts = SupportArtifacts::default();
        assert_eq!(artifacts.file_table, "anvilfile");
        assert_eq!(artifacts.hex_file_table(), "anvilfilehex");
        assert_eq!(artifacts.cmd_table, "anvilcmd");
    }
}
