use crate::sqli::takeover::session::BannerFingerprint;
use crate::sqli::takeover::{CleanupReport, Session};
use serde::Serialize;

/// Outcome of one post-exploitation run against a target
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionReport {
    pub target: String,
    pub dbms: String,
    pub os: Option<String>,
    pub os_version: Option<String>,
    pub tmp_path: Option<String>,
    pub dbms_version: Option<String>,
    pub matched_tables: Option<Vec<String>>,
    pub deleted_files: Vec<String>,
    pub cleanup: Option<CleanupReport>,
}

impl SessionReport {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            ..Self::default()
        }
    }

    /// Copy the final session state into the report
    pub fn absorb(&mut self, session: &Session) {
        self.dbms = session.backend.dbms.to_string();
        self.os = session.backend.os.map(|os| os.to_string());
        self.os_version = session.backend.os_version.clone();
        self.tmp_path = session.remote_paths.temp.clone();
        self.dbms_version = session
            .banner_fp
            .get(BannerFingerprint::DBMS_VERSION)
            .map(str::to_string);
    }
}
