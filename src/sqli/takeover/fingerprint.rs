//! Operating system detection through the DBMS

use super::session::Session;
use super::Takeover;
use crate::sqli::core::{Agent, Queries, DBMS, OS, WINDOWS_NT_VERSIONS};
use crate::sqli::executor::CommandExecutor;
use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsFingerprint {
    pub os: Option<OS>,
    pub version: Option<String>,
}

#[async_trait]
pub trait OsProber: Send + Sync {
    async fn probe_os(&self, dbms: DBMS, detailed: bool) -> Result<OsFingerprint>;
}

/// Prober reading OS hints out of DBMS banners
pub struct QueryProber<'a> {
    executor: &'a dyn CommandExecutor,
    direct: bool,
}

impl<'a> QueryProber<'a> {
    pub fn new(executor: &'a dyn CommandExecutor, direct: bool) -> Self {
        Self { executor, direct }
    }
}

#[async_trait]
impl OsProber for QueryProber<'_> {
    async fn probe_os(&self, dbms: DBMS, detailed: bool) -> Result<OsFingerprint> {
        let Some(expression) = Queries::new(dbms).os_banner() else {
            return Ok(OsFingerprint::default());
        };

        let query = if self.direct {
            Agent::select_expression(expression)
        } else {
            expression.to_string()
        };

        let banner = self.executor.injected_query(&query, false).await?.unwrap_or_default();
        let os = match dbms {
            DBMS::MSSQL => Some(OS::Windows),
            _ => classify_os(&banner),
        };

        let version = if detailed && os == Some(OS::Windows) {
            windows_family(&banner)
        } else {
            None
        };

        Ok(OsFingerprint { os, version })
    }
}

/// OS family named by a banner, None when it gives no hint
pub fn classify_os(banner: &str) -> Option<OS> {
    let lower = banner.to_lowercase();
    if lower.is_empty() {
        None
    } else if lower.contains("darwin") {
        Some(OS::Other)
    } else if lower.contains("win") || lower.contains("mingw") || lower.contains("visual c++") {
        Some(OS::Windows)
    } else if lower.contains("linux") {
        Some(OS::Linux)
    } else {
        Some(OS::Other)
    }
}

/// Release family from a "Windows NT x.y" token
pub fn windows_family(banner: &str) -> Option<String> {
    let lower = banner.to_lowercase();
    let rest = &lower[lower.find("windows nt ")? + "windows nt ".len()..];
    let token: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    WINDOWS_NT_VERSIONS
        .iter()
        .find(|(nt, _)| *nt == token)
        .map(|(_, family)| family.to_string())
}

impl Takeover<'_> {
    /// Make sure the OS (and in detailed mode its version) is known
    pub async fn check_dbms_os(&self, session: &mut Session, detailed: bool) {
        let backend = &session.backend;
        if backend.os.is_some() && (!detailed || backend.os_version.is_some()) {
            return;
        }

        tracing::info!("fingerprinting the back-end DBMS operating system");

        match self.prober.probe_os(backend.dbms, detailed).await {
            Ok(fp) => {
                if let Some(os) = fp.os {
                    session.backend.set_os(os);
                    tracing::info!("the back-end DBMS operating system is {}", os);
                }
                if let Some(version) = fp.version {
                    tracing::info!("the back-end DBMS operating system version is {}", version);
                    session.backend.set_os_version(version);
                }
            }
            Err(e) => tracing::warn!("unable to fingerprint the operating system: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqli::takeover::backend::BackendDescriptor;
    use crate::sqli::takeover::testing::{RecordingExecutor, StubProber};
    use crate::sqli::takeover::prompt::BatchPrompt;

    #[test]
    fn test_classify_os() {
        assert_eq!(classify_os("Win64"), Some(OS::Windows));
        assert_eq!(classify_os("Linux"), Some(OS::Linux));
        assert_eq!(
            classify_os("PostgreSQL 9.1.2 on x86_64-unknown-linux-gnu"),
            Some(OS::Linux)
        );
        assert_eq!(classify_os("FreeBSD"), Some(OS::Other));
        assert_eq!(classify_os("osx10.15 darwin"), Some(OS::Other));
        assert_eq!(classify_os(""), None);
    }

    #[test]
    fn test_windows_family() {
        let banner = "Microsoft SQL Server 2005 - 9.00.1399.06 (Intel X86) on Windows NT 5.2 (Build 3790: Service Pack 2)";
        assert_eq!(windows_family(banner).as_deref(), Some("2003"));
        assert_eq!(windows_family("Windows NT 6.1 <X64>").as_deref(), Some("7"));
        assert_eq!(windows_family("Linux"), None);
    }

    #[tokio::test]
    async fn test_query_prober_mssql_detailed() {
        let executor = RecordingExecutor::with_value("Microsoft SQL Server 2000 on Windows NT 5.0 (Build 2195)");
        let prober = QueryProber::new(&executor, false);

        let fp = prober.probe_os(DBMS::MSSQL, true).await.unwrap();
        assert_eq!(fp.os, Some(OS::Windows));
        assert_eq!(fp.version.as_deref(), Some("2000"));
        assert_eq!(executor.statements(), vec!["@@VERSION".to_string()]);
    }

    #[tokio::test]
    async fn test_query_prober_unsupported_dbms_issues_nothing() {
        let executor = RecordingExecutor::new();
        let prober = QueryProber::new(&executor, false);

        let fp = prober.probe_os(DBMS::SQLite, true).await.unwrap();
        assert_eq!(fp, OsFingerprint::default());
        assert!(executor.statements().is_empty());
    }

    #[tokio::test]
    async fn test_check_skips_when_known() {
        let executor = RecordingExecutor::new();
        let prober = StubProber::new(Some(OS::Linux), None);
        let takeover = Takeover::new(&executor, &prober, &BatchPrompt);

        let mut session = Session::default();
        session.backend = BackendDescriptor::new(DBMS::MySQL);
        session.backend.set_os(OS::Windows);

        takeover.check_dbms_os(&mut session, false).await;
        assert_eq!(prober.calls(), 0);
        assert!(session.backend.is_os(OS::Windows));

        takeover.check_dbms_os(&mut session, true).await;
        assert_eq!(prober.calls(), 1);
    }
}
