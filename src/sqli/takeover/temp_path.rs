//! Remote temporary directory resolution

use super::session::Session;
use super::Takeover;
use crate::sqli::core::{
    OS, POSIX_TEMP_PATH, WINNT_TEMP_PATH, WINNT_VERSIONS, WIN_TEMP_PATH, WIN_XP_TEMP_PATH,
    WIN_XP_VERSIONS,
};
use regex::Regex;

impl Takeover<'_> {
    /// Settle the remote temp directory and publish it to the remote path registry
    pub async fn resolve_temp_path(&self, session: &mut Session) -> String {
        let configured = session
            .config
            .tmp_path
            .clone()
            .filter(|p| !p.trim().is_empty());

        let path = match configured {
            Some(path) => path,
            None if session.backend.is_os(OS::Windows) => {
                self.check_dbms_os(session, true).await;
                windows_temp_path(session.backend.os_version()).to_string()
            }
            None => POSIX_TEMP_PATH.to_string(),
        };

        if is_windows_drive_path(&path) {
            session.backend.set_os(OS::Windows);
        }

        let normalized = normalize_remote_path(&path);
        tracing::debug!("using '{}' as remote temporary directory", normalized);

        session.config.tmp_path = Some(normalized.clone());
        session.remote_paths.temp = Some(normalized.clone());
        normalized
    }
}

/// Default system temp directory for a Windows release family
pub fn windows_temp_path(version: Option<&str>) -> &'static str {
    match version {
        Some(v) if WINNT_VERSIONS.contains(&v) => WINNT_TEMP_PATH,
        Some(v) if WIN_XP_VERSIONS.contains(&v) => WIN_XP_TEMP_PATH,
        _ => WIN_TEMP_PATH,
    }
}

/// Drive letter, colon, then at least one separator
pub fn is_windows_drive_path(path: &str) -> bool {
    if let Ok(re) = Regex::new(r"(?i)^[a-z]:[/\\]+") {
        re.is_match(path)
    } else {
        false
    }
}

/// Collapse redundant separators and dot segments, forward slashes only
pub fn normalize_remote_path(path: &str) -> String {
    let unified = path.replace('\\', "/");

    let (drive, rest) = match unified.get(..2) {
        Some(prefix) if prefix.ends_with(':') && prefix.as_bytes()[0].is_ascii_alphabetic() => {
            (prefix.to_string(), &unified[2..])
        }
        _ => match split_unc_share(&unified) {
            Some((share, rest)) => (share.to_string(), rest),
            None => (String::new(), unified.as_str()),
        },
    };

    let absolute = rest.starts_with('/');
    // exactly two leading separators survive, three or more collapse
    let root = if drive.is_empty() && rest.starts_with("//") && !rest.starts_with("///") {
        "//"
    } else {
        "/"
    };
    let mut parts: Vec<&str> = Vec::new();

    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    match (absolute, body.is_empty()) {
        (true, _) => format!("{}{}{}", drive, root, body),
        (false, false) => format!("{}{}", drive, body),
        (false, true) if drive.is_empty() => ".".to_string(),
        (false, true) => drive,
    }
}

/// `//host/share` prefix of a UNC path and the remainder after it
fn split_unc_share(path: &str) -> Option<(&str, &str)> {
    let after = path.strip_prefix("//")?;
    if after.starts_with('/') {
        return None;
    }

    let host_len = after.find('/')?;
    let share = &after[host_len + 1..];
    if share.is_empty() || share.starts_with('/') {
        return None;
    }

    let end = 2 + host_len + 1 + share.find('/').unwrap_or(share.len());
    Some((&path[..end], &path[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqli::core::DBMS;
    use crate::sqli::takeover::backend::BackendDescriptor;
    use crate::sqli::takeover::prompt::BatchPrompt;
    use crate::sqli::takeover::testing::{RecordingExecutor, StubProber};

    fn session(os: Option<OS>, tmp_path: Option<&str>) -> Session {
        let mut session = Session::default();
        session.backend = BackendDescriptor::new(DBMS::MySQL);
        session.backend.os = os;
        session.config.tmp_path = tmp_path.map(str::to_string);
        session
    }

    #[test]
    fn test_normalize_remote_path() {
        assert_eq!(normalize_remote_path("C:\\Temp"), "C:/Temp");
        assert_eq!(normalize_remote_path("C:\\\\Windows\\.\\Temp\\..\\Temp\\"), "C:/Windows/Temp");
        assert_eq!(normalize_remote_path("/tmp//x/../y/"), "/tmp/y");
        assert_eq!(normalize_remote_path("/../tmp"), "/tmp");
        assert_eq!(normalize_remote_path("../a/./b"), "../a/b");
        assert_eq!(normalize_remote_path("./"), ".");
        assert_eq!(normalize_remote_path("/"), "/");
    }

    #[test]
    fn test_normalize_keeps_leading_double_separator() {
        assert_eq!(normalize_remote_path("\\\\srv\\share\\x\\..\\y"), "//srv/share/y");
        assert_eq!(normalize_remote_path("\\\\srv\\share\\..\\y"), "//srv/share/y");
        assert_eq!(normalize_remote_path("//srv/share"), "//srv/share");
        assert_eq!(normalize_remote_path("//tmp"), "//tmp");
        assert_eq!(normalize_remote_path("///tmp"), "/tmp");
    }

    #[test]
    fn test_windows_drive_detection() {
        assert!(is_windows_drive_path("C:\\Temp"));
        assert!(is_windows_drive_path("d:/stage"));
        assert!(!is_windows_drive_path("C:Temp"));
        assert!(!is_windows_drive_path("/tmp"));
        assert!(!is_windows_drive_path("CD:/x"));
    }

    #[test]
    fn test_windows_defaults_by_family() {
        assert_eq!(windows_temp_path(Some("2000")), "C:/WINNT/Temp");
        assert_eq!(windows_temp_path(Some("NT")), "C:/WINNT/Temp");
        assert_eq!(
            windows_temp_path(Some("XP")),
            "C:/Documents and Settings/All Users/Application Data/TEMP"
        );
        assert_eq!(windows_temp_path(Some("7")), "C:/Users/All Users/Application Data/TEMP");
        assert_eq!(windows_temp_path(None), "C:/Users/All Users/Application Data/TEMP");
    }

    #[tokio::test]
    async fn test_unknown_os_defaults_to_tmp() {
        let executor = RecordingExecutor::new();
        let prober = StubProber::new(Some(OS::Windows), Some("2003"));
        let takeover = Takeover::new(&executor, &prober, &BatchPrompt);
        let mut session = session(None, None);

        let path = takeover.resolve_temp_path(&mut session).await;
        assert_eq!(path, "/tmp");
        assert_eq!(session.config.tmp_path.as_deref(), Some("/tmp"));
        assert_eq!(session.remote_paths.temp.as_deref(), Some("/tmp"));
        assert_eq!(prober.calls(), 0);
        assert!(executor.statements().is_empty());
    }

    #[tokio::test]
    async fn test_windows_probes_for_version() {
        let executor = RecordingExecutor::new();
        let prober = StubProber::new(Some(OS::Windows), Some("2003"));
        let takeover = Takeover::new(&executor, &prober, &BatchPrompt);
        let mut session = session(Some(OS::Windows), None);

        let path = takeover.resolve_temp_path(&mut session).await;
        assert_eq!(path, "C:/Documents and Settings/All Users/Application Data/TEMP");
        assert_eq!(prober.calls(), 1);
    }

    #[tokio::test]
    async fn test_configured_drive_path_marks_windows() {
        let executor = RecordingExecutor::new();
        let prober = StubProber::silent();
        let takeover = Takeover::new(&executor, &prober, &BatchPrompt);
        let mut session = session(Some(OS::Linux), Some("C:\\Temp"));

        let path = takeover.resolve_temp_path(&mut session).await;
        assert_eq!(path, "C:/Temp");
        assert!(session.backend.is_os(OS::Windows));
        assert_eq!(session.remote_paths.stage_path("x.dll").as_deref(), Some("C:/Temp/x.dll"));
        assert_eq!(prober.calls(), 0);
    }

    #[tokio::test]
    async fn test_configured_posix_path_is_normalized() {
        let executor = RecordingExecutor::new();
        let prober = StubProber::silent();
        let takeover = Takeover::new(&executor, &prober, &BatchPrompt);
        let mut session = session(None, Some("/var//tmp/./stage/"));

        assert_eq!(takeover.resolve_temp_path(&mut session).await, "/var/tmp/stage");
        assert_eq!(session.backend.os, None);
    }
}
