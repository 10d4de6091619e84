//! DBMS version extraction from the banner

use super::error::{TakeoverError, TakeoverResult};
use super::session::{BannerFingerprint, Session};
use super::Takeover;
use crate::sqli::core::{Agent, Queries, BANNER_NOISE, DBMS};

/// Banner substring `(first, length)` holding the version number
pub fn banner_window(dbms: DBMS) -> TakeoverResult<(usize, usize)> {
    match dbms {
        DBMS::MySQL => Ok((1, 6)),
        DBMS::PostgreSQL => Ok((12, 6)),
        DBMS::MSSQL => Ok((29, 9)),
        DBMS::Unknown => Err(TakeoverError::UnknownDbms),
        other => Err(TakeoverError::UnsupportedFeature(format!(
            "version extraction from the banner is not supported on {}",
            other
        ))),
    }
}

/// Strip the separators banners pad their version numbers with
pub fn clean_version(raw: Option<&str>) -> String {
    raw.unwrap_or_default()
        .chars()
        .filter(|c| !BANNER_NOISE.contains(c))
        .collect()
}

impl Takeover<'_> {
    /// Query the banner once and cache the version token in the fingerprint
    pub async fn version_from_banner(&self, session: &mut Session) -> TakeoverResult<()> {
        if session.banner_fp.contains(BannerFingerprint::DBMS_VERSION) {
            return Ok(());
        }

        tracing::info!("detecting back-end DBMS version from its banner");

        let dbms = session.backend.identified_dbms()?;
        let (first, length) = banner_window(dbms)?;

        let queries = Queries::new(dbms);
        let mut query = queries.substring(queries.banner(), first, length);
        if session.config.direct {
            query = Agent::select_expression(&query);
        }

        let raw = self.executor.injected_query(&query, false).await?;
        let version = clean_version(raw.as_deref());
        tracing::debug!("back-end DBMS version token: '{}'", version);

        session.banner_fp.set_once(BannerFingerprint::DBMS_VERSION, version);
        Ok(())
    }
}
