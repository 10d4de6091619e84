//! Removal of the helper tables and UDFs left on the target

use super::error::TakeoverResult;
use super::prompt::confirm;
use super::session::Session;
use super::udf::{UdfRegistry, UdfSignature};
use super::{DropOutcome, Takeover};
use crate::sqli::core::{Technique, DBMS, OS};
use serde::Serialize;

/// What a cleanup run did
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanupReport {
    /// Cleanup needs a channel able to run independent statements
    pub skipped: bool,
    pub statements: Vec<String>,
    pub suppressed: usize,
    pub udfs_dropped: Vec<String>,
    /// DROP FUNCTION issued but not confirmed by the server
    pub udfs_failed: Vec<String>,
    pub udfs_kept: Vec<String>,
    pub advisory: Option<String>,
}

impl CleanupReport {
    /// Log a statement; returns whether it went through
    fn record(&mut self, sql: String, outcome: DropOutcome) -> bool {
        self.statements.push(sql);
        match outcome {
            DropOutcome::Done => true,
            DropOutcome::Suppressed(_) => {
                self.suppressed += 1;
                false
            }
        }
    }
}

/// Whether UDF artifacts on this engine are handled by cleanup
pub fn manages_udfs(dbms: DBMS) -> bool {
    // MSSQL takeover relies on extended procedures, not planted UDFs
    !matches!(dbms, DBMS::MSSQL)
}

/// DROP FUNCTION statement; PostgreSQL needs the signature to pick an overload
pub fn drop_function_statement(dbms: DBMS, udf: &UdfSignature) -> String {
    match dbms {
        DBMS::PostgreSQL => format!("DROP FUNCTION {}({})", udf.name, udf.parameter_list()),
        _ => format!("DROP FUNCTION {}", udf.name),
    }
}

fn advisory(os: Option<OS>, os_pwn: bool) -> String {
    let mut msg = format!("remember that UDF {} files ", OS::library_label(os));

    if os_pwn {
        msg.push_str("and payload stager files in the temporary folder ");
    }

    msg.push_str("saved on the file system can only be deleted manually");
    msg
}

impl Takeover<'_> {
    /// Drop helper tables and, unless `only_artifacts`, the planted UDFs
    pub async fn cleanup(
        &self,
        session: &Session,
        only_artifacts: bool,
        udfs: Option<&UdfRegistry>,
    ) -> TakeoverResult<CleanupReport> {
        let mut report = CleanupReport::default();

        if !session.is_technique_available(Technique::Stacked) && !session.config.direct {
            report.skipped = true;
            return Ok(report);
        }

        let dbms = session.backend.identified_dbms()?;

        if only_artifacts {
            tracing::debug!("cleaning up the database management system");
        } else {
            tracing::info!("cleaning up the database management system");
        }

        tracing::debug!("removing support tables");
        let artifacts = &session.artifacts;
        for table in [artifacts.file_table.clone(), artifacts.hex_file_table()] {
            let sql = format!("DROP TABLE {}", table);
            let outcome = self.best_effort(&sql).await;
            report.record(sql, outcome);
        }

        if only_artifacts {
            return Ok(report);
        }

        let sql = format!("DROP TABLE {}", artifacts.cmd_table);
        let outcome = self.best_effort(&sql).await;
        report.record(sql, outcome);

        if !manages_udfs(dbms) {
            return Ok(report);
        }

        let system = UdfRegistry::system();
        let registry = udfs.unwrap_or(&system);

        for udf in registry.iter() {
            let message = format!("do you want to remove UDF '{}'? [Y/n] ", udf.name);

            if confirm(self.prompt, &message)? {
                tracing::debug!("removing UDF '{}'", udf.name);
                let sql = drop_function_statement(dbms, udf);
                let outcome = self.best_effort(&sql).await;
                if report.record(sql, outcome) {
                    report.udfs_dropped.push(udf.name.clone());
                } else {
                    report.udfs_failed.push(udf.name.clone());
                }
            } else {
                report.udfs_kept.push(udf.name.clone());
            }
        }

        tracing::info!("database management system cleanup finished");

        let msg = advisory(session.backend.os, session.config.os_pwn);
        tracing::warn!("{}", msg);
        report.advisory = Some(msg);

        Ok(report)
    }
}
