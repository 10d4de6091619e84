//! Database-specific SQL queries

use super::enums::DBMS;

/// Query templates for each database type
pub struct Queries {
    pub dbms: DBMS,
}

impl Queries {
    pub fn new(dbms: DBMS) -> Self {
        Self { dbms }
    }

    /// Expression returning the DBMS banner
    pub fn banner(&self) -> &'static str {
        match self.dbms {
            DBMS::MySQL | DBMS::Unknown => "VERSION()",
            DBMS::PostgreSQL => "VERSION()",
            DBMS::MSSQL => "@@VERSION",
            DBMS::Oracle => "SELECT BANNER FROM V$VERSION WHERE ROWNUM=1",
            DBMS::SQLite => "SQLITE_VERSION()",
            DBMS::Access => "'Microsoft Access'",
        }
    }

    /// Substring of `expression`, 1-based `first`, `length` characters
    pub fn substring(&self, expression: &str, first: usize, length: usize) -> String {
        match self.dbms {
            DBMS::MySQL | DBMS::Unknown | DBMS::Access => {
                format!("MID(({}),{},{})", expression, first, length)
            }
            DBMS::PostgreSQL => {
                format!("SUBSTR(({})::text,{},{})", expression, first, length)
            }
            DBMS::MSSQL => {
                format!("SUBSTRING(({}),{},{})", expression, first, length)
            }
            DBMS::Oracle | DBMS::SQLite => {
                format!("SUBSTR(({}),{},{})", expression, first, length)
            }
        }
    }

    /// Expression revealing the server operating system, if the DBMS has one
    pub fn os_banner(&self) -> Option<&'static str> {
        match self.dbms {
            DBMS::MySQL => Some("@@version_compile_os"),
            DBMS::PostgreSQL => Some("VERSION()"),
            DBMS::MSSQL => Some("@@VERSION"),
            _ => None,
        }
    }

    /// Table names matching a condition fragment, joined with '|'
    pub fn search_tables(&self, condition: &str) -> Option<String> {
        match self.dbms {
            DBMS::MySQL => Some(format!(
                "SELECT GROUP_CONCAT(table_schema,'.',table_name SEPARATOR 0x7c) FROM information_schema.tables WHERE table_name{}",
                condition
            )),
            DBMS::PostgreSQL => Some(format!(
                "SELECT string_agg(schemaname||'.'||tablename,'|') FROM pg_tables WHERE tablename{}",
                condition
            )),
            DBMS::MSSQL => Some(format!(
                "SELECT STUFF((SELECT '|'+name FROM sysobjects WHERE xtype='U' AND name{} FOR XML PATH('')),1,1,'')",
                condition
            )),
            _ => None,
        }
    }

    /// Dummy table for FROM clause (some DBs require it)
    pub fn from_dummy(&self) -> Option<&'static str> {
        match self.dbms {
            DBMS::Oracle => Some("DUAL"),
            DBMS::Access => Some("MSysAccessObjects"),
            _ => None,
        }
    }
}
