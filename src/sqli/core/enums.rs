//! Enumerations for SQL injection

use serde::Serialize;
use std::str::FromStr;

/// Database Management System types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DBMS {
    MySQL,
    PostgreSQL,
    MSSQL,
    Oracle,
    SQLite,
    Access,
    Unknown,
}

impl std::fmt::Display for DBMS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DBMS::MySQL => write!(f, "MySQL"),
            DBMS::PostgreSQL => write!(f, "PostgreSQL"),
            DBMS::MSSQL => write!(f, "Microsoft SQL Server"),
            DBMS::Oracle => write!(f, "Oracle"),
            DBMS::SQLite => write!(f, "SQLite"),
            DBMS::Access => write!(f, "Microsoft Access"),
            DBMS::Unknown => write!(f, "Unknown"),
        }
    }
}

impl FromStr for DBMS {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(DBMS::MySQL),
            "postgresql" | "postgres" | "pgsql" => Ok(DBMS::PostgreSQL),
            "mssql" | "sqlserver" | "microsoft sql server" => Ok(DBMS::MSSQL),
            "oracle" => Ok(DBMS::Oracle),
            "sqlite" => Ok(DBMS::SQLite),
            "access" | "msaccess" => Ok(DBMS::Access),
            other => anyhow::bail!("unknown DBMS '{}'", other),
        }
    }
}

/// Operating system family of the database server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OS {
    Windows,
    Linux,
    Other,
}

impl OS {
    /// Label used for UDF library files on this platform
    pub fn library_label(os: Option<OS>) -> &'static str {
        match os {
            Some(OS::Windows) => "dynamic-link library",
            Some(OS::Linux) => "shared object",
            Some(OS::Other) | None => "shared library",
        }
    }
}

impl std::fmt::Display for OS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OS::Windows => write!(f, "Windows"),
            OS::Linux => write!(f, "Linux"),
            OS::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for OS {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windows" | "win" => Ok(OS::Windows),
            "linux" => Ok(OS::Linux),
            "other" | "unix" => Ok(OS::Other),
            other => anyhow::bail!("unknown OS '{}'", other),
        }
    }
}

/// SQL injection technique types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Technique {
    Union,
    Stacked,
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Technique::Union => write!(f, "UNION query"),
            Technique::Stacked => write!(f, "Stacked queries"),
        }
    }
}
