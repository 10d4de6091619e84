//! Core settings and constants for SQL injection

/// NULL value for SQL
pub const NULL: &str = "NULL";

/// Random markers for extraction
pub const CHAR_START: &str = "qvxvq";
pub const CHAR_STOP: &str = "qpkpq";

/// Default names of the helper tables created on the target
pub const FILE_TABLE_PREFIX: &str = "anvilfile";
pub const CMD_TABLE_PREFIX: &str = "anvilcmd";

/// Suffix of the hex-encoded companion of the file table
pub const HEX_TABLE_SUFFIX: &str = "hex";

/// Remote temporary directories
pub const POSIX_TEMP_PATH: &str = "/tmp";
pub const WINNT_TEMP_PATH: &str = "C:/WINNT/Temp";
pub const WIN_XP_TEMP_PATH: &str = "C:/Documents and Settings/All Users/Application Data/TEMP";
pub const WIN_TEMP_PATH: &str = "C:/Users/All Users/Application Data/TEMP";

/// Windows version families that still use the legacy layouts
pub const WINNT_VERSIONS: &[&str] = &["2000", "NT"];
pub const WIN_XP_VERSIONS: &[&str] = &["2003", "XP"];

/// Banner characters stripped from an extracted version token
pub const BANNER_NOISE: &[char] = &[',', '-', ' '];

/// Windows NT kernel version to release family
pub const WINDOWS_NT_VERSIONS: &[(&str, &str)] = &[
    ("4.0", "NT"),
    ("5.0", "2000"),
    ("5.1", "XP"),
    ("5.2", "2003"),
    ("6.0", "Vista"),
    ("6.1", "7"),
    ("6.2", "8"),
    ("6.3", "8.1"),
    ("10.0", "10"),
];
