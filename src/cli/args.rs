use clap::Parser;

/// ANVIL-POST – post-exploitation helpers for confirmed SQL injections
#[derive(Parser, Debug)]
#[command(
    name = "anvil-post",
    version,
    author = "Siddhant Bhattarai",
    about = "ANVIL-POST – post-exploitation helpers for confirmed SQL injections",
    long_about = r#"
ANVIL-POST works on an injection point that ANVIL has already confirmed.
It does not detect anything on its own: tell it the DBMS, the UNION layout
and whether stacked queries work, and it will:

  • Resolve a writable remote temporary directory
  • Extract the DBMS version from its banner
  • Search table names (LIKE or exact matching)
  • Delete staged files on the database host
  • Drop helper tables and planted UDFs (with confirmation)
"#,
    after_help = r#"EXAMPLES:

  anvil-post -t "https://example.com/item?id=1" -p id --dbms mysql --union-cols 3 --banner-version
  anvil-post -t "https://example.com/item?id=1" -p id --dbms pgsql --stacked --tmp-path-resolve
  anvil-post -t "https://example.com/item?id=1" -p id --dbms pgsql --stacked --cleanup
  anvil-post -t "https://example.com/item?id=1" -p id --dbms mysql --stacked --cleanup --batch
  anvil-post -t "https://example.com/item?id=1" -p id --dbms mysql --search-table user --answers 2"#
)]
pub struct Cli {
    /// Target URL (e.g. https://example.com/page.php?id=1)
    #[arg(short, long, required = true)]
    pub target: String,

    /// Vulnerable parameter
    #[arg(short, long, required = true)]
    pub param: String,

    // ═══════════════════════════════════════════════════════════════════
    // INJECTION
    // ═══════════════════════════════════════════════════════════════════

    /// Back-end DBMS (mysql, pgsql, mssql, oracle, sqlite, access)
    #[arg(long, help_heading = "INJECTION")]
    pub dbms: String,

    /// Back-end operating system if already known (windows, linux, other)
    #[arg(long, help_heading = "INJECTION")]
    pub os: Option<String>,

    /// Windows release family if already known (NT, 2000, XP, 2003, ...)
    #[arg(long = "os-version", help_heading = "INJECTION")]
    pub os_version: Option<String>,

    /// Stacked queries are confirmed on this injection point
    #[arg(long, help_heading = "INJECTION")]
    pub stacked: bool,

    /// Number of columns of the UNION query
    #[arg(long = "union-cols", default_value = "1", help_heading = "INJECTION")]
    pub union_cols: usize,

    /// Column (0-indexed) reflected in the page
    #[arg(long = "union-pos", default_value = "0", help_heading = "INJECTION")]
    pub union_pos: usize,

    /// Injection payload prefix
    #[arg(long, help_heading = "INJECTION")]
    pub prefix: Option<String>,

    /// Injection payload suffix
    #[arg(long, help_heading = "INJECTION")]
    pub suffix: Option<String>,

    // ═══════════════════════════════════════════════════════════════════
    // TAKEOVER
    // ═══════════════════════════════════════════════════════════════════

    /// Remote temporary directory
    #[arg(long = "tmp-path", help_heading = "TAKEOVER")]
    pub tmp_path: Option<String>,

    /// Name of the file staging table
    #[arg(long = "file-table", help_heading = "TAKEOVER")]
    pub file_table: Option<String>,

    /// Name of the command staging table
    #[arg(long = "cmd-table", help_heading = "TAKEOVER")]
    pub cmd_table: Option<String>,

    /// A payload stager was placed in the temporary folder
    #[arg(long = "os-pwn", help_heading = "TAKEOVER")]
    pub os_pwn: bool,

    // ═══════════════════════════════════════════════════════════════════
    // ACTIONS
    // ═══════════════════════════════════════════════════════════════════

    /// Resolve the remote temporary directory
    #[arg(long = "tmp-path-resolve", help_heading = "ACTIONS")]
    pub resolve_tmp_path: bool,

    /// Extract the DBMS version from its banner
    #[arg(long = "banner-version", help_heading = "ACTIONS")]
    pub banner_version: bool,

    /// Search tables by name
    #[arg(long = "search-table", help_heading = "ACTIONS")]
    pub search_table: Option<String>,

    /// Delete a file on the database host
    #[arg(long = "del-file", help_heading = "ACTIONS")]
    pub del_file: Vec<String>,

    /// Drop helper tables and UDFs
    #[arg(long, help_heading = "ACTIONS")]
    pub cleanup: bool,

    /// Drop only the file staging tables
    #[arg(long = "cleanup-artifacts", help_heading = "ACTIONS", conflicts_with = "cleanup")]
    pub cleanup_artifacts: bool,

    // ═══════════════════════════════════════════════════════════════════
    // INTERACTION
    // ═══════════════════════════════════════════════════════════════════

    /// Never ask, use default answers
    #[arg(long, help_heading = "INTERACTION")]
    pub batch: bool,

    /// Comma-separated answers to replay for prompts
    #[arg(long, help_heading = "INTERACTION", conflicts_with = "batch")]
    pub answers: Option<String>,

    // ═══════════════════════════════════════════════════════════════════
    // REQUEST
    // ═══════════════════════════════════════════════════════════════════

    /// Requests per second
    #[arg(long, default_value = "10", help_heading = "REQUEST")]
    pub rate: u32,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", help_heading = "REQUEST")]
    pub timeout: u64,

    /// Cookie header value
    #[arg(long, help_heading = "REQUEST")]
    pub cookie: Option<String>,

    /// Extra header ("Name: value"), repeatable
    #[arg(short = 'H', long = "header", help_heading = "REQUEST")]
    pub headers: Vec<String>,

    // ═══════════════════════════════════════════════════════════════════
    // OUTPUT
    // ═══════════════════════════════════════════════════════════════════

    /// Output format (text, json)
    #[arg(long, default_value = "text", help_heading = "OUTPUT")]
    pub format: String,

    /// Write the summary to a file
    #[arg(short, long, help_heading = "OUTPUT")]
    pub output: Option<String>,

    /// Show statements and payloads
    #[arg(short, long, help_heading = "OUTPUT")]
    pub verbose: bool,

    /// Only warnings and errors
    #[arg(short, long, help_heading = "OUTPUT", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn has_action(&self) -> bool {
        self.resolve_tmp_path
            || self.banner_version
            || self.search_table.is_some()
            || !self.del_file.is_empty()
            || self.cleanup
            || self.cleanup_artifacts
    }
}
