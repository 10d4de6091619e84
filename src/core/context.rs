//! Run configuration built from the command line

use crate::cli::args::Cli;
use crate::core::scope::Scope;
use crate::sqli::core::{Technique, DBMS, OS};
use crate::sqli::executor::UnionShape;
use crate::sqli::takeover::{BackendDescriptor, Session, SessionConfig};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// How prompts are answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptMode {
    Interactive,
    Batch,
    Scripted(Vec<String>),
}

/// Requested post-exploitation actions, run in this order
#[derive(Debug, Clone, Default)]
pub struct Actions {
    pub resolve_tmp_path: bool,
    pub banner_version: bool,
    pub search_table: Option<String>,
    pub del_files: Vec<String>,
    pub cleanup: bool,
    pub cleanup_artifacts: bool,
}

pub struct Context {
    pub target: Url,
    pub parameter: String,
    pub scope: Scope,
    pub rate_limit: u32,
    pub timeout: Duration,
    pub cookies: Option<String>,
    pub headers: HashMap<String, String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub union: UnionShape,
    pub prompt_mode: PromptMode,
    pub actions: Actions,
    pub output_format: String,
    pub output_file: Option<String>,
    /// Initial session state for the target
    pub session: Session,
}

impl Context {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        if !cli.has_action() {
            anyhow::bail!("no action requested (see --help for ACTIONS)");
        }

        let target = Url::parse(&cli.target)?;
        let scope = Scope::new(&cli.target)?;

        let dbms: DBMS = cli.dbms.parse()?;
        let mut backend = BackendDescriptor::new(dbms);
        if let Some(os) = &cli.os {
            backend.set_os(os.parse::<OS>()?);
        }
        if let Some(version) = cli.os_version {
            backend.set_os_version(version);
        }

        let config = SessionConfig {
            tmp_path: cli.tmp_path,
            direct: false,
            os_pwn: cli.os_pwn,
        };

        let mut session = Session::new(backend, config);
        session.techniques.insert(Technique::Union);
        if cli.stacked {
            session.techniques.insert(Technique::Stacked);
        }
        if let Some(name) = cli.file_table {
            session.artifacts.file_table = name;
        }
        if let Some(name) = cli.cmd_table {
            session.artifacts.cmd_table = name;
        }

        if cli.union_pos >= cli.union_cols.max(1) {
            anyhow::bail!(
                "--union-pos {} is outside a {}-column UNION",
                cli.union_pos,
                cli.union_cols
            );
        }

        let mut headers = HashMap::new();
        for header in &cli.headers {
            if let Some((key, value)) = header.split_once(':') {
                headers.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        let prompt_mode = match (cli.batch, cli.answers) {
            (true, _) => PromptMode::Batch,
            (false, Some(answers)) => {
                PromptMode::Scripted(answers.split(',').map(|a| a.trim().to_string()).collect())
            }
            (false, None) => PromptMode::Interactive,
        };

        let actions = Actions {
            resolve_tmp_path: cli.resolve_tmp_path,
            banner_version: cli.banner_version,
            search_table: cli.search_table,
            del_files: cli.del_file,
            cleanup: cli.cleanup,
            cleanup_artifacts: cli.cleanup_artifacts,
        };

        Ok(Self {
            target,
            parameter: cli.param,
            scope,
            rate_limit: cli.rate,
            timeout: Duration::from_secs(cli.timeout),
            cookies: cli.cookie,
            headers,
            prefix: cli.prefix,
            suffix: cli.suffix,
            union: UnionShape {
                count: cli.union_cols.max(1),
                position: cli.union_pos,
            },
            prompt_mode,
            actions,
            output_format: cli.format.to_lowercase(),
            output_file: cli.output,
            session,
        })
    }
}
