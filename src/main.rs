mod cli;
mod core;
mod http;
mod reporting;
mod sqli;

use clap::{CommandFactory, Parser};
use crate::cli::args::Cli;
use crate::core::context::Context;
use crate::core::engine::Engine;
use std::env;
use tracing::Level;

const BANNER: &str = r#"
 ╔════════════════════════════════════════════════════════════════════╗
 ║                                                                    ║
 ║     █████╗ ███╗   ██╗██╗   ██╗██╗██╗                               ║
 ║    ██╔══██╗████╗  ██║██║   ██║██║██║                               ║
 ║    ███████║██╔██╗ ██║██║   ██║██║██║         ─ POST ─              ║
 ║    ██╔══██║██║╚██╗██║╚██╗ ██╔╝██║██║                               ║
 ║    ██║  ██║██║ ╚████║ ╚████╔╝ ██║███████╗                          ║
 ║    ╚═╝  ╚═╝╚═╝  ╚═══╝  ╚═══╝  ╚═╝╚══════╝                          ║
 ║                                                                    ║
 ║    Post-exploitation helpers for confirmed SQL injections          ║
 ║                                                                    ║
 ╚════════════════════════════════════════════════════════════════════╝
"#;

fn print_banner() {
    println!("\x1b[36m{}\x1b[0m", BANNER);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_banner();
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let cli = Cli::parse();

    if !cli.quiet {
        print_banner();
    }

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();

    let ctx = Context::from_cli(cli)?;
    let engine = Engine::new(ctx)?;
    engine.run().await?;

    Ok(())
}
