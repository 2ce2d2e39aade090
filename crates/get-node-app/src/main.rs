//! get-node-app - scaffold a Node.js project from a template catalog

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use get_node_app_core::config::{AppConfig, TEMPLATES_REPO_URL};
use get_node_app_core::env::{SystemCommands, SystemProbe};
use get_node_app_core::phrases::random_phrase;
use get_node_app_core::setup::InstallRunner;
use get_node_app_core::tui::{banner, CliFeedback, CliSelector};
use get_node_app_core::{Collaborators, HttpCatalog, Outcome, Pipeline, PipelineOptions};
use std::process::ExitCode;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "get-node-app")]
#[command(about = "Create a Node.js project from a template")]
#[command(version)]
pub struct Args {
    /// Keep the session log and print its location
    #[arg(short, long)]
    pub debug: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = AppConfig::from_env(CLI_VERSION)?;

    println!("{}", banner(CLI_VERSION));
    if args.debug {
        println!("{}", "> debug mode enabled".yellow());
    }

    let project_root = std::env::current_dir().context("Failed to read current directory")?;

    let probe = SystemProbe::new(SystemCommands);
    let catalog = HttpCatalog::new(config.template_source.clone(), &config.user_agent);
    let setup = InstallRunner;
    let mut selector = CliSelector;
    let mut feedback = CliFeedback::new();

    let pipeline = Pipeline::new(
        Collaborators {
            probe: &probe,
            catalog: &catalog,
            selector: &mut selector,
            setup: &setup,
            feedback: &mut feedback,
        },
        PipelineOptions {
            debug: args.debug,
            data_root: config.data_root.clone(),
            project_root,
            catalog_link: Some(TEMPLATES_REPO_URL.to_string()),
        },
    );
    let outcome = pipeline.run().await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Outcome::Done(completion) = &outcome {
        println!();
        println!("＼(＾O＾)／ All set");
        println!();
        println!("  Next steps");
        println!();
        println!("  1.  cd {}", completion.project_dir.display());
        println!();
        println!("{}", random_phrase().magenta().bold());
    }

    Ok(ExitCode::from(outcome.exit_code()))
}
