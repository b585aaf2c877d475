//! pyrepo CLI - scaffold a Python repository from config/conf.ini

use anyhow::Result;
use clap::Parser;
use pyrepo_core::{ConsoleReporter, ScaffoldOptions};
use std::process::ExitCode;

/// Scaffolds a Python repository in the current directory from `config/conf.ini`
#[derive(Parser, Debug)]
#[command(name = "pyrepo")]
#[command(about = "CLI for scaffolding Python repositories")]
#[command(version)]
pub struct Args {}

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

    let _args = Args::parse();

    let root = std::env::current_dir()?;
    let options = ScaffoldOptions::from_env(root)?;

    let result = if console::Term::stdout().is_term() {
        pyrepo_core::run(&options).await
    } else {
        // Plain output when piped or logged
        Ok(pyrepo_core::scaffold_and_report(&options, &mut ConsoleReporter).await)
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    // Fatal errors were already shown by the reporter
    Ok(if result? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
