//! Interactive front-end around [`crate::scaffold`]

use crate::options::ScaffoldOptions;
use crate::report::Reporter;
use crate::scaffold::{self, Scaffolder, Step};
use anyhow::Result;

/// Reporter writing through `cliclack::log`
#[derive(Debug, Default)]
pub struct ClackReporter;

impl Reporter for ClackReporter {
    fn step(&mut self, step: Step) {
        let _ = cliclack::log::step(step.description());
    }

    fn success(&mut self, message: &str) {
        let _ = cliclack::log::success(message);
    }

    fn warning(&mut self, message: &str) {
        let _ = cliclack::log::warning(message);
    }

    fn info(&mut self, message: &str) {
        let _ = cliclack::log::remark(message);
    }

    fn error(&mut self, message: &str) {
        let _ = cliclack::log::error(message);
    }
}

/// Run the full scaffold with cliclack output
///
/// A fatal scaffold error is shown in the outro and yields `Ok(false)`.
pub async fn run(options: &ScaffoldOptions) -> Result<bool> {
    cliclack::intro("pyrepo")?;
    cliclack::log::info(format!(
        "Using config {}",
        options.layout.relative(&options.layout.config).display()
    ))?;

    let mut reporter = ClackReporter;
    match scaffold::scaffold(options, &mut reporter).await {
        Ok(Some((scaffolder, summary))) => {
            if summary.warnings > 0 {
                cliclack::log::warning(format!(
                    "Finished with {} warning(s)",
                    summary.warnings
                ))?;
            }
            print_next_steps(&scaffolder)?;
            Ok(true)
        }
        Ok(None) => {
            cliclack::outro_cancel("Nothing was scaffolded")?;
            Ok(true)
        }
        Err(e) => {
            cliclack::outro_cancel(format!("Scaffolding stopped: {}", e))?;
            Ok(false)
        }
    }
}

fn print_next_steps(scaffolder: &Scaffolder) -> Result<()> {
    let steps = scaffolder.next_steps();

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
