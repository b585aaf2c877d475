//! Scaffold orchestration
//!
//! [`Scaffolder`] runs every step once, in a fixed order. Each step delegates
//! to one component; components never call each other. Command failures in
//! the environment, lint and script steps abort the run. Network failures
//! in the ignore-file and license steps, and any git setup failure, are
//! reported as warnings and the run continues.

use crate::config::ProjectConfig;
use crate::error::{ErrorKind, Result, ScaffoldError};
use crate::generate::{pyproject, readme::ReadmeBuilder, requirements};
use crate::options::ScaffoldOptions;
use crate::report::Reporter;
use crate::runtime::{
    CommandOutcome, CommandRunner, EnvironmentProvisioner, GitSetup, GitSetupOutcome,
    LintConfigWriter, Platform, ScriptRunner,
};
use crate::templates::{IgnoreFileGenerator, LicenseFetcher, LicenseStatus, TextFetcher};
use std::fmt;

/// One stage of the scaffold, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Requirements,
    Environment,
    LintConfig,
    GitSetup,
    IgnoreFile,
    Scripts,
    BuildMetadata,
    License,
    Readme,
}

impl Step {
    pub const ALL: [Step; 9] = [
        Step::Requirements,
        Step::Environment,
        Step::LintConfig,
        Step::GitSetup,
        Step::IgnoreFile,
        Step::Scripts,
        Step::BuildMetadata,
        Step::License,
        Step::Readme,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Step::Requirements => "Writing requirements file",
            Step::Environment => "Creating virtual environment",
            Step::LintConfig => "Generating lint configuration",
            Step::GitSetup => "Running git setup",
            Step::IgnoreFile => "Generating .gitignore",
            Step::Scripts => "Running setup scripts",
            Step::BuildMetadata => "Writing pyproject.toml",
            Step::License => "Fetching LICENSE",
            Step::Readme => "Generating README.md",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub completed: Vec<Step>,
    pub warnings: usize,
}

/// Counts warnings on their way to the caller's reporter
struct Counting<'a> {
    inner: &'a mut dyn Reporter,
    warnings: usize,
}

impl Reporter for Counting<'_> {
    fn step(&mut self, step: Step) {
        self.inner.step(step);
    }

    fn success(&mut self, message: &str) {
        self.inner.success(message);
    }

    fn warning(&mut self, message: &str) {
        self.warnings += 1;
        self.inner.warning(message);
    }

    fn info(&mut self, message: &str) {
        self.inner.info(message);
    }

    fn error(&mut self, message: &str) {
        self.inner.error(message);
    }
}

pub struct Scaffolder {
    options: ScaffoldOptions,
    config: ProjectConfig,
    platform: Platform,
    git_setup: GitSetup,
    runner: CommandRunner,
    fetcher: TextFetcher,
}

impl Scaffolder {
    pub fn new(options: ScaffoldOptions, config: ProjectConfig) -> Result<Self> {
        Self::with_platform(options, config, Platform::detect())
    }

    pub fn with_platform(
        options: ScaffoldOptions,
        config: ProjectConfig,
        platform: Platform,
    ) -> Result<Self> {
        let git_setup = GitSetup::for_platform(platform, &options.layout);
        let runner = CommandRunner::new(&options.layout.root);
        let fetcher = TextFetcher::new(&options.user_agent, options.http_timeout)?;
        Ok(Self {
            options,
            config,
            platform,
            git_setup,
            runner,
            fetcher,
        })
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn options(&self) -> &ScaffoldOptions {
        &self.options
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Run every step in order
    pub async fn run(&self, reporter: &mut dyn Reporter) -> Result<Summary> {
        self.run_steps(&Step::ALL, reporter).await
    }

    /// Run `steps` in the order given, stopping at the first fatal error
    pub async fn run_steps(&self, steps: &[Step], reporter: &mut dyn Reporter) -> Result<Summary> {
        let mut counting = Counting {
            inner: reporter,
            warnings: 0,
        };
        let mut completed = Vec::with_capacity(steps.len());

        for &step in steps {
            counting.step(step);
            self.run_step(step, &mut counting).await?;
            completed.push(step);
        }

        Ok(Summary {
            completed,
            warnings: counting.warnings,
        })
    }

    async fn run_step(&self, step: Step, reporter: &mut dyn Reporter) -> Result<()> {
        let layout = &self.options.layout;
        let settings = &self.config.settings;

        match step {
            Step::Requirements => {
                let dependencies = self.config.require_dependencies()?;
                let count =
                    requirements::write_requirements(&layout.requirements, dependencies).await?;
                reporter.success(&format!(
                    "Wrote {} dependencies to {}",
                    count,
                    layout.relative(&layout.requirements).display()
                ));
            }
            Step::Environment => {
                let provisioner = EnvironmentProvisioner::new(&settings.python, &layout.venv);
                provisioner.provision(&self.runner, true).await?;
                reporter.success(&format!(
                    "Created {}",
                    layout.relative(&layout.venv).display()
                ));
            }
            Step::LintConfig => {
                let writer = LintConfigWriter::new(&settings.linter, &layout.lint_config);
                writer.write(&self.runner, true).await?;
                reporter.success(&format!(
                    "Wrote {}",
                    layout.relative(&layout.lint_config).display()
                ));
            }
            Step::GitSetup => match self.git_setup.run(&self.runner).await? {
                GitSetupOutcome::Completed => reporter.success(&format!(
                    "Git setup ({}) completed successfully",
                    self.git_setup.label()
                )),
                GitSetupOutcome::Failed { message } => reporter.warning(&message),
                GitSetupOutcome::Skipped => {
                    reporter.warning(&format!("Git setup skipped on {}", self.platform))
                }
            },
            Step::IgnoreFile => {
                let generator = IgnoreFileGenerator::new(
                    self.fetcher.clone(),
                    self.options.gitignore_url.clone(),
                    &layout.template_cache,
                    &layout.gitignore,
                );
                let result = generator.generate(&settings.gitignore_templates).await;
                if let Some(report) = downgrade_network(result, reporter)? {
                    for (name, status) in &report.skipped {
                        reporter.warning(&format!(
                            "Failed to fetch {} template. HTTP Status Code: {}",
                            name, status
                        ));
                    }
                    reporter.success(&format!(
                        "Wrote {} from {} template(s)",
                        layout.relative(&layout.gitignore).display(),
                        report.written.len()
                    ));
                }
            }
            Step::Scripts => {
                if settings.scripts.is_empty() {
                    reporter.info("No scripts configured");
                }
                let scripts = ScriptRunner::default();
                for script in &settings.scripts {
                    let path = layout.resolve(script);
                    let outcome = scripts.execute(&self.runner, &path, true).await?;
                    if let CommandOutcome::Succeeded { stdout } = outcome {
                        reporter.success(&format!("{}: {}", script.display(), stdout.trim()));
                    }
                }
            }
            Step::BuildMetadata => {
                pyproject::write_pyproject(&layout.pyproject, &self.config).await?;
                reporter.success(&format!(
                    "Wrote {}",
                    layout.relative(&layout.pyproject).display()
                ));
            }
            Step::License => {
                let Some(license) = settings.license.as_deref() else {
                    reporter.warning("No License set in [Settings], skipping LICENSE");
                    return Ok(());
                };
                let fetcher = LicenseFetcher::new(
                    self.fetcher.clone(),
                    self.options.license_url.clone(),
                    &layout.license,
                );
                let result = fetcher.create_license(license).await;
                match downgrade_network(result, reporter)? {
                    Some(LicenseStatus::Written(path)) => reporter.success(&format!(
                        "Wrote {} ({})",
                        layout.relative(&path).display(),
                        license
                    )),
                    Some(LicenseStatus::Unavailable { status }) => reporter.warning(&format!(
                        "Failed to fetch license. HTTP Status Code: {}",
                        status
                    )),
                    None => {}
                }
            }
            Step::Readme => {
                let content = ReadmeBuilder::new(layout.clone()).write().await?;
                if content.description.is_empty() {
                    reporter.info("No module docstring found for the description");
                }
                reporter.success(&format!(
                    "Wrote {}",
                    layout.relative(&layout.readme).display()
                ));
            }
        }

        Ok(())
    }

    /// Follow-up commands shown after a successful run
    pub fn next_steps(&self) -> Vec<String> {
        let layout = &self.options.layout;
        vec![
            self.platform.activate_command(layout.relative(&layout.venv)),
            format!(
                "pip install -r {}",
                layout.relative(&layout.requirements).display()
            ),
        ]
    }
}

/// Report a network error as a warning instead of failing the step
fn downgrade_network<T>(result: Result<T>, reporter: &mut dyn Reporter) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.kind() == ErrorKind::Network => {
            reporter.warning(&err.to_string());
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Load the config named by `options` and run every step
///
/// A missing config file is reported through `reporter` and yields
/// `Ok(None)`; nothing is written in that case.
pub async fn scaffold(
    options: &ScaffoldOptions,
    reporter: &mut dyn Reporter,
) -> Result<Option<(Scaffolder, Summary)>> {
    let config = match ProjectConfig::load(&options.layout.config) {
        Ok(config) => config,
        Err(err @ ScaffoldError::ConfigNotFound(_)) => {
            reporter.error(&err.to_string());
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    let scaffolder = Scaffolder::new(options.clone(), config)?;
    let summary = scaffolder.run(reporter).await?;
    Ok(Some((scaffolder, summary)))
}

/// Run [`scaffold`], reporting a fatal error through `reporter` instead of returning it
///
/// Returns `false` only when the run stopped on a fatal error.
pub async fn scaffold_and_report(
    options: &ScaffoldOptions,
    reporter: &mut dyn Reporter,
) -> bool {
    match scaffold(options, reporter).await {
        Ok(_) => true,
        Err(err) => {
            reporter.error(&err.to_string());
            false
        }
    }
}
