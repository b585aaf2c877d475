//! Progress reporting for the scaffold run

use crate::scaffold::Step;
use colored::Colorize;

/// Receives progress from [`crate::Scaffolder::run`]
///
/// Recoverable failures arrive through [`Reporter::warning`]; fatal ones are
/// returned as errors instead.
pub trait Reporter {
    /// A step is about to start
    fn step(&mut self, step: Step);

    fn success(&mut self, message: &str);

    fn warning(&mut self, message: &str);

    fn info(&mut self, message: &str);

    fn error(&mut self, message: &str);
}

/// Plain terminal output
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn step(&mut self, step: Step) {
        println!("  {} {}", "->".blue(), step.description());
    }

    fn success(&mut self, message: &str) {
        println!("     {} {}", "done".green(), message);
    }

    fn warning(&mut self, message: &str) {
        println!("     {} {}", "Warning:".yellow(), message);
    }

    fn info(&mut self, message: &str) {
        println!("     {}", message.dimmed());
    }

    fn error(&mut self, message: &str) {
        eprintln!("{} {}", "Error:".red(), message);
    }
}

/// Collects every report, for tests and embedding
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingReporter {
    pub steps: Vec<Step>,
    pub successes: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub errors: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn step(&mut self, step: Step) {
        self.steps.push(step);
    }

    fn success(&mut self, message: &str) {
        self.successes.push(message.to_string());
    }

    fn warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
