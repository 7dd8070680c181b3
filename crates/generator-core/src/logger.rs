//! Progress reporting for the generation steps

use colored::Colorize;

/// Receives progress notifications. Nothing is returned to the caller.
pub trait Logger {
    /// A major step is starting (e.g. "Copying files...")
    fn process(&self, message: &str);

    /// Detail only shown in verbose mode (e.g. each written file)
    fn verbose_info(&self, message: &str);
}

/// Logger printing to stdout with terminal styling
#[derive(Debug, Clone, Default)]
pub struct ConsoleLogger {
    verbose: bool,
}

impl ConsoleLogger {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Logger for ConsoleLogger {
    fn process(&self, message: &str) {
        println!("{} {}", "->".blue(), message.cyan());
    }

    fn verbose_info(&self, message: &str) {
        if self.verbose {
            println!("   {}", message.dimmed());
        }
    }
}
