//! Spinner and error block rendering

use crate::pipeline::{ErrorReport, Feedback};
use cliclack::ProgressBar;
use colored::Colorize;

/// ASCII banner shown at startup
pub fn banner(version: &str) -> String {
    format!(
        r" _  _  _
/_\/\/ //_| v{}
_/",
        version
    )
    .magenta()
    .bold()
    .to_string()
}

/// Terminal feedback with one spinner per running stage
#[derive(Default)]
pub struct CliFeedback {
    spinner: Option<ProgressBar>,
}

impl CliFeedback {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Feedback for CliFeedback {
    fn start(&mut self, label: &str) {
        let spinner = cliclack::spinner();
        spinner.start(label);
        self.spinner = Some(spinner);
    }

    fn succeed(&mut self, message: &str) {
        match self.spinner.take() {
            Some(spinner) => spinner.stop(message),
            None => {
                let _ = cliclack::log::success(message);
            }
        }
    }

    fn fail(&mut self, message: &str) {
        match self.spinner.take() {
            Some(spinner) => spinner.error(message),
            None => {
                let _ = cliclack::log::error(message);
            }
        }
    }

    fn report(&mut self, report: &ErrorReport) {
        eprintln!();
        eprintln!(
            "{} {}",
            report.kind.name().red().bold(),
            format!("(halted at {})", report.stage).dimmed()
        );
        for (field, value) in &report.fields {
            let mut lines = value.lines();
            eprintln!(
                "  {} {}",
                format!("{}:", field.label()).yellow(),
                lines.next().unwrap_or("")
            );
            for line in lines {
                eprintln!("    {}", line);
            }
        }
        eprintln!();
    }

    fn note(&mut self, message: &str) {
        let _ = cliclack::log::info(message);
    }
}
