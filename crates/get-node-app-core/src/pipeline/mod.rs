//! Pipeline orchestration
//!
//! Stages run strictly in order. The first failure halts the run: it is
//! logged, shown to the user through [`Feedback`], and no later stage runs.

pub mod orchestrator;
pub mod report;
pub mod stage;

pub use orchestrator::{Collaborators, Completion, Outcome, Pipeline, PipelineOptions};
pub use report::{visible_fields, ErrorReport};
pub use stage::Stage;

/// Progress and error display for the user
pub trait Feedback {
    /// A stage began; show a progress indicator with `label`
    fn start(&mut self, label: &str);

    /// The current stage finished successfully
    fn succeed(&mut self, message: &str);

    /// The current stage failed; turn the indicator into a failure marker
    fn fail(&mut self, message: &str);

    /// Print the formatted error block after a failure
    fn report(&mut self, report: &ErrorReport);

    /// Informational line outside any stage
    fn note(&mut self, message: &str);
}
