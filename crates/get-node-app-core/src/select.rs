//! Template and project name selection

use crate::error::ScaffoldError;
use crate::session::ProjectName;
use crate::templates::TemplateDescriptor;

/// What the user chose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub template_name: String,
    pub project_name: ProjectName,
}

/// Interactive choice of template and project name
///
/// Implementations re-prompt until the project name is valid and return
/// [`ScaffoldError::InputAborted`] if the user cancels.
pub trait Selector {
    fn prompt(&mut self, catalog: &[TemplateDescriptor]) -> Result<Answers, ScaffoldError>;
}

/// Inline validation for the project name field
pub fn validate_project_name(input: &str) -> Result<(), &'static str> {
    ProjectName::parse(input).map(|_| ())
}
