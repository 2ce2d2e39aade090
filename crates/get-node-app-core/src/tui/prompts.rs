//! Charm-style template and project name prompts

use crate::error::ScaffoldError;
use crate::select::{validate_project_name, Answers, Selector};
use crate::session::ProjectName;
use crate::templates::TemplateDescriptor;
use std::io;

/// Selector backed by cliclack prompts on the terminal
#[derive(Debug, Default)]
pub struct CliSelector;

impl Selector for CliSelector {
    fn prompt(&mut self, catalog: &[TemplateDescriptor]) -> Result<Answers, ScaffoldError> {
        let mut select = cliclack::select("Select Template");
        for template in catalog {
            select = select.item(template.name.clone(), &template.name, "");
        }
        let template_name: String = select.interact().map_err(prompt_error)?;

        // cliclack re-prompts until the validator passes
        let input: String = cliclack::input("Enter Project Name")
            .placeholder("my-node-app")
            .validate(|input: &String| validate_project_name(input))
            .interact()
            .map_err(prompt_error)?;
        let project_name = ProjectName::parse(input).map_err(ScaffoldError::aborted)?;

        Ok(Answers {
            template_name,
            project_name,
        })
    }
}

fn prompt_error(err: io::Error) -> ScaffoldError {
    if err.kind() == io::ErrorKind::Interrupted {
        ScaffoldError::aborted("Prompt cancelled")
    } else {
        ScaffoldError::aborted(format!("Prompt failed: {}", err))
    }
}
